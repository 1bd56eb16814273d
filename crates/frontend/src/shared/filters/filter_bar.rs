use contracts::metrics::{FamilyTree, LabDistributorTree, PharmacyList, ProductCodes, UniverseTree};
use contracts::shared::filters::{FilterField, FilterPatch, SelectedCategory};
use leptos::prelude::*;
use thaw::*;

use super::context::use_filters;
use super::options::{pharmacy_options, product_options, tree_options, without_selected, PickerOptions};
use crate::shared::components::date_input::DateInput;
use crate::shared::components::filter_panel::{FilterPanel, FilterTag};
use crate::shared::components::ui::Select;
use crate::shared::metric_source::provide_metric;

const PICKERS: &[(FilterField, &str)] = &[
    (FilterField::Pharmacy, "Pharmacie"),
    (FilterField::Universe, "Univers"),
    (FilterField::Category, "Catégorie"),
    (FilterField::SubCategory, "Sous-catégorie"),
    (FilterField::LabDistributor, "Laboratoire"),
    (FilterField::BrandLab, "Marque"),
    (FilterField::RangeName, "Gamme"),
    (FilterField::Family, "Famille"),
    (FilterField::SubFamily, "Sous-famille"),
    (FilterField::Product, "Produit (EAN-13)"),
];

/// Filter selection above the dashboards
#[component]
pub fn FilterBar() -> impl IntoView {
    let ctx = use_filters();
    let filters = ctx.signal();

    // Reference lists depend on no filter field: fetched once
    let never = Signal::derive(|| false);
    let pharmacies = provide_metric::<PharmacyList>(never);
    let universes = provide_metric::<UniverseTree>(never);
    let families = provide_metric::<FamilyTree>(never);
    let labs = provide_metric::<LabDistributorTree>(never);
    let products = provide_metric::<ProductCodes>(never);

    let is_expanded = RwSignal::new(true);
    let active_count = Signal::derive(move || filters.with(|f| f.active_dimension_count()));

    let options_for = move |field: FilterField| -> PickerOptions {
        let all = match field {
            FilterField::Pharmacy => pharmacies
                .data()
                .get()
                .map(|list| pharmacy_options(&list))
                .unwrap_or_default(),
            FilterField::Product => products
                .data()
                .get()
                .map(|codes| product_options(&codes))
                .unwrap_or_default(),
            _ => filters.with(|f| {
                tree_options(
                    field,
                    f,
                    universes.data().get().as_ref(),
                    families.data().get().as_ref(),
                    labs.data().get().as_ref(),
                )
            }),
        };
        let current = filters.with(|f| f.values(field));
        without_selected(all, &current)
    };

    let add_value = move |field: FilterField, value: String| {
        if value.is_empty() {
            return;
        }
        let mut values = ctx.get_untracked().values(field);
        if !values.contains(&value) {
            values.push(value);
            ctx.set_filters(FilterPatch::new().with_values(field, values));
        }
    };

    let remove_value = move |field: FilterField, value: String| {
        let values: Vec<String> = ctx
            .get_untracked()
            .values(field)
            .into_iter()
            .filter(|v| v != &value)
            .collect();
        ctx.set_filters(FilterPatch::new().with_values(field, values));
    };

    let pickers = move || {
        PICKERS
            .iter()
            .map(|(field, label)| {
                let field = *field;
                view! {
                    <Select
                        label=label.to_string()
                        value=Signal::derive(String::new)
                        options=Signal::derive(move || options_for(field))
                        placeholder="Ajouter…"
                        on_change=Callback::new(move |value: String| add_value(field, value))
                    />
                }
            })
            .collect_view()
    };

    let pharmacy_name = move |id: &str| -> String {
        pharmacies
            .data()
            .get_untracked()
            .and_then(|list| list.pharmacies.into_iter().find(|p| p.id == id))
            .map(|p| p.name)
            .unwrap_or_else(|| id.to_string())
    };

    let tags = move || {
        let current = filters.get();
        PICKERS
            .iter()
            .flat_map(|(field, label)| {
                let field = *field;
                current
                    .values(field)
                    .into_iter()
                    .map(move |value| (field, *label, value))
            })
            .map(|(field, label, value)| {
                let shown = if field == FilterField::Pharmacy {
                    pharmacy_name(&value)
                } else {
                    value.clone()
                };
                view! {
                    <FilterTag
                        label=format!("{}: {}", label, shown)
                        on_remove=Callback::new(move |_| remove_value(field, value.clone()))
                    />
                }
            })
            .collect_view()
    };

    let scope_buttons = move || {
        let current = filters.with(|f| f.selected_category.unwrap_or_default());
        SelectedCategory::all()
            .into_iter()
            .map(|category| {
                let appearance = if category == current {
                    ButtonAppearance::Primary
                } else {
                    ButtonAppearance::Secondary
                };
                view! {
                    <Button
                        size=ButtonSize::Small
                        appearance=appearance
                        on_click=move |_| {
                            ctx.set_filters(
                                FilterPatch::new().with_selected_category(Some(category)),
                            )
                        }
                    >
                        {category.display_name()}
                    </Button>
                }
            })
            .collect_view()
    };

    view! {
        <FilterPanel
            is_expanded=is_expanded
            active_filters_count=active_count
            actions=move || view! {
                <Space>
                    <ButtonGroup>{scope_buttons}</ButtonGroup>
                    <Button
                        size=ButtonSize::Small
                        appearance=ButtonAppearance::Subtle
                        on_click=move |_| ctx.clear_all_filters()
                    >
                        "Réinitialiser"
                    </Button>
                </Space>
            }
            filter_content=move || view! {
                <div class="filter-bar__grid">
                    {pickers()}
                </div>
                <div class="filter-bar__dates">
                    <DateInput
                        label="Du"
                        value=Signal::derive(move || filters.with(|f| f.start_date))
                        on_change=move |date| {
                            let end = ctx.get_untracked().end_date;
                            ctx.set_filters(FilterPatch::new().with_dates(date, end))
                        }
                    />
                    <DateInput
                        label="Au"
                        value=Signal::derive(move || filters.with(|f| f.end_date))
                        on_change=move |date| {
                            let start = ctx.get_untracked().start_date;
                            ctx.set_filters(FilterPatch::new().with_dates(start, date))
                        }
                    />
                </div>
            }
            filter_tags=move || view! { <div class="filter-bar__tags">{tags}</div> }
        />
    }
}
