use contracts::shared::filters::{FilterPatch, FilterSet};
use leptos::prelude::*;

/// Session-scoped store of the current Filter Set
#[derive(Clone, Copy)]
pub struct FilterContext {
    filters: RwSignal<FilterSet>,
}

impl FilterContext {
    pub fn new() -> Self {
        Self {
            filters: RwSignal::new(FilterSet::session_default()),
        }
    }

    pub fn get(&self) -> FilterSet {
        self.filters.get()
    }

    pub fn get_untracked(&self) -> FilterSet {
        self.filters.get_untracked()
    }

    pub fn signal(&self) -> Signal<FilterSet> {
        self.filters.into()
    }

    /// Shallow-merge `patch` into the current selection
    pub fn set_filters(&self, patch: FilterPatch) {
        let next = self.filters.with_untracked(|current| {
            let mut next = current.clone();
            next.merge(patch);
            next
        });
        self.replace(next);
    }

    /// Back to the session defaults
    pub fn clear_all_filters(&self) {
        self.replace(FilterSet::session_default());
    }

    // Subscribers are only notified when the selection actually changes
    fn replace(&self, next: FilterSet) {
        let changed = self.filters.with_untracked(|current| current != &next);
        if changed {
            log::debug!("filters updated: {:?}", next);
            self.filters.set(next);
        }
    }
}

impl Default for FilterContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Provides the Filter Context to the dashboards below it
#[component]
pub fn FilterProvider(children: Children) -> impl IntoView {
    provide_context(FilterContext::new());
    children()
}

pub fn use_filters() -> FilterContext {
    use_context::<FilterContext>().expect("FilterProvider not found in component tree")
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::shared::filters::{FilterField, SelectedCategory};

    fn with_owner(test: impl FnOnce()) {
        let owner = Owner::new();
        owner.set();
        test();
    }

    #[test]
    fn test_set_filters_merges() {
        with_owner(|| {
            let ctx = FilterContext::new();
            ctx.set_filters(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]));
            ctx.set_filters(FilterPatch::new().with_values(FilterField::Pharmacy, ["ph-1"]));

            let filters = ctx.get_untracked();
            assert_eq!(filters.category, Some(vec!["Vitamines".to_string()]));
            assert_eq!(filters.pharmacy, Some(vec!["ph-1".to_string()]));
            assert_eq!(filters.selected_category, Some(SelectedCategory::Global));
        });
    }

    #[test]
    fn test_clear_all_filters_is_idempotent() {
        with_owner(|| {
            let ctx = FilterContext::new();
            ctx.set_filters(
                FilterPatch::new()
                    .with_values(FilterField::Category, ["Vitamines"])
                    .with_selected_category(Some(SelectedCategory::Medicaments)),
            );

            ctx.clear_all_filters();
            let once = ctx.get_untracked();
            ctx.clear_all_filters();
            let twice = ctx.get_untracked();

            assert_eq!(once, FilterSet::session_default());
            assert_eq!(once, twice);
        });
    }
}
