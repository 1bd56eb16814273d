use crate::dashboards::{
    d100_sales, d200_products, d300_stock, d400_purchases, DashboardTab, ProductsDashboard,
    PurchasesDashboard, SalesDashboard, StockDashboard,
};
use crate::shared::filters::{FilterBar, FilterProvider};
use crate::shared::icons::icon;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <ConfigProvider>
            <FilterProvider>
                <DashboardShell />
            </FilterProvider>
        </ConfigProvider>
    }
}

/// Filter bar, tab strip and the active dashboard
#[component]
fn DashboardShell() -> impl IntoView {
    let active = RwSignal::new(DashboardTab::default());
    let hidden = move |tab: DashboardTab| Signal::derive(move || active.get() != tab);

    // Metric sources live for the whole session; hidden tabs are skipped
    d100_sales::provide_metrics(hidden(DashboardTab::Sales));
    d200_products::provide_metrics(hidden(DashboardTab::Products));
    d300_stock::provide_metrics(hidden(DashboardTab::Stock));
    d400_purchases::provide_metrics(hidden(DashboardTab::Purchases));

    let tabs = DashboardTab::all()
        .into_iter()
        .map(|tab| {
            let class = move || {
                if active.get() == tab {
                    "dashboard-tabs__tab dashboard-tabs__tab--active"
                } else {
                    "dashboard-tabs__tab"
                }
            };
            view! {
                <button class=class on:click=move |_| active.set(tab)>
                    {icon(tab.icon_name())}
                    <span>{tab.label()}</span>
                </button>
            }
        })
        .collect_view();

    view! {
        <div class="app">
            <header class="app__header">
                <h1>"Tableau de bord pharmacie"</h1>
            </header>
            <FilterBar />
            <nav class="dashboard-tabs">{tabs}</nav>
            <main class="app__content">
                {move || match active.get() {
                    DashboardTab::Sales => view! { <SalesDashboard /> }.into_any(),
                    DashboardTab::Products => view! { <ProductsDashboard /> }.into_any(),
                    DashboardTab::Stock => view! { <StockDashboard /> }.into_any(),
                    DashboardTab::Purchases => view! { <PurchasesDashboard /> }.into_any(),
                }}
            </main>
        </div>
    }
}
