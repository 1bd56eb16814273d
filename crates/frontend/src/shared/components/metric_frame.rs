//! Card wrapping one metric: spinner while loading, the no-data or error
//! banner once settled, the rendered data otherwise.

use crate::shared::icons::icon;
use crate::shared::metric_source::state::{FetchState, NO_DATA_MESSAGE};
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn MetricFrame<T, F, V>(
    #[prop(into)]
    title: String,
    #[prop(into)]
    state: Signal<FetchState<T>>,
    render: F,
    /// Shown while the metric is skipped
    #[prop(optional, into)]
    skipped_hint: Option<String>,
) -> impl IntoView
where
    T: Clone + Send + Sync + 'static,
    F: Fn(T) -> V + Send + Sync + 'static,
    V: IntoView + 'static,
{
    let content = move || match state.get() {
        FetchState::Idle | FetchState::Loading => view! {
            <div class="metric-frame__loading">
                <Spinner />
            </div>
        }
        .into_any(),
        FetchState::Ready(data) => render(data).into_any(),
        FetchState::NoData => view! {
            <div class="metric-frame__empty">
                {icon("empty")}
                <span>{NO_DATA_MESSAGE}</span>
            </div>
        }
        .into_any(),
        FetchState::Failed(message) => view! {
            <div class="metric-frame__error">
                {icon("alert")}
                <span>{message}</span>
            </div>
        }
        .into_any(),
        FetchState::Skipped => {
            let hint = skipped_hint.clone().unwrap_or_default();
            view! { <div class="metric-frame__hint">{hint}</div> }.into_any()
        }
    };

    view! {
        <div class="metric-frame">
            <Card>
                <div class="metric-frame__title">{title}</div>
                <div class="metric-frame__body">{content}</div>
            </Card>
        </div>
    }
}
