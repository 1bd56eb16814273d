use contracts::shared::filters::FilterSet;
use contracts::shared::metric::Metric;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::marker::PhantomData;

use super::accessor::fetch_metric_query;
use super::state::{FetchState, MetricLifecycle};
use crate::shared::fetch::FetchError;

/// Reactive `(data, loading, error)` of one metric
pub struct MetricHandle<M: Metric> {
    lifecycle: RwSignal<MetricLifecycle<M::Response>>,
    _metric: PhantomData<fn() -> M>,
}

impl<M: Metric> Clone for MetricHandle<M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: Metric> Copy for MetricHandle<M> {}

impl<M: Metric> MetricHandle<M> {
    pub fn state(&self) -> Signal<FetchState<M::Response>> {
        let lifecycle = self.lifecycle;
        Signal::derive(move || lifecycle.with(|l| l.state().clone()))
    }

    pub fn data(&self) -> Signal<Option<M::Response>> {
        let lifecycle = self.lifecycle;
        Signal::derive(move || lifecycle.with(|l| l.state().data().cloned()))
    }

    pub fn loading(&self) -> Signal<bool> {
        let lifecycle = self.lifecycle;
        Signal::derive(move || lifecycle.with(|l| l.state().loading()))
    }

    pub fn error(&self) -> Signal<Option<String>> {
        let lifecycle = self.lifecycle;
        Signal::derive(move || lifecycle.with(|l| l.state().error()))
    }
}

/// Subscribe a metric to the filter set.
///
/// The metric re-fetches whenever its derived query key (the query string
/// restricted to `M::FIELDS`) or `skip` changes. Responses of superseded
/// requests are discarded.
pub fn use_metric<M: Metric>(filters: Signal<FilterSet>, skip: Signal<bool>) -> MetricHandle<M> {
    use_metric_with::<M, _, _>(filters, skip, |query: String| async move {
        fetch_metric_query::<M>(&query).await
    })
}

/// [`use_metric`] with the request issued by `fetch` (called with the query string)
pub(crate) fn use_metric_with<M, F, Fut>(
    filters: Signal<FilterSet>,
    skip: Signal<bool>,
    fetch: F,
) -> MetricHandle<M>
where
    M: Metric,
    F: Fn(String) -> Fut + 'static,
    Fut: Future<Output = Result<M::Response, FetchError>> + 'static,
{
    let lifecycle = RwSignal::new(MetricLifecycle::<M::Response>::new());
    let query = Memo::new(move |_| filters.with(|f| M::query_string(f)));

    Effect::new(move |_| {
        let query = query.get();

        if skip.get() {
            lifecycle.update(|l| l.skip());
            return;
        }

        let Some(token) = lifecycle.try_update(|l| l.begin()) else {
            return;
        };
        log::debug!("{} {}: fetching ?{}", M::ENDPOINT, token, query);

        let request = fetch(query);
        spawn_local(async move {
            let outcome = request.await;

            let is_current = lifecycle
                .try_with_untracked(|l| l.is_current(token))
                .unwrap_or(false);
            if !is_current {
                log::debug!("{} {}: stale response discarded", M::ENDPOINT, token);
                return;
            }

            match &outcome {
                Ok(_) => {}
                Err(FetchError::NotFound { message }) => {
                    log::warn!("{} {}: no data ({})", M::ENDPOINT, token, message);
                }
                Err(err) => {
                    log::error!("{} {}: {}", M::ENDPOINT, token, err);
                }
            }

            lifecycle.update(|l| {
                l.settle(token, outcome, M::LABEL);
            });
        });
    });

    MetricHandle {
        lifecycle,
        _metric: PhantomData,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use any_spawner::Executor;
    use contracts::dashboards::d100_sales::MonthlySalesResponse;
    use contracts::metrics::SalesByMonth;
    use contracts::shared::filters::{FilterField, FilterPatch};
    use std::cell::RefCell;
    use std::rc::Rc;
    use tokio::sync::oneshot;
    use tokio::task::LocalSet;

    type Reply = Result<MonthlySalesResponse, FetchError>;

    /// Requests issued by the hook, answered by the test in any order
    #[derive(Clone, Default)]
    struct Requests(Rc<RefCell<Vec<(String, Option<oneshot::Sender<Reply>>)>>>);

    impl Requests {
        fn fetch(&self) -> impl Fn(String) -> std::pin::Pin<Box<dyn Future<Output = Reply>>> + 'static {
            let requests = self.clone();
            move |query: String| {
                let (tx, rx) = oneshot::channel();
                requests.0.borrow_mut().push((query, Some(tx)));
                Box::pin(async move {
                    rx.await.unwrap_or_else(|_| {
                        Err(FetchError::Transport {
                            status: None,
                            message: "dropped".to_string(),
                        })
                    })
                })
            }
        }

        fn queries(&self) -> Vec<String> {
            self.0.borrow().iter().map(|(query, _)| query.clone()).collect()
        }

        fn answer(&self, index: usize, reply: Reply) {
            let tx = self.0.borrow_mut()[index].1.take().unwrap();
            let _ = tx.send(reply);
        }
    }

    fn months(month: &str, quantity: i64) -> MonthlySalesResponse {
        MonthlySalesResponse {
            months: vec![month.to_string()],
            quantities: vec![quantity],
            revenues: vec![quantity as f64 * 2.0],
            margins: vec![quantity as f64],
        }
    }

    async fn flush() {
        for _ in 0..4 {
            Executor::tick().await;
        }
    }

    async fn run_local(test: impl Future<Output = ()>) {
        let _ = Executor::init_tokio();
        let owner = Owner::new();
        owner.set();
        LocalSet::new().run_until(test).await;
    }

    #[tokio::test]
    async fn test_skipped_until_released() {
        run_local(async {
            let filters = RwSignal::new(FilterSet::session_default());
            let skip = RwSignal::new(true);
            let requests = Requests::default();
            let handle = use_metric_with::<SalesByMonth, _, _>(
                filters.into(),
                skip.into(),
                requests.fetch(),
            );

            flush().await;
            assert_eq!(handle.state().get_untracked(), FetchState::Skipped);
            assert!(requests.queries().is_empty());

            skip.set(false);
            flush().await;
            let expected = filters.with_untracked(|f| SalesByMonth::query_string(f));
            assert_eq!(requests.queries(), [expected]);
            assert!(handle.loading().get_untracked());

            requests.answer(0, Ok(months("2024-01", 10)));
            flush().await;
            assert_eq!(handle.data().get_untracked(), Some(months("2024-01", 10)));
            assert!(!handle.loading().get_untracked());

            // Skipping again drops the data
            skip.set(true);
            flush().await;
            assert_eq!(handle.state().get_untracked(), FetchState::Skipped);
            assert_eq!(requests.queries().len(), 1);
        })
        .await;
    }

    #[tokio::test]
    async fn test_filter_change_refetches_and_discards_stale_reply() {
        run_local(async {
            let filters = RwSignal::new(FilterSet::session_default());
            let skip = RwSignal::new(false);
            let requests = Requests::default();
            let handle = use_metric_with::<SalesByMonth, _, _>(
                filters.into(),
                skip.into(),
                requests.fetch(),
            );

            flush().await;
            assert_eq!(requests.queries().len(), 1);

            filters.update(|f| {
                f.merge(FilterPatch::new().with_values(FilterField::Category, ["Vitamines"]))
            });
            flush().await;
            let queries = requests.queries();
            assert_eq!(queries.len(), 2);
            assert_ne!(queries[0], queries[1]);
            assert!(queries[1].contains("Vitamines"));

            requests.answer(1, Ok(months("2024-02", 3)));
            flush().await;
            requests.answer(0, Ok(months("2024-01", 10)));
            flush().await;
            assert_eq!(handle.data().get_untracked(), Some(months("2024-02", 3)));

            // Same selection, same query key: no new request
            let same = filters.get_untracked();
            filters.set(same);
            flush().await;
            assert_eq!(requests.queries().len(), 2);
        })
        .await;
    }

    #[tokio::test]
    async fn test_not_found_settles_as_no_data() {
        run_local(async {
            let filters = RwSignal::new(FilterSet::session_default());
            let requests = Requests::default();
            let handle = use_metric_with::<SalesByMonth, _, _>(
                filters.into(),
                Signal::derive(|| false),
                requests.fetch(),
            );

            flush().await;
            requests.answer(
                0,
                Err(FetchError::NotFound {
                    message: "empty".to_string(),
                }),
            );
            flush().await;
            assert!(handle.state().get_untracked().is_no_data());
            assert_eq!(handle.data().get_untracked(), None);
        })
        .await;
    }
}
