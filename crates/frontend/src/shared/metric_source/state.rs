//! Fetch state of one metric source and the request-token rule.
//!
//! Every re-fetch is issued a new token. A response may only settle the
//! state if its token is still the latest one; anything older is dropped.

use crate::shared::fetch::FetchError;

pub const NO_DATA_MESSAGE: &str = "Aucune donnée pour cette sélection.";

/// User-facing message for a failed metric
pub fn failure_message(label: &str) -> String {
    format!("Impossible de récupérer les données des {}.", label)
}

#[derive(Debug, Clone, PartialEq)]
pub enum FetchState<T> {
    /// Before the first fetch was issued
    Idle,
    Loading,
    Ready(T),
    /// The API reported an empty result (404)
    NoData,
    Failed(String),
    /// The metric is not applicable right now
    Skipped,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Idle
    }
}

impl<T> FetchState<T> {
    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn loading(&self) -> bool {
        matches!(self, FetchState::Idle | FetchState::Loading)
    }

    pub fn error(&self) -> Option<String> {
        match self {
            FetchState::NoData => Some(NO_DATA_MESSAGE.to_string()),
            FetchState::Failed(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self, FetchState::NoData)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl std::fmt::Display for RequestToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// State plus the latest issued token of one metric source
#[derive(Debug, Clone, PartialEq)]
pub struct MetricLifecycle<T> {
    latest: u64,
    state: FetchState<T>,
}

impl<T> Default for MetricLifecycle<T> {
    fn default() -> Self {
        Self {
            latest: 0,
            state: FetchState::Idle,
        }
    }
}

impl<T> MetricLifecycle<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    /// Start a re-fetch: clears data and error, issues a fresh token
    pub fn begin(&mut self) -> RequestToken {
        self.latest += 1;
        self.state = FetchState::Loading;
        RequestToken(self.latest)
    }

    pub fn is_current(&self, token: RequestToken) -> bool {
        token.0 == self.latest && matches!(self.state, FetchState::Loading)
    }

    /// Apply the outcome of request `token`. Returns `false` when the
    /// outcome is stale and was discarded.
    pub fn settle(&mut self, token: RequestToken, outcome: Result<T, FetchError>, label: &str) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state = match outcome {
            Ok(data) => FetchState::Ready(data),
            Err(FetchError::NotFound { .. }) => FetchState::NoData,
            Err(_) => FetchState::Failed(failure_message(label)),
        };
        true
    }

    /// Mark the metric as not applicable; in-flight requests become stale
    pub fn skip(&mut self) {
        self.latest += 1;
        self.state = FetchState::Skipped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::metrics::SalesByMonth;
    use contracts::shared::metric::Metric;
    use contracts::shared::validation::ShapeError;

    fn server_error() -> FetchError {
        FetchError::Transport {
            status: Some(500),
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_initial_state_is_loading_without_data() {
        let lifecycle = MetricLifecycle::<u32>::new();
        assert!(lifecycle.state().loading());
        assert_eq!(lifecycle.state().data(), None);
        assert_eq!(lifecycle.state().error(), None);
    }

    #[test]
    fn test_latest_request_wins_when_older_settles_last() {
        let mut lifecycle = MetricLifecycle::new();
        let first = lifecycle.begin();
        let second = lifecycle.begin();

        assert!(lifecycle.settle(second, Ok("f2"), "ventes"));
        assert!(!lifecycle.settle(first, Ok("f1"), "ventes"));

        assert_eq!(lifecycle.state(), &FetchState::Ready("f2"));
    }

    #[test]
    fn test_latest_request_wins_when_older_settles_first() {
        let mut lifecycle = MetricLifecycle::new();
        let first = lifecycle.begin();
        let second = lifecycle.begin();

        assert!(!lifecycle.settle(first, Ok("f1"), "ventes"));
        assert!(lifecycle.state().loading());
        assert!(lifecycle.settle(second, Err(server_error()), SalesByMonth::LABEL));

        assert_eq!(lifecycle.state().data(), None);
        assert!(lifecycle.state().error().is_some());
    }

    #[test]
    fn test_server_error_message() {
        let mut lifecycle = MetricLifecycle::<()>::new();
        let token = lifecycle.begin();
        lifecycle.settle(token, Err(server_error()), SalesByMonth::LABEL);

        let state = lifecycle.state();
        assert!(!state.loading());
        assert_eq!(state.data(), None);
        assert_eq!(
            state.error().as_deref(),
            Some("Impossible de récupérer les données des ventes par mois.")
        );
    }

    #[test]
    fn test_shape_error_clears_data() {
        let mut lifecycle = MetricLifecycle::new();
        let token = lifecycle.begin();
        lifecycle.settle(token, Ok(1), "stocks");

        let token = lifecycle.begin();
        assert_eq!(lifecycle.state().data(), None);
        lifecycle.settle(
            token,
            Err(FetchError::Shape(ShapeError::Decode("missing field `months`".into()))),
            "stocks",
        );
        assert_eq!(lifecycle.state().data(), None);
        assert!(!lifecycle.state().loading());
    }

    #[test]
    fn test_not_found_settles_as_no_data() {
        let mut lifecycle = MetricLifecycle::<()>::new();
        let token = lifecycle.begin();
        lifecycle.settle(
            token,
            Err(FetchError::NotFound {
                message: "empty".to_string(),
            }),
            "achats par mois",
        );
        assert!(lifecycle.state().is_no_data());
        assert_eq!(lifecycle.state().error().as_deref(), Some(NO_DATA_MESSAGE));
    }

    #[test]
    fn test_skip_discards_in_flight_request() {
        let mut lifecycle = MetricLifecycle::new();
        let token = lifecycle.begin();
        lifecycle.skip();

        assert!(!lifecycle.settle(token, Ok(5), "ventes"));
        assert_eq!(lifecycle.state(), &FetchState::Skipped);
        assert!(!lifecycle.state().loading());
        assert_eq!(lifecycle.state().data(), None);
    }

    #[test]
    fn test_token_settles_once() {
        let mut lifecycle = MetricLifecycle::new();
        let token = lifecycle.begin();
        assert!(lifecycle.settle(token, Ok(1), "ventes"));
        assert!(!lifecycle.settle(token, Ok(2), "ventes"));
        assert_eq!(lifecycle.state().data(), Some(&1));
    }
}
