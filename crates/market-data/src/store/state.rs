use serde::Serialize;

use crate::errors::FetchError;
use crate::models::{Query, Recommendation, SeriesPoint};

/// What the UI reads: latest results, progress flags and the last error.
///
/// Only [`StockStore`](super::StockStore) writes it; consumers get clones via
/// [`StockStore::snapshot`](super::StockStore::snapshot).
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestState {
    pub data: Vec<SeriesPoint>,
    pub recommendations: Vec<Recommendation>,
    pub loading: bool,
    pub refreshing: bool,
    pub loading_recommendations: bool,
    pub error: Option<FetchError>,
    pub current_query: Option<Query>,
}

impl RequestState {
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(FetchError::message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_idle_and_empty() {
        let state = RequestState::default();
        assert!(!state.loading && !state.refreshing && !state.loading_recommendations);
        assert!(state.data.is_empty());
        assert!(state.error.is_none());
        assert!(state.current_query.is_none());
    }

    #[test]
    fn test_serializes_camel_case() {
        let state = RequestState {
            error: Some(FetchError::InvalidRange),
            ..Default::default()
        };
        let value = serde_json::to_value(&state).unwrap();

        assert_eq!(value["loadingRecommendations"], false);
        assert_eq!(value["error"]["category"], "INVALID_RANGE");
        assert!(value["currentQuery"].is_null());
    }
}
