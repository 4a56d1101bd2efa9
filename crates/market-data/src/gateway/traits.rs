//! The transport seam between the orchestrator and the backend.

use std::time::Duration;

use async_trait::async_trait;

use crate::errors::GatewayError;
use crate::models::{Recommendation, RecommendationRange, RefreshReceipt, SeriesPoint, SeriesRange};

/// Issues the three backend calls.
///
/// Every call is bounded by the timeout it is given and is attempted exactly
/// once; retries and fallbacks are the orchestrator's business.
///
/// List endpoints return `Ok(None)` when the backend sent no body (or a JSON
/// `null`), and `Ok(Some(vec![]))` for an explicit empty array. The
/// availability resolver treats both as absent.
#[async_trait]
pub trait StockGateway: Send + Sync {
    /// `GET /stocks/{symbol}?range={range}`
    async fn fetch_series(
        &self,
        symbol: &str,
        range: &SeriesRange,
        timeout: Duration,
    ) -> Result<Option<Vec<SeriesPoint>>, GatewayError>;

    /// `POST /stocks/{symbol}/refresh`
    ///
    /// Asks the backend to recompute and cache the symbol's series.
    async fn trigger_refresh(
        &self,
        symbol: &str,
        timeout: Duration,
    ) -> Result<RefreshReceipt, GatewayError>;

    /// `GET /stocksRecommend?range={range}`
    async fn fetch_recommendations(
        &self,
        range: RecommendationRange,
        timeout: Duration,
    ) -> Result<Option<Vec<Recommendation>>, GatewayError>;
}
