//! Data model
//!
//! - `series` - Daily OHLCV bars (SeriesPoint)
//! - `recommendation` - Ranked instruments with momentum/RSI (Recommendation)
//! - `range` - Range tokens for the two endpoints (SeriesRange, RecommendationRange)
//! - `query` - The current series query and the refresh acknowledgement

mod query;
mod range;
mod recommendation;
mod series;

pub use query::{Query, RefreshReceipt};
pub use range::{RangeParseError, RecommendationRange, SeriesRange};
pub use recommendation::Recommendation;
pub use series::SeriesPoint;
