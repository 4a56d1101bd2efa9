//! Stockboard Market Data Crate
//!
//! Client-side data acquisition for the Stockboard backend: historical
//! price series and ranked recommendations, with transparent server-side
//! refresh when nothing is cached and graceful degradation on timeouts and
//! partial failures.
//!
//! # Architecture
//!
//! ```text
//!                     +------------------+
//!   UI  ------------> |    StockStore    |  (RequestState, single writer)
//!                     +------------------+
//!                              |
//!                              v
//!                     +------------------+     +------------------+
//!                     |   Orchestrator   | --> |    SeriesPlan    |  (pure attempt plan)
//!                     +------------------+     +------------------+
//!                         |          |
//!                         v          v
//!             +----------------+  +------------------+
//!             |  StockGateway  |  |     classify     |  (GatewayError -> FetchError)
//!             +----------------+  +------------------+
//!                     |
//!                     v
//!             +----------------+
//!             |    resolve     |  (Present / Absent)
//!             +----------------+
//! ```
//!
//! # Core Types
//!
//! - [`StockStore`] - Owns [`RequestState`] and exposes the three operations
//! - [`Orchestrator`] - Executes the fetch/refresh/fallback plan
//! - [`StockGateway`] / [`HttpStockGateway`] - Backend transport
//! - [`FetchError`] - User-facing failure categories
//! - [`SeriesPoint`], [`Recommendation`] - Data returned by the backend

pub mod config;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod store;

#[cfg(test)]
mod testing;

pub use config::{GatewayConfig, TimeoutPolicy, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use errors::{FetchError, GatewayError, NoDataSubject};
pub use gateway::{HttpStockGateway, StockGateway};
pub use models::{
    Query, RangeParseError, Recommendation, RecommendationRange, RefreshReceipt, SeriesPoint,
    SeriesRange,
};
pub use orchestrator::{Orchestrator, SeriesReport, SeriesResolution};
pub use resolver::Availability;
pub use store::{RefreshReport, RequestState, StockStore};
