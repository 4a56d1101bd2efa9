//! Transport Gateway: the three backend calls behind one trait.
//!
//! - [`StockGateway`] is the seam the orchestrator depends on
//! - [`HttpStockGateway`] is the reqwest implementation used in production

mod http;
mod traits;

pub use http::HttpStockGateway;
pub use traits::StockGateway;
