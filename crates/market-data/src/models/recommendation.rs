use serde::{Deserialize, Serialize};

/// A ranked instrument returned by the recommendations endpoint.
///
/// `momentum` and `rsi` are computed server-side and passed through
/// untouched. The backend orders entries by momentum, highest first; this
/// crate keeps whatever order it receives.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub symbol: String,

    /// Percent change across the window (signed)
    pub momentum: f64,

    /// Relative strength index, 0..=100
    pub rsi: f64,

    /// Closing prices the indicators were computed from, most recent first
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub data: Vec<f64>,
}
