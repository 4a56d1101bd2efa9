use serde::{Deserialize, Serialize};

use super::range::SeriesRange;

/// The symbol/range pair a series load was issued for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub symbol: String,
    pub range: SeriesRange,
}

impl Query {
    pub fn new(symbol: impl Into<String>, range: impl Into<SeriesRange>) -> Self {
        Self {
            symbol: symbol.into(),
            range: range.into(),
        }
    }
}

/// Body of a successful refresh call.
///
/// The backend answers `{"message": "...", "newRecords": n}`; an empty body is
/// equally a success.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub new_records: u64,
}
