use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Time window token for the series endpoint.
///
/// The backend accepts a free-form token and rejects unknown ones with a 400,
/// so no validation happens client-side. The well-known tokens are exposed as
/// constants.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeriesRange(String);

impl SeriesRange {
    pub const WEEK: &'static str = "week";
    pub const MONTH: &'static str = "month";
    pub const SIX_MONTHS: &'static str = "6month";
    pub const YEAR: &'static str = "year";

    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the backend is known to serve this token.
    pub fn is_well_known(&self) -> bool {
        matches!(
            self.0.as_str(),
            Self::WEEK | Self::MONTH | Self::SIX_MONTHS | Self::YEAR
        )
    }
}

impl Default for SeriesRange {
    fn default() -> Self {
        Self::new(Self::MONTH)
    }
}

impl fmt::Display for SeriesRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SeriesRange {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Horizon accepted by the recommendations endpoint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationRange {
    Short,
    Medium,
    Long,
}

impl RecommendationRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for RecommendationRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown recommendation range '{0}' (expected short, medium or long)")]
pub struct RangeParseError(pub String);

impl FromStr for RecommendationRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            _ => Err(RangeParseError(s.to_string())),
        }
    }
}
