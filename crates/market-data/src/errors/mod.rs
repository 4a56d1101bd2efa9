//! Error types and failure classification.
//!
//! This module provides:
//! - [`GatewayError`]: raw transport outcomes surfaced by a [`StockGateway`](crate::gateway::StockGateway)
//! - [`FetchError`]: the closed set of user-facing categories stored in the request state
//! - [`classify`]: the only function that turns the former into the latter

mod classify;

pub use classify::{classify, Failure, FailureContext, Operation};

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use thiserror::Error;

/// Generic text used when a failure carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to fetch stock data";

/// Raw outcome of a failed gateway call.
///
/// Only the classifier looks inside these; everything above the gateway works
/// with [`FetchError`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The call did not complete within its timeout.
    #[error("Request timed out")]
    Timeout,

    /// The backend answered with a non-success status.
    /// `message` is the trimmed response body, if any.
    #[error("HTTP {code}{}", status_suffix(.message))]
    Status { code: u16, message: Option<String> },

    /// Connection-level failure (DNS, refused, reset, ...).
    #[error("Network error: {0}")]
    Network(String),

    /// The body could not be decoded.
    #[error("Invalid response body: {0}")]
    Decode(String),
}

impl GatewayError {
    pub fn status(code: u16) -> Self {
        Self::Status {
            code,
            message: None,
        }
    }

    pub fn status_with_message(code: u16, message: impl Into<String>) -> Self {
        Self::Status {
            code,
            message: Some(message.into()),
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    /// HTTP status code, when the backend answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Status { code, .. } => Some(*code),
            _ => None,
        }
    }
}

fn status_suffix(message: &Option<String>) -> String {
    message
        .as_deref()
        .map(|m| format!(": {m}"))
        .unwrap_or_default()
}

/// What a `NoDataAvailable` error is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoDataSubject {
    /// A series for this symbol stayed empty after a refresh.
    Symbol(String),
    /// The recommendations endpoint returned nothing for the range.
    Recommendations,
}

/// User-facing failure categories.
///
/// Values are only constructed by [`classify`]; the `Display` output is the
/// message a UI should render.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("Stock symbol '{0}' not found.")]
    NotFound(String),

    #[error("{}", no_data_message(.0))]
    NoDataAvailable(NoDataSubject),

    #[error("The request timed out. Please try again.")]
    RequestTimedOut,

    #[error("Invalid range selected. Please choose short, medium, or long.")]
    InvalidRange,

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("{0}")]
    UnknownError(String),
}

fn no_data_message(subject: &NoDataSubject) -> String {
    match subject {
        NoDataSubject::Symbol(symbol) => {
            format!("No data available for '{symbol}'. Please try refreshing later.")
        }
        NoDataSubject::Recommendations => {
            "No stock recommendations found for the selected range.".to_string()
        }
    }
}

impl FetchError {
    /// Stable tag for the category, used in serialized state and logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NOT_FOUND",
            Self::NoDataAvailable(_) => "NO_DATA_AVAILABLE",
            Self::RequestTimedOut => "REQUEST_TIMED_OUT",
            Self::InvalidRange => "INVALID_RANGE",
            Self::ServerError(_) => "SERVER_ERROR",
            Self::UnknownError(_) => "UNKNOWN_ERROR",
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl Serialize for FetchError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("FetchError", 2)?;
        state.serialize_field("category", self.category())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_error_display() {
        assert_eq!(GatewayError::status(502).to_string(), "HTTP 502");
        assert_eq!(
            GatewayError::status_with_message(500, "Database error").to_string(),
            "HTTP 500: Database error"
        );
        assert_eq!(GatewayError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_status_code_accessor() {
        assert_eq!(GatewayError::status(404).status_code(), Some(404));
        assert_eq!(GatewayError::Timeout.status_code(), None);
        assert!(GatewayError::Timeout.is_timeout());
    }

    #[test]
    fn test_fetch_error_messages() {
        assert_eq!(
            FetchError::NotFound("AAPL".to_string()).to_string(),
            "Stock symbol 'AAPL' not found."
        );
        assert_eq!(
            FetchError::NoDataAvailable(NoDataSubject::Recommendations).to_string(),
            "No stock recommendations found for the selected range."
        );
        assert_eq!(
            FetchError::NoDataAvailable(NoDataSubject::Symbol("IBM".to_string())).to_string(),
            "No data available for 'IBM'. Please try refreshing later."
        );
        assert_eq!(
            FetchError::ServerError("Database error".to_string()).to_string(),
            "Server error: Database error"
        );
    }

    #[test]
    fn test_fetch_error_serializes_category_and_message() {
        let value = serde_json::to_value(FetchError::RequestTimedOut).unwrap();
        assert_eq!(value["category"], "REQUEST_TIMED_OUT");
        assert_eq!(value["message"], "The request timed out. Please try again.");
    }
}
