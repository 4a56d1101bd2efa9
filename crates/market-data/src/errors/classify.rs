use super::{FetchError, GatewayError, NoDataSubject, GENERIC_FAILURE_MESSAGE};

/// Which gateway operation a failure came from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Operation {
    Series,
    Refresh,
    Recommendations,
}

/// Where a failure happened, as far as the classifier needs to know.
#[derive(Clone, Copy, Debug)]
pub struct FailureContext<'a> {
    pub operation: Operation,
    /// Set for symbol-scoped operations (series, refresh).
    pub symbol: Option<&'a str>,
}

impl<'a> FailureContext<'a> {
    pub fn series(symbol: &'a str) -> Self {
        Self {
            operation: Operation::Series,
            symbol: Some(symbol),
        }
    }

    pub fn refresh(symbol: &'a str) -> Self {
        Self {
            operation: Operation::Refresh,
            symbol: Some(symbol),
        }
    }

    pub fn recommendations() -> Self {
        Self {
            operation: Operation::Recommendations,
            symbol: None,
        }
    }
}

/// Input to the classifier.
#[derive(Clone, Copy, Debug)]
pub enum Failure<'a> {
    /// A gateway call failed.
    Transport(&'a GatewayError),
    /// The orchestrator gave up because data stayed absent.
    NoData,
    /// The request was refused before any call was made.
    Rejected(&'a str),
}

/// Map a failure to its user-facing category.
///
/// Rules are checked in order and the first match wins:
///
/// 1. HTTP 404 on a symbol-scoped call -> `NotFound`
/// 2. internal no-data signal -> `NoDataAvailable`
/// 3. timeout -> `RequestTimedOut`
/// 4. HTTP 400 on the recommendations call -> `InvalidRange`
/// 5. any failure with a server-supplied message -> `ServerError`
/// 6. everything else -> `UnknownError`
///
/// Requests rejected client-side carry their own message and always end up
/// as `UnknownError`.
///
/// Never fails.
pub fn classify(failure: Failure<'_>, context: &FailureContext<'_>) -> FetchError {
    let error = match failure {
        Failure::NoData => {
            return FetchError::NoDataAvailable(match context.symbol {
                Some(symbol) => NoDataSubject::Symbol(symbol.to_string()),
                None => NoDataSubject::Recommendations,
            });
        }
        Failure::Rejected(message) => return FetchError::UnknownError(message.to_string()),
        Failure::Transport(error) => error,
    };

    if let (Some(404), Some(symbol)) = (error.status_code(), context.symbol) {
        return FetchError::NotFound(symbol.to_string());
    }

    match error {
        GatewayError::Timeout => FetchError::RequestTimedOut,
        GatewayError::Status { code: 400, .. }
            if context.operation == Operation::Recommendations =>
        {
            FetchError::InvalidRange
        }
        GatewayError::Status {
            message: Some(message),
            ..
        } => FetchError::ServerError(message.clone()),
        GatewayError::Status {
            code,
            message: None,
        } => FetchError::UnknownError(format!("Request failed with status code {code}")),
        GatewayError::Network(message) | GatewayError::Decode(message) => {
            if message.trim().is_empty() {
                FetchError::UnknownError(GENERIC_FAILURE_MESSAGE.to_string())
            } else {
                FetchError::UnknownError(message.clone())
            }
        }
    }
}
