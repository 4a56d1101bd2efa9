//! The series attempt plan.
//!
//! A pure state machine: given the attempt that just ran and what the gateway
//! returned, decide what happens next. No I/O happens here, so every branch
//! of the fetch/refresh/fallback protocol can be tested without a network.
//!
//! ```text
//! Primary --present--> Accept
//!    |  \--absent--> Refresh --ok--> Refetch --present--> Accept
//!    |                  |               \--absent/err--> Fail(NoDataAvailable)
//!    |                  |--404--> Fail(NotFound)
//!    |                  \--err--> Fallback(RefreshFailed) --present--> Accept
//!    |                                  \--absent/err--> Fail(refresh category)
//!    |--timeout--> Fallback(Timeout) --present--> Accept
//!    |                  \--absent/err--> Fail(RequestTimedOut)
//!    \--err--> Fail(classified)
//! ```

use std::fmt;

use crate::errors::{
    classify, Failure, FailureContext, FetchError, GatewayError, GENERIC_FAILURE_MESSAGE,
};
use crate::models::{RefreshReceipt, SeriesPoint};
use crate::resolver::Availability;

/// Upper bound on gateway calls for one series load. The plan is acyclic and
/// its longest path is Primary -> Refresh -> Refetch/Fallback.
pub const MAX_ATTEMPTS: usize = 3;

/// Why a fallback fetch is being issued.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FallbackCause {
    /// The primary fetch timed out.
    Timeout,
    /// The refresh call failed with something other than 404.
    RefreshFailed(GatewayError),
}

/// One step of a series load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SeriesAttempt {
    Primary,
    Refresh,
    Refetch,
    Fallback(FallbackCause),
}

/// The gateway call an attempt issues.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GatewayCall {
    FetchSeries,
    TriggerRefresh,
}

impl SeriesAttempt {
    pub fn call(&self) -> GatewayCall {
        match self {
            Self::Refresh => GatewayCall::TriggerRefresh,
            Self::Primary | Self::Refetch | Self::Fallback(_) => GatewayCall::FetchSeries,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Refresh => "refresh",
            Self::Refetch => "refetch",
            Self::Fallback(FallbackCause::Timeout) => "fallback-after-timeout",
            Self::Fallback(FallbackCause::RefreshFailed(_)) => "fallback-after-refresh-failure",
        }
    }
}

impl fmt::Display for SeriesAttempt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What the gateway returned for an attempt.
#[derive(Clone, Debug)]
pub enum StepOutcome {
    Series(Result<Availability<SeriesPoint>, GatewayError>),
    Refresh(Result<RefreshReceipt, GatewayError>),
}

/// Where the plan goes after an attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum Transition {
    Next(SeriesAttempt),
    Accept(Vec<SeriesPoint>),
    Fail(FetchError),
}

/// The series plan for one symbol.
#[derive(Clone, Copy, Debug)]
pub struct SeriesPlan<'a> {
    symbol: &'a str,
}

impl<'a> SeriesPlan<'a> {
    pub fn new(symbol: &'a str) -> Self {
        Self { symbol }
    }

    pub fn first(&self) -> SeriesAttempt {
        SeriesAttempt::Primary
    }

    /// Decide the next step.
    pub fn advance(&self, attempt: &SeriesAttempt, outcome: StepOutcome) -> Transition {
        let series = FailureContext::series(self.symbol);
        let refresh = FailureContext::refresh(self.symbol);

        match (attempt, outcome) {
            (SeriesAttempt::Primary, StepOutcome::Series(result)) => match result {
                Ok(Availability::Present(points)) => Transition::Accept(points),
                Ok(Availability::Absent) => Transition::Next(SeriesAttempt::Refresh),
                Err(e) if e.is_timeout() => {
                    Transition::Next(SeriesAttempt::Fallback(FallbackCause::Timeout))
                }
                Err(e) => Transition::Fail(classify(Failure::Transport(&e), &series)),
            },

            (SeriesAttempt::Refresh, StepOutcome::Refresh(result)) => match result {
                Ok(_) => Transition::Next(SeriesAttempt::Refetch),
                Err(e) if e.status_code() == Some(404) => {
                    Transition::Fail(classify(Failure::Transport(&e), &refresh))
                }
                Err(e) => Transition::Next(SeriesAttempt::Fallback(FallbackCause::RefreshFailed(e))),
            },

            (SeriesAttempt::Refetch, StepOutcome::Series(result)) => match result {
                Ok(Availability::Present(points)) => Transition::Accept(points),
                Ok(Availability::Absent) | Err(_) => {
                    Transition::Fail(classify(Failure::NoData, &series))
                }
            },

            (SeriesAttempt::Fallback(cause), StepOutcome::Series(result)) => match result {
                Ok(Availability::Present(points)) => Transition::Accept(points),
                Ok(Availability::Absent) | Err(_) => Transition::Fail(match cause {
                    FallbackCause::Timeout => {
                        classify(Failure::Transport(&GatewayError::Timeout), &series)
                    }
                    FallbackCause::RefreshFailed(original) => {
                        classify(Failure::Transport(original), &refresh)
                    }
                }),
            },

            // Outcome does not belong to this attempt.
            (_, _) => Transition::Fail(FetchError::UnknownError(
                GENERIC_FAILURE_MESSAGE.to_string(),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NoDataSubject;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn point() -> SeriesPoint {
        SeriesPoint::new(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            dec!(1),
            dec!(2),
            dec!(0.5),
            dec!(1.5),
            10,
        )
    }

    fn present() -> StepOutcome {
        StepOutcome::Series(Ok(Availability::Present(vec![point()])))
    }

    fn absent() -> StepOutcome {
        StepOutcome::Series(Ok(Availability::Absent))
    }

    fn series_err(e: GatewayError) -> StepOutcome {
        StepOutcome::Series(Err(e))
    }

    #[test]
    fn test_primary_present_accepts() {
        let plan = SeriesPlan::new("AAPL");
        assert_eq!(
            plan.advance(&plan.first(), present()),
            Transition::Accept(vec![point()])
        );
    }

    #[test]
    fn test_primary_absent_refreshes() {
        let plan = SeriesPlan::new("AAPL");
        assert_eq!(
            plan.advance(&SeriesAttempt::Primary, absent()),
            Transition::Next(SeriesAttempt::Refresh)
        );
    }

    #[test]
    fn test_primary_timeout_falls_back() {
        let plan = SeriesPlan::new("AAPL");
        assert_eq!(
            plan.advance(&SeriesAttempt::Primary, series_err(GatewayError::Timeout)),
            Transition::Next(SeriesAttempt::Fallback(FallbackCause::Timeout))
        );
    }

    #[test]
    fn test_primary_other_failure_is_terminal() {
        let plan = SeriesPlan::new("ZZZZ");
        assert_eq!(
            plan.advance(&SeriesAttempt::Primary, series_err(GatewayError::status(404))),
            Transition::Fail(FetchError::NotFound("ZZZZ".to_string()))
        );
    }

    #[test]
    fn test_refresh_success_refetches() {
        let plan = SeriesPlan::new("AAPL");
        assert_eq!(
            plan.advance(
                &SeriesAttempt::Refresh,
                StepOutcome::Refresh(Ok(RefreshReceipt::default()))
            ),
            Transition::Next(SeriesAttempt::Refetch)
        );
    }

    #[test]
    fn test_refresh_404_is_not_found_without_fallback() {
        let plan = SeriesPlan::new("AAPL");
        assert_eq!(
            plan.advance(
                &SeriesAttempt::Refresh,
                StepOutcome::Refresh(Err(GatewayError::status(404)))
            ),
            Transition::Fail(FetchError::NotFound("AAPL".to_string()))
        );
    }

    #[test]
    fn test_refresh_failure_falls_back() {
        let plan = SeriesPlan::new("AAPL");
        let error = GatewayError::status_with_message(500, "missing API key configuration");
        assert_eq!(
            plan.advance(&SeriesAttempt::Refresh, StepOutcome::Refresh(Err(error.clone()))),
            Transition::Next(SeriesAttempt::Fallback(FallbackCause::RefreshFailed(error)))
        );
    }

    #[test]
    fn test_refetch_absent_or_failed_is_no_data() {
        let plan = SeriesPlan::new("IBM");
        let expected =
            Transition::Fail(FetchError::NoDataAvailable(NoDataSubject::Symbol("IBM".to_string())));

        assert_eq!(plan.advance(&SeriesAttempt::Refetch, absent()), expected);
        assert_eq!(
            plan.advance(&SeriesAttempt::Refetch, series_err(GatewayError::Timeout)),
            expected
        );
    }

    #[test]
    fn test_timeout_fallback_outcomes() {
        let plan = SeriesPlan::new("AAPL");
        let attempt = SeriesAttempt::Fallback(FallbackCause::Timeout);

        assert_eq!(
            plan.advance(&attempt, present()),
            Transition::Accept(vec![point()])
        );
        assert_eq!(
            plan.advance(&attempt, absent()),
            Transition::Fail(FetchError::RequestTimedOut)
        );
        assert_eq!(
            plan.advance(&attempt, series_err(GatewayError::Timeout)),
            Transition::Fail(FetchError::RequestTimedOut)
        );
    }

    #[test]
    fn test_refresh_failure_fallback_propagates_refresh_category() {
        let plan = SeriesPlan::new("AAPL");
        let attempt = SeriesAttempt::Fallback(FallbackCause::RefreshFailed(
            GatewayError::status_with_message(500, "rate limit exceeded"),
        ));

        assert_eq!(
            plan.advance(&attempt, absent()),
            Transition::Fail(FetchError::ServerError("rate limit exceeded".to_string()))
        );
        assert_eq!(
            plan.advance(&attempt, series_err(GatewayError::status(502))),
            Transition::Fail(FetchError::ServerError("rate limit exceeded".to_string()))
        );
        assert_eq!(
            plan.advance(&attempt, present()),
            Transition::Accept(vec![point()])
        );
    }

    #[test]
    fn test_mismatched_outcome_fails_closed() {
        let plan = SeriesPlan::new("AAPL");
        assert!(matches!(
            plan.advance(
                &SeriesAttempt::Primary,
                StepOutcome::Refresh(Ok(RefreshReceipt::default()))
            ),
            Transition::Fail(FetchError::UnknownError(_))
        ));
    }

    #[test]
    fn test_attempt_calls() {
        assert_eq!(SeriesAttempt::Refresh.call(), GatewayCall::TriggerRefresh);
        assert_eq!(SeriesAttempt::Refetch.call(), GatewayCall::FetchSeries);
        assert_eq!(
            SeriesAttempt::Fallback(FallbackCause::Timeout).to_string(),
            "fallback-after-timeout"
        );
    }
}
