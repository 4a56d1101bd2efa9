//! Refresh Orchestrator.
//!
//! [`Orchestrator::load_series`] is the single driver that executes a
//! [`SeriesPlan`] against a [`StockGateway`]: it issues one gateway call per
//! attempt, strictly in sequence, feeds each outcome back into the plan and
//! stops on the first terminal transition. Recommendations and explicit
//! refreshes are single attempts with no plan.
//!
//! Nothing here returns an error to the caller; every failure comes back as a
//! classified [`FetchError`] inside the report.

mod diagnostics;
mod generation;
mod plan;

pub use diagnostics::{AttemptRecord, AttemptResult, AttemptTrail};
pub use generation::{GenerationTicket, Generations};
pub use plan::{
    FallbackCause, GatewayCall, SeriesAttempt, SeriesPlan, StepOutcome, Transition, MAX_ATTEMPTS,
};

use std::sync::Arc;
use std::time::Instant;

use log::{debug, info, warn};

use crate::config::TimeoutPolicy;
use crate::errors::{classify, Failure, FailureContext, FetchError, GENERIC_FAILURE_MESSAGE};
use crate::gateway::StockGateway;
use crate::models::{Query, Recommendation, RecommendationRange, RefreshReceipt, SeriesPoint};
use crate::resolver::{resolve, Availability};

/// How a series load ended.
#[derive(Clone, Debug, PartialEq)]
pub enum SeriesResolution {
    Loaded(Vec<SeriesPoint>),
    Failed(FetchError),
    /// A newer load started before this one finished.
    Superseded,
}

/// Result of one series load.
#[derive(Clone, Debug)]
pub struct SeriesReport {
    pub query: Query,
    pub resolution: SeriesResolution,
    pub trail: AttemptTrail,
}

/// Drives gateway calls for series, refreshes and recommendations.
pub struct Orchestrator {
    gateway: Arc<dyn StockGateway>,
    timeouts: TimeoutPolicy,
}

impl Orchestrator {
    pub fn new(gateway: Arc<dyn StockGateway>, timeouts: TimeoutPolicy) -> Self {
        Self { gateway, timeouts }
    }

    pub fn timeouts(&self) -> &TimeoutPolicy {
        &self.timeouts
    }

    /// Load a series, refreshing and falling back as the plan dictates.
    ///
    /// Before each gateway call, and after it returns, the ticket is checked;
    /// a stale ticket ends the load with [`SeriesResolution::Superseded`].
    pub async fn load_series(&self, query: &Query, ticket: &GenerationTicket) -> SeriesReport {
        let plan = SeriesPlan::new(&query.symbol);
        let mut trail = AttemptTrail::new();
        let mut attempt = plan.first();

        let resolution = loop {
            if !ticket.is_current() {
                break SeriesResolution::Superseded;
            }
            if trail.len() >= MAX_ATTEMPTS {
                warn!(
                    "Series load for '{}' exceeded {} attempts ({})",
                    query.symbol,
                    MAX_ATTEMPTS,
                    trail.summary()
                );
                break SeriesResolution::Failed(FetchError::UnknownError(
                    GENERIC_FAILURE_MESSAGE.to_string(),
                ));
            }

            let started = Instant::now();
            let outcome = self.execute(query, &attempt).await;
            trail.record(attempt.label(), describe(&outcome), started.elapsed());

            if !ticket.is_current() {
                break SeriesResolution::Superseded;
            }

            match plan.advance(&attempt, outcome) {
                Transition::Next(next) => {
                    debug!("Series '{}': {} -> {}", query.symbol, attempt, next);
                    attempt = next;
                }
                Transition::Accept(points) => {
                    info!(
                        "Loaded {} points for '{}' ({})",
                        points.len(),
                        query.symbol,
                        trail.summary()
                    );
                    break SeriesResolution::Loaded(points);
                }
                Transition::Fail(error) => {
                    warn!(
                        "Series load for '{}' failed: {} ({})",
                        query.symbol,
                        error,
                        trail.summary()
                    );
                    break SeriesResolution::Failed(error);
                }
            }
        };

        if resolution == SeriesResolution::Superseded {
            if trail.is_empty() {
                debug!("Series load for '{}' superseded before any call", query.symbol);
            } else {
                debug!(
                    "Series load for '{}' superseded ({})",
                    query.symbol,
                    trail.summary()
                );
            }
        }

        SeriesReport {
            query: query.clone(),
            resolution,
            trail,
        }
    }

    /// Ask the backend to recompute a symbol's series. Single attempt.
    pub async fn refresh(&self, symbol: &str) -> Result<RefreshReceipt, FetchError> {
        self.gateway
            .trigger_refresh(symbol, self.timeouts.refresh())
            .await
            .map_err(|e| {
                let error = classify(Failure::Transport(&e), &FailureContext::refresh(symbol));
                warn!("Refresh for '{}' failed: {} ({})", symbol, error, e);
                error
            })
    }

    /// Fetch recommendations for a horizon. Single attempt; an empty answer is
    /// a `NoDataAvailable` failure.
    pub async fn load_recommendations(
        &self,
        range: RecommendationRange,
    ) -> Result<Vec<Recommendation>, FetchError> {
        let context = FailureContext::recommendations();
        let body = self
            .gateway
            .fetch_recommendations(range, self.timeouts.recommendations())
            .await
            .map_err(|e| {
                let error = classify(Failure::Transport(&e), &context);
                warn!("Recommendations for '{}' failed: {} ({})", range, error, e);
                error
            })?;

        match resolve(body) {
            Availability::Present(recommendations) => {
                info!(
                    "Loaded {} recommendations for '{}'",
                    recommendations.len(),
                    range
                );
                Ok(recommendations)
            }
            Availability::Absent => Err(classify(Failure::NoData, &context)),
        }
    }

    async fn execute(&self, query: &Query, attempt: &SeriesAttempt) -> StepOutcome {
        match attempt.call() {
            GatewayCall::FetchSeries => StepOutcome::Series(
                self.gateway
                    .fetch_series(&query.symbol, &query.range, self.timeouts.series())
                    .await
                    .map(resolve),
            ),
            GatewayCall::TriggerRefresh => StepOutcome::Refresh(
                self.gateway
                    .trigger_refresh(&query.symbol, self.timeouts.refresh())
                    .await,
            ),
        }
    }
}

fn describe(outcome: &StepOutcome) -> AttemptResult {
    match outcome {
        StepOutcome::Series(Ok(Availability::Present(points))) => AttemptResult::Data(points.len()),
        StepOutcome::Series(Ok(Availability::Absent)) => AttemptResult::Empty,
        StepOutcome::Refresh(Ok(receipt)) => AttemptResult::Refreshed {
            new_records: receipt.new_records,
        },
        StepOutcome::Series(Err(e)) | StepOutcome::Refresh(Err(e)) => {
            AttemptResult::Error(e.to_string())
        }
    }
}
