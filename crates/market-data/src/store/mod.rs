//! Request State store.
//!
//! [`StockStore`] is the single writer of [`RequestState`]. Each operation
//! returns an explicit outcome for its caller and also applies that outcome
//! to the shared state, unless a newer operation of the same kind has started
//! in the meantime; stale results are dropped.

mod guard;
mod state;

pub use state::RequestState;

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::debug;

use self::guard::{Flag, FlagGuard};
use crate::config::TimeoutPolicy;
use crate::errors::{classify, Failure, FailureContext, FetchError, Operation};
use crate::gateway::StockGateway;
use crate::models::{Query, Recommendation, RecommendationRange, RefreshReceipt, SeriesRange};
use crate::orchestrator::{
    GenerationTicket, Generations, Orchestrator, SeriesReport, SeriesResolution,
};

const MISSING_SYMBOL: &str = "Symbol is required";
const NOTHING_TO_REFRESH: &str = "No stock selected to refresh";

/// Outcome of [`StockStore::refresh_stock_data`].
#[derive(Clone, Debug)]
pub struct RefreshReport {
    /// Result of the explicit refresh call.
    pub refresh: Result<RefreshReceipt, FetchError>,
    /// The series reload that follows it. `None` when there was no current
    /// query to refresh, or when a newer load took over in the meantime.
    pub reload: Option<SeriesReport>,
}

/// Owns the request state and serialises every write to it.
pub struct StockStore {
    orchestrator: Orchestrator,
    state: Arc<RwLock<RequestState>>,
    series_generations: Generations,
    refresh_generations: Generations,
    recommendation_generations: Generations,
}

impl StockStore {
    pub fn new(gateway: Arc<dyn StockGateway>, timeouts: TimeoutPolicy) -> Self {
        Self::with_orchestrator(Orchestrator::new(gateway, timeouts))
    }

    pub fn with_orchestrator(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            state: Arc::new(RwLock::new(RequestState::default())),
            series_generations: Generations::new(),
            refresh_generations: Generations::new(),
            recommendation_generations: Generations::new(),
        }
    }

    /// Copy of the current state.
    pub fn snapshot(&self) -> RequestState {
        self.read().clone()
    }

    /// Load the series for `symbol`, refreshing server-side data if none is
    /// cached yet.
    ///
    /// Clears `data` and `error`, records the query and holds `loading` for
    /// the whole call. Starting another load supersedes this one.
    ///
    /// A blank symbol is rejected without any call and leaves no current
    /// query behind.
    pub async fn load_series(
        &self,
        symbol: impl Into<String>,
        range: impl Into<SeriesRange>,
    ) -> SeriesReport {
        let symbol: String = symbol.into();
        let query = Query::new(symbol.trim(), range);
        let ticket = self.series_generations.next();
        let accepted = !query.symbol.is_empty();

        {
            let mut state = self.write();
            state.data.clear();
            state.error = None;
            state.current_query = accepted.then(|| query.clone());
        }
        let _loading = FlagGuard::raise(Arc::clone(&self.state), Flag::Loading, ticket.clone());

        let report = if accepted {
            self.orchestrator.load_series(&query, &ticket).await
        } else {
            SeriesReport {
                resolution: SeriesResolution::Failed(missing_symbol()),
                query,
                trail: Default::default(),
            }
        };

        self.apply_series(&report, &ticket);
        report
    }

    /// Make `symbol`/`range` the current query without loading it.
    ///
    /// Clears `data` and `error` and supersedes any series load in flight.
    pub fn select_query(
        &self,
        symbol: impl Into<String>,
        range: impl Into<SeriesRange>,
    ) -> Result<Query, FetchError> {
        let symbol: String = symbol.into();
        let query = Query::new(symbol.trim(), range);
        self.series_generations.next();

        let mut state = self.write();
        state.data.clear();
        // The superseded load no longer owns the flag.
        state.loading = false;

        if query.symbol.is_empty() {
            let error = missing_symbol();
            state.current_query = None;
            state.error = Some(error.clone());
            return Err(error);
        }

        state.error = None;
        state.current_query = Some(query.clone());
        Ok(query)
    }

    /// Ask the backend to recompute the current query's series, then reload
    /// it.
    ///
    /// The reload happens even when the refresh call fails, so whatever the
    /// backend already has is still shown. If another series load or a new
    /// query started while the refresh was in flight, nothing is written and
    /// no reload is issued.
    pub async fn refresh_stock_data(&self) -> RefreshReport {
        let ticket = self.refresh_generations.next();
        let current = self
            .read()
            .current_query
            .clone()
            .filter(|query| !query.symbol.is_empty());

        let Some(query) = current else {
            let error = classify(
                Failure::Rejected(NOTHING_TO_REFRESH),
                &FailureContext {
                    operation: Operation::Refresh,
                    symbol: None,
                },
            );
            self.write().error = Some(error.clone());
            return RefreshReport {
                refresh: Err(error),
                reload: None,
            };
        };

        let _refreshing =
            FlagGuard::raise(Arc::clone(&self.state), Flag::Refreshing, ticket.clone());

        let series_generation = self.series_generations.latest();
        let refresh = self.orchestrator.refresh(&query.symbol).await;

        let superseded = self.series_generations.latest() != series_generation
            || self.read().current_query.as_ref() != Some(&query);
        if superseded {
            debug!(
                "Skipping reload for '{}': a newer series load started",
                query.symbol
            );
            return RefreshReport {
                refresh,
                reload: None,
            };
        }

        if let Err(error) = &refresh {
            if ticket.is_current() {
                self.write().error = Some(error.clone());
            }
        }

        let reload = self.load_series(query.symbol, query.range).await;

        RefreshReport {
            refresh,
            reload: Some(reload),
        }
    }

    /// Load recommendations for a horizon. Single attempt.
    ///
    /// An empty answer leaves `recommendations` empty and stores a
    /// `NoDataAvailable` error.
    pub async fn load_recommendations(
        &self,
        range: RecommendationRange,
    ) -> Result<Vec<Recommendation>, FetchError> {
        let ticket = self.recommendation_generations.next();

        {
            let mut state = self.write();
            state.error = None;
            state.recommendations.clear();
        }
        let _loading = FlagGuard::raise(
            Arc::clone(&self.state),
            Flag::LoadingRecommendations,
            ticket.clone(),
        );

        let result = self.orchestrator.load_recommendations(range).await;

        if ticket.is_current() {
            let mut state = self.write();
            match &result {
                Ok(recommendations) => state.recommendations = recommendations.clone(),
                Err(error) => state.error = Some(error.clone()),
            }
        } else {
            debug!("Dropping stale recommendations for '{}'", range);
        }

        result
    }

    fn apply_series(&self, report: &SeriesReport, ticket: &GenerationTicket) {
        if !ticket.is_current() {
            debug!("Dropping stale series result for '{}'", report.query.symbol);
            return;
        }

        let mut state = self.write();
        match &report.resolution {
            SeriesResolution::Loaded(points) => state.data = points.clone(),
            SeriesResolution::Failed(error) => state.error = Some(error.clone()),
            SeriesResolution::Superseded => {}
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, RequestState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, RequestState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn missing_symbol() -> FetchError {
    classify(
        Failure::Rejected(MISSING_SYMBOL),
        &FailureContext {
            operation: Operation::Series,
            symbol: None,
        },
    )
}
