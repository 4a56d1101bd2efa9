//! Scripted gateway double shared by the unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::errors::GatewayError;
use crate::gateway::StockGateway;
use crate::models::{Recommendation, RecommendationRange, RefreshReceipt, SeriesPoint, SeriesRange};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    FetchSeries(String),
    TriggerRefresh(String),
    FetchRecommendations(RecommendationRange),
}

struct Scripted<T> {
    result: Result<T, GatewayError>,
    delay: Duration,
}

type Queue<T> = Mutex<VecDeque<Scripted<T>>>;

/// Replays queued responses per call kind and records every call made.
/// An unscripted call fails with a network error.
#[derive(Default)]
pub struct ScriptedGateway {
    series: Queue<Option<Vec<SeriesPoint>>>,
    refreshes: Queue<RefreshReceipt>,
    recommendations: Queue<Option<Vec<Recommendation>>>,
    calls: Mutex<Vec<Call>>,
    timeouts: Mutex<Vec<Duration>>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn series(self, result: Result<Option<Vec<SeriesPoint>>, GatewayError>) -> Self {
        self.series_after(Duration::ZERO, result)
    }

    pub fn series_after(
        self,
        delay: Duration,
        result: Result<Option<Vec<SeriesPoint>>, GatewayError>,
    ) -> Self {
        self.series
            .lock()
            .unwrap()
            .push_back(Scripted { result, delay });
        self
    }

    pub fn refresh(self, result: Result<RefreshReceipt, GatewayError>) -> Self {
        self.refresh_after(Duration::ZERO, result)
    }

    pub fn refresh_after(self, delay: Duration, result: Result<RefreshReceipt, GatewayError>) -> Self {
        self.refreshes
            .lock()
            .unwrap()
            .push_back(Scripted { result, delay });
        self
    }

    pub fn recommendations(self, result: Result<Option<Vec<Recommendation>>, GatewayError>) -> Self {
        self.recommendations.lock().unwrap().push_back(Scripted {
            result,
            delay: Duration::ZERO,
        });
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn timeouts(&self) -> Vec<Duration> {
        self.timeouts.lock().unwrap().clone()
    }

    async fn replay<T>(&self, queue: &Queue<T>, call: Call, timeout: Duration) -> Result<T, GatewayError> {
        self.calls.lock().unwrap().push(call);
        self.timeouts.lock().unwrap().push(timeout);
        let next = queue.lock().unwrap().pop_front();
        match next {
            Some(scripted) => {
                if !scripted.delay.is_zero() {
                    tokio::time::sleep(scripted.delay).await;
                }
                scripted.result
            }
            None => Err(GatewayError::Network("unscripted call".to_string())),
        }
    }
}

#[async_trait]
impl StockGateway for ScriptedGateway {
    async fn fetch_series(
        &self,
        symbol: &str,
        _range: &SeriesRange,
        timeout: Duration,
    ) -> Result<Option<Vec<SeriesPoint>>, GatewayError> {
        self.replay(&self.series, Call::FetchSeries(symbol.to_string()), timeout)
            .await
    }

    async fn trigger_refresh(
        &self,
        symbol: &str,
        timeout: Duration,
    ) -> Result<RefreshReceipt, GatewayError> {
        self.replay(&self.refreshes, Call::TriggerRefresh(symbol.to_string()), timeout)
            .await
    }

    async fn fetch_recommendations(
        &self,
        range: RecommendationRange,
        timeout: Duration,
    ) -> Result<Option<Vec<Recommendation>>, GatewayError> {
        self.replay(&self.recommendations, Call::FetchRecommendations(range), timeout)
            .await
    }
}

pub fn point(date: &str, close: i64) -> SeriesPoint {
    let close = Decimal::from(close);
    SeriesPoint::new(
        NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        close,
        close,
        close,
        close,
        1_000,
    )
}

pub fn recommendation(symbol: &str, momentum: f64) -> Recommendation {
    Recommendation {
        symbol: symbol.to_string(),
        momentum,
        rsi: 55.0,
        data: Vec::new(),
    }
}

pub fn fetch(symbol: &str) -> Call {
    Call::FetchSeries(symbol.to_string())
}

pub fn refresh(symbol: &str) -> Call {
    Call::TriggerRefresh(symbol.to_string())
}
