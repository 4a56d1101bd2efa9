//! Client configuration: backend location and per-call timeouts.

use std::time::Duration;

/// Backend base path used when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

/// Timeout applied to every call kind unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the backend lives and how to identify ourselves to it.
#[derive(Clone, Debug)]
pub struct GatewayConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: concat!("stockboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// One default timeout, overridable per call kind.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TimeoutPolicy {
    pub default: Duration,
    pub series: Option<Duration>,
    pub refresh: Option<Duration>,
    pub recommendations: Option<Duration>,
}

impl TimeoutPolicy {
    /// Same timeout for every call kind.
    pub fn uniform(timeout: Duration) -> Self {
        Self {
            default: timeout,
            series: None,
            refresh: None,
            recommendations: None,
        }
    }

    pub fn with_series(mut self, timeout: Duration) -> Self {
        self.series = Some(timeout);
        self
    }

    pub fn with_refresh(mut self, timeout: Duration) -> Self {
        self.refresh = Some(timeout);
        self
    }

    pub fn with_recommendations(mut self, timeout: Duration) -> Self {
        self.recommendations = Some(timeout);
        self
    }

    pub fn series(&self) -> Duration {
        self.series.unwrap_or(self.default)
    }

    pub fn refresh(&self) -> Duration {
        self.refresh.unwrap_or(self.default)
    }

    pub fn recommendations(&self) -> Duration {
        self.recommendations.unwrap_or(self.default)
    }
}

impl Default for TimeoutPolicy {
    fn default() -> Self {
        Self::uniform(DEFAULT_TIMEOUT)
    }
}
