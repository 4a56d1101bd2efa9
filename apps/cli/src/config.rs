use std::time::Duration;

use stockboard_market_data::{GatewayConfig, TimeoutPolicy, DEFAULT_BASE_URL};

pub struct Config {
    pub base_url: String,
    pub request_timeout: Duration,
    pub series_timeout: Option<Duration>,
    pub refresh_timeout: Option<Duration>,
    pub recommendations_timeout: Option<Duration>,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let millis = |key: &str| {
            lookup(key)
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_millis)
        };

        let base_url = lookup("SB_API_BASE_URL")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let request_timeout = millis("SB_REQUEST_TIMEOUT_MS").unwrap_or(Duration::from_millis(30000));
        let log_format = lookup("SB_LOG_FORMAT").unwrap_or_else(|| "text".to_string());

        Self {
            base_url,
            request_timeout,
            series_timeout: millis("SB_SERIES_TIMEOUT_MS"),
            refresh_timeout: millis("SB_REFRESH_TIMEOUT_MS"),
            recommendations_timeout: millis("SB_RECOMMENDATIONS_TIMEOUT_MS"),
            log_format,
        }
    }

    pub fn gateway(&self) -> GatewayConfig {
        GatewayConfig {
            base_url: self.base_url.clone(),
            ..Default::default()
        }
    }

    pub fn timeouts(&self) -> TimeoutPolicy {
        TimeoutPolicy {
            default: self.request_timeout,
            series: self.series_timeout,
            refresh: self.refresh_timeout,
            recommendations: self.recommendations_timeout,
        }
    }
}
