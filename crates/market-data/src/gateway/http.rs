//! reqwest-backed gateway talking to the stock backend over HTTP.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;

use super::StockGateway;
use crate::config::GatewayConfig;
use crate::errors::GatewayError;
use crate::models::{Recommendation, RecommendationRange, RefreshReceipt, SeriesPoint, SeriesRange};

/// HTTP implementation of [`StockGateway`].
///
/// The underlying client has no global timeout; each request carries the
/// timeout passed by the caller.
pub struct HttpStockGateway {
    client: Client,
    base_url: String,
}

impl HttpStockGateway {
    /// Build a gateway with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| GatewayError::Network(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_client(client, config.base_url))
    }

    /// Build a gateway around an existing client.
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Send a request and return the body of a successful response.
    async fn send(&self, request: RequestBuilder, timeout: Duration) -> Result<String, GatewayError> {
        let response = request
            .timeout(timeout)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let url = response.url().clone();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            let message = body.trim();
            warn!("Backend returned {} for {}: {}", status, url, message);
            return Err(GatewayError::Status {
                code: status.as_u16(),
                message: (!message.is_empty()).then(|| message.to_string()),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl StockGateway for HttpStockGateway {
    async fn fetch_series(
        &self,
        symbol: &str,
        range: &SeriesRange,
        timeout: Duration,
    ) -> Result<Option<Vec<SeriesPoint>>, GatewayError> {
        let url = self.url(&format!("stocks/{}", urlencoding::encode(symbol)));
        debug!("GET {} range={} timeout={:?}", url, range, timeout);

        let request = self.client.get(url).query(&[("range", range.as_str())]);
        let body = self.send(request, timeout).await?;
        decode_list(&body)
    }

    async fn trigger_refresh(
        &self,
        symbol: &str,
        timeout: Duration,
    ) -> Result<RefreshReceipt, GatewayError> {
        let url = self.url(&format!("stocks/{}/refresh", urlencoding::encode(symbol)));
        debug!("POST {} timeout={:?}", url, timeout);

        let body = self.send(self.client.post(url), timeout).await?;
        let body = body.trim();
        if body.is_empty() {
            return Ok(RefreshReceipt::default());
        }

        // The acknowledgement is informational; an unexpected shape is not a failure.
        Ok(serde_json::from_str(body).unwrap_or_else(|e| {
            debug!("Unrecognised refresh acknowledgement ({}): {}", e, body);
            RefreshReceipt {
                message: Some(body.to_string()),
                new_records: 0,
            }
        }))
    }

    async fn fetch_recommendations(
        &self,
        range: RecommendationRange,
        timeout: Duration,
    ) -> Result<Option<Vec<Recommendation>>, GatewayError> {
        let url = self.url("stocksRecommend");
        debug!("GET {} range={} timeout={:?}", url, range, timeout);

        let request = self.client.get(url).query(&[("range", range.as_str())]);
        let body = self.send(request, timeout).await?;
        decode_list(&body)
    }
}

fn transport_error(e: reqwest::Error) -> GatewayError {
    if e.is_timeout() {
        GatewayError::Timeout
    } else {
        GatewayError::Network(e.to_string())
    }
}

/// Decode a JSON array body. An empty body and a JSON `null` both yield `None`.
fn decode_list<T: DeserializeOwned>(body: &str) -> Result<Option<Vec<T>>, GatewayError> {
    if body.trim().is_empty() {
        return Ok(None);
    }
    serde_json::from_str::<Option<Vec<T>>>(body).map_err(|e| GatewayError::Decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_list_missing_body() {
        let decoded: Option<Vec<Recommendation>> = decode_list("").unwrap();
        assert!(decoded.is_none());

        let decoded: Option<Vec<Recommendation>> = decode_list("null\n").unwrap();
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_list_empty_array() {
        let decoded: Option<Vec<SeriesPoint>> = decode_list("[]").unwrap();
        assert_eq!(decoded, Some(Vec::new()));
    }

    #[test]
    fn test_decode_list_rejects_garbage() {
        let result: Result<Option<Vec<SeriesPoint>>, _> = decode_list("<html>");
        assert!(matches!(result, Err(GatewayError::Decode(_))));
    }

    #[test]
    fn test_base_url_is_normalised() {
        let gateway = HttpStockGateway::with_client(Client::new(), "http://localhost:8080/api/");
        assert_eq!(gateway.base_url(), "http://localhost:8080/api");
        assert_eq!(
            gateway.url("stocksRecommend"),
            "http://localhost:8080/api/stocksRecommend"
        );
    }
}
