//! Typed HTTP client over the node's JSON API

use std::time::Duration;

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{
    BlockSummary, SendOutcome, SendRequest, SendResponse, StatsSnapshot, TransactionPage,
    TransactionSummary, WalletInfo,
};

/// Failure classes of one API call. Nothing here panics or leaks a raw
/// reqwest error past the fetch boundary.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network unreachable, connection refused, or request timeout.
    #[error("network error: {0}")]
    Transport(#[source] reqwest::Error),

    /// Non-2xx status (the wallet 404 case is handled before this).
    #[error("server returned HTTP {status}")]
    Server { status: u16 },

    /// 2xx response whose body did not match the expected shape.
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Seam between the runtime worker and the node API. Tests substitute stub
/// implementations; production uses [`HttpNodeApi`].
#[async_trait::async_trait]
pub trait NodeApi: Send + Sync {
    async fn stats(&self) -> Result<StatsSnapshot, ApiError>;

    /// Newest-first block summaries; the node returns at most `limit`.
    async fn blocks(&self, limit: usize) -> Result<Vec<BlockSummary>, ApiError>;

    /// Recent mempool transactions, newest-first. Only called when the node
    /// is known to expose the endpoint.
    async fn transactions(&self) -> Result<Vec<TransactionSummary>, ApiError>;

    /// `Ok(None)` when the node has no wallet configured (HTTP 404).
    async fn wallet(&self) -> Result<Option<WalletInfo>, ApiError>;

    async fn send(&self, request: &SendRequest) -> Result<SendOutcome, ApiError>;

    /// The search endpoint's response shape is owned by the backend; it is
    /// passed through opaquely.
    async fn search(&self, query: &str) -> Result<serde_json::Value, ApiError>;
}

pub struct HttpNodeApi {
    http: reqwest::Client,
    base: String,
}

impl HttpNodeApi {
    pub fn new(base: impl Into<String>, timeout: Duration) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Transport)?;
        Ok(Self {
            http,
            base: base.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, ApiError> {
        let status = resp.status();
        if !status.is_success() {
            return Err(ApiError::Server {
                status: status.as_u16(),
            });
        }
        resp.json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait::async_trait]
impl NodeApi for HttpNodeApi {
    async fn stats(&self) -> Result<StatsSnapshot, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/stats"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    async fn blocks(&self, limit: usize) -> Result<Vec<BlockSummary>, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/blocks"))
            .query(&[("limit", limit)])
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }

    async fn transactions(&self) -> Result<Vec<TransactionSummary>, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/transactions"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let page: TransactionPage = Self::decode(resp).await?;
        Ok(page.transactions)
    }

    async fn wallet(&self) -> Result<Option<WalletInfo>, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/wallet"))
            .send()
            .await
            .map_err(ApiError::Transport)?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        Self::decode(resp).await.map(Some)
    }

    async fn send(&self, request: &SendRequest) -> Result<SendOutcome, ApiError> {
        let resp = self
            .http
            .post(self.url("/api/wallet/send"))
            .json(request)
            .send()
            .await
            .map_err(ApiError::Transport)?;
        let response: SendResponse = Self::decode(resp).await?;
        Ok(response.into())
    }

    async fn search(&self, query: &str) -> Result<serde_json::Value, ApiError> {
        let resp = self
            .http
            .get(self.url("/api/search"))
            .query(&[("q", query)])
            .send()
            .await
            .map_err(ApiError::Transport)?;
        Self::decode(resp).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let api = HttpNodeApi::new("http://localhost:8080/", Duration::from_secs(10)).unwrap();
        assert_eq!(api.url("/api/stats"), "http://localhost:8080/api/stats");
    }

    #[tokio::test]
    async fn unreachable_host_maps_to_transport_error() {
        // Reserved TEST-NET-1 address; nothing listens there.
        let api = HttpNodeApi::new("http://192.0.2.1:1", Duration::from_millis(200)).unwrap();
        let err = api.stats().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
    }
}
