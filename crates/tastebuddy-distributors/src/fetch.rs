//! The transport seam: a GET that returns the raw body or a transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::error::TransportError;

/// Performs an HTTP GET and hands back the raw response bytes.
///
/// Implementations carry no business logic. Any non-success status must be
/// reported as a [`TransportError`]; a partial or error body is never
/// returned to the adapter.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError>;
}

/// [`Fetcher`] backed by a shared `reqwest::Client`.
///
/// No retries: the request timeout given at construction is the only bound
/// on how long a single adapter call may block.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Creates an `HttpFetcher` with a request timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, TransportError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &Url) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url.clone())
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.bytes().await?;
        tracing::debug!(url = %url, bytes = body.len(), "fetched distributor response");
        Ok(body.to_vec())
    }
}

/// Parses `base` + `path` and appends `query` pairs, percent-encoding values.
///
/// # Errors
///
/// Returns [`TransportError::InvalidUrl`] if the joined string is not a URL.
pub(crate) fn build_url(
    base: &str,
    path: &str,
    query: &[(&str, &str)],
) -> Result<Url, TransportError> {
    let joined = format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'));
    let mut url = Url::parse(&joined).map_err(|e| TransportError::InvalidUrl {
        url: joined.clone(),
        reason: e.to_string(),
    })?;
    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }
    Ok(url)
}
