//! DNS and HTTP capabilities used by the resolvers

use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::error::ResolveErrorKind;
use hickory_resolver::TokioAsyncResolver;
use reqwest::Client;
use tracing::debug;

use crate::error::TransportError;

/// Some PDS implementations reject requests from unbranded clients
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (iPad; CPU OS 12_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Status and body of a completed HTTP GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// HTTP GET capability.
///
/// Non-2xx responses are returned as values; only requests that never
/// produced a response are errors.
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

/// DNS TXT query capability.
///
/// A name without TXT records yields an empty list, not an error.
#[async_trait]
pub trait DnsTxtResolver: Send + Sync {
    async fn txt_records(&self, name: &str) -> Result<Vec<String>, TransportError>;
}

/// [`HttpClient`] backed by a pooled reqwest client
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Create a client sending the browser user agent with a 30s timeout
    pub fn new() -> Self {
        Self::with_options(BROWSER_USER_AGENT, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_options(user_agent: &str, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| TransportError::new(url, e))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::new(url, e))?;

        debug!(url, status, bytes = body.len(), "HTTP GET completed");
        Ok(HttpResponse { status, body })
    }
}

/// [`DnsTxtResolver`] backed by hickory's tokio resolver
pub struct HickoryDnsTxtResolver {
    resolver: TokioAsyncResolver,
}

impl HickoryDnsTxtResolver {
    /// Build a resolver from the host's resolv.conf
    pub fn from_system_conf() -> Result<Self, TransportError> {
        let resolver = TokioAsyncResolver::tokio_from_system_conf()
            .map_err(|e| TransportError::new("system DNS configuration", e))?;
        Ok(Self { resolver })
    }
}

#[async_trait]
impl DnsTxtResolver for HickoryDnsTxtResolver {
    async fn txt_records(&self, name: &str) -> Result<Vec<String>, TransportError> {
        match self.resolver.txt_lookup(name).await {
            Ok(lookup) => Ok(lookup.iter().map(|txt| txt.to_string()).collect()),
            Err(e) if matches!(e.kind(), ResolveErrorKind::NoRecordsFound { .. }) => {
                debug!(name, "No TXT records");
                Ok(Vec::new())
            }
            Err(e) => Err(TransportError::new(name, e)),
        }
    }
}
