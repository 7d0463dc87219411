//! Client handle shared by every dataset operation.

use crate::config::ClientConfig;
use crate::error::Result;
use crate::transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
use reqwest::header::AUTHORIZATION;
use reqwest::Method;
use std::sync::Arc;

/// Domo dataset API client.
///
/// Holds no mutable state: the access token is passed to each call, and every
/// call builds its own request(s).
#[derive(Clone)]
pub struct DomoClient {
    transport: Arc<dyn Transport>,
    config: ClientConfig,
}

impl std::fmt::Debug for DomoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DomoClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl DomoClient {
    /// Create a new client builder with the given base URL.
    pub fn builder(base_url: impl Into<String>) -> crate::config::ClientConfigBuilder {
        crate::config::ClientConfigBuilder::new(base_url)
    }

    /// Create a client that talks HTTP through `reqwest`.
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            transport: Arc::new(transport),
            config,
        })
    }

    /// Create a client over a caller-supplied transport.
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self { transport, config })
    }

    /// Create a client from the `DOMO_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Get the configuration.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    // =========================================================================
    // Internal HTTP Methods
    // =========================================================================

    /// Absolute URL for an API path.
    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.api_root(), path)
    }

    /// Request carrying `Authorization: bearer {token}`.
    pub(crate) fn bearer_request(
        &self,
        method: Method,
        url: impl Into<String>,
        token: &str,
    ) -> Result<HttpRequest> {
        HttpRequest::new(method, url).header(AUTHORIZATION, &format!("bearer {}", token))
    }

    /// Dispatch a request through the transport.
    pub(crate) async fn dispatch(&self, request: HttpRequest) -> Result<HttpResponse> {
        self.transport.send(request).await
    }
}
