//! HTTP transport seam.
//!
//! Every network round trip goes through [`Transport::send`]. Production code
//! uses [`ReqwestTransport`]; tests swap in
//! [`ScriptedTransport`](crate::testing::ScriptedTransport).

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Method, StatusCode};
use std::time::Instant;

/// A fully-formed HTTP request.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Create a request without headers or body.
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Add a header.
    ///
    /// Values that are not valid header text are rejected as a validation error.
    pub fn header(mut self, name: HeaderName, value: &str) -> Result<Self> {
        let value = HeaderValue::from_str(value)
            .map_err(|_| ClientError::Validation(format!("invalid value for header {}", name)))?;
        self.headers.insert(name, value);
        Ok(self)
    }

    /// Attach a request body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Header value as text, if present.
    pub fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }
}

/// A raw HTTP response.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Create a response with the given status and body.
    pub fn new(status: StatusCode, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Body decoded lossily as UTF-8, for error messages.
    pub fn text_lossy(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Sends a single HTTP request.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Dispatch `request` and return the raw response, or a transport failure.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Transport backed by `reqwest`, honoring the configured proxy and timeout.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport from the client configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("domo-dataset-client")),
        );

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout);

        if let Some(ref proxy_url) = config.proxy_url {
            let proxy = reqwest::Proxy::all(proxy_url.as_str())
                .map_err(|e| ClientError::Config(format!("Invalid proxy_url: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            http: builder.build()?,
        })
    }

    /// Wrap an already configured `reqwest` client.
    pub fn from_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let start = Instant::now();

        tracing::debug!(method = %method, url = %url, "Sending request");

        let mut builder = self.http.request(method.clone(), &url).headers(headers);
        if let Some(body) = body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!(method = %method, url = %url, error = %e, "Request failed");
            ClientError::from(e)
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?.to_vec();

        tracing::debug!(
            method = %method,
            url = %url,
            status = %status.as_u16(),
            duration_ms = %start.elapsed().as_millis(),
            "Received response"
        );

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::CONTENT_TYPE;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(Method::PUT, "https://api.example.com/v1/datasets")
            .header(CONTENT_TYPE, "text/csv")
            .unwrap()
            .body("a,b\n");

        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.header_str("content-type"), Some("text/csv"));
        assert_eq!(request.body.as_deref(), Some(&b"a,b\n"[..]));
    }

    #[test]
    fn test_invalid_header_value_rejected() {
        let result = HttpRequest::new(Method::GET, "https://api.example.com")
            .header(CONTENT_TYPE, "bad\nvalue");

        assert!(matches!(result, Err(ClientError::Validation(_))));
    }

    #[test]
    fn test_transport_builds_with_proxy() {
        let config = ClientConfig::builder("https://api.example.com")
            .proxy_url("http://proxy.internal:3128")
            .build()
            .unwrap();

        assert!(ReqwestTransport::new(&config).is_ok());
    }

    #[test]
    fn test_response_text_lossy() {
        let response = HttpResponse::new(StatusCode::BAD_REQUEST, "bad request");
        assert_eq!(response.text_lossy(), "bad request");
    }
}
