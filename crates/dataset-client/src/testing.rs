//! Test doubles for exercising the client without a network.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domo_dataset_client::testing::ScriptedTransport;
//!
//! let transport = Arc::new(ScriptedTransport::new());
//! transport.push_json(200, r#"[]"#);
//! let client = DomoClient::with_transport(config, transport.clone())?;
//!
//! assert!(client.list_datasets("token").await?.is_empty());
//! assert_eq!(transport.request_count(), 1);
//! ```

use crate::error::{ClientError, Result};
use crate::transport::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::StatusCode;
use std::collections::VecDeque;

/// A [`Transport`] that replays scripted outcomes in order and records every
/// request it receives.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    script: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<HttpRequest>>,
}

#[derive(Debug)]
enum Scripted {
    Response(HttpResponse),
    Failure(String),
}

impl ScriptedTransport {
    /// Create an empty script.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a response.
    pub fn push_response(&self, response: HttpResponse) -> &Self {
        self.script.lock().push_back(Scripted::Response(response));
        self
    }

    /// Queue a response with the given status and body.
    ///
    /// # Panics
    ///
    /// Panics if `status` is not a valid HTTP status code.
    pub fn push(&self, status: u16, body: impl Into<Vec<u8>>) -> &Self {
        let status = StatusCode::from_u16(status).expect("valid status code");
        self.push_response(HttpResponse::new(status, body))
    }

    /// Queue a JSON response.
    pub fn push_json(&self, status: u16, json: &str) -> &Self {
        self.push(status, json.as_bytes().to_vec())
    }

    /// Queue a transport failure (connection refused, timeout, ...).
    pub fn push_failure(&self, message: impl Into<String>) -> &Self {
        self.script
            .lock()
            .push_back(Scripted::Failure(message.into()));
        self
    }

    /// All requests received so far, in order.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.lock().clone()
    }

    /// Number of requests received so far.
    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// Number of scripted outcomes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.script.lock().len()
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse> {
        let description = format!("{} {}", request.method, request.url);
        self.requests.lock().push(request);

        match self.script.lock().pop_front() {
            Some(Scripted::Response(response)) => Ok(response),
            Some(Scripted::Failure(message)) => Err(ClientError::transport(message)),
            None => Err(ClientError::transport(format!(
                "no scripted response left for {}",
                description
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Method;

    #[tokio::test]
    async fn test_replays_in_order_and_records() {
        let transport = ScriptedTransport::new();
        transport.push(200, "first").push(204, "");

        let first = transport
            .send(HttpRequest::new(Method::GET, "http://x/1"))
            .await
            .unwrap();
        let second = transport
            .send(HttpRequest::new(Method::PUT, "http://x/2"))
            .await
            .unwrap();

        assert_eq!(first.status, StatusCode::OK);
        assert_eq!(first.body, b"first");
        assert_eq!(second.status, StatusCode::NO_CONTENT);

        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].url, "http://x/2");
        assert_eq!(transport.remaining(), 0);
    }

    #[tokio::test]
    async fn test_exhausted_script_is_transport_error() {
        let transport = ScriptedTransport::new();

        let err = transport
            .send(HttpRequest::new(Method::GET, "http://x/none"))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("http://x/none"));
        assert_eq!(transport.request_count(), 1);
    }

    #[tokio::test]
    async fn test_scripted_failure() {
        let transport = ScriptedTransport::new();
        transport.push_failure("connection refused");

        let err = transport
            .send(HttpRequest::new(Method::GET, "http://x"))
            .await
            .unwrap_err();

        assert!(err.is_transport());
        assert!(err.to_string().contains("connection refused"));
    }
}
