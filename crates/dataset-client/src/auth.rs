//! OAuth client-credentials token acquisition.

use crate::client::DomoClient;
use crate::config::DEFAULT_AUTH_SCOPE;
use crate::error::{ClientError, Result};
use crate::transport::HttpRequest;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, TimeDelta, Utc};
use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Method, StatusCode};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Client id/secret pair plus the requested scope.
#[derive(Clone)]
pub struct Credentials {
    pub client_id: String,
    client_secret: String,
    scope: Option<String>,
}

impl Credentials {
    /// Create credentials with the default scope.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            scope: None,
        }
    }

    /// Request a specific scope (e.g. "data user").
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = Some(scope.into());
        self
    }

    /// The requested scope, or "data" when unset.
    pub fn scope(&self) -> &str {
        self.scope
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_AUTH_SCOPE)
    }

    fn basic_auth_value(&self) -> String {
        let raw = format!("{}:{}", self.client_id, self.client_secret);
        format!("Basic {}", STANDARD.encode(raw))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***REDACTED***")
            .field("scope", &self.scope())
            .finish()
    }
}

/// Bearer token issued by the token endpoint.
///
/// Immutable once issued. There is no refresh: callers check
/// [`Token::is_expired`] and acquire a new token themselves.
#[derive(Clone, Serialize, Deserialize)]
pub struct Token {
    pub access_token: String,
    /// Lifetime in seconds as reported by the server
    pub expires_in: i64,
    /// Issue time plus `expires_in - 1` seconds
    pub expires_at: DateTime<Utc>,
}

impl Token {
    /// Build a token issued at `now`.
    ///
    /// The expiry is pulled one second early to absorb clock skew.
    pub fn issued_at(
        access_token: impl Into<String>,
        expires_in: i64,
        now: DateTime<Utc>,
    ) -> Result<Self> {
        let lifetime = TimeDelta::try_seconds(expires_in.saturating_sub(1)).ok_or_else(|| {
            ClientError::Auth(format!("expires_in out of range: {}", expires_in))
        })?;
        let expires_at = now
            .checked_add_signed(lifetime)
            .ok_or_else(|| ClientError::Auth(format!("expires_in out of range: {}", expires_in)))?;

        Ok(Self {
            access_token: access_token.into(),
            expires_in,
            expires_at,
        })
    }

    /// The bearer value to pass to dataset operations.
    pub fn as_str(&self) -> &str {
        &self.access_token
    }

    /// True once the current time has reached `expires_at`.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    /// True once `now` has reached `expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Token")
            .field("access_token", &"***REDACTED***")
            .field("expires_in", &self.expires_in)
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Wire shape of the token endpoint's JSON body.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: i64,
}

impl DomoClient {
    /// Exchange client credentials for a bearer token.
    ///
    /// Non-200 statuses fail with [`ClientError::Api`]; a body that is not a
    /// token, or a token with an empty `access_token`, fails with
    /// [`ClientError::Auth`].
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<Token> {
        let url = self.url(&format!(
            "/oauth/token?grant_type=client_credentials&scope={}",
            urlencoding::encode(credentials.scope())
        ));

        let request = HttpRequest::new(Method::GET, url)
            .header(AUTHORIZATION, &credentials.basic_auth_value())?
            .header(ACCEPT, "application/json")?;

        let response = self.dispatch(request).await?;

        if response.status != StatusCode::OK {
            return Err(ClientError::Api {
                status: response.status.as_u16(),
                message: format!(
                    "token request failed: {} - {}",
                    response.status,
                    response.text_lossy()
                ),
            });
        }

        let parsed: TokenResponse = serde_json::from_slice(&response.body)
            .map_err(|e| ClientError::Auth(format!("cannot decode access_token: {}", e)))?;

        let access_token = parsed
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ClientError::Auth("invalid access_token".to_string()))?;

        let token = Token::issued_at(access_token, parsed.expires_in, Utc::now())?;
        tracing::debug!(
            client_id = %credentials.client_id,
            expires_at = %token.expires_at,
            "Acquired access token"
        );
        Ok(token)
    }

    /// Acquire a token with the credentials from the client configuration.
    pub async fn create_access_token(&self) -> Result<Token> {
        let credentials = self.config().credentials()?;
        self.authenticate(&credentials).await
    }
}
