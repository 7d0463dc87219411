//! Error types for the Domo dataset client.

/// Boxed source error carried by [`ClientError::Transport`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that can occur when using the Domo dataset client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Network-level failure (connection, DNS, TLS, timeout)
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// Caller-supplied precondition violated before any request was sent
    #[error("Validation error: {0}")]
    Validation(String),

    /// Server answered with a status code the operation does not accept
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body, request payload or URL, depending on the operation
        message: String,
    },

    /// Response body could not be parsed into the expected shape
    #[error("Invalid response: {0}")]
    Decode(String),

    /// Token endpoint did not yield a usable access token
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Request payload could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ClientError {
    /// Wrap any error as a transport failure.
    pub fn transport(err: impl Into<BoxError>) -> Self {
        ClientError::Transport(err.into())
    }

    /// Returns the HTTP status for API errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Returns true if the request never got a response.
    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport(_))
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        ClientError::Transport(Box::new(err))
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;
