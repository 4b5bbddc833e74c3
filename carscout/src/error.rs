//! Unified error types for carscout.
//!
//! This module provides the error hierarchy covering:
//! - Configuration errors (credentials missing at time of use)
//! - Authentication errors (the login call returned no usable token)
//! - Transport errors (non-2xx status from CarAPI)
//! - Tool execution errors
//!
//! Unparsable or empty resource responses are not errors; they surface as
//! [`QueryOutcome::Empty`](crate::carapi::QueryOutcome::Empty).

/// Result type alias for carscout operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for carscout.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Required configuration is absent at time of use.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The authentication call succeeded but yielded no usable token.
    #[error("Authentication error: {0}")]
    Auth(String),

    /// CarAPI answered with a non-2xx status.
    #[error("HTTP {status} from {endpoint}: {body}")]
    Transport {
        /// The HTTP status code.
        status: u16,
        /// The endpoint path that was called.
        endpoint: String,
        /// The response body, as received.
        body: String,
    },

    /// Network or protocol failure while talking to CarAPI.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Tool execution error.
    #[error("Tool error: {0}")]
    Tool(#[from] ToolError),
}

impl Error {
    /// Create a configuration error with a message.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an authentication error with a message.
    #[must_use]
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a transport error for a rejected call.
    #[must_use]
    pub fn transport(status: u16, endpoint: impl Into<String>, body: impl Into<String>) -> Self {
        Self::Transport {
            status,
            endpoint: endpoint.into(),
            body: body.into(),
        }
    }

    /// Check if the remote resource rejected the call.
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. })
    }

    /// The HTTP status attached to this error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport { status, .. } => Some(*status),
            Self::Http(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Error type for tool execution failures.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum ToolError {
    /// Error during tool execution.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Invalid arguments provided to the tool.
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    /// Tool not found.
    #[error("Tool not found: {0}")]
    NotFound(String),
}

impl ToolError {
    /// Create an execution error.
    #[must_use]
    pub fn execution(msg: impl Into<String>) -> Self {
        Self::Execution(msg.into())
    }

    /// Create an invalid arguments error.
    #[must_use]
    pub fn invalid_args(msg: impl Into<String>) -> Self {
        Self::InvalidArguments(msg.into())
    }

    /// Create a not found error.
    #[must_use]
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound(name.into())
    }
}

impl From<serde_json::Error> for ToolError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidArguments(err.to_string())
    }
}
