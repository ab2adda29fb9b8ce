//! Error handling module
//!
//! Defines error types and handling logic used in the project

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// No API key configured
    #[error("{0}")]
    MissingCredential(String),

    /// Upstream returned a non-success status
    #[error("HTTP request failed with status {status}\n{response}")]
    Http {
        /// HTTP status code
        status: u16,
        /// Serialized response (status and body)
        response: String,
    },

    /// Success status, but the body lacks the expected fields
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A streamed frame is not valid JSON
    #[error("Failed to parse stream frame: {source} - frame: {frame}")]
    StreamParse {
        /// Raw frame text
        frame: String,
        /// Parser error
        #[source]
        source: serde_json::Error,
    },

    /// Transport error
    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Configuration value error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration store could not be read
    #[error("Configuration store error: {0}")]
    Store(#[from] anyhow::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Host command invocation failed
    #[error("Host command failed: {0}")]
    HostCommand(String),
}

impl AppError {
    /// Get error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            AppError::MissingCredential(_) => "missing_credential",
            AppError::Http { .. } => "http_error",
            AppError::MalformedResponse(_) => "malformed_response",
            AppError::StreamParse { .. } => "stream_parse_error",
            AppError::Transport(_) => "transport_error",
            AppError::Config(_) | AppError::Store(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
            AppError::HostCommand(_) => "host_command_error",
        }
    }

    /// HTTP status associated with the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            AppError::Http { status, .. } => Some(*status),
            AppError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether detailed error information should be logged
    pub fn should_log_details(&self) -> bool {
        !matches!(self, AppError::MissingCredential(_))
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Error handling helper functions
pub mod helpers {
    use super::*;

    /// Create missing credential error
    pub fn missing_credential_error(message: impl Into<String>) -> AppError {
        AppError::MissingCredential(message.into())
    }

    /// Create HTTP status error from status and raw body
    pub fn http_error(status: u16, body: &str) -> AppError {
        let response = serde_json::json!({
            "status": status,
            "ok": false,
            "body": body,
        });
        AppError::Http {
            status,
            response: response.to_string(),
        }
    }

    /// Create malformed response error
    pub fn malformed_response_error(message: impl Into<String>) -> AppError {
        AppError::MalformedResponse(message.into())
    }

    /// Create configuration error
    pub fn config_error(message: impl Into<String>) -> AppError {
        AppError::Config(message.into())
    }

    /// Create host command error
    pub fn host_command_error(message: impl Into<String>) -> AppError {
        AppError::HostCommand(message.into())
    }
}
