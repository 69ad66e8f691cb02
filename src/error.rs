//! Error handling for the Calorie Counter client

use std::fmt;
use thiserror::Error;

/// Unified error type for the Calorie Counter client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// The access token was missing, invalid or rejected (HTTP 401).
    /// The session store has already been cleared when this is returned.
    #[error("session invalid or expired")]
    Unauthorized,

    /// Structured field-level validation errors from the API,
    /// flattened into a single message
    #[error("validation failed: {0}")]
    Validation(String),

    /// Any other unsuccessful HTTP response
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Client-side authentication errors
    #[error("Authentication error: {0}")]
    Auth(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new validation error
    pub fn validation<T: fmt::Display>(msg: T) -> Self {
        Error::Validation(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether this error means the stored session is no longer usable
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized)
    }
}

/// Flatten a DRF-style error body (`{"field": ["msg", ...], ...}`) into a
/// single user-visible string. Returns `None` when the body is not shaped
/// like a field-error mapping.
pub(crate) fn flatten_field_errors(body: &serde_json::Value) -> Option<String> {
    let map = body.as_object()?;
    let mut messages = Vec::new();

    for value in map.values() {
        match value {
            serde_json::Value::Array(entries) => {
                for entry in entries {
                    if let Some(text) = entry.as_str() {
                        messages.push(text.to_string());
                    }
                }
            }
            serde_json::Value::String(text) => messages.push(text.clone()),
            _ => return None,
        }
    }

    if messages.is_empty() {
        None
    } else {
        Some(messages.join(" "))
    }
}
