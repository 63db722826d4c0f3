use serde_json::{json, Value};
use stayio_core::error::CoreError;

/// Errors from the API client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API answered with a non-2xx status.
    #[error("API error ({status}): {body}")]
    Api {
        status: u16,
        /// Parsed JSON body, or the raw text as a JSON string.
        body: Value,
    },

    /// Input rejected locally before any request was sent.
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// A failed action, already reported to the user.
    #[error("{0}")]
    Feedback(String),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            ClientError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Loosely typed view used by [`crate::feedback::error_message`].
    ///
    /// API failures become `{status, data}`; everything else `{message}`.
    pub fn to_value(&self) -> Value {
        match self {
            ClientError::Api { status, body } => json!({ "status": status, "data": body }),
            ClientError::Core(CoreError::Validation(msg)) => json!({ "message": msg }),
            ClientError::Feedback(msg) => json!({ "message": msg }),
            other => json!({ "message": other.to_string() }),
        }
    }
}
