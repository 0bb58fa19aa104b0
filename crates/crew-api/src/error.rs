//! API error types
//!
//! Every failure the HTTP layer can produce, normalized into a
//! human-readable message plus enough structure for call sites that care
//! about specific status codes.

use crew_common::StorageError;

/// HTTP layer error type
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Transport failure: the backend never answered
    #[error("Cannot reach the Crew backend at {url}. Check that the server is running.")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-2xx response, message extracted from the error body
    #[error("{message}")]
    Http { status: u16, message: String },

    /// 2xx response whose body did not match the expected shape
    #[error("Unexpected response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Request rejected client-side before any network call
    #[error("Validation error: {0}")]
    Validation(String),

    /// Session persistence failure while recording a login/logout
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// HTTP client construction failure
    #[error("Failed to build HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl ApiError {
    /// Status code for HTTP failures, `None` otherwise
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    #[must_use]
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(status) if (500..600).contains(&status))
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// Extract a human-readable message from an error response body.
///
/// Accepted shapes: `{message: string}`, `{message: [string, ...]}`
/// (validation list, joined with commas), `{error: string}`, a raw JSON
/// string, or plain text. Anything else falls back to a generic message
/// carrying the status code.
#[must_use]
pub fn extract_error_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        match value {
            serde_json::Value::Object(map) => {
                match map.get("message") {
                    Some(serde_json::Value::String(message)) => return message.clone(),
                    Some(serde_json::Value::Array(items)) => {
                        let joined = items
                            .iter()
                            .filter_map(serde_json::Value::as_str)
                            .collect::<Vec<_>>()
                            .join(", ");
                        if !joined.is_empty() {
                            return joined;
                        }
                    }
                    _ => {}
                }
                if let Some(serde_json::Value::String(error)) = map.get("error") {
                    return error.clone();
                }
            }
            serde_json::Value::String(message) => return message,
            _ => {}
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        format!("HTTP error (status {status})")
    } else {
        trimmed.to_string()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
