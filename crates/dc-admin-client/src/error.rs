use thiserror::Error;

/// Fallback shown when neither the server nor the transport supplied a
/// usable message.
pub const REQUEST_FAILED: &str = "request failed";

/// Failures surfaced by the client layer.
///
/// Validation variants are raised before any network activity; transport
/// variants wrap the HTTP round trip. An HTTP 2xx response whose envelope
/// `code != 200` is NOT an error here - callers inspect the envelope.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid base url: {0}")]
    InvalidBaseUrl(String),

    /// Operator-typed JSON that failed to parse, or parsed to a non-object.
    #[error("invalid JSON in {field}: {message}")]
    InvalidJson { field: &'static str, message: String },

    #[error("missing path parameter: {0}")]
    MissingPathParam(String),

    /// The upload endpoint was invoked with no file selected.
    #[error("please select a file")]
    FileRequired,

    #[error("unknown endpoint: {0}")]
    UnknownEndpoint(String),

    /// Non-2xx response; `message` is the server envelope `msg` when the
    /// body carried one.
    #[error("HTTP {status}{}", message.as_deref().map(|m| format!(": {m}")).unwrap_or_default())]
    Http { status: u16, message: Option<String> },

    #[error("request timed out")]
    Timeout,

    #[error("{0}")]
    Network(String),

    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Message-selection policy for the response pane: prefer the server's
    /// `msg`, else the transport's own message, else a generic fallback.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Http { message: Some(msg), .. } if !msg.is_empty() => msg.clone(),
            ApiError::Network(msg) if msg.is_empty() => REQUEST_FAILED.to_string(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout
        } else {
            ApiError::Network(err.to_string())
        }
    }
}
