use thiserror::Error;

/// Errors from the durable credential store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("storage file {path} is not a JSON object of strings: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors returned by [`crate::ApiClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered 401. Session expiry has already been handled.
    #[error("session expired or credential rejected")]
    Unauthorized,

    /// Any other non-2xx response. `message` is the backend's own
    /// explanation when the body carried one.
    #[error("backend returned HTTP {status}: {}", message.as_deref().unwrap_or("no details"))]
    Api { status: u16, message: Option<String> },

    /// The response body did not match the expected shape.
    #[error("unexpected response shape for {context}: {source}")]
    Decode {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL \"{url}\": {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ClientError {
    #[must_use]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized)
    }

    /// Text suitable for an error banner.
    ///
    /// Uses the backend's message when it sent one, otherwise `fallback`.
    #[must_use]
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Api {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            _ => fallback.to_string(),
        }
    }
}
