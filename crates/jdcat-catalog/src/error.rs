use thiserror::Error;

/// Errors surfaced by a [`crate::CatalogProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Network or TLS failure, or a non-2xx HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-zero response code.
    #[error("provider error code {code}: {message}")]
    Unknown { code: String, message: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response body was JSON but not a recognisable envelope.
    #[error("malformed response envelope for {method}: {reason}")]
    Envelope { method: String, reason: String },

    #[error("invalid base URL \"{base_url}\": {reason}")]
    InvalidBaseUrl { base_url: String, reason: String },
}

/// The only error classification the normalization layer sees.
///
/// Every provider failure, whatever its cause, maps to [`ErrorKind::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unknown,
}

impl ErrorKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ErrorKind::Unknown => "UNKNOWN",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ProviderError {
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            ProviderError::Http(_)
            | ProviderError::Unknown { .. }
            | ProviderError::Deserialize { .. }
            | ProviderError::Envelope { .. }
            | ProviderError::InvalidBaseUrl { .. } => ErrorKind::Unknown,
        }
    }
}
