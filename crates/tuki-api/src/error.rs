use thiserror::Error;
use tuki_core::ConfigError;

/// Shown whenever the backend cannot be reached at all.
pub const CONNECTION_ERROR_MESSAGE: &str = "Could not reach the server.";

/// Errors returned by the storefront API client.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status or a `mensaje` payload.
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The response body could not be parsed as JSON.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The response parsed but held nothing the adapters could use.
    #[error("unexpected response for {context}")]
    UnexpectedResponse { context: String },

    #[error("invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ApiError {
    /// Text suitable for showing to the person using the storefront.
    ///
    /// Backend messages are passed through verbatim.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http(_) => CONNECTION_ERROR_MESSAGE.to_string(),
            Self::Backend { message, .. } => message.clone(),
            Self::Deserialize { .. } | Self::UnexpectedResponse { .. } => {
                "The server sent a response that could not be read.".to_string()
            }
            Self::InvalidUrl { .. } | Self::NotFound(_) | Self::Config(_) => self.to_string(),
        }
    }
}
