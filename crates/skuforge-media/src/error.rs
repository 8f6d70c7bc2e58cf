use thiserror::Error;

/// Errors returned by the media service client.
#[derive(Debug, Error)]
pub enum MediaError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The media service answered with a non-2xx status.
    #[error("media API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The configured base URL is unusable.
    #[error("invalid media base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
