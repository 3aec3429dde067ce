use thiserror::Error;

/// Errors returned by the Instagram API client.
#[derive(Debug, Error)]
pub enum InstagramError {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Instagram answered with an error payload (`error.message` or `error_message`).
    #[error("Instagram API error: {0}")]
    Api(String),

    /// Non-2xx response without an error payload.
    #[error("Instagram returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
