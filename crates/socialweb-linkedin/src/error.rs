use thiserror::Error;

/// Errors returned by the LinkedIn client.
#[derive(Debug, Error)]
pub enum LinkedinError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// LinkedIn answered with an error payload (`error_description`, `error`
    /// or `message`).
    #[error("LinkedIn API error: {0}")]
    Api(String),

    #[error("LinkedIn returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}
