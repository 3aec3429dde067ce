use socialweb_templating::TemplatingError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GeneratorError {
    /// Network or TLS failure talking to the generative service.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-2xx status.
    #[error("generative service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The completion had no choices or empty content.
    #[error("generative service returned an empty completion")]
    EmptyCompletion,

    /// Completion JSON did not match the chat-completions shape.
    #[error("unexpected completion payload: {0}")]
    Deserialize(#[source] serde_json::Error),

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },

    /// Analysis parsing, validation or prompt composition failed.
    #[error(transparent)]
    Templating(#[from] TemplatingError),

    /// The HTML reply contained no `<!DOCTYPE html>` document.
    #[error("generated output is not an HTML document")]
    NotHtml,
}
