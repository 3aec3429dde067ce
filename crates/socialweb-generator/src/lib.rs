//! Two-step site generation: profile analysis, then HTML generation, both
//! through an OpenAI-compatible chat-completions endpoint.

pub mod chat;
pub mod error;
pub mod html;
pub mod images;
pub mod pipeline;

pub use chat::{ChatClient, ChatMessage, ChatRequest};
pub use error::GeneratorError;
pub use html::clean_html;
pub use images::ImageResolver;
pub use pipeline::{GeneratedWebsite, Generator, GeneratorConfig, StepTiming};
