pub mod client;
pub mod error;
pub(crate) mod retry;
pub mod types;

pub use client::{authorize_url, InstagramClient, OAUTH_SCOPE};
pub use error::InstagramError;
pub use types::FullProfile;
