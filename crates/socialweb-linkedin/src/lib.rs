pub mod client;
pub mod error;
pub mod types;

pub use client::{authorize_url, LinkedinClient, OAUTH_SCOPE};
pub use error::LinkedinError;
pub use types::LinkedinProfile;
