use thiserror::Error;

use crate::category::Category;

#[derive(Debug, Error)]
pub enum TemplatingError {
    /// A category label that is not one of the seven known identifiers.
    #[error("unknown category: {0}")]
    UnknownCategory(String),

    /// `compose` was asked for one category but given a profile of another.
    #[error("category mismatch: expected {expected}, analyzed profile is {found}")]
    CategoryMismatch { expected: Category, found: Category },

    /// The analysis response did not deserialize into an analyzed profile.
    #[error("malformed analysis response: {0}")]
    MalformedAnalysis(#[from] serde_json::Error),

    /// The analyzed profile parsed but failed validation.
    #[error("invalid analyzed profile: {0}")]
    InvalidProfile(String),
}
