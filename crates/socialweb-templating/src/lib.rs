//! Category classification and prompt composition for generated business sites.
//!
//! Everything here is pure: no I/O, no shared state. The generator crate drives
//! these functions around its calls to the generative service.

pub mod analysis;
pub mod analyzed;
pub mod category;
pub mod classifier;
pub mod composer;
pub mod error;
pub mod language;
pub mod profile;

pub use analysis::{analysis_prompt, parse_analysis, AnalysisPrompt};
pub use analyzed::{
    AnalyzedProfile, CraftsProfile, EcommerceProfile, OtherProfile, PhotographerProfile,
    ProfessionalServicesProfile, ProfileBasics, RestaurantProfile, WellnessProfile,
};
pub use category::{Category, CategoryDefinition, Section, CATEGORIES};
pub use classifier::{classify, score_categories, ClassificationResult, CONFIDENCE_THRESHOLD};
pub use composer::{compose, ComposedPrompt, ANTI_HALLUCINATION_DIRECTIVE};
pub use error::TemplatingError;
pub use language::{detect_language, PromptLanguage};
pub use profile::{
    select_gallery, GalleryAsset, MediaItem, MediaType, ProfileSignal, SocialProfile,
    MAX_GALLERY_ASSETS, MAX_SIGNAL_CAPTIONS,
};
