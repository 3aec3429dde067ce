//! Prompt composer: turns an analyzed profile plus its images into the single
//! instruction handed to the HTML generation model.

mod builder;
mod crafts;
mod ecommerce;
mod other;
mod photographer;
mod professional_services;
mod restaurant;
mod wellness;

use std::fmt;

use serde::Serialize;

use crate::analyzed::AnalyzedProfile;
use crate::category::Category;
use crate::error::TemplatingError;
use crate::language::detect_language;
use crate::profile::{GalleryAsset, SocialProfile};

pub use builder::ANTI_HALLUCINATION_DIRECTIVE;

use builder::{render, PromptContext};

/// The composed HTML-generation prompt. Sent verbatim as the user message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ComposedPrompt(String);

impl ComposedPrompt {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ComposedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Compose the generation prompt for `category`.
///
/// Image URLs are embedded exactly as given. The output depends only on the
/// inputs, so identical calls yield identical prompts.
///
/// # Errors
///
/// Returns [`TemplatingError::CategoryMismatch`] when `analyzed` is not the
/// variant for `category`, and [`TemplatingError::InvalidProfile`] when it
/// fails validation.
pub fn compose(
    category: Category,
    analyzed: &AnalyzedProfile,
    raw_profile: &SocialProfile,
    gallery: &[GalleryAsset],
    hero_image_url: &str,
    avatar_image_url: &str,
) -> Result<ComposedPrompt, TemplatingError> {
    if analyzed.category() != category {
        return Err(TemplatingError::CategoryMismatch {
            expected: category,
            found: analyzed.category(),
        });
    }
    analyzed.validate()?;

    let ctx = PromptContext {
        basics: analyzed.basics(),
        profile: raw_profile,
        gallery,
        hero_url: hero_image_url,
        avatar_url: avatar_image_url,
        language: detect_language(
            raw_profile.biography.as_deref().unwrap_or_default(),
            category,
        ),
    };

    let text = match analyzed {
        AnalyzedProfile::Photographer(p) => render(&photographer::PhotographerTemplate(p), &ctx),
        AnalyzedProfile::Restaurant(p) => render(&restaurant::RestaurantTemplate(p), &ctx),
        AnalyzedProfile::Ecommerce(p) => render(&ecommerce::EcommerceTemplate(p), &ctx),
        AnalyzedProfile::ProfessionalServices(p) => render(
            &professional_services::ProfessionalServicesTemplate(p),
            &ctx,
        ),
        AnalyzedProfile::Wellness(p) => render(&wellness::WellnessTemplate(p), &ctx),
        AnalyzedProfile::Crafts(p) => render(&crafts::CraftsTemplate(p), &ctx),
        AnalyzedProfile::Other(p) => render(&other::OtherTemplate(p), &ctx),
    };

    Ok(ComposedPrompt(text))
}
