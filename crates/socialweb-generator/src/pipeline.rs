//! The generation pipeline: classify, analyze (retried once), compose, render.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use socialweb_templating::{
    analysis_prompt, classify, compose, parse_analysis, select_gallery, AnalyzedProfile, Category,
    ClassificationResult, GalleryAsset, MediaItem, ProfileSignal, SocialProfile,
};

use crate::chat::{ChatClient, ChatMessage, ChatRequest};
use crate::error::GeneratorError;
use crate::html::{clean_html, is_html_document};
use crate::images::ImageResolver;

const ANALYSIS_TEMPERATURE: f32 = 0.7;
const HTML_TEMPERATURE: f32 = 0.7;
/// Total analysis attempts: the first call plus one retry.
const ANALYSIS_ATTEMPTS: u32 = 2;
const HTML_SYSTEM_PROMPT: &str = "You are an expert web designer. \
You produce complete, valid, self-contained HTML documents and nothing else.";

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    pub analysis_model: String,
    pub html_model: String,
    pub html_max_tokens: u32,
}

/// Elapsed milliseconds per pipeline step.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct StepTiming {
    pub analysis_ms: u64,
    pub html_ms: u64,
    pub total_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GeneratedWebsite {
    pub analyzed_profile: AnalyzedProfile,
    pub classification: ClassificationResult,
    pub generated_html: String,
    pub generated_at: DateTime<Utc>,
    pub timing: StepTiming,
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

pub struct Generator {
    chat: ChatClient,
    images: ImageResolver,
    config: GeneratorConfig,
}

impl Generator {
    #[must_use]
    pub fn new(chat: ChatClient, images: ImageResolver, config: GeneratorConfig) -> Self {
        Self {
            chat,
            images,
            config,
        }
    }

    /// Run the full pipeline for one profile.
    ///
    /// # Errors
    ///
    /// Returns the second analysis failure if both attempts fail, a
    /// [`GeneratorError::Templating`] error if composition rejects the
    /// profile, or any error from the HTML completion.
    pub async fn generate_website(
        &self,
        profile: &SocialProfile,
        media: &[MediaItem],
    ) -> Result<GeneratedWebsite, GeneratorError> {
        let started = Instant::now();

        let classification = classify(&ProfileSignal::from_profile(profile, media));
        tracing::info!(
            username = profile.username_or_empty(),
            category = %classification.category,
            score = classification.score,
            "profile classified"
        );

        let analysis_started = Instant::now();
        let analyzed = self
            .analyze_with_retry(classification.category, profile, media)
            .await?;
        let analysis_ms = elapsed_ms(analysis_started);
        tracing::info!(analysis_ms, "profile analysis complete");

        let gallery: Vec<GalleryAsset> = select_gallery(media, &profile.profile_link())
            .into_iter()
            .map(|asset| GalleryAsset {
                url: self.images.resolve(&asset.url),
                permalink: asset.permalink,
            })
            .collect();
        let hero = gallery.first().map(|a| a.url.clone()).unwrap_or_default();
        let avatar = self
            .images
            .resolve(profile.profile_picture_url.as_deref().unwrap_or_default());

        let prompt = compose(
            classification.category,
            &analyzed,
            profile,
            &gallery,
            &hero,
            &avatar,
        )?;

        let html_started = Instant::now();
        let raw_html = self
            .chat
            .complete(&ChatRequest {
                model: self.config.html_model.clone(),
                messages: vec![
                    ChatMessage::system(HTML_SYSTEM_PROMPT),
                    ChatMessage::user(prompt.into_string()),
                ],
                temperature: Some(HTML_TEMPERATURE),
                max_tokens: Some(self.config.html_max_tokens),
            })
            .await
            .inspect_err(|e| tracing::error!(error = %e, "html generation failed"))?;
        let html_ms = elapsed_ms(html_started);

        let generated_html = clean_html(&raw_html);
        if !is_html_document(&generated_html) {
            tracing::error!(bytes = raw_html.len(), "html generation returned no document");
            return Err(GeneratorError::NotHtml);
        }
        tracing::info!(html_ms, bytes = generated_html.len(), "html generation complete");

        Ok(GeneratedWebsite {
            analyzed_profile: analyzed,
            classification,
            generated_html,
            generated_at: Utc::now(),
            timing: StepTiming {
                analysis_ms,
                html_ms,
                total_ms: elapsed_ms(started),
            },
        })
    }

    async fn analyze_with_retry(
        &self,
        category: Category,
        profile: &SocialProfile,
        media: &[MediaItem],
    ) -> Result<AnalyzedProfile, GeneratorError> {
        let prompt = analysis_prompt(category, profile, media);
        let request = ChatRequest {
            model: self.config.analysis_model.clone(),
            messages: vec![
                ChatMessage::system(prompt.system),
                ChatMessage::user(prompt.user),
            ],
            temperature: Some(ANALYSIS_TEMPERATURE),
            max_tokens: None,
        };

        let mut attempt = 1;
        loop {
            let result = match self.chat.complete(&request).await {
                Ok(raw) => parse_analysis(&raw, category).map_err(GeneratorError::from),
                Err(e) => Err(e),
            };
            match result {
                Ok(analyzed) => return Ok(analyzed),
                Err(err) if attempt < ANALYSIS_ATTEMPTS => {
                    tracing::warn!(attempt, error = %err, "profile analysis failed, retrying");
                    attempt += 1;
                }
                Err(err) => {
                    tracing::error!(attempt, error = %err, "profile analysis failed");
                    return Err(err);
                }
            }
        }
    }
}
