//! Offline commands driven by a JSON profile fixture: `classify` and `prompt`.

use std::fmt::Write as _;
use std::path::Path;

use anyhow::Context as _;
use serde::Deserialize;
use socialweb_generator::ImageResolver;
use socialweb_templating::{
    analysis_prompt, classify, compose, parse_analysis, score_categories, select_gallery,
    ClassificationResult, GalleryAsset, MediaItem, ProfileSignal, SocialProfile,
};

/// A profile and its recent media, shaped like the `full-profile` response.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Fixture {
    pub profile: SocialProfile,
    #[serde(default)]
    pub media: Vec<MediaItem>,
}

impl Fixture {
    pub(crate) fn classification(&self) -> ClassificationResult {
        classify(&ProfileSignal::from_profile(&self.profile, &self.media))
    }
}

pub(crate) fn parse_fixture(raw: &str) -> anyhow::Result<Fixture> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn load_fixture(path: &Path) -> anyhow::Result<Fixture> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    parse_fixture(&raw).with_context(|| format!("parsing fixture {}", path.display()))
}

/// Winning category followed by every category's score, highest first.
pub(crate) fn classification_report(fixture: &Fixture) -> String {
    let result = fixture.classification();
    let mut scores = score_categories(&ProfileSignal::from_profile(
        &fixture.profile,
        &fixture.media,
    ));
    scores.sort_by(|a, b| b.1.cmp(&a.1));

    let mut out = format!("category: {} (score {})\n", result.category, result.score);
    for (category, score) in scores {
        let _ = writeln!(out, "  {:<22} {score}", category.as_str());
    }
    out
}

/// Analysis instruction when `analyzed` is `None`, otherwise the composed
/// generation prompt for the analyzed profile.
pub(crate) fn render_prompt(fixture: &Fixture, analyzed: Option<&str>) -> anyhow::Result<String> {
    let category = fixture.classification().category;

    let Some(raw) = analyzed else {
        let prompt = analysis_prompt(category, &fixture.profile, &fixture.media);
        return Ok(format!(
            "--- system ---\n{}\n--- user ---\n{}\n",
            prompt.system, prompt.user
        ));
    };

    let analyzed = parse_analysis(raw, category)?;
    let images = ImageResolver::Direct;
    let gallery: Vec<GalleryAsset> =
        select_gallery(&fixture.media, &fixture.profile.profile_link())
            .into_iter()
            .map(|asset| GalleryAsset {
                url: images.resolve(&asset.url),
                permalink: asset.permalink,
            })
            .collect();
    let hero = gallery.first().map(|a| a.url.clone()).unwrap_or_default();
    let avatar = images.resolve(
        fixture
            .profile
            .profile_picture_url
            .as_deref()
            .unwrap_or_default(),
    );

    let prompt = compose(category, &analyzed, &fixture.profile, &gallery, &hero, &avatar)?;
    Ok(prompt.into_string())
}

pub(crate) fn run_classify(path: &Path) -> anyhow::Result<()> {
    let fixture = load_fixture(path)?;
    print!("{}", classification_report(&fixture));
    Ok(())
}

pub(crate) fn run_prompt(path: &Path, analyzed: Option<&Path>) -> anyhow::Result<()> {
    let fixture = load_fixture(path)?;
    let analyzed = analyzed
        .map(|p| {
            std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))
        })
        .transpose()?;
    println!("{}", render_prompt(&fixture, analyzed.as_deref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use socialweb_templating::Category;

    use super::*;

    const RESTAURANT: &str = include_str!("../fixtures/restaurant.json");
    const RESTAURANT_ANALYSIS: &str = include_str!("../fixtures/restaurant-analysis.json");

    #[test]
    fn restaurant_fixture_classifies_as_restaurant() {
        let fixture = parse_fixture(RESTAURANT).expect("fixture parses");
        assert_eq!(fixture.media.len(), 3);
        assert_eq!(fixture.classification().category, Category::Restaurant);
    }

    #[test]
    fn report_lists_every_category_winner_first() {
        let fixture = parse_fixture(RESTAURANT).expect("fixture parses");
        let report = classification_report(&fixture);
        let lines: Vec<&str> = report.lines().collect();

        assert!(lines[0].starts_with("category: restaurant"));
        assert_eq!(lines.len(), 8);
        assert!(lines[1].trim_start().starts_with("restaurant"));
    }

    #[test]
    fn media_defaults_to_empty() {
        let fixture = parse_fixture(r#"{"profile": {"username": "solo"}}"#).expect("parses");
        assert!(fixture.media.is_empty());
        assert_eq!(fixture.classification().category, Category::Other);
    }

    #[test]
    fn prompt_without_analysis_is_the_analysis_instruction() {
        let fixture = parse_fixture(RESTAURANT).expect("fixture parses");
        let prompt = render_prompt(&fixture, None).expect("prompt");

        assert!(prompt.starts_with("--- system ---"));
        assert!(prompt.contains("cuisine_type"));
        assert!(prompt.contains("New brunch menu"));
    }

    #[test]
    fn prompt_with_analysis_is_the_composed_site_prompt() {
        let fixture = parse_fixture(RESTAURANT).expect("fixture parses");
        let prompt = render_prompt(&fixture, Some(RESTAURANT_ANALYSIS)).expect("prompt");

        assert!(prompt.contains("Cafe Luna"));
        assert!(prompt.contains("https://cdn.example/cafeluna/1.jpg"));
        assert!(!prompt.contains("https://cdn.example/cafeluna/3.mp4"));
    }

    #[test]
    fn invalid_analysis_is_an_error() {
        let fixture = parse_fixture(RESTAURANT).expect("fixture parses");
        assert!(render_prompt(&fixture, Some(r#"{"business_name": ""}"#)).is_err());
    }
}
