//! Shared prompt skeleton. Each category supplies a [`CategoryTemplate`]; the
//! builder walks the category's section table and renders the fixed blocks
//! (rules, data, images, structure, style, technical) around it.

use std::fmt::Write as _;

use crate::analyzed::ProfileBasics;
use crate::category::{Category, Section};
use crate::language::PromptLanguage;
use crate::profile::{GalleryAsset, SocialProfile};

/// Embedded verbatim in every composed prompt.
pub const ANTI_HALLUCINATION_DIRECTIVE: &str = "Do NOT invent information: use ONLY the data provided below. \
Never add made-up testimonials, prices, schedules, statistics or placeholder text such as \"Lorem ipsum\".";

const TECHNICAL_REQUIREMENTS: &[&str] = &[
    "The document MUST start with <!DOCTYPE html>",
    "One single self-contained HTML file",
    "All CSS inside ONE <style> block in <head>; no external stylesheets except Google Fonts",
    "NO JavaScript: no <script> tags and no inline event handlers",
    "Every <img> uses loading=\"lazy\"",
    "Mobile responsive",
];

/// Everything a template may read while rendering.
pub(crate) struct PromptContext<'a> {
    pub basics: &'a ProfileBasics,
    pub profile: &'a SocialProfile,
    pub gallery: &'a [GalleryAsset],
    pub hero_url: &'a str,
    pub avatar_url: &'a str,
    pub language: PromptLanguage,
}

/// One category's contribution to the prompt.
pub(crate) trait CategoryTemplate {
    fn category(&self) -> Category;

    /// Opening instruction naming the kind of page.
    fn brief(&self) -> &'static str;

    /// Extra "do not" rules for this category.
    fn rules(&self) -> &'static [&'static str] {
        &[]
    }

    /// Category facts listed with the real data; empty values are skipped.
    fn facts(&self) -> Vec<(&'static str, String)>;

    /// Body of a category-specific section, `None` to leave it out.
    fn section(&self, section: Section, ctx: &PromptContext<'_>) -> Option<Vec<String>>;

    /// Extra lines for the shared About section.
    fn about_extras(&self) -> Vec<String> {
        Vec::new()
    }

    fn contact_label(&self) -> &'static str {
        "Follow on Instagram"
    }

    fn style(&self) -> &'static [&'static str];
}

pub(crate) fn join_list(values: &[String]) -> String {
    values.join(", ")
}

/// Lines describing the image grid built from the gallery list.
pub(crate) fn gallery_grid(ctx: &PromptContext<'_>) -> Vec<String> {
    vec![
        format!(
            "Grid with the {} gallery images listed under IMAGES, in that order",
            ctx.gallery.len()
        ),
        "Square images (aspect-ratio: 1; object-fit: cover)".to_string(),
        "Each image is an <a> to its Link (the Instagram post)".to_string(),
        "Subtle hover effect".to_string(),
    ]
}

fn hero(ctx: &PromptContext<'_>) -> Vec<String> {
    let mut lines = Vec::new();
    if ctx.hero_url.is_empty() {
        lines.push("Solid accent-color background (no hero image available)".to_string());
    } else {
        lines.push(format!(
            "Background image: {} with a dark semi-transparent overlay",
            ctx.hero_url
        ));
    }
    lines.push(format!("Name: \"{}\"", ctx.basics.business_name));
    if !ctx.basics.tagline.trim().is_empty() {
        lines.push(format!("Tagline: \"{}\"", ctx.basics.tagline));
    }
    lines
}

fn about(ctx: &PromptContext<'_>, extras: Vec<String>) -> Vec<String> {
    let mut lines = Vec::new();
    if !ctx.avatar_url.is_empty() {
        lines.push(format!("Circular profile photo: {}", ctx.avatar_url));
    }
    if !ctx.basics.bio.trim().is_empty() {
        lines.push(format!("Bio: \"{}\"", ctx.basics.bio));
    }
    if !ctx.basics.locations.is_empty() {
        lines.push(format!(
            "Location badges: {}",
            join_list(&ctx.basics.locations)
        ));
    }
    if let Some(followers) = ctx.profile.followers_count {
        lines.push(format!("Show {followers} Instagram followers as social proof"));
    }
    lines.extend(extras);
    lines.push(format!("Link to Instagram: {}", ctx.profile.profile_link()));
    lines
}

fn contact(ctx: &PromptContext<'_>, label: &str) -> Vec<String> {
    let mut lines = vec![
        "Section with the accent color as background".to_string(),
        format!("Button \"{label}\" -> {}", ctx.profile.profile_link()),
    ];
    if let Some(website) = ctx.profile.website.as_deref().filter(|w| !w.is_empty()) {
        lines.push(format!("Secondary link to the website: {website}"));
    }
    lines
}

fn footer(ctx: &PromptContext<'_>) -> Vec<String> {
    vec![
        format!("© {}", ctx.basics.business_name),
        "Small Instagram link".to_string(),
    ]
}

/// Render the complete prompt for one template.
pub(crate) fn render(template: &impl CategoryTemplate, ctx: &PromptContext<'_>) -> String {
    let mut out = String::new();
    let basics = ctx.basics;

    out.push_str(template.brief());
    out.push_str("\n\nCRITICAL RULES:\n");
    let rules = [ctx.language.directive(), ANTI_HALLUCINATION_DIRECTIVE]
        .into_iter()
        .chain(template.rules().iter().copied())
        .chain(["Include ONLY the sections listed under STRUCTURE, in that order."]);
    for (i, rule) in rules.enumerate() {
        let _ = writeln!(out, "{}. {rule}", i + 1);
    }

    out.push_str("\nREAL DATA:\n");
    let _ = writeln!(out, "- Name: {}", basics.business_name);
    let _ = writeln!(out, "- Tagline: {}", basics.tagline);
    let _ = writeln!(out, "- Bio: {}", basics.bio);
    if basics.locations.is_empty() {
        out.push_str("- Location: not provided (do not mention one)\n");
    } else {
        let _ = writeln!(out, "- Location: {}", join_list(&basics.locations));
    }
    let _ = writeln!(out, "- Instagram: @{}", ctx.profile.username_or_empty());
    let _ = writeln!(out, "- Instagram link: {}", ctx.profile.profile_link());
    match ctx.profile.followers_count {
        Some(n) => {
            let _ = writeln!(out, "- Followers: {n}");
        }
        None => out.push_str("- Followers: N/A\n"),
    }
    let optional = [
        ("Visual style", basics.style.clone()),
        ("Target audience", basics.target_audience.clone()),
        ("SEO keywords (use in <meta name=\"keywords\">)", join_list(&basics.keywords_seo)),
    ];
    for (label, value) in optional.into_iter().chain(template.facts()) {
        if !value.trim().is_empty() {
            let _ = writeln!(out, "- {label}: {value}");
        }
    }

    out.push_str("\nIMAGES (use these exact URLs, unchanged):\n");
    if ctx.hero_url.is_empty() {
        out.push_str("- Hero: none\n");
    } else {
        let _ = writeln!(out, "- Hero: {}", ctx.hero_url);
    }
    if ctx.avatar_url.is_empty() {
        out.push_str("- Profile photo: none (use the initials of the name instead)\n");
    } else {
        let _ = writeln!(out, "- Profile photo: {}", ctx.avatar_url);
    }
    if ctx.gallery.is_empty() {
        out.push_str("- Gallery: none\n");
    } else {
        out.push_str("- Gallery:\n");
        for (i, asset) in ctx.gallery.iter().enumerate() {
            let _ = writeln!(out, "{}. URL: {} | Link: {}", i + 1, asset.url, asset.permalink);
        }
    }

    out.push_str("\nSTRUCTURE (only these sections, in this order):\n");
    let mut number = 0;
    for &section in template.category().definition().sections {
        let body = match section {
            Section::Hero => Some(hero(ctx)),
            Section::About => Some(about(ctx, template.about_extras())),
            Section::Gallery => (!ctx.gallery.is_empty()).then(|| gallery_grid(ctx)),
            Section::Contact => Some(contact(ctx, template.contact_label())),
            Section::Footer => Some(footer(ctx)),
            specific => template.section(specific, ctx),
        };
        let Some(lines) = body else {
            continue;
        };
        number += 1;
        let _ = writeln!(out, "\n{number}. {}:", section.title());
        for line in lines {
            let _ = writeln!(out, "   - {line}");
        }
    }

    out.push_str("\nSTYLE:\n");
    for line in template.style() {
        let _ = writeln!(out, "- {line}");
    }

    out.push_str("\nTECHNICAL:\n");
    for line in TECHNICAL_REQUIREMENTS {
        let _ = writeln!(out, "- {line}");
    }

    out.push_str("\nRESPOND ONLY WITH THE HTML DOCUMENT.");
    out
}
