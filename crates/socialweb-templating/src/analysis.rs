//! Profile-analysis step: the instruction sent to the generative service and
//! the parser for its JSON reply.

use std::fmt::Write as _;

use serde::Serialize;

use crate::analyzed::AnalyzedProfile;
use crate::category::Category;
use crate::error::TemplatingError;
use crate::profile::{MediaItem, SocialProfile, MAX_SIGNAL_CAPTIONS};

const SYSTEM_PROMPT: &str = "You are an expert in digital marketing and social media profile analysis. \
Your task is to analyze Instagram data and build a complete business or creator profile. \
Respond ONLY with valid JSON, without markdown or explanations.";

/// System and user messages for one analysis completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisPrompt {
    pub system: String,
    pub user: String,
}

/// Example value shown to the model for a category-specific field.
fn field_hint(field: &str) -> &'static str {
    match field {
        "portfolio_focus" => r#"["Wedding Photography", "Portraits", "Events"]"#,
        "packages" => r#"["Basic Package", "Premium Package", "Full Day"]"#,
        "specialties" => r#"["Natural light", "Editorial style"]"#,
        "cuisine_type" => r#""Italian" (or "Mexican", "Contemporary", etc)"#,
        "menu_highlights" => r#"["Signature pasta", "Wood-fired pizza", "House special"]"#,
        "dining_options" => r#"["Dine-in", "Takeout", "Delivery"]"#,
        "price_range" => r#""$" (or "$$", "$$$", "$$$$")"#,
        "product_categories" => r#"["Clothing", "Accessories", "Home Decor"]"#,
        "shipping_info" => r#""Ships worldwide" (or other shipping details)"#,
        "featured_products" => r#"["Best seller 1", "New arrival", "Signature piece"]"#,
        "services_offered" | "services" => r#"["Service 1", "Service 2", "Service 3"]"#,
        "credentials" => r#"["Certification 1", "10 years experience", "Award"]"#,
        "consultation_type" => r#""Virtual and in-person" (or other types)"#,
        "class_types" => r#"["Yoga", "Meditation", "Breathwork"]"#,
        "certifications" => r#"["RYT 500", "Certified Trainer"]"#,
        "craft_type" => r#""Pottery" (or "Jewelry", "Woodworking", etc)"#,
        "techniques" => r#"["Hand-thrown", "Glazing", "Custom design"]"#,
        "custom_orders" => "true (or false)",
        _ => "[]",
    }
}

/// Build the analysis instruction for a profile already classified as `category`.
#[must_use]
pub fn analysis_prompt(
    category: Category,
    profile: &SocialProfile,
    media: &[MediaItem],
) -> AnalysisPrompt {
    let def = category.definition();

    let mut posts = String::new();
    for (i, item) in media.iter().take(MAX_SIGNAL_CAPTIONS).enumerate() {
        let _ = writeln!(
            posts,
            "{}. \"{}\" ({}, {})",
            i + 1,
            item.caption.as_deref().unwrap_or("(no caption)"),
            item.media_type.as_str(),
            item.timestamp.as_deref().unwrap_or("unknown date"),
        );
    }
    if posts.is_empty() {
        posts.push_str("(no posts)\n");
    }

    let fields = def
        .analysis_fields
        .iter()
        .map(|field| format!("\"{field}\": {}", field_hint(field)))
        .collect::<Vec<_>>()
        .join(",\n");

    let followers = profile
        .followers_count
        .map_or_else(|| "unknown".to_string(), |n| n.to_string());

    let user = format!(
        "Analyze this Instagram profile, detected as a {display} business, and its posts.\n\
\n\
Profile data:\n\
- Name: {name}\n\
- Username: {username}\n\
- Current bio: {bio}\n\
- Followers: {followers}\n\
- Account type: {account_type}\n\
\n\
Latest posts (captions):\n\
{posts}\n\
Return JSON with exactly this structure. Use only facts present in the data above; \
use empty strings or empty lists when a fact is unknown.\n\
{{\n\
\"business_name\": \"business or artist name\",\n\
\"tagline\": \"short phrase describing what they do (max 10 words)\",\n\
\"bio\": \"professional description in 2-3 sentences\",\n\
\"keywords_seo\": [\"keyword1\", \"keyword2\", \"keyword3\", \"keyword4\", \"keyword5\"],\n\
\"locations\": [\"location 1\", \"location 2\"],\n\
\"style\": \"one sentence describing the visual style\",\n\
\"target_audience\": \"description of the target audience\",\n\
{fields}\n\
}}\n\
Write the text values in the same language as the profile bio.",
        display = def.display_name,
        name = profile.display_name(),
        username = profile.username_or_empty(),
        bio = profile
            .biography
            .as_deref()
            .filter(|b| !b.trim().is_empty())
            .unwrap_or("(no bio)"),
        account_type = profile.account_type.as_deref().unwrap_or("unknown"),
    );

    AnalysisPrompt {
        system: SYSTEM_PROMPT.to_string(),
        user,
    }
}

/// Remove markdown code fences a model may wrap its JSON in.
fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();
    if let Some(rest) = text.strip_prefix("```") {
        // drop the info string (e.g. `json`); the body may follow on the same line
        text = rest.trim_start_matches(|c: char| c.is_ascii_alphabetic());
    }
    if let Some(body) = text.trim_end().strip_suffix("```") {
        text = body;
    }
    text.trim()
}

/// Parse the analysis reply into a validated [`AnalyzedProfile`].
///
/// Whatever `category` label the model returned is replaced with `detected`
/// before deserializing, so the variant always matches the classifier.
///
/// # Errors
///
/// - [`TemplatingError::MalformedAnalysis`] when the reply is not JSON or is
///   missing a field the category requires.
/// - [`TemplatingError::InvalidProfile`] when the reply is not a JSON object or
///   fails [`AnalyzedProfile::validate`].
pub fn parse_analysis(raw: &str, detected: Category) -> Result<AnalyzedProfile, TemplatingError> {
    let mut value: serde_json::Value = serde_json::from_str(strip_code_fences(raw))?;

    let Some(object) = value.as_object_mut() else {
        return Err(TemplatingError::InvalidProfile(
            "analysis reply is not a JSON object".to_string(),
        ));
    };

    if let Some(label) = object.get("category").and_then(serde_json::Value::as_str) {
        if label != detected.as_str() {
            tracing::debug!(
                returned = label,
                detected = %detected,
                "replacing model category label with detected category"
            );
        }
    }
    object.insert(
        "category".to_string(),
        serde_json::Value::String(detected.as_str().to_string()),
    );

    let profile: AnalyzedProfile = serde_json::from_value(value)?;
    profile.validate()?;
    Ok(profile)
}
