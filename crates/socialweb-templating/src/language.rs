use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::category::Category;

static SPANISH_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[áéíóúñ¿¡ÁÉÍÓÚÑ]").expect("valid spanish chars regex"));

/// Output language the generated page must be written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptLanguage {
    Spanish,
    /// Language not detected; the page follows whatever the profile uses.
    MatchProfile,
}

impl PromptLanguage {
    /// The directive line embedded in every composed prompt.
    #[must_use]
    pub fn directive(self) -> &'static str {
        match self {
            PromptLanguage::Spanish => "Write ALL page text in SPANISH.",
            PromptLanguage::MatchProfile => {
                "Write ALL page text in the same language as the profile biography."
            }
        }
    }
}

/// Pick the output language from a biography.
///
/// Spanish when the text contains accented Spanish characters or one of the
/// category's Spanish marker phrases (case-insensitive).
#[must_use]
pub fn detect_language(biography: &str, category: Category) -> PromptLanguage {
    // composed form, so `o` + U+0301 matches `ó`
    let biography: String = biography.nfc().collect();
    if SPANISH_CHARS.is_match(&biography) {
        return PromptLanguage::Spanish;
    }
    let lowered = biography.to_lowercase();
    if category
        .definition()
        .spanish_markers
        .iter()
        .any(|marker| lowered.contains(marker))
    {
        return PromptLanguage::Spanish;
    }
    PromptLanguage::MatchProfile
}
