//! Keyword-scoring business category classifier.

use serde::Serialize;
use unicode_normalization::UnicodeNormalization;

use crate::category::{Category, CATEGORIES};
use crate::profile::ProfileSignal;

/// Minimum winning score; anything lower falls back to [`Category::Other`].
pub const CONFIDENCE_THRESHOLD: u32 = 3;

const CREATOR_BONUS: u32 = 2;
const BUSINESS_BONUS: u32 = 1;

/// The single category chosen for a profile and the score that won it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ClassificationResult {
    pub category: Category,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccountKind {
    Creator,
    Business,
    Personal,
}

fn account_kind(label: Option<&str>) -> AccountKind {
    let Some(label) = label.map(str::trim) else {
        return AccountKind::Personal;
    };
    if label.eq_ignore_ascii_case("CREATOR") || label.eq_ignore_ascii_case("MEDIA_CREATOR") {
        AccountKind::Creator
    } else if label.eq_ignore_ascii_case("BUSINESS") {
        AccountKind::Business
    } else {
        AccountKind::Personal
    }
}

/// Number of distinct keywords of `keywords` that occur anywhere in `blob`.
///
/// Plain substring match: a keyword inside a longer word still counts.
fn keyword_hits(blob: &str, keywords: &[&str]) -> u32 {
    let hits = keywords.iter().filter(|kw| blob.contains(*kw)).count();
    u32::try_from(hits).unwrap_or(u32::MAX)
}

/// Per-category scores in [`CATEGORIES`] order, bonuses included.
#[must_use]
pub fn score_categories(signal: &ProfileSignal) -> [(Category, u32); 7] {
    let mut blob = signal.biography.to_lowercase();
    for caption in &signal.captions {
        blob.push(' ');
        blob.push_str(&caption.to_lowercase());
    }
    let blob: String = blob.nfc().collect();

    let kind = account_kind(signal.account_type.as_deref());

    CATEGORIES.each_ref().map(|def| {
        if def.id == Category::Other {
            return (def.id, 0);
        }
        let mut score = keyword_hits(&blob, def.keywords);
        score += match (kind, def.id) {
            (AccountKind::Creator, Category::Photographer) => CREATOR_BONUS,
            (
                AccountKind::Business,
                Category::ProfessionalServices | Category::Restaurant,
            ) => BUSINESS_BONUS,
            _ => 0,
        };
        (def.id, score)
    })
}

/// Assign exactly one business category to a profile.
///
/// The strictly highest score wins; ties go to the category declared first.
/// A winner below [`CONFIDENCE_THRESHOLD`] is replaced by `Other` with score 0.
#[must_use]
pub fn classify(signal: &ProfileSignal) -> ClassificationResult {
    let scores = score_categories(signal);

    let mut best = ClassificationResult {
        category: Category::Other,
        score: 0,
    };
    for (category, score) in scores {
        if score > best.score {
            best = ClassificationResult { category, score };
        }
    }

    if best.score < CONFIDENCE_THRESHOLD {
        tracing::debug!(
            candidate = %best.category,
            score = best.score,
            "classification below confidence threshold, using fallback"
        );
        return ClassificationResult {
            category: Category::Other,
            score: 0,
        };
    }

    best
}
