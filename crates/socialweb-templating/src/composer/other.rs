use crate::analyzed::OtherProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct OtherTemplate<'a>(pub &'a OtherProfile);

impl CategoryTemplate for OtherTemplate<'_> {
    fn category(&self) -> Category {
        Category::Other
    }

    fn brief(&self) -> &'static str {
        "Generate a MODERN and ELEGANT HTML landing page."
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![("Services", join_list(&self.0.services))]
    }

    fn section(&self, section: Section, _ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::Services => (!self.0.services.is_empty()).then(|| {
                vec![
                    format!("One card per service: {}", join_list(&self.0.services)),
                    "3-column grid on desktop, 1 on mobile".to_string(),
                ]
            }),
            _ => None,
        }
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Ultra minimal, Squarespace-like",
            "Typography: 'Inter' throughout",
            "Palette: white, dark text, one elegant accent",
        ]
    }
}
