use crate::analyzed::CraftsProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct CraftsTemplate<'a>(pub &'a CraftsProfile);

impl CategoryTemplate for CraftsTemplate<'_> {
    fn category(&self) -> Category {
        Category::Crafts
    }

    fn brief(&self) -> &'static str {
        "Generate a WARM and ARTISTIC HTML landing page for an artisan or maker."
    }

    fn rules(&self) -> &'static [&'static str] {
        &["Do NOT invent product descriptions, prices or process steps."]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Craft", self.0.craft_type.clone()),
            ("Techniques", join_list(&self.0.techniques)),
            (
                "Custom orders",
                if self.0.custom_orders { "accepted" } else { "not accepted" }.to_string(),
            ),
        ]
    }

    fn section(&self, section: Section, _ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::Process => (!self.0.techniques.is_empty()).then(|| {
                let mut lines = vec![format!(
                    "Techniques as a short visual list: {}",
                    join_list(&self.0.techniques)
                )];
                if !self.0.craft_type.trim().is_empty() {
                    lines.push(format!("Heading mentions the craft: {}", self.0.craft_type));
                }
                lines
            }),
            Section::CustomOrders => self.0.custom_orders.then(|| {
                vec![
                    "Short statement that custom orders are accepted".to_string(),
                    "Button \"Request a custom piece\" -> the Instagram link".to_string(),
                ]
            }),
            _ => None,
        }
    }

    fn contact_label(&self) -> &'static str {
        "Contact"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Warm and handcrafted but modern",
            "Typography: 'Playfair Display' for headings, 'Inter' for text",
            "Palette: warm tones (terracotta, mustard) with one artistic accent",
            "Large images are the protagonist",
        ]
    }
}
