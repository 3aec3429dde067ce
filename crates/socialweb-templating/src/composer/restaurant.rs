use crate::analyzed::RestaurantProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct RestaurantTemplate<'a>(pub &'a RestaurantProfile);

impl CategoryTemplate for RestaurantTemplate<'_> {
    fn category(&self) -> Category {
        Category::Restaurant
    }

    fn brief(&self) -> &'static str {
        "Generate an ELEGANT and MODERN HTML landing page for a restaurant or cafe."
    }

    fn rules(&self) -> &'static [&'static str] {
        &[
            "Do NOT add opening hours, prices or dish descriptions.",
            "Do NOT add menu items beyond the menu highlights listed.",
        ]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Cuisine", self.0.cuisine_type.clone()),
            ("Price range", self.0.price_range.clone()),
            ("Dining options", join_list(&self.0.dining_options)),
        ]
    }

    fn section(&self, section: Section, _ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::MenuHighlights => (!self.0.menu_highlights.is_empty()).then(|| {
                let mut lines = vec![format!(
                    "Highlight ONLY these dishes, by name: {}",
                    join_list(&self.0.menu_highlights)
                )];
                if !self.0.cuisine_type.trim().is_empty() {
                    lines.push(format!("Subtitle with the cuisine: {}", self.0.cuisine_type));
                }
                lines
            }),
            _ => None,
        }
    }

    fn about_extras(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.0.dining_options.is_empty() {
            lines.push(format!(
                "Dining option pills: {}",
                join_list(&self.0.dining_options)
            ));
        }
        if !self.0.price_range.trim().is_empty() {
            lines.push(format!("Price range badge: {}", self.0.price_range));
        }
        lines
    }

    fn contact_label(&self) -> &'static str {
        "Book or order on Instagram"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Minimal and elegant, like a premium restaurant",
            "Palette: light background (#fafafa), dark text (#1a1a1a), one warm accent",
            "Typography: 'Playfair Display' for headings, 'Inter' for text",
            "Subtle rounded corners (12px) and smooth hover transitions",
        ]
    }
}
