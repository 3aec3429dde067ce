use crate::analyzed::PhotographerProfile;
use crate::category::{Category, Section};

use super::builder::{gallery_grid, join_list, CategoryTemplate, PromptContext};

pub(super) struct PhotographerTemplate<'a>(pub &'a PhotographerProfile);

impl CategoryTemplate for PhotographerTemplate<'_> {
    fn category(&self) -> Category {
        Category::Photographer
    }

    fn brief(&self) -> &'static str {
        "Generate an ELEGANT and MODERN HTML landing page for a professional photographer."
    }

    fn rules(&self) -> &'static [&'static str] {
        &["Do NOT show prices for packages; list package names only."]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Portfolio focus", join_list(&self.0.portfolio_focus)),
            ("Specialties", join_list(&self.0.specialties)),
        ]
    }

    fn section(&self, section: Section, ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::Portfolio => {
                if ctx.gallery.is_empty() && self.0.portfolio_focus.is_empty() {
                    return None;
                }
                let mut lines = if ctx.gallery.is_empty() {
                    Vec::new()
                } else {
                    gallery_grid(ctx)
                };
                if !self.0.portfolio_focus.is_empty() {
                    lines.push(format!(
                        "Focus areas as small labels: {}",
                        join_list(&self.0.portfolio_focus)
                    ));
                }
                lines.push("The photos are the protagonist".to_string());
                Some(lines)
            }
            Section::Packages => (!self.0.packages.is_empty()).then(|| {
                vec![
                    format!("One card per package: {}", join_list(&self.0.packages)),
                    "Each card: package name and a \"Book\" button to Instagram".to_string(),
                ]
            }),
            _ => None,
        }
    }

    fn about_extras(&self) -> Vec<String> {
        if self.0.specialties.is_empty() {
            Vec::new()
        } else {
            vec![format!("Specialties: {}", join_list(&self.0.specialties))]
        }
    }

    fn contact_label(&self) -> &'static str {
        "Book a session"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Ultra minimal with generous white space",
            "Typography: 'Playfair Display' for headings, 'Inter' for text",
            "Palette: white/cream background, black text, one subtle accent",
            "Photos are the protagonist",
        ]
    }
}
