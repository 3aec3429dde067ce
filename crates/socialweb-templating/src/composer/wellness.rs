use crate::analyzed::WellnessProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct WellnessTemplate<'a>(pub &'a WellnessProfile);

impl CategoryTemplate for WellnessTemplate<'_> {
    fn category(&self) -> Category {
        Category::Wellness
    }

    fn brief(&self) -> &'static str {
        "Generate a SERENE and ELEGANT HTML landing page for a wellness practice."
    }

    fn rules(&self) -> &'static [&'static str] {
        &["Do NOT invent classes, schedules or prices."]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Specialties", join_list(&self.0.specialties)),
            ("Class types", join_list(&self.0.class_types)),
            ("Certifications", join_list(&self.0.certifications)),
        ]
    }

    fn section(&self, section: Section, _ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::Services => (!self.0.specialties.is_empty()).then(|| {
                vec![format!(
                    "One soft card per specialty: {}",
                    join_list(&self.0.specialties)
                )]
            }),
            Section::Classes => (!self.0.class_types.is_empty()).then(|| {
                vec![
                    format!("Class types as pills: {}", join_list(&self.0.class_types)),
                    "No times or prices".to_string(),
                ]
            }),
            _ => None,
        }
    }

    fn about_extras(&self) -> Vec<String> {
        if self.0.certifications.is_empty() {
            Vec::new()
        } else {
            vec![format!(
                "Certifications: {}",
                join_list(&self.0.certifications)
            )]
        }
    }

    fn contact_label(&self) -> &'static str {
        "Book a session"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Zen design with a lot of white space",
            "Typography: 'Playfair Display' for headings, 'Inter' for text",
            "Palette: light earth tones, one calm accent",
            "Very rounded corners",
        ]
    }
}
