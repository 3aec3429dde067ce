use crate::analyzed::ProfessionalServicesProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct ProfessionalServicesTemplate<'a>(pub &'a ProfessionalServicesProfile);

impl CategoryTemplate for ProfessionalServicesTemplate<'_> {
    fn category(&self) -> Category {
        Category::ProfessionalServices
    }

    fn brief(&self) -> &'static str {
        "Generate a PROFESSIONAL and MODERN HTML landing page for a professional services practice."
    }

    fn rules(&self) -> &'static [&'static str] {
        &["Do NOT add process steps, case studies or client names."]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Services", join_list(&self.0.services_offered)),
            ("Consultation type", self.0.consultation_type.clone()),
        ]
    }

    fn section(&self, section: Section, _ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::Services => (!self.0.services_offered.is_empty()).then(|| {
                let mut lines = vec![
                    format!(
                        "One card per service, title only: {}",
                        join_list(&self.0.services_offered)
                    ),
                    "3-column grid on desktop, 1 on mobile".to_string(),
                ];
                if !self.0.consultation_type.trim().is_empty() {
                    lines.push(format!("Note under the grid: {}", self.0.consultation_type));
                }
                lines
            }),
            Section::Credentials => (!self.0.credentials.is_empty()).then(|| {
                vec![format!(
                    "List exactly these credentials: {}",
                    join_list(&self.0.credentials)
                )]
            }),
            _ => None,
        }
    }

    fn contact_label(&self) -> &'static str {
        "Request a consultation"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Professional and corporate but modern",
            "Typography: 'Inter' throughout",
            "Palette: white, dark text, one professional accent",
        ]
    }
}
