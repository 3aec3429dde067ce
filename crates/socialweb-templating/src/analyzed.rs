//! The structured business profile produced by the analysis step.
//!
//! [`AnalyzedProfile`] is internally tagged on `category`, so the JSON shape
//! is the flat object the analysis model is asked to return:
//!
//! ```json
//! { "category": "crafts", "business_name": "...", "craft_type": "...", ... }
//! ```

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::error::TemplatingError;

/// Fields every category shares.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileBasics {
    pub business_name: String,
    pub tagline: String,
    pub bio: String,
    #[serde(default)]
    pub keywords_seo: Vec<String>,
    #[serde(default)]
    pub locations: Vec<String>,
    #[serde(default)]
    pub style: String,
    #[serde(default)]
    pub target_audience: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhotographerProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub portfolio_focus: Vec<String>,
    pub packages: Vec<String>,
    pub specialties: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestaurantProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub cuisine_type: String,
    pub menu_highlights: Vec<String>,
    pub dining_options: Vec<String>,
    pub price_range: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcommerceProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub product_categories: Vec<String>,
    pub shipping_info: String,
    pub featured_products: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfessionalServicesProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub services_offered: Vec<String>,
    pub credentials: Vec<String>,
    pub consultation_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WellnessProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub specialties: Vec<String>,
    pub class_types: Vec<String>,
    pub certifications: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CraftsProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub craft_type: String,
    pub techniques: Vec<String>,
    /// Gates the "custom orders" page section.
    pub custom_orders: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OtherProfile {
    #[serde(flatten)]
    pub basics: ProfileBasics,
    pub services: Vec<String>,
}

/// Analyzed profile, one variant per [`Category`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "category", rename_all = "snake_case")]
pub enum AnalyzedProfile {
    Photographer(PhotographerProfile),
    Restaurant(RestaurantProfile),
    Ecommerce(EcommerceProfile),
    ProfessionalServices(ProfessionalServicesProfile),
    Wellness(WellnessProfile),
    Crafts(CraftsProfile),
    Other(OtherProfile),
}

impl AnalyzedProfile {
    #[must_use]
    pub fn category(&self) -> Category {
        match self {
            AnalyzedProfile::Photographer(_) => Category::Photographer,
            AnalyzedProfile::Restaurant(_) => Category::Restaurant,
            AnalyzedProfile::Ecommerce(_) => Category::Ecommerce,
            AnalyzedProfile::ProfessionalServices(_) => Category::ProfessionalServices,
            AnalyzedProfile::Wellness(_) => Category::Wellness,
            AnalyzedProfile::Crafts(_) => Category::Crafts,
            AnalyzedProfile::Other(_) => Category::Other,
        }
    }

    #[must_use]
    pub fn basics(&self) -> &ProfileBasics {
        match self {
            AnalyzedProfile::Photographer(p) => &p.basics,
            AnalyzedProfile::Restaurant(p) => &p.basics,
            AnalyzedProfile::Ecommerce(p) => &p.basics,
            AnalyzedProfile::ProfessionalServices(p) => &p.basics,
            AnalyzedProfile::Wellness(p) => &p.basics,
            AnalyzedProfile::Crafts(p) => &p.basics,
            AnalyzedProfile::Other(p) => &p.basics,
        }
    }

    #[must_use]
    pub fn business_name(&self) -> &str {
        &self.basics().business_name
    }

    /// Reject profiles the composer cannot build a truthful prompt from.
    ///
    /// # Errors
    ///
    /// Returns [`TemplatingError::InvalidProfile`] when the business name is
    /// blank or a list field contains a blank entry.
    pub fn validate(&self) -> Result<(), TemplatingError> {
        let basics = self.basics();
        if basics.business_name.trim().is_empty() {
            return Err(TemplatingError::InvalidProfile(
                "business_name must not be blank".to_string(),
            ));
        }

        let lists: Vec<(&str, &[String])> = match self {
            AnalyzedProfile::Photographer(p) => vec![
                ("portfolio_focus", p.portfolio_focus.as_slice()),
                ("packages", p.packages.as_slice()),
                ("specialties", p.specialties.as_slice()),
            ],
            AnalyzedProfile::Restaurant(p) => vec![
                ("menu_highlights", p.menu_highlights.as_slice()),
                ("dining_options", p.dining_options.as_slice()),
            ],
            AnalyzedProfile::Ecommerce(p) => vec![
                ("product_categories", p.product_categories.as_slice()),
                ("featured_products", p.featured_products.as_slice()),
            ],
            AnalyzedProfile::ProfessionalServices(p) => vec![
                ("services_offered", p.services_offered.as_slice()),
                ("credentials", p.credentials.as_slice()),
            ],
            AnalyzedProfile::Wellness(p) => vec![
                ("specialties", p.specialties.as_slice()),
                ("class_types", p.class_types.as_slice()),
                ("certifications", p.certifications.as_slice()),
            ],
            AnalyzedProfile::Crafts(p) => vec![("techniques", p.techniques.as_slice())],
            AnalyzedProfile::Other(p) => vec![("services", p.services.as_slice())],
        };

        for (field, values) in lists
            .into_iter()
            .chain([("locations", basics.locations.as_slice())])
        {
            if values.iter().any(|v| v.trim().is_empty()) {
                return Err(TemplatingError::InvalidProfile(format!(
                    "{field} contains a blank entry"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn crafts_json() -> serde_json::Value {
        json!({
            "category": "crafts",
            "business_name": "Barro Sur",
            "tagline": "Cerámica hecha a mano",
            "bio": "Taller de cerámica en Valparaíso.",
            "keywords_seo": ["ceramica"],
            "locations": ["Valparaíso"],
            "style": "rústico",
            "target_audience": "amantes del diseño",
            "craft_type": "Pottery",
            "techniques": ["Torno", "Esmaltado"],
            "custom_orders": true
        })
    }

    #[test]
    fn deserializes_flat_tagged_object() {
        let profile: AnalyzedProfile = serde_json::from_value(crafts_json()).unwrap();
        assert_eq!(profile.category(), Category::Crafts);
        assert_eq!(profile.business_name(), "Barro Sur");
        let AnalyzedProfile::Crafts(crafts) = &profile else {
            panic!("expected crafts variant");
        };
        assert!(crafts.custom_orders);
        assert_eq!(crafts.techniques, vec!["Torno", "Esmaltado"]);
    }

    #[test]
    fn serializes_back_to_flat_object_with_category_tag() {
        let profile: AnalyzedProfile = serde_json::from_value(crafts_json()).unwrap();
        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["category"], "crafts");
        assert_eq!(value["craft_type"], "Pottery");
        assert_eq!(value["business_name"], "Barro Sur");
    }

    #[test]
    fn missing_category_specific_field_is_rejected() {
        let mut value = crafts_json();
        value.as_object_mut().unwrap().remove("custom_orders");
        let err = serde_json::from_value::<AnalyzedProfile>(value).unwrap_err();
        assert!(err.to_string().contains("custom_orders"), "{err}");
    }

    #[test]
    fn unknown_category_tag_is_rejected() {
        let mut value = crafts_json();
        value["category"] = json!("Fotografía");
        assert!(serde_json::from_value::<AnalyzedProfile>(value).is_err());
    }

    #[test]
    fn optional_basics_default_to_empty() {
        let profile: AnalyzedProfile = serde_json::from_value(json!({
            "category": "other",
            "business_name": "Kiosco",
            "tagline": "",
            "bio": "",
            "services": []
        }))
        .unwrap();
        assert!(profile.basics().locations.is_empty());
        assert!(profile.basics().style.is_empty());
        assert!(profile.validate().is_ok());
    }

    #[test]
    fn blank_business_name_fails_validation() {
        let mut value = crafts_json();
        value["business_name"] = json!("   ");
        let profile: AnalyzedProfile = serde_json::from_value(value).unwrap();
        assert!(matches!(
            profile.validate(),
            Err(TemplatingError::InvalidProfile(_))
        ));
    }

    #[test]
    fn blank_list_entry_fails_validation() {
        let mut value = crafts_json();
        value["techniques"] = json!(["Torno", " "]);
        let profile: AnalyzedProfile = serde_json::from_value(value).unwrap();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("techniques"), "{err}");
    }
}
