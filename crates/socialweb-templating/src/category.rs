//! Business categories and the static definition table that drives both the
//! classifier and the prompt composer.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TemplatingError;

/// Business category assigned to a social profile.
///
/// Declaration order matters: it is the tie-break order used by the
/// classifier and the iteration order of [`CATEGORIES`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Photographer,
    Restaurant,
    Ecommerce,
    ProfessionalServices,
    Wellness,
    Crafts,
    Other,
}

impl Category {
    /// Stable identifier used in JSON payloads and the `sites.category` column.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Photographer => "photographer",
            Category::Restaurant => "restaurant",
            Category::Ecommerce => "ecommerce",
            Category::ProfessionalServices => "professional_services",
            Category::Wellness => "wellness",
            Category::Crafts => "crafts",
            Category::Other => "other",
        }
    }

    /// The static definition for this category.
    #[must_use]
    pub fn definition(self) -> &'static CategoryDefinition {
        CATEGORIES
            .iter()
            .find(|def| def.id == self)
            .unwrap_or(&CATEGORIES[CATEGORIES.len() - 1])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TemplatingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        CATEGORIES
            .iter()
            .map(|def| def.id)
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| TemplatingError::UnknownCategory(s.to_string()))
    }
}

/// A page section the generated site may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    About,
    Portfolio,
    Packages,
    MenuHighlights,
    FeaturedProducts,
    ShopInfo,
    Services,
    Credentials,
    Classes,
    Gallery,
    Process,
    CustomOrders,
    Contact,
    Footer,
}

impl Section {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::Hero => "HERO",
            Section::About => "ABOUT",
            Section::Portfolio => "PORTFOLIO",
            Section::Packages => "PACKAGES",
            Section::MenuHighlights => "MENU HIGHLIGHTS",
            Section::FeaturedProducts => "FEATURED PRODUCTS",
            Section::ShopInfo => "SHOP INFO",
            Section::Services => "SERVICES",
            Section::Credentials => "CREDENTIALS",
            Section::Classes => "CLASSES",
            Section::Gallery => "GALLERY",
            Section::Process => "PROCESS",
            Section::CustomOrders => "CUSTOM ORDERS",
            Section::Contact => "CONTACT",
            Section::Footer => "FOOTER",
        }
    }
}

/// Read-only, process-wide configuration for one category.
#[derive(Debug)]
pub struct CategoryDefinition {
    pub id: Category,
    pub display_name: &'static str,
    /// Lowercase substrings matched against profile text.
    pub keywords: &'static [&'static str],
    /// Ordered page sections; the composer never emits anything outside this list.
    pub sections: &'static [Section],
    /// Category-specific fields requested from the analysis step.
    pub analysis_fields: &'static [&'static str],
    /// Spanish phrases that, found in a biography, select a Spanish page.
    pub spanish_markers: &'static [&'static str],
}

/// All seven categories in declaration (tie-break) order. `Other` is last and
/// has no keywords; it is the classifier's fallback.
pub static CATEGORIES: [CategoryDefinition; 7] = [
    CategoryDefinition {
        id: Category::Photographer,
        display_name: "Photographer/Creator",
        keywords: &[
            "photo",
            "photography",
            "photographer",
            "portrait",
            "wedding",
            "event",
            "shoot",
            "camera",
            "visual",
            "creator",
            "content creator",
            "videography",
            "sessions",
            "retratos",
            "retrato",
            "bodas",
            "fotógrafo",
            "sesión",
            "fotografia",
            "fotografía",
            "imagen",
            "captura",
            "lens",
            "shooting",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::Portfolio,
            Section::Packages,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["portfolio_focus", "packages", "specialties"],
        spanish_markers: &["hola", "fotograf", "sesión", "reserva", "contacto"],
    },
    CategoryDefinition {
        id: Category::Restaurant,
        display_name: "Restaurant/Cafe",
        keywords: &[
            "restaurant",
            "cafe",
            "food",
            "chef",
            "dining",
            "menu",
            "eat",
            "cuisine",
            "bar",
            "coffee",
            "bakery",
            "bistro",
            "cocina",
            "restaurante",
            "comida",
            "gastronomía",
            "delivery",
            "takeout",
            "foodie",
            "delicious",
            "plate",
            "dish",
            "recipe",
            "cooking",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::MenuHighlights,
            Section::Gallery,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &[
            "cuisine_type",
            "menu_highlights",
            "dining_options",
            "price_range",
        ],
        spanish_markers: &[
            "hola",
            "bienvenidos",
            "síguenos",
            "ubicación",
            "horario",
            "pedidos",
            "delivery",
        ],
    },
    CategoryDefinition {
        id: Category::Ecommerce,
        display_name: "E-commerce/Shop",
        keywords: &[
            "shop",
            "store",
            "buy",
            "sell",
            "boutique",
            "retail",
            "clothing",
            "fashion",
            "jewelry",
            "accessories",
            "tienda",
            "venta",
            "compra",
            "productos",
            "shopping",
            "online shop",
            "shopnow",
            "order",
            "purchase",
            "collection",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::FeaturedProducts,
            Section::Gallery,
            Section::ShopInfo,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["product_categories", "shipping_info", "featured_products"],
        spanish_markers: &["tienda", "envío", "pedidos", "compra", "productos"],
    },
    CategoryDefinition {
        id: Category::ProfessionalServices,
        display_name: "Professional Services",
        keywords: &[
            "consulting",
            "coach",
            "coaching",
            "lawyer",
            "legal",
            "accounting",
            "real estate",
            "agent",
            "advisor",
            "consultant",
            "professional",
            "services",
            "consultor",
            "asesor",
            "profesional",
            "attorney",
            "cpa",
            "financial",
            "business",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::Services,
            Section::Credentials,
            Section::Gallery,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["services_offered", "credentials", "consultation_type"],
        spanish_markers: &["consulta", "servicio", "profesional", "contacto"],
    },
    CategoryDefinition {
        id: Category::Wellness,
        display_name: "Wellness/Therapy",
        keywords: &[
            "yoga",
            "fitness",
            "spa",
            "massage",
            "therapy",
            "wellness",
            "health",
            "meditation",
            "trainer",
            "personal trainer",
            "gym",
            "pilates",
            "bienestar",
            "salud",
            "terapia",
            "workout",
            "exercise",
            "mindfulness",
            "healing",
            "bodywork",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::Services,
            Section::Classes,
            Section::Gallery,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["specialties", "class_types", "certifications"],
        spanish_markers: &["yoga", "bienestar", "clases", "sesiones", "reserva"],
    },
    CategoryDefinition {
        id: Category::Crafts,
        display_name: "Crafts/Handmade",
        keywords: &[
            "handmade",
            "craft",
            "art",
            "artist",
            "pottery",
            "ceramics",
            "jewelry",
            "woodwork",
            "painting",
            "sculpture",
            "artisan",
            "artesanía",
            "hecho a mano",
            "arte",
            "artista",
            "creative",
            "design",
            "maker",
            "creation",
        ],
        sections: &[
            Section::Hero,
            Section::About,
            Section::Gallery,
            Section::Process,
            Section::CustomOrders,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["craft_type", "techniques", "custom_orders"],
        spanish_markers: &["hecho a mano", "artesanal", "pedidos", "creaciones"],
    },
    CategoryDefinition {
        id: Category::Other,
        display_name: "General/Other",
        keywords: &[],
        sections: &[
            Section::Hero,
            Section::About,
            Section::Services,
            Section::Gallery,
            Section::Contact,
            Section::Footer,
        ],
        analysis_fields: &["services"],
        spanish_markers: &["hola", "contacto", "síguenos", "servicios"],
    },
];
