use crate::analyzed::EcommerceProfile;
use crate::category::{Category, Section};

use super::builder::{join_list, CategoryTemplate, PromptContext};

pub(super) struct EcommerceTemplate<'a>(pub &'a EcommerceProfile);

impl CategoryTemplate for EcommerceTemplate<'_> {
    fn category(&self) -> Category {
        Category::Ecommerce
    }

    fn brief(&self) -> &'static str {
        "Generate an ELEGANT HTML landing page for an online shop."
    }

    fn rules(&self) -> &'static [&'static str] {
        &["Do NOT invent prices, products or product descriptions."]
    }

    fn facts(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Product categories", join_list(&self.0.product_categories)),
            ("Shipping", self.0.shipping_info.clone()),
        ]
    }

    fn section(&self, section: Section, ctx: &PromptContext<'_>) -> Option<Vec<String>> {
        match section {
            Section::FeaturedProducts => (!self.0.featured_products.is_empty()).then(|| {
                let mut lines = vec![format!(
                    "One card per product, name only: {}",
                    join_list(&self.0.featured_products)
                )];
                if !ctx.gallery.is_empty() {
                    lines.push(
                        "Cards may reuse gallery images in order, each linking to its post"
                            .to_string(),
                    );
                }
                lines
            }),
            Section::ShopInfo => {
                let mut lines = Vec::new();
                if !self.0.product_categories.is_empty() {
                    lines.push(format!(
                        "Category pills: {}",
                        join_list(&self.0.product_categories)
                    ));
                }
                if !self.0.shipping_info.trim().is_empty() {
                    lines.push(format!("Shipping: \"{}\"", self.0.shipping_info));
                }
                (!lines.is_empty()).then_some(lines)
            }
            _ => None,
        }
    }

    fn contact_label(&self) -> &'static str {
        "Shop on Instagram"
    }

    fn style(&self) -> &'static [&'static str] {
        &[
            "Minimal and modern",
            "Typography: 'Inter' throughout",
            "Products are the protagonist",
        ]
    }
}
