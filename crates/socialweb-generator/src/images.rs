//! Image access: decides which URL the generated page loads each image from.

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

/// Rewrites raw platform media URLs before they reach the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageResolver {
    /// Use the platform CDN URL as-is.
    Direct,
    /// Route through this service's `/api/proxy-image` endpoint.
    Proxy { public_base_url: String },
}

impl ImageResolver {
    #[must_use]
    pub fn new(proxy: bool, public_base_url: &str) -> Self {
        if proxy {
            ImageResolver::Proxy {
                public_base_url: public_base_url.trim_end_matches('/').to_owned(),
            }
        } else {
            ImageResolver::Direct
        }
    }

    /// Resolve one URL. Empty input stays empty.
    #[must_use]
    pub fn resolve(&self, raw: &str) -> String {
        if raw.is_empty() {
            return String::new();
        }
        match self {
            ImageResolver::Direct => raw.to_owned(),
            ImageResolver::Proxy { public_base_url } => format!(
                "{public_base_url}/api/proxy-image?url={}",
                utf8_percent_encode(raw, NON_ALPHANUMERIC)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CDN: &str = "https://scontent.cdninstagram.com/v/t51.jpg?stp=dst-jpg&_nc_cat=1";

    #[test]
    fn direct_returns_input_unchanged() {
        assert_eq!(ImageResolver::new(false, "http://x").resolve(CDN), CDN);
    }

    #[test]
    fn proxy_encodes_the_whole_url() {
        let resolver = ImageResolver::new(true, "https://app.example.com/");
        let resolved = resolver.resolve(CDN);
        assert!(resolved.starts_with("https://app.example.com/api/proxy-image?url=https%3A%2F%2F"));
        assert!(!resolved.contains('&'));
        assert!(resolved.contains("%3Fstp%3Ddst%2Djpg%26"));
    }

    #[test]
    fn empty_url_stays_empty() {
        assert_eq!(ImageResolver::new(true, "https://a").resolve(""), "");
    }
}
