//! Raw profile records as delivered by the social profile fetcher, plus the
//! two values derived from them: the classifier signal and the gallery.

use serde::{Deserialize, Serialize};

/// Most-recent captions considered by the classifier and the analysis step.
pub const MAX_SIGNAL_CAPTIONS: usize = 15;

/// Upper bound on images handed to the composer.
pub const MAX_GALLERY_ASSETS: usize = 9;

/// A connected social account, as returned by the platform API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SocialProfile {
    pub user_id: Option<String>,
    pub username: Option<String>,
    pub name: Option<String>,
    pub biography: Option<String>,
    pub website: Option<String>,
    pub profile_picture_url: Option<String>,
    pub followers_count: Option<u64>,
    pub follows_count: Option<u64>,
    pub media_count: Option<u64>,
    pub account_type: Option<String>,
}

impl SocialProfile {
    #[must_use]
    pub fn username_or_empty(&self) -> &str {
        self.username.as_deref().unwrap_or_default()
    }

    /// Public profile URL, used as the contact target on generated pages.
    #[must_use]
    pub fn profile_link(&self) -> String {
        format!("https://instagram.com/{}", self.username_or_empty())
    }

    /// Display name, falling back to the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| self.username_or_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    Image,
    Video,
    CarouselAlbum,
    #[serde(other)]
    Unknown,
}

impl MediaType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            MediaType::Image => "IMAGE",
            MediaType::Video => "VIDEO",
            MediaType::CarouselAlbum => "CAROUSEL_ALBUM",
            MediaType::Unknown => "UNKNOWN",
        }
    }

    /// Whether the item's `media_url` points at a still image.
    #[must_use]
    pub fn is_image_bearing(self) -> bool {
        matches!(self, MediaType::Image | MediaType::CarouselAlbum)
    }
}

/// One post from the account's recent media, most-recent-first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub id: String,
    pub caption: Option<String>,
    pub media_type: MediaType,
    pub media_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub permalink: Option<String>,
    pub timestamp: Option<String>,
}

/// Classifier input. Built once per classification call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileSignal {
    pub biography: String,
    /// Most-recent-first, at most [`MAX_SIGNAL_CAPTIONS`] entries.
    pub captions: Vec<String>,
    pub account_type: Option<String>,
}

impl ProfileSignal {
    #[must_use]
    pub fn new(
        biography: impl Into<String>,
        captions: impl IntoIterator<Item = String>,
        account_type: Option<String>,
    ) -> Self {
        Self {
            biography: biography.into(),
            captions: captions.into_iter().take(MAX_SIGNAL_CAPTIONS).collect(),
            account_type,
        }
    }

    #[must_use]
    pub fn from_profile(profile: &SocialProfile, media: &[MediaItem]) -> Self {
        Self::new(
            profile.biography.clone().unwrap_or_default(),
            media.iter().filter_map(|m| m.caption.clone()),
            profile.account_type.clone(),
        )
    }
}

/// An image selected for the generated page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GalleryAsset {
    /// URL the page should load the image from.
    pub url: String,
    /// Post the image links back to.
    pub permalink: String,
}

/// Select up to [`MAX_GALLERY_ASSETS`] image-bearing items that have a media URL.
///
/// Items without a permalink link to `fallback_link` instead.
#[must_use]
pub fn select_gallery(media: &[MediaItem], fallback_link: &str) -> Vec<GalleryAsset> {
    media
        .iter()
        .filter(|m| m.media_type.is_image_bearing())
        .filter_map(|m| {
            let url = m.media_url.as_deref().filter(|u| !u.is_empty())?;
            Some(GalleryAsset {
                url: url.to_string(),
                permalink: m
                    .permalink
                    .as_deref()
                    .filter(|p| !p.is_empty())
                    .unwrap_or(fallback_link)
                    .to_string(),
            })
        })
        .take(MAX_GALLERY_ASSETS)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn media(id: &str, media_type: MediaType, url: Option<&str>) -> MediaItem {
        MediaItem {
            id: id.to_string(),
            caption: Some(format!("caption {id}")),
            media_type,
            media_url: url.map(str::to_string),
            thumbnail_url: None,
            permalink: Some(format!("https://www.instagram.com/p/{id}/")),
            timestamp: None,
        }
    }

    #[test]
    fn media_type_parses_platform_labels() {
        let parsed: Vec<MediaType> =
            serde_json::from_str(r#"["IMAGE","VIDEO","CAROUSEL_ALBUM","REEL"]"#).unwrap();
        assert_eq!(
            parsed,
            vec![
                MediaType::Image,
                MediaType::Video,
                MediaType::CarouselAlbum,
                MediaType::Unknown
            ]
        );
    }

    #[test]
    fn signal_caps_captions() {
        let items: Vec<MediaItem> = (0..40)
            .map(|i| media(&i.to_string(), MediaType::Image, Some("https://cdn/x.jpg")))
            .collect();
        let profile = SocialProfile {
            biography: Some("bio".to_string()),
            ..SocialProfile::default()
        };
        let signal = ProfileSignal::from_profile(&profile, &items);
        assert_eq!(signal.captions.len(), MAX_SIGNAL_CAPTIONS);
        assert_eq!(signal.captions[0], "caption 0");
        assert_eq!(signal.biography, "bio");
    }

    #[test]
    fn signal_skips_missing_captions() {
        let mut item = media("1", MediaType::Image, None);
        item.caption = None;
        let signal = ProfileSignal::from_profile(&SocialProfile::default(), &[item]);
        assert!(signal.captions.is_empty());
        assert!(signal.biography.is_empty());
    }

    #[test]
    fn gallery_keeps_only_image_bearing_items_with_urls() {
        let items = vec![
            media("a", MediaType::Video, Some("https://cdn/a.mp4")),
            media("b", MediaType::Image, Some("https://cdn/b.jpg")),
            media("c", MediaType::CarouselAlbum, Some("https://cdn/c.jpg")),
            media("d", MediaType::Image, None),
        ];
        let gallery = select_gallery(&items, "https://instagram.com/x");
        let urls: Vec<&str> = gallery.iter().map(|g| g.url.as_str()).collect();
        assert_eq!(urls, vec!["https://cdn/b.jpg", "https://cdn/c.jpg"]);
        assert_eq!(gallery[0].permalink, "https://www.instagram.com/p/b/");
    }

    #[test]
    fn gallery_is_capped() {
        let items: Vec<MediaItem> = (0..20)
            .map(|i| media(&i.to_string(), MediaType::Image, Some("https://cdn/i.jpg")))
            .collect();
        assert_eq!(select_gallery(&items, "").len(), MAX_GALLERY_ASSETS);
    }

    #[test]
    fn gallery_falls_back_to_profile_link() {
        let mut item = media("a", MediaType::Image, Some("https://cdn/a.jpg"));
        item.permalink = None;
        let gallery = select_gallery(&[item], "https://instagram.com/luna");
        assert_eq!(gallery[0].permalink, "https://instagram.com/luna");
    }

    #[test]
    fn display_name_falls_back_to_username() {
        let profile = SocialProfile {
            username: Some("cafe.luna".to_string()),
            name: Some("  ".to_string()),
            ..SocialProfile::default()
        };
        assert_eq!(profile.display_name(), "cafe.luna");
        assert_eq!(profile.profile_link(), "https://instagram.com/cafe.luna");
    }
}
