//! Instagram Graph API response types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use socialweb_templating::{MediaItem, SocialProfile};

/// `GET /me` response. Every field may be absent depending on account type.
#[derive(Debug, Deserialize)]
pub(crate) struct GraphProfile {
    #[serde(default, deserialize_with = "string_or_number")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
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

impl From<GraphProfile> for SocialProfile {
    fn from(raw: GraphProfile) -> Self {
        SocialProfile {
            user_id: raw.user_id.or(raw.id),
            username: raw.username,
            name: raw.name,
            biography: raw.biography,
            website: raw.website,
            profile_picture_url: raw.profile_picture_url,
            followers_count: raw.followers_count,
            follows_count: raw.follows_count,
            media_count: raw.media_count,
            account_type: raw.account_type,
        }
    }
}

/// `GET /me/media` page: `{ "data": [ ... ], "paging": { ... } }`.
#[derive(Debug, Deserialize)]
pub(crate) struct MediaPage {
    #[serde(default)]
    pub data: Vec<MediaItem>,
}

/// `POST /oauth/access_token` success body.
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}

/// Profile plus recent media, fetched together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullProfile {
    pub profile: SocialProfile,
    pub media: Vec<MediaItem>,
    pub fetched_at: DateTime<Utc>,
}

/// Instagram returns ids as strings on some endpoints and numbers on others.
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
