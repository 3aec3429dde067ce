//! HTTP client for the Instagram Login OAuth flow and the Graph API.
//!
//! Graph reads are retried on transient failures via
//! [`retry_with_backoff`](crate::retry::retry_with_backoff). The code-for-token
//! exchange is not retried: authorization codes are single use.

use std::time::Duration;

use reqwest::{Client, Response, Url};
use socialweb_templating::{MediaItem, SocialProfile};

use crate::error::InstagramError;
use crate::retry::retry_with_backoff;
use crate::types::{FullProfile, GraphProfile, MediaPage, TokenResponse};

const AUTHORIZE_URL: &str = "https://www.instagram.com/oauth/authorize";
const DEFAULT_OAUTH_BASE_URL: &str = "https://api.instagram.com/";
const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.instagram.com/";
const DEFAULT_BACKOFF_BASE_MS: u64 = 500;

/// Permission requested during login.
pub const OAUTH_SCOPE: &str = "instagram_business_basic";

/// Recent posts requested per profile fetch.
pub const DEFAULT_MEDIA_LIMIT: u32 = 25;

const PROFILE_FIELDS: &str = "user_id,username,name,biography,website,profile_picture_url,\
followers_count,follows_count,media_count,account_type";
const MEDIA_FIELDS: &str = "id,caption,media_type,media_url,thumbnail_url,permalink,timestamp";

/// Longest response body kept in [`InstagramError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Build the login URL the user is redirected to.
///
/// # Errors
///
/// Returns [`InstagramError::InvalidBaseUrl`] if the authorize endpoint cannot
/// be parsed, which only happens if the constant is edited incorrectly.
pub fn authorize_url(app_id: &str, redirect_uri: &str) -> Result<Url, InstagramError> {
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("client_id", app_id),
            ("redirect_uri", redirect_uri),
            ("scope", OAUTH_SCOPE),
            ("response_type", "code"),
        ],
    )
    .map_err(|e| InstagramError::InvalidBaseUrl {
        url: AUTHORIZE_URL.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_base_url(raw: &str) -> Result<Url, InstagramError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| InstagramError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// Pull the error message out of either error payload shape Instagram uses:
/// `{"error": {"message": ...}}` (Graph) or `{"error_message": ...}` (OAuth).
fn api_error_message(body: &serde_json::Value) -> Option<String> {
    body.get("error")
        .and_then(|e| e.get("message"))
        .or_else(|| body.get("error_message"))
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned)
}

/// Client for the Instagram OAuth and Graph endpoints.
///
/// Use [`InstagramClient::new`] for production or
/// [`InstagramClient::with_base_urls`] to point at a mock server in tests.
pub struct InstagramClient {
    client: Client,
    oauth_base: Url,
    graph_base: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl InstagramClient {
    /// Creates a client pointed at the production Instagram endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, max_retries: u32) -> Result<Self, InstagramError> {
        Self::with_base_urls(
            timeout_secs,
            max_retries,
            DEFAULT_OAUTH_BASE_URL,
            DEFAULT_GRAPH_BASE_URL,
        )
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`InstagramError::Http`] if the `reqwest::Client` cannot be
    /// constructed, or [`InstagramError::InvalidBaseUrl`] if either base URL
    /// does not parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        max_retries: u32,
        oauth_base: &str,
        graph_base: &str,
    ) -> Result<Self, InstagramError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("socialweb/0.1 (site-generator)")
            .build()?;

        Ok(Self {
            client,
            oauth_base: parse_base_url(oauth_base)?,
            graph_base: parse_base_url(graph_base)?,
            max_retries,
            backoff_base_ms: DEFAULT_BACKOFF_BASE_MS,
        })
    }

    /// Overrides the base back-off delay between retries.
    #[must_use]
    pub fn with_backoff_base_ms(mut self, backoff_base_ms: u64) -> Self {
        self.backoff_base_ms = backoff_base_ms;
        self
    }

    /// Exchanges an authorization code for a short-lived access token.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Api`] if Instagram rejects the code.
    /// - [`InstagramError::Http`] on network failure.
    /// - [`InstagramError::Deserialize`] if the body has no access token.
    pub async fn exchange_code(
        &self,
        app_id: &str,
        app_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String, InstagramError> {
        let url = Self::endpoint(&self.oauth_base, "oauth/access_token")?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("client_id", app_id),
                ("client_secret", app_secret),
                ("grant_type", "authorization_code"),
                ("redirect_uri", redirect_uri),
                ("code", code),
            ])
            .send()
            .await?;

        let body = read_json(response, "POST oauth/access_token").await?;
        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: "POST oauth/access_token".to_owned(),
                source: e,
            })?;
        Ok(token.access_token)
    }

    /// Fetches the authenticated account's profile.
    ///
    /// # Errors
    ///
    /// - [`InstagramError::Api`] for an invalid or expired token.
    /// - [`InstagramError::Http`] / [`InstagramError::Status`] on transport
    ///   failure after retries.
    /// - [`InstagramError::Deserialize`] if the body is not a profile.
    pub async fn fetch_profile(&self, access_token: &str) -> Result<SocialProfile, InstagramError> {
        let mut url = Self::endpoint(&self.graph_base, "me")?;
        url.query_pairs_mut()
            .append_pair("fields", PROFILE_FIELDS)
            .append_pair("access_token", access_token);

        let body = self.get_json(&url, "GET me").await?;
        let raw: GraphProfile =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: "GET me".to_owned(),
                source: e,
            })?;
        Ok(raw.into())
    }

    /// Fetches up to `limit` most recent media items, newest first.
    ///
    /// # Errors
    ///
    /// Same as [`InstagramClient::fetch_profile`].
    pub async fn fetch_media(
        &self,
        access_token: &str,
        limit: u32,
    ) -> Result<Vec<MediaItem>, InstagramError> {
        let mut url = Self::endpoint(&self.graph_base, "me/media")?;
        url.query_pairs_mut()
            .append_pair("fields", MEDIA_FIELDS)
            .append_pair("limit", &limit.to_string())
            .append_pair("access_token", access_token);

        let body = self.get_json(&url, "GET me/media").await?;
        let page: MediaPage =
            serde_json::from_value(body).map_err(|e| InstagramError::Deserialize {
                context: "GET me/media".to_owned(),
                source: e,
            })?;
        Ok(page.data)
    }

    /// Fetches profile and recent media concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error from either request.
    pub async fn fetch_full_profile(&self, access_token: &str) -> Result<FullProfile, InstagramError> {
        let (profile, media) = tokio::try_join!(
            self.fetch_profile(access_token),
            self.fetch_media(access_token, DEFAULT_MEDIA_LIMIT),
        )?;
        tracing::info!(
            username = profile.username.as_deref().unwrap_or_default(),
            media = media.len(),
            "fetched instagram profile"
        );
        Ok(FullProfile {
            profile,
            media,
            fetched_at: chrono::Utc::now(),
        })
    }

    fn endpoint(base: &Url, path: &str) -> Result<Url, InstagramError> {
        base.join(path).map_err(|e| InstagramError::InvalidBaseUrl {
            url: base.to_string(),
            reason: e.to_string(),
        })
    }

    /// GET with retry. `context` names the endpoint in errors; the URL itself
    /// carries the access token and is never logged.
    async fn get_json(&self, url: &Url, context: &str) -> Result<serde_json::Value, InstagramError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || async move {
            let response = self.client.get(url.clone()).send().await?;
            read_json(response, context).await
        })
        .await
    }
}

/// Reads a response body as JSON, surfacing Instagram error payloads first and
/// bare non-2xx statuses second.
async fn read_json(response: Response, context: &str) -> Result<serde_json::Value, InstagramError> {
    let status = response.status();
    let text = response.text().await?;
    let parsed = serde_json::from_str::<serde_json::Value>(&text);

    if let Ok(body) = &parsed {
        if let Some(message) = api_error_message(body) {
            return Err(InstagramError::Api(message));
        }
    }
    if !status.is_success() {
        let mut body = text;
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(InstagramError::Status {
            status: status.as_u16(),
            body,
        });
    }

    parsed.map_err(|e| InstagramError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
