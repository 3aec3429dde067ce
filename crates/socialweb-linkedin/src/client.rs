//! HTTP client for LinkedIn's OpenID Connect sign-in: the authorization-code
//! exchange and the `userinfo` read. Neither call is retried.

use std::time::Duration;

use reqwest::{Client, Response, Url};

use crate::error::LinkedinError;
use crate::types::{LinkedinProfile, TokenResponse, UserInfo};

const AUTHORIZE_URL: &str = "https://www.linkedin.com/oauth/v2/authorization";
const DEFAULT_OAUTH_BASE_URL: &str = "https://www.linkedin.com/";
const DEFAULT_API_BASE_URL: &str = "https://api.linkedin.com/";

/// Scopes requested during sign-in.
pub const OAUTH_SCOPE: &str = "openid profile email w_member_social";

/// Longest response body kept in [`LinkedinError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// Build the sign-in URL. `state` is echoed back on the callback.
///
/// # Errors
///
/// Returns [`LinkedinError::InvalidBaseUrl`] if the authorize endpoint cannot
/// be parsed.
pub fn authorize_url(
    client_id: &str,
    redirect_uri: &str,
    state: &str,
) -> Result<Url, LinkedinError> {
    Url::parse_with_params(
        AUTHORIZE_URL,
        &[
            ("response_type", "code"),
            ("client_id", client_id),
            ("redirect_uri", redirect_uri),
            ("state", state),
            ("scope", OAUTH_SCOPE),
        ],
    )
    .map_err(|e| LinkedinError::InvalidBaseUrl {
        url: AUTHORIZE_URL.to_owned(),
        reason: e.to_string(),
    })
}

fn parse_base_url(raw: &str) -> Result<Url, LinkedinError> {
    let normalised = format!("{}/", raw.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| LinkedinError::InvalidBaseUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// OAuth errors carry `error` and `error_description`; REST errors carry
/// `message`.
fn api_error_message(body: &serde_json::Value) -> Option<String> {
    ["error_description", "error", "message"]
        .iter()
        .find_map(|key| body.get(key).and_then(serde_json::Value::as_str))
        .filter(|m| !m.is_empty())
        .map(str::to_owned)
}

/// Client for the LinkedIn OAuth and OpenID endpoints.
pub struct LinkedinClient {
    client: Client,
    oauth_base: Url,
    api_base: Url,
}

impl LinkedinClient {
    /// Creates a client pointed at the production LinkedIn endpoints.
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, LinkedinError> {
        Self::with_base_urls(timeout_secs, DEFAULT_OAUTH_BASE_URL, DEFAULT_API_BASE_URL)
    }

    /// Creates a client with custom base URLs (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`LinkedinError::Http`] if the `reqwest::Client` cannot be
    /// built, or [`LinkedinError::InvalidBaseUrl`] if either base URL does not
    /// parse.
    pub fn with_base_urls(
        timeout_secs: u64,
        oauth_base: &str,
        api_base: &str,
    ) -> Result<Self, LinkedinError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("socialweb/0.1 (site-generator)")
            .build()?;

        Ok(Self {
            client,
            oauth_base: parse_base_url(oauth_base)?,
            api_base: parse_base_url(api_base)?,
        })
    }

    /// Exchanges an authorization code for an access token.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Api`] if LinkedIn rejects the code.
    /// - [`LinkedinError::Http`] on network failure.
    /// - [`LinkedinError::Deserialize`] if the body has no access token.
    pub async fn exchange_code(
        &self,
        client_id: &str,
        client_secret: &str,
        code: &str,
        redirect_uri: &str,
    ) -> Result<String, LinkedinError> {
        let context = "POST oauth/v2/accessToken";
        let url = endpoint(&self.oauth_base, "oauth/v2/accessToken")?;
        let response = self
            .client
            .post(url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("client_id", client_id),
                ("client_secret", client_secret),
                ("redirect_uri", redirect_uri),
            ])
            .send()
            .await?;

        let body = read_json(response, context).await?;
        let token: TokenResponse =
            serde_json::from_value(body).map_err(|e| LinkedinError::Deserialize {
                context: context.to_owned(),
                source: e,
            })?;
        tracing::debug!("linkedin access token issued");
        Ok(token.access_token)
    }

    /// Fetches the signed-in member's OpenID claims.
    ///
    /// # Errors
    ///
    /// - [`LinkedinError::Api`] for an invalid or expired token.
    /// - [`LinkedinError::Http`] / [`LinkedinError::Status`] on transport failure.
    /// - [`LinkedinError::Deserialize`] if the body has no `sub`.
    pub async fn fetch_userinfo(&self, access_token: &str) -> Result<LinkedinProfile, LinkedinError> {
        let context = "GET v2/userinfo";
        let url = endpoint(&self.api_base, "v2/userinfo")?;
        let response = self
            .client
            .get(url)
            .bearer_auth(access_token)
            .send()
            .await?;

        let body = read_json(response, context).await?;
        let raw: UserInfo = serde_json::from_value(body).map_err(|e| LinkedinError::Deserialize {
            context: context.to_owned(),
            source: e,
        })?;
        Ok(raw.into())
    }
}

fn endpoint(base: &Url, path: &str) -> Result<Url, LinkedinError> {
    base.join(path).map_err(|e| LinkedinError::InvalidBaseUrl {
        url: base.to_string(),
        reason: e.to_string(),
    })
}

async fn read_json(response: Response, context: &str) -> Result<serde_json::Value, LinkedinError> {
    let status = response.status();
    let text = response.text().await?;
    let parsed = serde_json::from_str::<serde_json::Value>(&text);

    if !status.is_success() {
        if let Some(message) = parsed.as_ref().ok().and_then(api_error_message) {
            return Err(LinkedinError::Api(message));
        }
        let mut body = text;
        if body.len() > MAX_ERROR_BODY {
            let cut = (0..=MAX_ERROR_BODY)
                .rev()
                .find(|&i| body.is_char_boundary(i))
                .unwrap_or(0);
            body.truncate(cut);
        }
        return Err(LinkedinError::Status {
            status: status.as_u16(),
            body,
        });
    }

    parsed.map_err(|e| LinkedinError::Deserialize {
        context: context.to_owned(),
        source: e,
    })
}
