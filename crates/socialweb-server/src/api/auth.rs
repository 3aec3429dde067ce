//! Instagram OAuth handoff: redirect to the login dialog, then trade the
//! returned code for a token and hand it to the front page.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Extension,
};
use reqwest::Url;
use serde::Deserialize;
use socialweb_instagram::{authorize_url, InstagramError};

use crate::middleware::RequestId;

use super::{map_instagram_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    error_reason: Option<String>,
    error_description: Option<String>,
}

/// `{public}/?{key}={value}`, or `/` if the configured base URL is unusable.
pub(super) fn home_redirect(public_base_url: &str, key: &str, value: &str) -> Redirect {
    match Url::parse_with_params(&format!("{public_base_url}/"), &[(key, value)]) {
        Ok(url) => Redirect::temporary(url.as_str()),
        Err(e) => {
            tracing::error!(error = %e, "public base url does not parse");
            Redirect::temporary("/")
        }
    }
}

/// GET /api/auth/instagram — redirect to the Instagram login dialog.
pub(super) async fn instagram_login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Redirect, ApiError> {
    let Some(app_id) = state.config.instagram_app_id.as_deref() else {
        return Err(ApiError::new(
            req_id.0,
            "internal_error",
            "Instagram OAuth is not configured",
        ));
    };

    let url = authorize_url(app_id, &state.config.oauth_redirect_uri())
        .map_err(|e| map_instagram_error(req_id.0, &e))?;
    Ok(Redirect::temporary(url.as_str()))
}

/// GET /api/auth/callback — exchange the code and redirect home with either
/// `?token=` or `?error=`.
pub(super) async fn callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let base = state.config.public_base_url.as_str();

    if let Some(error) = query.error {
        tracing::warn!(error = %error, reason = ?query.error_reason, "instagram login denied");
        let detail = serde_json::json!({
            "error": error,
            "error_reason": query.error_reason,
            "error_description": query.error_description,
        });
        return home_redirect(base, "error", &detail.to_string());
    }

    let Some(code) = query.code.filter(|c| !c.trim().is_empty()) else {
        return home_redirect(base, "error", "No code received");
    };

    let (Some(app_id), Some(app_secret)) = (
        state.config.instagram_app_id.as_deref(),
        state.config.instagram_app_secret.as_deref(),
    ) else {
        return home_redirect(base, "error", "Instagram OAuth is not configured");
    };

    match state
        .instagram
        .exchange_code(app_id, app_secret, &code, &state.config.oauth_redirect_uri())
        .await
    {
        Ok(token) => {
            tracing::info!("instagram login completed");
            home_redirect(base, "token", &token)
        }
        Err(e) => {
            tracing::warn!(error = %e, "instagram code exchange failed");
            let message = match e {
                InstagramError::Api(message) => message,
                other => other.to_string(),
            };
            home_redirect(base, "error", &message)
        }
    }
}
