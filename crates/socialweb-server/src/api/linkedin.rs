//! LinkedIn sign-in and member profile lookup.

use axum::{
    extract::{Query, State},
    response::Redirect,
    Extension, Json,
};
use serde::Deserialize;
use socialweb_linkedin::{authorize_url, LinkedinError, LinkedinProfile};

use crate::middleware::RequestId;

use super::auth::home_redirect;
use super::{map_linkedin_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct CallbackQuery {
    code: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProfileQuery {
    access_token: Option<String>,
}

/// GET /api/auth/linkedin — redirect to the LinkedIn sign-in page.
pub(super) async fn linkedin_login(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Redirect, ApiError> {
    let Some(client_id) = state.config.linkedin_client_id.as_deref() else {
        return Err(ApiError::new(
            req_id.0,
            "internal_error",
            "LinkedIn OAuth is not configured",
        ));
    };

    let oauth_state = uuid::Uuid::new_v4().to_string();
    let url = authorize_url(client_id, &state.config.linkedin_redirect_uri(), &oauth_state)
        .map_err(|e| map_linkedin_error(req_id.0, &e))?;
    Ok(Redirect::temporary(url.as_str()))
}

/// GET /api/auth/linkedin/callback — exchange the code and redirect home with
/// either `?linkedin_token=` or `?error=`.
pub(super) async fn linkedin_callback(
    State(state): State<AppState>,
    Query(query): Query<CallbackQuery>,
) -> Redirect {
    let base = state.config.public_base_url.as_str();

    if let Some(error) = query.error {
        tracing::warn!(error = %error, "linkedin sign-in denied");
        let message = query.error_description.unwrap_or(error);
        return home_redirect(base, "error", &message);
    }

    let Some(code) = query.code.filter(|c| !c.trim().is_empty()) else {
        return home_redirect(base, "error", "No authorization code received");
    };

    let (Some(client_id), Some(client_secret)) = (
        state.config.linkedin_client_id.as_deref(),
        state.config.linkedin_client_secret.as_deref(),
    ) else {
        return home_redirect(base, "error", "LinkedIn OAuth is not configured");
    };

    match state
        .linkedin
        .exchange_code(client_id, client_secret, &code, &state.config.linkedin_redirect_uri())
        .await
    {
        Ok(token) => {
            tracing::info!("linkedin sign-in completed");
            home_redirect(base, "linkedin_token", &token)
        }
        Err(e) => {
            tracing::warn!(error = %e, "linkedin code exchange failed");
            let detail = match e {
                LinkedinError::Api(message) => message,
                other => other.to_string(),
            };
            home_redirect(
                base,
                "error",
                &format!("LinkedIn authentication failed: {detail}"),
            )
        }
    }
}

/// GET /api/linkedin/profile — OpenID claims for a LinkedIn access token.
pub(super) async fn linkedin_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<ProfileQuery>,
) -> Result<Json<ApiResponse<LinkedinProfile>>, ApiError> {
    let Some(token) = query.access_token.filter(|t| !t.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "access_token is required",
        ));
    };

    let profile = state
        .linkedin
        .fetch_userinfo(&token)
        .await
        .map_err(|e| map_linkedin_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, profile)))
}
