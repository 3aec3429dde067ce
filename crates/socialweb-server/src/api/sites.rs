//! Stored-site API: create, read, partial update, delete, and the
//! "does this Instagram account already have a site" check.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use socialweb_db::{slugify, NewSite, SiteRow, SiteUpdate};
use socialweb_templating::Category;
use uuid::Uuid;

use crate::middleware::RequestId;

use super::{map_db_error, ApiError, ApiResponse, AppState};

// ---------------------------------------------------------------------------
// Request bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(super) struct CreateSiteRequest {
    html: Option<String>,
    instagram_username: Option<String>,
    instagram_user_id: Option<String>,
    analyzed_profile: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub(super) struct UpdateSiteRequest {
    html: Option<String>,
    business_name: Option<String>,
    category: Option<String>,
    tagline: Option<String>,
    bio: Option<String>,
    subdomain: Option<String>,
    custom_domain: Option<String>,
    is_published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CheckExistingQuery {
    instagram_user_id: Option<String>,
}

// ---------------------------------------------------------------------------
// Response bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub(super) struct CreatedSite {
    id: Uuid,
    slug: String,
    url: String,
    business_name: Option<String>,
    category: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub(super) struct ExistingSite {
    id: Uuid,
    slug: String,
    url: String,
    business_name: Option<String>,
    category: Option<String>,
    html: String,
    subdomain: Option<String>,
    is_published: bool,
    created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Trimmed, non-empty string field of the analyzed profile JSON.
fn profile_text(profile: &serde_json::Value, key: &str) -> Option<String> {
    profile
        .get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

/// Canonical id of one of the seven categories.
fn validate_category(req_id: &str, value: &str) -> Result<String, ApiError> {
    value
        .parse::<Category>()
        .map(|category| category.as_str().to_owned())
        .map_err(|e| ApiError::new(req_id, "validation_error", e.to_string()))
}

fn validate_subdomain(req_id: &str, value: &str, reserved: &str) -> Result<String, ApiError> {
    let subdomain = value.trim().to_ascii_lowercase();
    if subdomain.is_empty() || subdomain.len() > 63 || slugify(&subdomain) != subdomain {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("subdomain must be lowercase letters, digits and '-', got '{value}'"),
        ));
    }
    if subdomain == reserved || subdomain == "www" {
        return Err(ApiError::new(
            req_id,
            "validation_error",
            format!("subdomain '{subdomain}' is reserved"),
        ));
    }
    Ok(subdomain)
}

fn validate_custom_domain(req_id: &str, value: &str) -> Result<String, ApiError> {
    let domain = value.trim().trim_end_matches('.').to_ascii_lowercase();
    let well_formed = domain.len() <= 253
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        });
    if well_formed {
        Ok(domain)
    } else {
        Err(ApiError::new(
            req_id,
            "validation_error",
            format!("custom_domain must be a bare host name, got '{value}'"),
        ))
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/sites — store a generated site under a fresh slug.
pub(super) async fn create_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<CreateSiteRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedSite>>), ApiError> {
    let rid = &req_id.0;

    let Some(html) = body.html.filter(|h| !h.trim().is_empty()) else {
        return Err(ApiError::new(rid, "validation_error", "html is required"));
    };
    let profile = body.analyzed_profile.unwrap_or(serde_json::Value::Null);
    let Some(business_name) = profile_text(&profile, "business_name") else {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "analyzed_profile.business_name is required",
        ));
    };

    let category = profile_text(&profile, "category")
        .map(|c| validate_category(rid, &c))
        .transpose()?;

    let slug = socialweb_db::generate_unique_slug(&state.pool, &business_name)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?;

    let row = socialweb_db::create_site(
        &state.pool,
        &NewSite {
            slug,
            html,
            instagram_username: non_blank(body.instagram_username),
            instagram_user_id: non_blank(body.instagram_user_id),
            category,
            tagline: profile_text(&profile, "tagline"),
            bio: profile_text(&profile, "bio"),
            business_name: Some(business_name),
            analyzed_profile: Some(profile),
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(
            req_id.0,
            CreatedSite {
                url: state.config.site_url(&row.slug),
                id: row.id,
                slug: row.slug,
                business_name: row.business_name,
                category: row.category,
                created_at: row.created_at,
            },
        )),
    ))
}

/// GET /api/sites/check-existing — the site owned by an Instagram account.
pub(super) async fn check_existing(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<CheckExistingQuery>,
) -> Result<Json<ApiResponse<ExistingSite>>, ApiError> {
    let rid = &req_id.0;
    let Some(user_id) = non_blank(query.instagram_user_id) else {
        return Err(ApiError::new(
            rid,
            "bad_request",
            "instagram_user_id is required",
        ));
    };

    let row = socialweb_db::get_site_by_instagram_user_id(&state.pool, &user_id)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", "No site found"))?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        ExistingSite {
            url: state.config.site_url(&row.slug),
            id: row.id,
            slug: row.slug,
            business_name: row.business_name,
            category: row.category,
            html: row.html,
            subdomain: row.subdomain,
            is_published: row.is_published,
            created_at: row.created_at,
        },
    )))
}

/// GET /api/sites/:slug — full stored site.
pub(super) async fn get_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<SiteRow>>, ApiError> {
    let rid = &req_id.0;
    let row = socialweb_db::get_site_by_slug(&state.pool, &slug)
        .await
        .map_err(|e| map_db_error(rid.clone(), &e))?
        .ok_or_else(|| ApiError::new(rid, "not_found", format!("site '{slug}' not found")))?;

    Ok(Json(ApiResponse::new(req_id.0, row)))
}

/// PATCH /api/sites/:slug — sparse update; absent fields are kept.
pub(super) async fn update_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
    Json(body): Json<UpdateSiteRequest>,
) -> Result<Json<ApiResponse<SiteRow>>, ApiError> {
    let rid = &req_id.0;

    if body.html.as_deref().is_some_and(|h| h.trim().is_empty()) {
        return Err(ApiError::new(rid, "validation_error", "html cannot be empty"));
    }
    if body
        .business_name
        .as_deref()
        .is_some_and(|n| n.trim().is_empty())
    {
        return Err(ApiError::new(
            rid,
            "validation_error",
            "business_name cannot be empty",
        ));
    }
    let category = body
        .category
        .as_deref()
        .map(|c| validate_category(rid, c))
        .transpose()?;
    let subdomain = body
        .subdomain
        .as_deref()
        .map(|s| validate_subdomain(rid, s, &state.config.app_subdomain))
        .transpose()?;
    let custom_domain = body
        .custom_domain
        .as_deref()
        .map(|d| validate_custom_domain(rid, d))
        .transpose()?;

    let row = socialweb_db::update_site(
        &state.pool,
        &slug,
        &SiteUpdate {
            html: body.html,
            business_name: body.business_name.map(|n| n.trim().to_owned()),
            category,
            tagline: body.tagline,
            bio: body.bio,
            subdomain,
            custom_domain,
            is_published: body.is_published,
        },
    )
    .await
    .map_err(|e| map_db_error(rid.clone(), &e))?;

    tracing::info!(slug = %row.slug, "site updated");
    Ok(Json(ApiResponse::new(req_id.0, row)))
}

/// DELETE /api/sites/:slug — remove a stored site.
pub(super) async fn delete_site(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Path(slug): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, ApiError> {
    socialweb_db::delete_site(&state.pool, &slug)
        .await
        .map_err(|e| map_db_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        req_id.0,
        serde_json::json!({ "deleted": true }),
    )))
}
