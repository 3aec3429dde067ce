use axum::{extract::State, Extension, Json};
use serde::Deserialize;
use socialweb_generator::GeneratedWebsite;
use socialweb_templating::{MediaItem, SocialProfile};

use crate::middleware::RequestId;

use super::{map_generator_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct GenerateWebsiteRequest {
    profile: Option<SocialProfile>,
    media: Option<Vec<MediaItem>>,
}

/// POST /api/generate-website — run the generation pipeline for a fetched
/// profile.
pub(super) async fn generate_website(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<GenerateWebsiteRequest>,
) -> Result<Json<ApiResponse<GeneratedWebsite>>, ApiError> {
    let (Some(profile), Some(media)) = (body.profile, body.media) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "profile and media are required",
        ));
    };

    let website = state
        .generator
        .generate_website(&profile, &media)
        .await
        .map_err(|e| map_generator_error(req_id.0.clone(), &e))?;

    tracing::info!(
        username = profile.username_or_empty(),
        category = %website.classification.category,
        total_ms = website.timing.total_ms,
        "website generated"
    );
    Ok(Json(ApiResponse::new(req_id.0, website)))
}
