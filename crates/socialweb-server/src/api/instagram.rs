use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;
use socialweb_instagram::FullProfile;

use crate::middleware::RequestId;

use super::{map_instagram_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct FullProfileQuery {
    access_token: Option<String>,
}

/// GET /api/instagram/full-profile — profile plus recent media for a token.
pub(super) async fn full_profile(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<FullProfileQuery>,
) -> Result<Json<ApiResponse<FullProfile>>, ApiError> {
    let Some(token) = query.access_token.filter(|t| !t.trim().is_empty()) else {
        return Err(ApiError::new(
            req_id.0,
            "bad_request",
            "access_token is required",
        ));
    };

    let profile = state
        .instagram
        .fetch_full_profile(&token)
        .await
        .map_err(|e| map_instagram_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(req_id.0, profile)))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::test_support::{app, body_json, get, state_with, test_config, unreachable_pool};

    #[tokio::test]
    async fn returns_profile_and_media() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/me"))
            .and(query_param("access_token", "tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "user_id": "1784",
                "username": "cafe.luna",
                "biography": "Brunch y café de especialidad",
                "account_type": "BUSINESS"
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/me/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": [{
                    "id": "1",
                    "caption": "brunch",
                    "media_type": "IMAGE",
                    "media_url": "https://scontent.cdninstagram.com/1.jpg"
                }]
            })))
            .mount(&server)
            .await;

        let state = state_with(unreachable_pool(), test_config(), &server.uri());
        let response = get(app(state), "/api/instagram/full-profile?access_token=tok").await;

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["data"]["profile"]["username"], "cafe.luna");
        assert_eq!(json["data"]["media"][0]["media_type"], "IMAGE");
        assert!(json["data"]["fetched_at"].is_string());
    }

    #[tokio::test]
    async fn missing_token_is_a_bad_request() {
        let state = state_with(unreachable_pool(), test_config(), "http://127.0.0.1:1");
        let response = get(app(state), "/api/instagram/full-profile").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "access_token is required");
    }

    #[tokio::test]
    async fn invalid_token_is_reported_as_bad_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": { "message": "Invalid OAuth access token", "code": 190 }
            })))
            .mount(&server)
            .await;

        let state = state_with(unreachable_pool(), test_config(), &server.uri());
        let response = get(app(state), "/api/instagram/full-profile?access_token=bad").await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["message"], "Invalid OAuth access token");
    }
}
