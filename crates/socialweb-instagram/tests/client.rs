//! Integration tests for `InstagramClient` using wiremock HTTP mocks.

use socialweb_instagram::{InstagramClient, InstagramError};
use socialweb_templating::MediaType;
use wiremock::matchers::{body_string_contains, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str, max_retries: u32) -> InstagramClient {
    InstagramClient::with_base_urls(30, max_retries, base_url, base_url)
        .expect("client construction should not fail")
        .with_backoff_base_ms(0)
}

#[tokio::test]
async fn exchange_code_returns_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=abc123"))
        .and(body_string_contains("client_secret=shh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "IGQVJ-token",
            "user_id": 17841400000000000_u64,
            "permissions": ["instagram_business_basic"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let token = client
        .exchange_code("app", "shh", "abc123", "https://app.example.com/api/auth/callback")
        .await
        .expect("token exchange should succeed");
    assert_eq!(token, "IGQVJ-token");
}

#[tokio::test]
async fn exchange_code_surfaces_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/access_token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error_type": "OAuthException",
            "code": 400,
            "error_message": "This authorization code has been used"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let err = client
        .exchange_code("app", "shh", "used", "https://app.example.com/cb")
        .await
        .unwrap_err();
    assert!(
        matches!(err, InstagramError::Api(ref m) if m == "This authorization code has been used"),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn fetch_profile_maps_graph_fields() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .and(query_param("access_token", "tok"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "id": "9001",
            "user_id": "17841400000000000",
            "username": "estudio.sol",
            "name": "Estudio Sol",
            "biography": "Fotógrafo profesional",
            "profile_picture_url": "https://scontent.cdninstagram.com/avatar.jpg",
            "followers_count": 4200,
            "follows_count": 120,
            "media_count": 88,
            "account_type": "MEDIA_CREATOR"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let profile = client.fetch_profile("tok").await.expect("profile");

    assert_eq!(profile.user_id.as_deref(), Some("17841400000000000"));
    assert_eq!(profile.username.as_deref(), Some("estudio.sol"));
    assert_eq!(profile.followers_count, Some(4200));
    assert_eq!(profile.account_type.as_deref(), Some("MEDIA_CREATOR"));
    assert!(profile.website.is_none());
}

#[tokio::test]
async fn fetch_media_requests_limit_and_parses_items() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me/media"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                {
                    "id": "1",
                    "caption": "sesión de bodas",
                    "media_type": "IMAGE",
                    "media_url": "https://scontent.cdninstagram.com/1.jpg",
                    "permalink": "https://www.instagram.com/p/1/",
                    "timestamp": "2024-05-01T10:00:00+0000"
                },
                {
                    "id": "2",
                    "media_type": "VIDEO",
                    "media_url": "https://scontent.cdninstagram.com/2.mp4",
                    "thumbnail_url": "https://scontent.cdninstagram.com/2.jpg"
                }
            ],
            "paging": { "cursors": { "before": "a", "after": "b" } }
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let media = client.fetch_media("tok", 25).await.expect("media");

    assert_eq!(media.len(), 2);
    assert_eq!(media[0].media_type, MediaType::Image);
    assert_eq!(media[0].caption.as_deref(), Some("sesión de bodas"));
    assert_eq!(media[1].media_type, MediaType::Video);
    assert!(media[1].caption.is_none());
}

#[tokio::test]
async fn fetch_full_profile_combines_both_calls() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "id": "1", "username": "cafe.luna" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/me/media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "data": [] })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 0);
    let full = client.fetch_full_profile("tok").await.expect("full profile");
    assert_eq!(full.profile.username.as_deref(), Some("cafe.luna"));
    assert!(full.media.is_empty());
}

#[tokio::test]
async fn invalid_token_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": {
                "message": "Invalid OAuth access token - Cannot parse access token",
                "type": "OAuthException",
                "code": 190
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 3);
    let err = client.fetch_profile("bad").await.unwrap_err();
    assert!(matches!(err, InstagramError::Api(ref m) if m.starts_with("Invalid OAuth")));
}

#[tokio::test]
async fn server_errors_are_retried_up_to_the_limit() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/me"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let client = test_client(&server.uri(), 2);
    let err = client.fetch_profile("tok").await.unwrap_err();
    assert!(
        matches!(err, InstagramError::Status { status: 503, ref body } if body == "upstream unavailable"),
        "unexpected error: {err}"
    );
}
