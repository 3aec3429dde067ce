//! Integration tests for `LinkedinClient` using wiremock HTTP mocks.

use socialweb_linkedin::{LinkedinClient, LinkedinError};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(base_url: &str) -> LinkedinClient {
    LinkedinClient::with_base_urls(30, base_url, base_url)
        .expect("client construction should not fail")
}

#[tokio::test]
async fn exchange_code_returns_access_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .and(body_string_contains("grant_type=authorization_code"))
        .and(body_string_contains("code=li-code"))
        .and(body_string_contains("client_secret=shh"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "access_token": "AQX-token",
            "expires_in": 5_183_999,
            "scope": "email,openid,profile,w_member_social",
            "token_type": "Bearer",
            "id_token": "eyJ.x.y"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let token = test_client(&server.uri())
        .exchange_code("li", "shh", "li-code", "https://app.example.com/cb")
        .await
        .expect("token exchange should succeed");
    assert_eq!(token, "AQX-token");
}

#[tokio::test]
async fn exchange_code_surfaces_error_description() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/oauth/v2/accessToken"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "invalid_request",
            "error_description": "Unable to retrieve access token: authorization code not found"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .exchange_code("li", "shh", "stale", "https://app.example.com/cb")
        .await
        .unwrap_err();
    assert!(
        matches!(err, LinkedinError::Api(ref m) if m.contains("authorization code not found")),
        "unexpected error: {err}"
    );
}

#[tokio::test]
async fn fetch_userinfo_sends_bearer_and_maps_claims() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/userinfo"))
        .and(header("authorization", "Bearer AQX-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "sub": "782bbtaQ",
            "name": "Lucía Pérez",
            "given_name": "Lucía",
            "family_name": "Pérez",
            "picture": "https://media.licdn.com/dms/image/abc",
            "locale": {"country": "AR", "language": "es"},
            "email": "lucia@example.com",
            "email_verified": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let profile = test_client(&server.uri())
        .fetch_userinfo("AQX-token")
        .await
        .expect("userinfo should succeed");
    assert_eq!(profile.id, "782bbtaQ");
    assert_eq!(profile.family_name.as_deref(), Some("Pérez"));
    assert_eq!(profile.locale.as_deref(), Some("es_AR"));
    assert_eq!(profile.email.as_deref(), Some("lucia@example.com"));
}

#[tokio::test]
async fn fetch_userinfo_surfaces_rest_error_message() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/userinfo"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "serviceErrorCode": 65600,
            "message": "Invalid access token",
            "status": 401
        })))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_userinfo("expired")
        .await
        .unwrap_err();
    assert!(matches!(err, LinkedinError::Api(ref m) if m == "Invalid access token"));
}

#[tokio::test]
async fn bare_status_without_payload_is_reported() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/userinfo"))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let err = test_client(&server.uri())
        .fetch_userinfo("tok")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        LinkedinError::Status { status: 503, ref body } if body == "upstream unavailable"
    ));
}
