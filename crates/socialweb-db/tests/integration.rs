//! Offline tests for socialweb-db pool configuration, slugs and row types.
//! These tests do not require a live database connection.

use socialweb_core::{AppConfig, Environment};
use socialweb_db::{slugify, PoolConfig, SiteRow, SiteUpdate};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

#[test]
fn pool_config_from_app_config_uses_core_values() {
    let app_config = AppConfig {
        database_url: "postgres://example".to_string(),
        env: Environment::Test,
        bind_addr: SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 3000),
        log_level: "info".to_string(),
        public_base_url: "http://localhost:3000".to_string(),
        base_domain: None,
        app_subdomain: "app".to_string(),
        instagram_app_id: None,
        instagram_app_secret: None,
        linkedin_client_id: None,
        linkedin_client_secret: None,
        openai_api_key: None,
        llm_base_url: "https://api.openai.com/v1".to_string(),
        analysis_model: "gpt-4o-mini".to_string(),
        html_model: "gpt-4o".to_string(),
        html_max_tokens: 8192,
        llm_timeout_secs: 180,
        image_proxy: false,
        http_timeout_secs: 30,
        http_max_retries: 2,
        db_max_connections: 42,
        db_min_connections: 7,
        db_acquire_timeout_secs: 9,
    };

    let pool_config = PoolConfig::from_app_config(&app_config);
    assert_eq!(pool_config.max_connections, 42);
    assert_eq!(pool_config.min_connections, 7);
    assert_eq!(pool_config.acquire_timeout_secs, 9);
}

#[test]
fn slugify_handles_spanish_business_names() {
    assert_eq!(slugify("Panadería El Árbol"), "panaderia-el-arbol");
    assert_eq!(slugify("¡Hola, Señora Piñata!"), "hola-senora-pinata");
}

#[test]
fn site_update_default_changes_nothing() {
    let update = SiteUpdate::default();
    assert!(update.html.is_none());
    assert!(update.subdomain.is_none());
    assert!(update.is_published.is_none());
}

/// Compile-time smoke test: confirm that [`SiteRow`] has all expected fields
/// with the correct types, and serializes them by name.
#[test]
fn site_row_has_expected_fields() {
    use chrono::Utc;
    use uuid::Uuid;

    let row = SiteRow {
        id: Uuid::new_v4(),
        slug: "cafe-luna".to_string(),
        html: "<!DOCTYPE html><html></html>".to_string(),
        instagram_username: Some("cafe.luna".to_string()),
        instagram_user_id: Some("1784".to_string()),
        business_name: Some("Café Luna".to_string()),
        category: Some("restaurant".to_string()),
        tagline: None,
        bio: None,
        analyzed_profile: Some(serde_json::json!({"category": "restaurant"})),
        subdomain: None,
        custom_domain: None,
        is_published: true,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    let json = serde_json::to_value(&row).expect("serialize");
    assert_eq!(json["slug"], "cafe-luna");
    assert_eq!(json["business_name"], "Café Luna");
    assert_eq!(json["is_published"], true);
    assert!(json["subdomain"].is_null());
    assert_eq!(json["analyzed_profile"]["category"], "restaurant");
}
