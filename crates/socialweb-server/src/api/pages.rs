//! HTML-serving routes: stored sites by slug or host, and base64 previews.

use axum::{
    extract::{Path, Query, State},
    http::{header::HOST, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
};
use base64::{
    engine::general_purpose::{STANDARD, URL_SAFE},
    Engine as _,
};
use serde::Deserialize;
use socialweb_db::SiteRow;

use super::AppState;

const LANDING_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>socialweb</title></head>
<body style="font-family: system-ui, sans-serif; padding: 3rem; text-align: center;">
  <h1>Turn your Instagram into a website</h1>
  <p><a href="/api/auth/instagram">Connect Instagram</a></p>
</body>
</html>"#;

/// Which site, if any, a request's `Host` header addresses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum SiteHost {
    App,
    Subdomain(String),
    CustomDomain(String),
}

/// Classify a `Host` header value against the configured base domain.
///
/// Without a base domain every host is the application. The bare base
/// domain, `www.` and the application subdomain are the application too;
/// any other single label under the base domain names a site.
pub(super) fn classify_host(host: &str, base_domain: Option<&str>, app_subdomain: &str) -> SiteHost {
    let Some(base) = base_domain.map(str::to_ascii_lowercase) else {
        return SiteHost::App;
    };
    let host = strip_port(host).trim_end_matches('.').to_ascii_lowercase();

    if host.is_empty() || host == base || host == "localhost" || host.parse::<std::net::IpAddr>().is_ok() {
        return SiteHost::App;
    }
    match host.strip_suffix(&format!(".{base}")) {
        Some(label) if label == app_subdomain || label == "www" || label.contains('.') => SiteHost::App,
        Some(label) => SiteHost::Subdomain(label.to_owned()),
        None => SiteHost::CustomDomain(host),
    }
}

fn strip_port(host: &str) -> &str {
    // `[::1]:3000` -> `::1`
    if host.starts_with('[') {
        return host.split_once(']').map_or(host, |(addr, _)| addr.trim_start_matches('['));
    }
    host.rsplit_once(':').map_or(host, |(name, _)| name)
}

fn error_page(status: StatusCode, message: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Error</title></head>\n\
<body style=\"font-family: sans-serif; padding: 2rem; text-align: center;\">\n  \
<h1>Error</h1>\n  <p>{message}</p>\n</body>\n</html>"
    );
    (status, Html(body)).into_response()
}

fn site_or_not_found(result: Result<Option<SiteRow>, socialweb_db::DbError>, what: &str) -> Response {
    match result {
        Ok(Some(site)) => Html(site.html).into_response(),
        Ok(None) => error_page(StatusCode::NOT_FOUND, "Site not found"),
        Err(e) => {
            tracing::error!(error = %e, site = what, "site lookup failed");
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Site temporarily unavailable")
        }
    }
}

/// GET / — the site addressed by the host, or the landing page.
pub(super) async fn index(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let host = headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    match classify_host(
        host,
        state.config.base_domain.as_deref(),
        &state.config.app_subdomain,
    ) {
        SiteHost::App => Html(LANDING_PAGE).into_response(),
        SiteHost::Subdomain(label) => {
            let by_subdomain = socialweb_db::get_site_by_subdomain(&state.pool, &label).await;
            let result = match by_subdomain {
                Ok(None) => socialweb_db::get_site_by_slug(&state.pool, &label).await,
                other => other,
            };
            site_or_not_found(result, &label)
        }
        SiteHost::CustomDomain(domain) => {
            match socialweb_db::get_site_by_domain(&state.pool, &domain).await {
                Ok(None) => Html(LANDING_PAGE).into_response(),
                result => site_or_not_found(result, &domain),
            }
        }
    }
}

/// GET /sitio/:slug — serve a stored site.
pub(super) async fn site_by_slug(State(state): State<AppState>, Path(slug): Path<String>) -> Response {
    site_or_not_found(socialweb_db::get_site_by_slug(&state.pool, &slug).await, &slug)
}

#[derive(Debug, Deserialize)]
pub(super) struct PreviewQuery {
    html: Option<String>,
}

/// Decode base64 HTML from a query string. Form decoding turns `+` into a
/// space, so spaces are mapped back before decoding; both the standard and
/// URL-safe alphabets are accepted, padded or not.
fn decode_preview(raw: &str) -> Option<String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .map(|c| if c == ' ' { '+' } else { c })
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let unpadded = cleaned.trim_end_matches('=');
    let padded = format!("{unpadded}{}", "=".repeat((4 - unpadded.len() % 4) % 4));

    let bytes = STANDARD
        .decode(&padded)
        .or_else(|_| URL_SAFE.decode(&padded))
        .ok()?;
    String::from_utf8(bytes).ok()
}

/// GET /api/preview-website?html=<base64> — render unsaved HTML.
pub(super) async fn preview_website(Query(query): Query<PreviewQuery>) -> Response {
    let Some(raw) = query.html.filter(|h| !h.trim().is_empty()) else {
        return error_page(StatusCode::BAD_REQUEST, "No HTML content provided");
    };
    match decode_preview(&raw) {
        Some(html) => Html(html).into_response(),
        None => error_page(StatusCode::BAD_REQUEST, "Failed to decode HTML content"),
    }
}
