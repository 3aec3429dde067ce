//! Image proxy for Instagram CDN URLs, with a small in-memory cache.

use std::{
    collections::{HashMap, VecDeque},
    sync::Arc,
    time::{Duration, Instant},
};

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use reqwest::Url;
use serde::Deserialize;
use tokio::sync::Mutex;

use super::AppState;

const MAX_CACHED_IMAGES: usize = 100;
const CACHE_TTL: Duration = Duration::from_secs(60 * 60);
/// Largest upstream body buffered; bigger images get the placeholder.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
const IMAGE_ACCEPT: &str = "image/avif,image/webp,image/apng,image/svg+xml,image/*,*/*;q=0.8";

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="400" height="400" viewBox="0 0 400 400">
  <rect width="400" height="400" fill="#f3f4f6"/>
  <text x="200" y="200" text-anchor="middle" dy=".3em" fill="#9ca3af" font-family="system-ui" font-size="14">
    Image unavailable
  </text>
</svg>"##;

#[derive(Debug, Clone)]
struct CachedImage {
    bytes: Bytes,
    content_type: String,
    fetched_at: Instant,
}

/// Insertion-ordered cache: expired entries are dropped on access and the
/// oldest entry is evicted once the cap is exceeded.
#[derive(Debug)]
struct ImageCache {
    entries: HashMap<String, CachedImage>,
    order: VecDeque<String>,
    capacity: usize,
    ttl: Duration,
}

impl ImageCache {
    fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            ttl,
        }
    }

    fn get(&mut self, url: &str) -> Option<CachedImage> {
        let fresh = self
            .entries
            .get(url)
            .is_some_and(|img| img.fetched_at.elapsed() < self.ttl);
        if fresh {
            return self.entries.get(url).cloned();
        }
        if self.entries.remove(url).is_some() {
            self.order.retain(|k| k != url);
        }
        None
    }

    fn insert(&mut self, url: String, image: CachedImage) {
        if self.entries.insert(url.clone(), image).is_some() {
            self.order.retain(|k| *k != url);
        }
        self.order.push_back(url);
        while self.entries.len() > self.capacity {
            let Some(oldest) = self.order.pop_front() else {
                break;
            };
            self.entries.remove(&oldest);
        }
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

/// HTTP client plus shared cache backing `GET /api/proxy-image`.
#[derive(Clone)]
pub struct ImageProxy {
    client: reqwest::Client,
    cache: Arc<Mutex<ImageCache>>,
    max_bytes: usize,
}

impl ImageProxy {
    /// # Errors
    ///
    /// Returns [`reqwest::Error`] if the HTTP client cannot be built.
    pub fn new(timeout_secs: u64) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(BROWSER_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            cache: Arc::new(Mutex::new(ImageCache::new(MAX_CACHED_IMAGES, CACHE_TTL))),
            max_bytes: MAX_IMAGE_BYTES,
        })
    }

    #[cfg(test)]
    fn with_max_bytes(mut self, max_bytes: usize) -> Self {
        self.max_bytes = max_bytes;
        self
    }

    async fn fetch(&self, url: Url) -> Result<CachedImage, String> {
        let mut response = self
            .client
            .get(url)
            .header(header::ACCEPT, IMAGE_ACCEPT)
            .header(header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .header(header::REFERER, "https://www.instagram.com/")
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("upstream returned {status}"));
        }
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_owned();
        if response
            .content_length()
            .is_some_and(|len| len > u64::try_from(self.max_bytes).unwrap_or(u64::MAX))
        {
            return Err(format!("image larger than {} bytes", self.max_bytes));
        }

        // Content-Length may be absent or wrong; count while reading.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await.map_err(|e| e.to_string())? {
            if body.len() + chunk.len() > self.max_bytes {
                return Err(format!("image larger than {} bytes", self.max_bytes));
            }
            body.extend_from_slice(&chunk);
        }

        Ok(CachedImage {
            bytes: Bytes::from(body),
            content_type,
            fetched_at: Instant::now(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct ProxyQuery {
    url: Option<String>,
}

fn placeholder(status: StatusCode, max_age_secs: u32) -> Response {
    (
        status,
        [
            (header::CONTENT_TYPE, "image/svg+xml".to_owned()),
            (header::CACHE_CONTROL, format!("public, max-age={max_age_secs}")),
        ],
        PLACEHOLDER_SVG,
    )
        .into_response()
}

fn image_response(image: CachedImage) -> Response {
    let content_type = HeaderValue::from_str(&image.content_type)
        .unwrap_or_else(|_| HeaderValue::from_static("image/jpeg"));
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, HeaderValue::from_static("public, max-age=3600")),
        ],
        image.bytes,
    )
        .into_response()
}

/// GET /api/proxy-image?url= — fetch a remote image with browser-like
/// headers. Failures answer with a placeholder SVG rather than an error.
pub(super) async fn proxy_image(
    State(state): State<AppState>,
    Query(query): Query<ProxyQuery>,
) -> Response {
    let Some(raw) = query.url.filter(|u| !u.trim().is_empty()) else {
        return placeholder(StatusCode::BAD_REQUEST, 60);
    };
    let url = match Url::parse(raw.trim()) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => url,
        _ => {
            tracing::warn!(url = %raw, "proxy-image: not an http(s) url");
            return placeholder(StatusCode::BAD_REQUEST, 60);
        }
    };
    let key = url.to_string();

    let proxy = &state.image_proxy;
    if let Some(hit) = proxy.cache.lock().await.get(&key) {
        return image_response(hit);
    }

    match proxy.fetch(url).await {
        Ok(image) => {
            proxy.cache.lock().await.insert(key, image.clone());
            image_response(image)
        }
        Err(reason) => {
            tracing::warn!(url = %key, reason = %reason, "proxy-image: fetch failed");
            placeholder(StatusCode::OK, 60)
        }
    }
}
