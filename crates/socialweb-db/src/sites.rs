//! Generated-site storage: slug allocation, CRUD and public lookups.
//!
//! Lookups used for public serving (`get_site_by_slug`, `get_site_by_subdomain`,
//! `get_site_by_domain`) only return published rows. Owner-facing operations
//! (`get_site_by_instagram_user_id`, `update_site`, `delete_site`) see every row.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use unicode_normalization::{char::is_combining_mark, UnicodeNormalization};
use uuid::Uuid;

use crate::DbError;

/// Longest slug base kept by [`slugify`], leaving room for a `-N` suffix
/// within the `VARCHAR(100)` column.
pub const MAX_SLUG_LEN: usize = 90;

const SITE_COLUMNS: &str = "id, slug, html, instagram_username, instagram_user_id, \
business_name, category, tagline, bio, analyzed_profile, subdomain, custom_domain, \
is_published, created_at, updated_at";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SiteRow {
    pub id: Uuid,
    pub slug: String,
    pub html: String,
    pub instagram_username: Option<String>,
    pub instagram_user_id: Option<String>,
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub analyzed_profile: Option<serde_json::Value>,
    pub subdomain: Option<String>,
    pub custom_domain: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Values for a new row. `slug` must already be unique; see
/// [`generate_unique_slug`].
#[derive(Debug, Clone, Default)]
pub struct NewSite {
    pub slug: String,
    pub html: String,
    pub instagram_username: Option<String>,
    pub instagram_user_id: Option<String>,
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub analyzed_profile: Option<serde_json::Value>,
}

/// Partial update; `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct SiteUpdate {
    pub html: Option<String>,
    pub business_name: Option<String>,
    pub category: Option<String>,
    pub tagline: Option<String>,
    pub bio: Option<String>,
    pub subdomain: Option<String>,
    pub custom_domain: Option<String>,
    pub is_published: Option<bool>,
}

/// Fold `text` into a URL slug: lowercase, diacritics removed, only
/// `[a-z0-9-]`, whitespace and runs of `-` collapsed to one `-`, no leading
/// or trailing `-`. May return an empty string.
#[must_use]
pub fn slugify(text: &str) -> String {
    let folded: String = text
        .trim()
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .filter(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || *c == '-' || c.is_whitespace())
        .map(|c| if c.is_whitespace() { '-' } else { c })
        .collect();

    let mut slug = String::with_capacity(folded.len());
    for part in folded.split('-').filter(|p| !p.is_empty()) {
        if slug.len() + part.len() + 1 > MAX_SLUG_LEN && !slug.is_empty() {
            break;
        }
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(part);
    }
    slug.truncate(MAX_SLUG_LEN);
    slug
}

/// First of `base`, `base-2`, `base-3`, … not in `taken`.
fn next_free_slug(base: &str, taken: &HashSet<String>) -> String {
    if !taken.contains(base) {
        return base.to_owned();
    }
    (2_u32..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| !taken.contains(candidate))
        .unwrap_or_else(|| format!("{base}-{}", Uuid::new_v4().simple()))
}

/// Derive a slug from `name` that no stored site uses yet.
///
/// The check and the later insert are not atomic; a concurrent writer that
/// wins the race surfaces as [`DbError::Conflict`] from [`create_site`].
///
/// # Errors
///
/// Returns [`DbError::InvalidSlug`] if `name` folds to an empty slug, or
/// [`DbError::Sqlx`] on query failure.
pub async fn generate_unique_slug(pool: &PgPool, name: &str) -> Result<String, DbError> {
    let base = slugify(name);
    if base.is_empty() {
        return Err(DbError::InvalidSlug(name.to_owned()));
    }

    let taken: Vec<String> =
        sqlx::query_scalar("SELECT slug FROM sites WHERE slug = $1 OR slug LIKE $1 || '-%'")
            .bind(&base)
            .fetch_all(pool)
            .await?;
    let taken: HashSet<String> = taken.into_iter().collect();

    Ok(next_free_slug(&base, &taken))
}

/// Insert a site and return the stored row.
///
/// # Errors
///
/// Returns [`DbError::Conflict`] if the slug or Instagram user id is already
/// stored, or [`DbError::Sqlx`] on any other failure.
pub async fn create_site(pool: &PgPool, site: &NewSite) -> Result<SiteRow, DbError> {
    let row = sqlx::query_as::<_, SiteRow>(&format!(
        "INSERT INTO sites (slug, html, instagram_username, instagram_user_id, \
             business_name, category, tagline, bio, analyzed_profile) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
         RETURNING {SITE_COLUMNS}"
    ))
    .bind(&site.slug)
    .bind(&site.html)
    .bind(&site.instagram_username)
    .bind(&site.instagram_user_id)
    .bind(&site.business_name)
    .bind(&site.category)
    .bind(&site.tagline)
    .bind(&site.bio)
    .bind(&site.analyzed_profile)
    .fetch_one(pool)
    .await
    .map_err(DbError::from_write)?;

    tracing::info!(slug = %row.slug, id = %row.id, "site created");
    Ok(row)
}

async fn fetch_published_by(
    pool: &PgPool,
    column: &str,
    value: &str,
) -> Result<Option<SiteRow>, DbError> {
    let row = sqlx::query_as::<_, SiteRow>(&format!(
        "SELECT {SITE_COLUMNS} FROM sites WHERE {column} = $1 AND is_published = true"
    ))
    .bind(value)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Published site stored under `slug`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_site_by_slug(pool: &PgPool, slug: &str) -> Result<Option<SiteRow>, DbError> {
    fetch_published_by(pool, "slug", slug).await
}

/// Published site assigned to `subdomain`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_site_by_subdomain(
    pool: &PgPool,
    subdomain: &str,
) -> Result<Option<SiteRow>, DbError> {
    fetch_published_by(pool, "subdomain", subdomain).await
}

/// Published site attached to the custom `domain`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_site_by_domain(pool: &PgPool, domain: &str) -> Result<Option<SiteRow>, DbError> {
    fetch_published_by(pool, "custom_domain", domain).await
}

/// Site owned by an Instagram account, published or not.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn get_site_by_instagram_user_id(
    pool: &PgPool,
    instagram_user_id: &str,
) -> Result<Option<SiteRow>, DbError> {
    let row = sqlx::query_as::<_, SiteRow>(&format!(
        "SELECT {SITE_COLUMNS} FROM sites WHERE instagram_user_id = $1"
    ))
    .bind(instagram_user_id)
    .fetch_optional(pool)
    .await?;
    Ok(row)
}

/// Apply `update` to the site stored under `slug` and bump `updated_at`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no site has that slug,
/// [`DbError::Conflict`] if a new subdomain or custom domain is taken, or
/// [`DbError::Sqlx`] on any other failure.
pub async fn update_site(
    pool: &PgPool,
    slug: &str,
    update: &SiteUpdate,
) -> Result<SiteRow, DbError> {
    let row = sqlx::query_as::<_, SiteRow>(&format!(
        "UPDATE sites SET \
             html = COALESCE($2, html), \
             business_name = COALESCE($3, business_name), \
             category = COALESCE($4, category), \
             tagline = COALESCE($5, tagline), \
             bio = COALESCE($6, bio), \
             subdomain = COALESCE($7, subdomain), \
             custom_domain = COALESCE($8, custom_domain), \
             is_published = COALESCE($9, is_published), \
             updated_at = NOW() \
         WHERE slug = $1 \
         RETURNING {SITE_COLUMNS}"
    ))
    .bind(slug)
    .bind(&update.html)
    .bind(&update.business_name)
    .bind(&update.category)
    .bind(&update.tagline)
    .bind(&update.bio)
    .bind(&update.subdomain)
    .bind(&update.custom_domain)
    .bind(update.is_published)
    .fetch_optional(pool)
    .await
    .map_err(DbError::from_write)?;

    row.ok_or(DbError::NotFound)
}

/// Delete the site stored under `slug`.
///
/// # Errors
///
/// Returns [`DbError::NotFound`] if no site has that slug, or
/// [`DbError::Sqlx`] if the query fails.
pub async fn delete_site(pool: &PgPool, slug: &str) -> Result<(), DbError> {
    let result = sqlx::query("DELETE FROM sites WHERE slug = $1")
        .bind(slug)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(DbError::NotFound);
    }
    tracing::info!(slug, "site deleted");
    Ok(())
}
