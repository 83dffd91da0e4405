use crate::config::Config;
use crate::errors::AppError;
use crate::filter::{self, DirectoryFilter, Facet};
use crate::models::CompanyProfile;
use crate::normalize;
use crate::og;
use crate::pages;
use crate::seo;
use crate::store::ProfileStore;
use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use chrono::Utc;
use moka::future::Cache;
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

/// Shared application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Config,
    /// Store client for page reads (anonymous key).
    pub store: ProfileStore,
    /// Store client for the preview-image path (elevated key when
    /// configured).
    pub preview_store: ProfileStore,
    /// Read-through memo for the directory listing, shared by the home
    /// page and the sitemap. Correctness never depends on a hit.
    pub directory_cache: Cache<String, Arc<Vec<CompanyProfile>>>,
}

/// Routes only; middleware layers are applied in `main` so tests can
/// drive the router directly.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/", get(home))
        .route("/company/:slug", get(company_page))
        .route("/sitemap.xml", get(sitemap_xml))
        .route("/robots.txt", get(robots_txt))
        .route("/og/company/:slug", get(preview_image))
        .with_state(state)
}

/// Health check endpoint.
pub async fn health() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": "btruston-web",
            "version": "0.1.0"
        })),
    )
}

/// Loads the full listable directory through the render memo.
async fn load_directory(state: &AppState) -> Result<Arc<Vec<CompanyProfile>>, AppError> {
    if let Some(hit) = state.directory_cache.get("directory").await {
        tracing::debug!("Directory listing served from memo ({} rows)", hit.len());
        return Ok(hit);
    }

    let rows = Arc::new(state.store.fetch_all_listable().await?);
    state
        .directory_cache
        .insert("directory".to_string(), rows.clone())
        .await;
    Ok(rows)
}

#[derive(Debug, Default, Deserialize)]
pub struct DirectoryQuery {
    pub q: Option<String>,
    pub country: Option<String>,
    pub sector: Option<String>,
}

/// GET /
///
/// Home directory. The filter is a pure function of the query string;
/// facet option lists derive from all constraints except their own.
pub async fn home(
    State(state): State<Arc<AppState>>,
    Query(params): Query<DirectoryQuery>,
) -> Result<Html<String>, AppError> {
    tracing::info!("GET / - params: {:?}", params);

    let records = load_directory(&state).await?;
    let directory_filter = DirectoryFilter::new(
        params.q.as_deref(),
        params.country.as_deref(),
        params.sector.as_deref(),
    );

    let filtered = filter::apply(&records, &directory_filter);
    let countries = filter::facet_options(&records, &directory_filter, Facet::Country);
    let sectors = filter::facet_options(&records, &directory_filter, Facet::Sector);

    Ok(Html(pages::home_page(
        &state.config.site_url,
        records.len(),
        &directory_filter,
        &filtered,
        &countries,
        &sectors,
    )))
}

/// GET /company/:slug
///
/// A slug miss is a standard not-found response, distinct from a
/// retrieval error (which surfaces as a generic error page).
pub async fn company_page(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Result<Html<String>, AppError> {
    tracing::info!("GET /company/{}", slug);

    let profile = state
        .store
        .fetch_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Company with slug {} not found", slug)))?;

    Ok(Html(pages::company_page(&state.config.site_url, &profile)))
}

/// GET /sitemap.xml
pub async fn sitemap_xml(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let records = load_directory(&state).await?;
    let xml = seo::sitemap_xml(&state.config.site_url, &records, Utc::now());
    Ok((
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        xml,
    ))
}

/// GET /robots.txt
pub async fn robots_txt(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        seo::robots_txt(&state.config.site_url),
    )
}

/// GET /og/company/:slug
///
/// Social-preview image. Crawlers must always get an image, so a store
/// failure or unknown slug degrades to a slug-derived card instead of
/// erroring.
pub async fn preview_image(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> impl IntoResponse {
    tracing::info!("GET /og/company/{}", slug);

    let profile = match state.preview_store.fetch_by_slug(&slug).await {
        Ok(found) => found,
        Err(e) => {
            tracing::warn!("Preview image lookup failed for {}: {}", slug, e);
            None
        }
    };

    let svg = match &profile {
        Some(p) => og::company_preview_svg(
            &p.display_name(),
            &fallback_tagline(p),
            p.logo_url.as_deref(),
            normalize::is_verified(p),
            &slug,
        ),
        None => og::company_preview_svg(
            &slug.replace('-', " "),
            "Company profile on BTrustOn",
            None,
            false,
            &slug,
        ),
    };

    ([(header::CONTENT_TYPE, "image/svg+xml")], svg)
}

fn fallback_tagline(profile: &CompanyProfile) -> String {
    let tagline = normalize::clean_text(profile.tagline.as_deref());
    if tagline.is_empty() {
        "Company profile on BTrustOn".to_string()
    } else {
        tagline
    }
}
