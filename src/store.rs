//! Read-only accessor for the remote `profiles` table, spoken over the
//! store's REST interface (PostgREST).
//!
//! Listing uses tiered column-set fallback: the profile schema evolves
//! independently of this read path, so a deployment lagging a migration
//! still renders a usable, if degraded, directory instead of failing
//! the whole page. The tiers are explicit field-set descriptors tried
//! in order, never reflection over whatever shape comes back.

use crate::errors::AppError;
use crate::models::CompanyProfile;
use std::time::Duration;

/// Listing field sets, richest first. The last tier is the minimal
/// guaranteed-present set.
pub const LIST_FIELD_TIERS: [&str; 3] = [
    "id,slug,company_name,sector,company_type,city,country,website,tagline,logo_url,verified,is_verified,blue_tick,verification_status",
    "id,slug,company_name,sector,company_type,city,country,website,tagline",
    "id,slug,company_name",
];

/// Client for the remote profile store.
#[derive(Clone)]
pub struct ProfileStore {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ProfileStore {
    /// Creates a new `ProfileStore`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the Supabase project.
    /// * `api_key` - API key sent as both `apikey` and bearer token.
    pub fn new(base_url: &str, api_key: &str) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| {
                AppError::Internal(format!("Failed to create store client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        })
    }

    /// Fetches all listable profiles (non-null slug), ordered by company
    /// name ascending.
    ///
    /// Tries each field tier in turn; any request failure moves to the
    /// next tier, while success returns immediately. An empty result is
    /// success, not a reason to retry. Only when every tier fails does
    /// this surface a retrieval error, carrying the last underlying
    /// message.
    pub async fn fetch_all_listable(&self) -> Result<Vec<CompanyProfile>, AppError> {
        let mut last_error = String::new();

        for (tier, fields) in LIST_FIELD_TIERS.iter().enumerate() {
            match self.list_with_fields(fields).await {
                Ok(rows) => {
                    if tier > 0 {
                        tracing::warn!(
                            "Profile listing served from fallback tier {} ({} rows)",
                            tier,
                            rows.len()
                        );
                    }
                    return Ok(rows);
                }
                Err(e) => {
                    tracing::warn!("Profile listing tier {} failed: {}", tier, e);
                    last_error = e.to_string();
                }
            }
        }

        Err(AppError::Retrieval(format!(
            "All profile listing tiers failed: {}",
            last_error
        )))
    }

    /// Exact-match lookup by slug with the full field set.
    ///
    /// Zero rows is an explicit absence (`Ok(None)`), distinct from a
    /// retrieval error. The slug is unique by construction upstream; if
    /// the store ever returned more than one row the first is canonical.
    pub async fn fetch_by_slug(&self, slug: &str) -> Result<Option<CompanyProfile>, AppError> {
        let eq = format!("eq.{}", slug);
        let url = reqwest::Url::parse_with_params(
            &format!("{}/rest/v1/profiles", self.base_url),
            &[("select", "*"), ("slug", eq.as_str()), ("limit", "1")],
        )
        .map_err(|e| AppError::Retrieval(format!("Failed to build URL: {}", e)))?;

        tracing::debug!("Fetching profile by slug: {}", slug);

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("Profile lookup failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Profile lookup returned {}: {}",
                status, error_text
            )));
        }

        let rows: Vec<CompanyProfile> = response.json().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to parse profile lookup response: {}", e))
        })?;

        Ok(rows.into_iter().next())
    }

    async fn list_with_fields(&self, fields: &str) -> Result<Vec<CompanyProfile>, AppError> {
        let url = reqwest::Url::parse_with_params(
            &format!("{}/rest/v1/profiles", self.base_url),
            &[
                ("select", fields),
                ("slug", "not.is.null"),
                ("order", "company_name.asc"),
            ],
        )
        .map_err(|e| AppError::Retrieval(format!("Failed to build URL: {}", e)))?;

        let response = self
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::Retrieval(format!("Profile listing failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AppError::Retrieval(format!(
                "Profile listing returned {}: {}",
                status, error_text
            )));
        }

        response.json().await.map_err(|e| {
            AppError::Retrieval(format!("Failed to parse profile listing response: {}", e))
        })
    }

    fn get(&self, url: reqwest::Url) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("apikey", &self.api_key)
            .header("Authorization", format!("Bearer {}", self.api_key))
    }
}
