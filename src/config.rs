/// Application configuration, constructed once at startup and passed by
/// reference to the components that need it. Nothing reads the
/// environment ad hoc after this.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public base URL of the site, no trailing slash.
    pub site_url: String,
    /// Base URL of the Supabase project.
    pub supabase_url: String,
    /// Anonymous (read-only) API key, used for all page reads.
    pub supabase_anon_key: String,
    /// Elevated key, preferred for the preview-image path when present.
    pub supabase_service_role_key: Option<String>,
    pub port: u16,
}

const DEFAULT_SITE_URL: &str = "https://btruston.com";

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            site_url: std::env::var("SITE_URL")
                .ok()
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_SITE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            supabase_url: std::env::var("SUPABASE_URL")
                .map_err(|_| anyhow::anyhow!("SUPABASE_URL environment variable required"))
                .and_then(|url| {
                    if url.trim().is_empty() {
                        anyhow::bail!("SUPABASE_URL cannot be empty");
                    }
                    let parsed = url::Url::parse(&url)
                        .map_err(|e| anyhow::anyhow!("SUPABASE_URL is not a valid URL: {}", e))?;
                    if parsed.scheme() != "http" && parsed.scheme() != "https" {
                        anyhow::bail!("SUPABASE_URL must start with http:// or https://");
                    }
                    Ok(url.trim_end_matches('/').to_string())
                })?,
            supabase_anon_key: std::env::var("SUPABASE_ANON_KEY")
                .map_err(|_| anyhow::anyhow!("SUPABASE_ANON_KEY environment variable required"))
                .and_then(|key| {
                    if key.trim().is_empty() {
                        anyhow::bail!("SUPABASE_ANON_KEY cannot be empty");
                    }
                    Ok(key)
                })?,
            supabase_service_role_key: std::env::var("SUPABASE_SERVICE_ROLE_KEY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
        };

        // Log successful configuration load (without sensitive values)
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Site URL: {}", config.site_url);
        tracing::debug!("Supabase URL: {}", config.supabase_url);
        if config.supabase_service_role_key.is_some() {
            tracing::info!("Service role key configured, preview images will use it");
        }
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }

    /// Key for the preview-image read path: elevated when configured,
    /// anonymous otherwise.
    pub fn preview_image_key(&self) -> &str {
        self.supabase_service_role_key
            .as_deref()
            .unwrap_or(&self.supabase_anon_key)
    }
}
