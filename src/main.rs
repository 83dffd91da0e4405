use btruston_web::config::Config;
use btruston_web::handlers::{self, AppState};
use btruston_web::store::ProfileStore;
use moka::future::Cache;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::{cors::CorsLayer, limit::RequestBodyLimitLayer, trace::TraceLayer};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Main entry point for the application.
///
/// Initializes logging, configuration, the profile store clients and
/// the directory memo, then serves the routed app with CORS, request
/// size limiting and per-IP rate limiting.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "btruston_web=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Page reads stay on the anonymous key; the preview-image path gets
    // the elevated key when one is configured.
    let store = ProfileStore::new(&config.supabase_url, &config.supabase_anon_key)?;
    let preview_store = ProfileStore::new(&config.supabase_url, config.preview_image_key())?;
    tracing::info!("Profile store clients initialized: {}", config.supabase_url);

    // Directory render memo (5 minute TTL). A miss just re-reads the
    // store; the sitemap and home page share hits.
    let directory_cache = Cache::builder()
        .time_to_live(Duration::from_secs(300))
        .max_capacity(4)
        .build();
    tracing::info!("Directory memo initialized (300s TTL)");

    let app_state = Arc::new(AppState {
        config: config.clone(),
        store,
        preview_store,
        directory_cache,
    });

    // Rate limiter: 10 requests/second per IP, burst of 20
    let governor_conf = Arc::new(
        GovernorConfigBuilder::default()
            .per_second(10)
            .burst_size(20)
            .key_extractor(SmartIpKeyExtractor)
            .finish()
            .ok_or_else(|| anyhow::anyhow!("Invalid rate limiter configuration"))?,
    );

    let app = handlers::router(app_state)
        .layer(
            ServiceBuilder::new()
                // Read-only site; requests carry no payload worth 1MB
                .layer(RequestBodyLimitLayer::new(1024 * 1024))
                .layer(GovernorLayer {
                    config: governor_conf,
                }),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
