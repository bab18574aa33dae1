use course_portal::{
    AppState, CachedUpstream, HttpUpstream, TagCache, UpstreamState, create_router,
    config::{AppConfig, Env},
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// main
///
/// The asynchronous entry point for the gateway, responsible for initializing
/// configuration, logging, the upstream client, and the HTTP server.
#[tokio::main]
async fn main() {
    // 1. Configuration & Environment Loading (fail-fast)
    dotenv::dotenv().ok();
    let config = AppConfig::load();

    // 2. Logging Filter Setup
    // RUST_LOG wins; otherwise sensible defaults for local development.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "course_portal=debug,tower_http=info,axum=trace".into());

    // 3. Initialize logging based on environment.
    match config.env {
        Env::Local => {
            // LOCAL: pretty output for human readability.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
        Env::Production => {
            // PROD: JSON output for ingestion by centralized log aggregators.
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
    }

    tracing::info!("Gateway starting in {:?} mode", config.env);
    tracing::info!("Proxying to upstream at {}", config.upstream_url);

    // 4. Upstream Client Initialization
    // One reqwest client for the process; reqwest pools connections internally.
    let http_client = reqwest::Client::new();
    let transport =
        Arc::new(HttpUpstream::new(http_client, config.upstream_url.clone())) as UpstreamState;

    // 5. Tag Cache & Cached Proxy Assembly
    // The cache is constructed here and injected into both the caching
    // decorator and the state, so handlers can invalidate directly if they
    // ever need to.
    let cache = Arc::new(TagCache::new());
    let upstream = Arc::new(CachedUpstream::new(transport, cache.clone())) as UpstreamState;

    // 6. Unified State Assembly
    let app_state = AppState {
        upstream,
        cache,
        config,
    };

    // 7. Router and Server Startup
    let app = create_router(app_state);

    let listener = TcpListener::bind("0.0.0.0:3000")
        .await
        .expect("FATAL: failed to bind 0.0.0.0:3000");

    tracing::info!("HTTP server bound successfully.");
    tracing::info!("Listening on 0.0.0.0:3000");
    tracing::info!("API Documentation (Swagger UI) available at: http://localhost:3000/swagger-ui");

    axum::serve(listener, app)
        .await
        .expect("FATAL: server terminated unexpectedly");
}
