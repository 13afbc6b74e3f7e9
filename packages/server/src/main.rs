use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use axum::http::{HeaderValue, Method, header};
use common::storage::PhotoUrlPolicy;
use common::storage::filesystem::FilesystemPhotoStore;
use llm::Gateway;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use server::config::AppConfig;
use server::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::load().context("Failed to load config")?;

    let db = server::database::init_db(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    info!("Database connected and schema synced");

    server::seed::ensure_indexes(&db)
        .await
        .context("Failed to create indexes")?;
    if config.seed.reference_data {
        server::seed::seed_reference_data(&db)
            .await
            .context("Failed to seed reference data")?;
    }

    let photo_store = FilesystemPhotoStore::new(
        PathBuf::from(&config.storage.root),
        config.storage.max_photo_size,
    )
    .await
    .context("Failed to initialise photo storage")?;
    let photo_urls = PhotoUrlPolicy::new(
        config.storage.photo_url_prefix(),
        config.storage.remote_patterns.clone(),
    );
    info!(root = %config.storage.root, "Photo storage ready");

    let ai = if config.ai_enabled() {
        let gateway = Gateway::anthropic(config.llm.clone()).context("Failed to build LLM client")?;
        info!(model = %gateway.model_name(), "AI features enabled");
        Some(Arc::new(gateway))
    } else {
        warn!("ANTHROPIC_API_KEY not set - AI features will be disabled");
        None
    };

    let cors = build_cors(&config)?;
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .context("Invalid server.host / server.port")?;

    let state = AppState {
        db,
        config,
        photo_store: Arc::new(photo_store),
        photo_urls: Arc::new(photo_urls),
        ai,
    };

    let app = server::build_router(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    info!("Server running at http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(config: &AppConfig) -> anyhow::Result<CorsLayer> {
    let origins = config
        .server
        .cors
        .allow_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{o}'"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::IF_NONE_MATCH])
        .max_age(Duration::from_secs(config.server.cors.max_age)))
}
