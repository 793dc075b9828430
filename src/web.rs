use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::api::{self, AppState};
use crate::config::TrackerConfig;
use crate::lookup::LookupService;
use crate::resolver;

pub async fn run(config: TrackerConfig) -> Result<()> {
    let geo_resolver = resolver::from_config(&config.geo)?;
    let client = resolver::build_http_client(config.geo.timeout_seconds)?;
    let lookup = LookupService::new(geo_resolver, client, config.geo.myip_url.clone());

    let state = Arc::new(AppState {
        lookup,
        map: config.map.clone(),
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .nest("/api", api::router(state))
        .fallback_service(ServeDir::new(&config.server.static_dir))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(
        "Web server running at http://localhost:{} (geo provider: {})",
        config.server.port,
        config.geo.provider
    );
    axum::serve(listener, app)
        .await
        .with_context(|| "Server error")?;
    Ok(())
}
