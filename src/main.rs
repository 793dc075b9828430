use anyhow::Result;
use tracing_subscriber::EnvFilter;

use iptracker::TrackerConfig;
use iptracker::web;

#[tokio::main]
async fn main() -> Result<()> {
    let config = TrackerConfig::load()?;

    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    web::run(config).await
}
