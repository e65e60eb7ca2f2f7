use clap::Parser;
use facetrack_rs::server::{self, Settings};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::parse();

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(settings.log_level.to_lowercase()))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    server::serve(settings).await
}
