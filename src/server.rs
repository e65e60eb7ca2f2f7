//! WebSocket server shell around [`StreamSession`](crate::StreamSession).
//!
//! Routes:
//! - `GET /health` - liveness and active session count
//! - `GET /ws/stream` - per-connection frame stream

mod routes;
mod settings;
mod state;
mod ws;

pub use routes::router;
pub use settings::Settings;
pub use state::AppState;

use tokio::net::TcpListener;
use tracing::{info, warn};

/// Bind and serve until Ctrl-C.
pub async fn serve(settings: Settings) -> anyhow::Result<()> {
    let config = settings.tracker_config();
    config.validate()?;

    let app = router(AppState::new(config), &settings.origins());
    let listener = TcpListener::bind(settings.bind).await?;
    info!(app = %settings.app_name, addr = %settings.bind, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "cannot listen for shutdown signal");
            std::future::pending::<()>().await;
        }
    }
}
