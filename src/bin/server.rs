//! boinc-api HTTP server binary.
//!
//! Listens on `0.0.0.0:8000` and writes captured stdout to `logs/` under the
//! working directory. The directory must exist before commands are
//! submitted.
//!
//! # Environment Variables
//!
//! - `RUST_LOG` — Tracing filter (default: "info,boinc_api=debug")
//!
//! # Usage
//!
//! ```bash
//! mkdir -p logs
//! cargo run --bin server
//! ```

use anyhow::Context;
use boinc_api::server::{app_router, AppState};
use boinc_api::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,boinc_api=debug".into()),
        )
        .init();

    let config = ServerConfig::default();
    let bind_addr = config.bind_addr;

    if !config.log_dir().is_dir() {
        tracing::warn!(
            "Log directory '{}' does not exist; submissions will fail until it is created",
            config.log_dir().display()
        );
    }

    let app = app_router(AppState::new(config));

    tracing::info!("boinc-api {} starting on {}", boinc_api::VERSION, bind_addr);
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /healthcheck  — liveness probe");
    tracing::info!("  POST /boinc2docker — run a command, capture stdout");

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
        .context("server failed")?;

    tracing::info!("boinc-api stopped");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (
            signal(SignalKind::terminate()),
            signal(SignalKind::interrupt()),
        ) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                tracing::warn!("Could not register signal handlers; falling back to ctrl-c");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    tracing::info!("Shutdown signal received, draining requests");
}
