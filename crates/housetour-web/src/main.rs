//! housetour-web — Axum web server entry point.
//! Loads the house, starts the tour loop, serves the API and photos.

mod server;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};

use housetour_core::config::Config;
use housetour_core::discovery::ImageDirectory;
use housetour_core::tour::{Tour, TourInput};

use server::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let project_root = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut config = match Config::load_from_dir(&project_root) {
        Ok(config) => config,
        Err(e) => {
            warn!("Using default config: {:#}", e);
            Config::default()
        }
    };
    if config.project_root.as_os_str().is_empty() {
        config.project_root = project_root.clone();
    }

    let images = ImageDirectory::from_config(&config);
    let mut tour = Tour::from_config(&config, &images)
        .with_context(|| format!("Cannot build the house from {}", images.root().display()))?;

    let state = Arc::new(AppState::for_tour(
        &tour,
        (config.canvas_width, config.canvas_height),
        images.root().to_path_buf(),
        config.project_root.clone(),
    ));
    let stop_tx = tour.input_sender();

    let tour_task = tokio::spawn(async move {
        tour.run().await;
    });

    let app = server::router(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8000);
    let addr = format!("0.0.0.0:{}", port);

    eprintln!("  Open http://localhost:{} to start the tour\n", port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind port");

    // Graceful shutdown on Ctrl+C
    let shutdown = async move {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
        info!("Shutdown signal received, stopping tour...");
        let _ = stop_tx.send(TourInput::Stop).await;
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("Server error")?;

    if let Err(e) = tour_task.await {
        warn!("Tour task ended abnormally: {}", e);
    }
    info!("Server stopped.");
    Ok(())
}
