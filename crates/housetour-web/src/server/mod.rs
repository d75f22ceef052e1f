//! Web server — Axum router + shared state.

pub mod api;
pub mod ws;

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use tokio::sync::{broadcast, mpsc, watch};
use tower_http::cors::CorsLayer;
use tower_http::services::{ServeDir, ServeFile};

use housetour_core::events::TourEvent;
use housetour_core::input::{ArrowLayout, KeyBindings};
use housetour_core::tour::{Tour, TourInput};
use housetour_core::types::ViewData;

/// Shared application state. The tour itself lives on its own task; handlers
/// only see its channels.
pub struct AppState {
    pub input_tx: mpsc::Sender<TourInput>,
    pub events: broadcast::Sender<TourEvent>,
    pub view: watch::Receiver<ViewData>,
    pub trail: watch::Receiver<Vec<String>>,
    pub layout: ArrowLayout,
    pub bindings: KeyBindings,
    pub canvas: (u32, u32),
    pub images_dir: PathBuf,
    pub project_root: PathBuf,
}

impl AppState {
    /// Grab every handle the handlers need before the tour is moved onto
    /// its task.
    pub fn for_tour(tour: &Tour, canvas: (u32, u32), images_dir: PathBuf, project_root: PathBuf) -> Self {
        AppState {
            input_tx: tour.input_sender(),
            events: tour.event_sender(),
            view: tour.watch_view(),
            trail: tour.watch_trail(),
            layout: tour.layout(),
            bindings: tour.bindings().clone(),
            canvas,
            images_dir,
            project_root,
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::very_permissive();

    let mut app = Router::new()
        .merge(api::routes())
        .merge(ws::routes())
        .nest_service("/photos", ServeDir::new(&state.images_dir))
        .layer(cors)
        .with_state(state.clone());

    // Serve a frontend if one was built into static/
    let static_dir = state.project_root.join("static");
    if static_dir.is_dir() {
        let index_html = static_dir.join("index.html");
        app = app.fallback_service(
            ServeDir::new(&static_dir).not_found_service(ServeFile::new(index_html)),
        );
    }

    app
}
