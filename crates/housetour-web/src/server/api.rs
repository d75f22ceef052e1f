//! REST API endpoints — read the current frame, push input.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use housetour_core::input::ArrowLayout;
use housetour_core::tour::TourInput;
use housetour_core::types::{Command, ViewData};

use super::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/view", get(get_view))
        .route("/api/history", get(get_history))
        .route("/api/layout", get(get_layout))
        .route("/api/key", post(post_key))
        .route("/api/pointer", post(post_pointer))
}

type ApiError = (StatusCode, Json<Value>);

fn error(status: StatusCode, message: &str) -> ApiError {
    (status, Json(json!({"error": message})))
}

async fn send(state: &AppState, input: TourInput) -> Result<Json<Value>, ApiError> {
    debug!("api input: {:?}", input);
    state
        .input_tx
        .send(input)
        .await
        .map_err(|_| error(StatusCode::SERVICE_UNAVAILABLE, "Tour is not running"))?;
    Ok(Json(json!({"ok": true})))
}

// --- Read side ---

async fn get_view(State(state): State<Arc<AppState>>) -> Json<ViewData> {
    Json(state.view.borrow().clone())
}

async fn get_history(State(state): State<Arc<AppState>>) -> Json<Value> {
    let trail = state.trail.borrow().clone();
    Json(json!({
        "depth": trail.len().saturating_sub(1),
        "trail": trail,
    }))
}

fn arrow_json(layout: &ArrowLayout, command: Command) -> Value {
    let (x, y) = layout.position(command);
    json!({
        "command": command,
        "x": x,
        "y": y,
        "rotation": ArrowLayout::rotation(command),
    })
}

async fn get_layout(State(state): State<Arc<AppState>>) -> Json<Value> {
    let arrows: Vec<Value> = Command::PRIORITY
        .into_iter()
        .map(|command| arrow_json(&state.layout, command))
        .collect();
    Json(json!({
        "canvas": {"width": state.canvas.0, "height": state.canvas.1},
        "radius": state.layout.radius,
        "arrows": arrows,
        "key_bindings": state.bindings,
    }))
}

// --- Input side ---

#[derive(Debug, Deserialize)]
pub struct KeyRequest {
    pub key: String,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

#[derive(Debug, Deserialize)]
pub struct PointerRequest {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default = "default_pressed")]
    pub pressed: bool,
}

fn default_pressed() -> bool {
    true
}

impl KeyRequest {
    pub fn into_input(self) -> Option<TourInput> {
        if self.key.trim().is_empty() {
            return None;
        }
        Some(if self.pressed {
            TourInput::KeyDown(self.key)
        } else {
            TourInput::KeyUp(self.key)
        })
    }
}

impl PointerRequest {
    pub fn into_input(self) -> TourInput {
        if self.pressed {
            TourInput::PointerDown { x: self.x, y: self.y }
        } else {
            TourInput::PointerUp
        }
    }
}

async fn post_key(
    State(state): State<Arc<AppState>>,
    Json(req): Json<KeyRequest>,
) -> Result<Json<Value>, ApiError> {
    let input = req
        .into_input()
        .ok_or_else(|| error(StatusCode::BAD_REQUEST, "Empty key"))?;
    send(&state, input).await
}

async fn post_pointer(
    State(state): State<Arc<AppState>>,
    Json(req): Json<PointerRequest>,
) -> Result<Json<Value>, ApiError> {
    send(&state, req.into_input()).await
}
