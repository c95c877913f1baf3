use axum::{Json, Router};

use crate::state::AppState;
use crate::ws::handler as ws_handler;

/// GET /api/server/info — Public endpoint returning server identity and
/// live signaling counts. Read-only; the registry and meeting table are the
/// sole source of truth.
async fn server_info(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "registered_clients": state.clients.len(),
        "active_meetings": state.meetings.len(),
    }))
}

/// Build the full axum Router with all routes.
pub fn build_router(state: AppState) -> Router {
    // WebSocket endpoint — the signaling core's only inbound surface
    let ws_routes = Router::new().route("/ws", axum::routing::get(ws_handler::ws_upgrade));

    let public_routes =
        Router::new().route("/api/server/info", axum::routing::get(server_info));

    let health = Router::new().route("/health", axum::routing::get(health_check));

    Router::new()
        .merge(ws_routes)
        .merge(public_routes)
        .merge(health)
        .with_state(state)
}

/// Basic health check endpoint
async fn health_check() -> &'static str {
    "ok"
}
