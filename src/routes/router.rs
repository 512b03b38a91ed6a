use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

use crate::handlers::{health, list_vlans, list_vlans_advanced, switch_status};
use crate::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/switches/status", get(switch_status))
        .route("/vlans/:ip", get(list_vlans))
        .route("/vlans2/:ip", get(list_vlans_advanced))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
