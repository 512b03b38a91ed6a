use std::net::IpAddr;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use crate::collector::DiscoveryMode;
use crate::formatter::{ErrorJson, JsonFormatter, VlanListJson};
use crate::models::Switch;
use crate::state::AppState;

type VlanResponse = Result<Json<VlanListJson>, (StatusCode, Json<ErrorJson>)>;

/// Активные VLAN коммутатора
pub async fn list_vlans(State(state): State<AppState>, Path(ip): Path<String>) -> VlanResponse {
    discover(&state, &ip, DiscoveryMode::Basic).await
}

/// VLAN, прошедшие расширенный фильтр
pub async fn list_vlans_advanced(
    State(state): State<AppState>,
    Path(ip): Path<String>,
) -> VlanResponse {
    discover(&state, &ip, DiscoveryMode::Advanced).await
}

async fn discover(state: &AppState, ip: &str, mode: DiscoveryMode) -> VlanResponse {
    let ip: IpAddr = ip.parse().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(JsonFormatter::format_error(format!("invalid IP address '{ip}'"))),
        )
    })?;

    // Неизвестный коммутатор всё равно опрашивается, с общей community
    let switch = state
        .inventory
        .find_by_ip(ip)
        .cloned()
        .unwrap_or_else(|| Switch::unregistered(ip));

    let records = state.correlator.discover(&switch, mode).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JsonFormatter::format_query_failure(&e)),
        )
    })?;

    Ok(Json(JsonFormatter::format_vlans(&records, mode)))
}
