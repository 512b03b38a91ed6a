use axum::{Json, extract::State, http::StatusCode};
use tracing::error;

use crate::config::SwitchDirectory;
use crate::formatter::{ErrorJson, JsonFormatter, SwitchStatusJson};
use crate::state::AppState;

/// Список коммутаторов с результатом проверки доступности
pub async fn switch_status(
    State(state): State<AppState>,
) -> Result<Json<Vec<SwitchStatusJson>>, (StatusCode, Json<ErrorJson>)> {
    let switches = state.inventory.switches_needing_probe().map_err(|e| {
        error!("failed to load switch inventory: {:#}", e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(JsonFormatter::format_error("switch inventory unavailable")),
        )
    })?;

    let results = state.prober.check_all(&switches).await;

    Ok(Json(
        switches
            .iter()
            .zip(&results)
            .map(|(switch, liveness)| JsonFormatter::format_switch_status(switch, liveness))
            .collect(),
    ))
}
