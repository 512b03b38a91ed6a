use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use netaccess_snmp::{AppConfig, AppState, SnmpClientV2c, logging, routes};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init()?;

    let config = AppConfig::load_from_env()?;
    info!(
        switches = config.inventory.len(),
        community_override = config.inventory.switches().iter().any(|s| s.community.is_some()),
        "configuration loaded"
    );

    let state = AppState::new(&config, Arc::new(SnmpClientV2c::new()));

    // Первичная проверка, чтобы сразу увидеть в логах недоступные коммутаторы
    let prober = Arc::clone(&state.prober);
    let inventory = Arc::clone(&state.inventory);
    tokio::spawn(async move {
        if let Err(e) = prober.probe_directory(inventory.as_ref()).await {
            warn!("initial liveness sweep failed: {:#}", e);
        }
    });

    let listen = config.settings.server.listen.clone();
    let listener = tokio::net::TcpListener::bind(&listen)
        .await
        .context(format!("Не удалось занять адрес {}", listen))?;
    info!("Listening on {}", listen);

    axum::serve(listener, routes::create_router(state)).await?;

    Ok(())
}
