use std::sync::Arc;

use crate::collector::{LivenessProber, VlanCorrelator};
use crate::config::{AppConfig, Inventory};
use crate::snmp::SnmpTransport;

/// Общее состояние HTTP обработчиков
#[derive(Clone)]
pub struct AppState {
    pub prober: Arc<LivenessProber>,
    pub correlator: Arc<VlanCorrelator>,
    pub inventory: Arc<Inventory>,
}

impl AppState {
    pub fn new(config: &AppConfig, transport: Arc<dyn SnmpTransport>) -> Self {
        Self {
            prober: Arc::new(LivenessProber::new(Arc::clone(&transport), &config.settings)),
            correlator: Arc::new(VlanCorrelator::new(transport, &config.settings)),
            inventory: Arc::new(config.inventory.clone()),
        }
    }
}
