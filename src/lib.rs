//! SNMP-проверка доступности коммутаторов и обнаружение VLAN для консоли
//! управления доступом (RADIUS/802.1X/MAB).

pub mod collector;
pub mod config;
pub mod error;
pub mod formatter;
pub mod handlers;
pub mod logging;
pub mod models;
pub mod routes;
pub mod snmp;
pub mod state;

pub use collector::{DiscoveryMode, LivenessProber, LivenessResult, VlanCorrelator, VlanRecord};
pub use config::{AppConfig, Inventory, Settings, SwitchDirectory};
pub use error::QueryFailure;
pub use models::{MacAddress, Switch, SwitchId};
pub use snmp::{GetOutcome, ObjectId, SnmpClientV2c, SnmpTarget, SnmpTransport, WalkOutcome};
pub use state::AppState;
