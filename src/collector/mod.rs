pub mod liveness;
pub mod types;
pub mod vlan_collector;

pub use liveness::LivenessProber;
pub use types::{DiscoveryMode, LivenessResult, VlanAttribute, VlanRecord, VlanStatus};
pub use vlan_collector::{VlanCorrelator, VlanFilter, VlanWalks, correlate};
