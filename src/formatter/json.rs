use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::net::IpAddr;

use crate::collector::{DiscoveryMode, LivenessResult, VlanRecord, VlanStatus};
use crate::error::QueryFailure;
use crate::models::{Switch, SwitchId};

/// Ответ со списком VLAN
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VlanListJson {
    pub vlans: Vec<VlanJson>,
}

/// VLAN в ответе. В базовом режиме отдаются только id, имя и статус.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VlanJson {
    pub id: u32,
    pub name: String,
    pub status: VlanStatus,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ports: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routing: Option<String>, // "Enabled" | "Disabled"
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwitchStatusJson {
    pub id: SwitchId,
    pub name: String,
    pub ip_address: IpAddr,
    pub description: Option<String>,
    pub is_online: bool,
    pub checked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorJson {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// JSON форматтер для результатов опроса
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format_vlans(records: &[VlanRecord], mode: DiscoveryMode) -> VlanListJson {
        VlanListJson {
            vlans: records.iter().map(|r| Self::format_vlan(r, mode)).collect(),
        }
    }

    fn format_vlan(record: &VlanRecord, mode: DiscoveryMode) -> VlanJson {
        let details = mode == DiscoveryMode::Advanced;
        let routing = if record.routing_enabled {
            "Enabled"
        } else {
            "Disabled"
        };

        VlanJson {
            id: record.vlan_id,
            name: record.name.clone(),
            status: record.status,
            kind: details.then(|| record.kind.clone()),
            ports: details.then(|| record.ports.clone()),
            routing: details.then(|| routing.to_string()),
        }
    }

    pub fn format_switch_status(switch: &Switch, liveness: &LivenessResult) -> SwitchStatusJson {
        SwitchStatusJson {
            id: switch.id,
            name: switch.name.clone(),
            ip_address: switch.ip_address,
            description: switch.description.clone(),
            is_online: liveness.is_online,
            checked_at: liveness.checked_at,
        }
    }

    pub fn format_query_failure(failure: &QueryFailure) -> ErrorJson {
        ErrorJson {
            error: "SNMP query failed".to_string(),
            detail: Some(failure.to_string()),
        }
    }

    pub fn format_error(message: impl Into<String>) -> ErrorJson {
        ErrorJson {
            error: message.into(),
            detail: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record() -> VlanRecord {
        VlanRecord {
            vlan_id: 10,
            name: "Network-A".to_string(),
            status: VlanStatus::Active,
            kind: "1".to_string(),
            ports: "Gi0/1".to_string(),
            routing_enabled: true,
        }
    }

    #[test]
    fn basic_mode_hides_details() {
        let json = serde_json::to_value(JsonFormatter::format_vlans(&[record()], DiscoveryMode::Basic)).unwrap();
        assert_eq!(
            json,
            json!({"vlans": [{"id": 10, "name": "Network-A", "status": "active"}]})
        );
    }

    #[test]
    fn advanced_mode_shows_details() {
        let json =
            serde_json::to_value(JsonFormatter::format_vlans(&[record()], DiscoveryMode::Advanced)).unwrap();
        assert_eq!(
            json,
            json!({"vlans": [{
                "id": 10,
                "name": "Network-A",
                "status": "active",
                "type": "1",
                "ports": "Gi0/1",
                "routing": "Enabled"
            }]})
        );
    }
}
