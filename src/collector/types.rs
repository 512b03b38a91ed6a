use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::SwitchId;

/// Состояние VLAN по vtpVlanState
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VlanStatus {
    Active,
    Inactive,
}

impl VlanStatus {
    /// `"1"` (operational) — активен, всё остальное — нет
    pub fn from_raw(raw: &str) -> Self {
        if raw == "1" {
            VlanStatus::Active
        } else {
            VlanStatus::Inactive
        }
    }
}

/// VLAN, собранный из нескольких параллельных обходов.
///
/// Живёт только в пределах одного запроса и не изменяется после создания.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VlanRecord {
    pub vlan_id: u32,
    pub name: String,
    pub status: VlanStatus,
    pub kind: String,
    pub ports: String,
    pub routing_enabled: bool,
}

impl VlanRecord {
    pub fn is_active(&self) -> bool {
        self.status == VlanStatus::Active
    }
}

/// Режим обнаружения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoveryMode {
    /// Только активные VLAN
    Basic,
    /// Активные, маршрутизируемые, с портами и с нужной подстрокой в имени
    Advanced,
}

/// Атрибут VLAN, за которым стоит отдельный обход
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VlanAttribute {
    Names,
    Status,
    Type,
    Ports,
    Routing,
}

impl VlanAttribute {
    /// Без имён и статусов список VLAN не строится
    pub fn is_mandatory(self) -> bool {
        matches!(self, VlanAttribute::Names | VlanAttribute::Status)
    }
}

impl fmt::Display for VlanAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VlanAttribute::Names => "names",
            VlanAttribute::Status => "status",
            VlanAttribute::Type => "type",
            VlanAttribute::Ports => "ports",
            VlanAttribute::Routing => "routing",
        };
        f.write_str(name)
    }
}

/// Результат проверки доступности одного коммутатора
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LivenessResult {
    pub switch_id: SwitchId,
    pub is_online: bool,
    pub checked_at: DateTime<Utc>,
}

impl LivenessResult {
    pub fn new(switch_id: SwitchId, is_online: bool) -> Self {
        Self {
            switch_id,
            is_online,
            checked_at: Utc::now(),
        }
    }
}
