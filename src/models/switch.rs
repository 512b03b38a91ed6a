use std::fmt;
use std::net::IpAddr;

use serde::{Deserialize, Serialize};

/// Идентификатор коммутатора в учётной базе
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SwitchId(pub u64);

impl SwitchId {
    /// Зарезервирован для коммутаторов вне учёта; в конфигурации не допускается.
    pub const UNREGISTERED: SwitchId = SwitchId(u64::MAX);
}

impl fmt::Display for SwitchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Управляемый коммутатор.
///
/// Ядро читает только адрес и community; остальное нужно слою учёта.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Switch {
    pub id: SwitchId,
    pub name: String,
    pub ip_address: IpAddr,
    /// Общий секрет RADIUS (NAS), в API не отдаётся
    #[serde(default, skip_serializing)]
    pub secret: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Community для SNMP, если отличается от общей
    #[serde(default, skip_serializing)]
    pub community: Option<String>,
}

impl Switch {
    /// Коммутатор, которого нет в учёте: опрашивается по адресу с общей community.
    pub fn unregistered(ip_address: IpAddr) -> Self {
        Self {
            id: SwitchId::UNREGISTERED,
            name: ip_address.to_string(),
            ip_address,
            secret: String::new(),
            description: None,
            community: None,
        }
    }

    pub fn community_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.community.as_deref().unwrap_or(default)
    }
}
