use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::snmp::{ObjectId, SNMP_PORT};

/// Базовые настройки приложения
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Настройки подключения
    pub connection: ConnectionSettings,
    /// Настройки аутентификации
    pub auth: AuthSettings,
    /// Проверка доступности коммутаторов
    pub probe: ProbeSettings,
    /// Обнаружение VLAN
    pub discovery: DiscoverySettings,
    pub server: ServerSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionSettings {
    /// Таймаут одного запроса-ответа (секунды)
    pub timeout: u64,
    /// Количество повторов по таймауту
    pub retries: u32,
    pub port: u16,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthSettings {
    /// Настройки SNMPv2c
    pub v2c: SnmpV2cSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnmpV2cSettings {
    /// Community string
    pub community: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeSettings {
    /// OID, который запрашивается для проверки
    pub oid: ObjectId,
    /// Таймаут одной проверки (секунды)
    pub timeout: u64,
    pub retries: u32,
    /// Сколько коммутаторов опрашивается одновременно
    pub max_concurrent: usize,
    /// Общий срок на проверку всего списка (секунды)
    pub batch_deadline: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoverySettings {
    pub oids: VlanOids,
    /// Подстрока имени, обязательная в расширенном режиме (с учётом регистра)
    pub name_contains: String,
}

/// Корни поддеревьев VLAN (Cisco VTP MIB и Q-BRIDGE MIB)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VlanOids {
    pub names: ObjectId,
    pub status: ObjectId,
    #[serde(rename = "type")]
    pub kind: ObjectId,
    pub ports: ObjectId,
    pub routing: ObjectId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub listen: String,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            timeout: 2,
            retries: 1,
            port: SNMP_PORT,
        }
    }
}

impl Default for SnmpV2cSettings {
    fn default() -> Self {
        Self {
            community: "quantum_net".to_string(),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            oid: ObjectId::from_arcs(&[1, 3, 6, 1, 2, 1, 1, 0]),
            timeout: 2,
            retries: 1,
            max_concurrent: 32,
            batch_deadline: 5,
        }
    }
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            oids: VlanOids::default(),
            name_contains: "Network".to_string(),
        }
    }
}

const VTP_VLAN_ENTRY: [u64; 13] = [1, 3, 6, 1, 4, 1, 9, 9, 46, 1, 3, 1, 1];

fn vtp_column(column: u64) -> ObjectId {
    let mut arcs = VTP_VLAN_ENTRY.to_vec();
    arcs.push(column);
    ObjectId::from_arcs(&arcs)
}

impl Default for VlanOids {
    fn default() -> Self {
        Self {
            names: vtp_column(4),
            status: vtp_column(3),
            kind: vtp_column(14),
            ports: ObjectId::from_arcs(&[1, 3, 6, 1, 2, 1, 17, 7, 1, 4, 3, 1, 2]),
            routing: vtp_column(18),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: "0.0.0.0:8080".to_string(),
        }
    }
}

impl ConnectionSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

impl ProbeSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }

    pub fn batch_deadline(&self) -> Duration {
        Duration::from_secs(self.batch_deadline)
    }
}

impl Settings {
    /// Применяет переопределения из окружения. Нечисловые значения игнорируются.
    ///
    /// `SNMP_TIMEOUT`/`SNMP_RETRIES` относятся к обнаружению VLAN (`connection`),
    /// `PROBE_TIMEOUT`/`PROBE_RETRIES` к проверке доступности (`probe`).
    /// Кроме них: `SNMP_COMMUNITY`, `LISTEN_ADDR`.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(community) = lookup("SNMP_COMMUNITY") {
            self.auth.v2c.community = community;
        }
        if let Some(timeout) = lookup("SNMP_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.connection.timeout = timeout;
        }
        if let Some(retries) = lookup("SNMP_RETRIES").and_then(|s| s.parse().ok()) {
            self.connection.retries = retries;
        }
        if let Some(timeout) = lookup("PROBE_TIMEOUT").and_then(|s| s.parse().ok()) {
            self.probe.timeout = timeout;
        }
        if let Some(retries) = lookup("PROBE_RETRIES").and_then(|s| s.parse().ok()) {
            self.probe.retries = retries;
        }
        if let Some(listen) = lookup("LISTEN_ADDR") {
            self.server.listen = listen;
        }
    }
}
