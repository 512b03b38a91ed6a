use std::net::SocketAddr;
use std::time::Duration;

use async_trait::async_trait;

pub mod mock;
pub mod oid;
pub mod v2c;

pub use mock::MockTransport;
pub use oid::ObjectId;
pub use v2c::SnmpClientV2c;

/// Стандартный порт SNMP-агента
pub const SNMP_PORT: u16 = 161;

/// Результат WALK: пары (OID, значение) в порядке, в котором их вернул агент.
pub type OidWalkResult = Vec<(ObjectId, String)>;

/// Всё, что нужно для одного обмена с агентом.
///
/// Соединение между вызовами не сохраняется, поэтому параметры передаются каждый раз.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnmpTarget {
    pub address: SocketAddr,
    pub community: String,
    /// Ограничение на один запрос-ответ
    pub timeout: Duration,
    /// Повторы того же запроса, только по таймауту
    pub retries: u32,
}

/// Исход одиночного GET
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GetOutcome {
    Value { oid: ObjectId, value: String },
    /// Агент ответил с ненулевым error-status
    AgentError(String),
    /// Сеть недоступна, таймаут исчерпан или ответ не разобран
    TransportError(String),
}

/// Исход WALK по поддереву
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WalkOutcome {
    Values(OidWalkResult),
    AgentError(String),
    TransportError(String),
}

impl GetOutcome {
    pub fn is_value(&self) -> bool {
        matches!(self, GetOutcome::Value { .. })
    }
}

impl WalkOutcome {
    /// Значения при успехе, иначе описание ошибки
    pub fn into_values(self) -> Result<OidWalkResult, String> {
        match self {
            WalkOutcome::Values(values) => Ok(values),
            WalkOutcome::AgentError(status) => Err(format!("agent error: {status}")),
            WalkOutcome::TransportError(reason) => Err(format!("transport error: {reason}")),
        }
    }
}

/// Шов между логикой опроса и сетью.
///
/// Ошибки не пробрасываются: любой сбой становится вариантом исхода.
#[async_trait]
pub trait SnmpTransport: Send + Sync {
    async fn get(&self, target: &SnmpTarget, oid: &ObjectId) -> GetOutcome;

    /// Обходит строго поддерево `root` и останавливается на первом OID вне его.
    async fn walk(&self, target: &SnmpTarget, root: &ObjectId) -> WalkOutcome;
}

/// Имя error-status из RFC 3416
pub fn error_status_name(status: u32) -> &'static str {
    match status {
        0 => "noError",
        1 => "tooBig",
        2 => "noSuchName",
        3 => "badValue",
        4 => "readOnly",
        5 => "genErr",
        6 => "noAccess",
        7 => "wrongType",
        8 => "wrongLength",
        9 => "wrongEncoding",
        10 => "wrongValue",
        11 => "noCreation",
        12 => "inconsistentValue",
        13 => "resourceUnavailable",
        14 => "commitFailed",
        15 => "undoFailed",
        16 => "authorizationError",
        17 => "notWritable",
        18 => "inconsistentName",
        _ => "unknownError",
    }
}
