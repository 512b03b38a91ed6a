use thiserror::Error;

use crate::collector::VlanAttribute;

/// Невозможно построить список VLAN: коммутатор не ответил или ответил мусором.
///
/// Отличается от пустого списка: пустой список значит "ни один VLAN не прошёл фильтр".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryFailure {
    #[error("SNMP walk of VLAN {attribute} failed: {reason}")]
    Walk {
        attribute: VlanAttribute,
        reason: String,
    },

    #[error(
        "VLAN name and status walks are misaligned at position {position} (names: {names}, status: {status})"
    )]
    Misaligned {
        position: usize,
        names: usize,
        status: usize,
    },

    #[error("VLAN name OID {oid} does not end in a VLAN id")]
    MalformedIndex { oid: String },
}

/// Строка не является OID.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OidParseError {
    #[error("empty OID")]
    Empty,

    #[error("invalid OID arc '{arc}' in '{oid}'")]
    InvalidArc { oid: String, arc: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid MAC address '{input}': expected 12 hex digits, found {digits}")]
pub struct MacFormatError {
    pub input: String,
    pub digits: usize,
}
