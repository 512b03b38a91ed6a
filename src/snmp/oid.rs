use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use snmp2::Oid;

use crate::error::OidParseError;

/// OID во владеющем представлении.
///
/// Порядок (`Ord`) лексикографический по дугам, т.е. совпадает с порядком обхода агента.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(Vec<u64>);

impl ObjectId {
    pub fn from_arcs(arcs: &[u64]) -> Self {
        Self(arcs.to_vec())
    }

    pub fn arcs(&self) -> &[u64] {
        &self.0
    }

    /// Лежит ли OID внутри поддерева `root` (сам `root` тоже считается).
    pub fn starts_with(&self, root: &ObjectId) -> bool {
        self.0.starts_with(&root.0)
    }

    pub fn last_arc(&self) -> Option<u64> {
        self.0.last().copied()
    }

    /// Конвертирует в OID библиотеки snmp2
    pub fn to_snmp(&self) -> anyhow::Result<Oid<'static>> {
        Oid::from(self.0.as_slice())
            .map_err(|e| anyhow::anyhow!("Не удалось создать Oid из '{}': {:?}", self, e))
    }
}

impl FromStr for ObjectId {
    type Err = OidParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let body = trimmed.strip_prefix('.').unwrap_or(trimmed);
        if body.is_empty() {
            return Err(OidParseError::Empty);
        }

        body.split('.')
            .map(|arc| {
                arc.parse::<u64>().map_err(|_| OidParseError::InvalidArc {
                    oid: s.to_string(),
                    arc: arc.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut arcs = self.0.iter();
        if let Some(first) = arcs.next() {
            write!(f, "{first}")?;
        }
        for arc in arcs {
            write!(f, ".{arc}")?;
        }
        Ok(())
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// Парсит OID, пришедший из snmp2, через его текстовое представление
pub(crate) fn from_snmp(oid: &Oid<'_>) -> Result<ObjectId, OidParseError> {
    oid.to_string().parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_dotted_and_leading_dot() {
        let oid: ObjectId = "1.3.6.1.2.1.1.0".parse().unwrap();
        assert_eq!(oid.arcs(), &[1, 3, 6, 1, 2, 1, 1, 0]);

        let dotted: ObjectId = ".1.3.6".parse().unwrap();
        assert_eq!(dotted.arcs(), &[1, 3, 6]);
        assert_eq!(dotted.to_string(), "1.3.6");
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!("".parse::<ObjectId>(), Err(OidParseError::Empty));
        assert!("1.3..6".parse::<ObjectId>().is_err());
        assert!("1.3.x".parse::<ObjectId>().is_err());
    }

    #[test]
    fn orders_by_arc_not_by_text() {
        let a: ObjectId = "1.3.6.1.9".parse().unwrap();
        let b: ObjectId = "1.3.6.1.10".parse().unwrap();
        let child: ObjectId = "1.3.6.1.9.1".parse().unwrap();
        assert!(a < b);
        assert!(a < child && child < b);
    }

    #[test]
    fn subtree_membership() {
        let root: ObjectId = "1.3.6.1.4.1.9.9.46.1.3.1.1.4".parse().unwrap();
        let inside: ObjectId = "1.3.6.1.4.1.9.9.46.1.3.1.1.4.1.10".parse().unwrap();
        let sibling: ObjectId = "1.3.6.1.4.1.9.9.46.1.3.1.1.5.1.10".parse().unwrap();
        assert!(inside.starts_with(&root));
        assert!(!sibling.starts_with(&root));
        assert_eq!(inside.last_arc(), Some(10));
    }
}
