use std::sync::Arc;

use tracing::{info, warn};

use super::types::{DiscoveryMode, VlanAttribute, VlanRecord, VlanStatus};
use crate::config::{ConnectionSettings, DiscoverySettings, Settings};
use crate::error::QueryFailure;
use crate::models::Switch;
use crate::snmp::{OidWalkResult, SnmpTarget, SnmpTransport, WalkOutcome};

/// Значения по умолчанию, если необязательный обход не дал данных
pub const DEFAULT_TYPE: &str = "Unknown";
pub const DEFAULT_PORTS: &str = "None";

/// Сырые результаты обходов одного коммутатора в один момент времени
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanWalks {
    pub names: WalkOutcome,
    pub status: WalkOutcome,
    pub kind: WalkOutcome,
    pub ports: WalkOutcome,
    pub routing: WalkOutcome,
}

/// Правила отбора VLAN
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VlanFilter {
    /// Подстрока имени для расширенного режима, с учётом регистра
    pub name_contains: String,
}

impl VlanFilter {
    pub fn accepts(&self, record: &VlanRecord, mode: DiscoveryMode) -> bool {
        match mode {
            DiscoveryMode::Basic => record.is_active(),
            DiscoveryMode::Advanced => {
                record.is_active()
                    && record.routing_enabled
                    && !record.ports.is_empty()
                    && record.ports != DEFAULT_PORTS
                    && record.name.contains(&self.name_contains)
            }
        }
    }
}

impl Default for VlanFilter {
    fn default() -> Self {
        Self {
            name_contains: DiscoverySettings::default().name_contains,
        }
    }
}

/// Обнаружение VLAN на коммутаторе.
///
/// Каждый вызов `discover` владеет своими промежуточными списками, поэтому
/// параллельные запросы к одному коммутатору друг другу не мешают.
pub struct VlanCorrelator {
    transport: Arc<dyn SnmpTransport>,
    connection: ConnectionSettings,
    community: String,
    discovery: DiscoverySettings,
}

impl VlanCorrelator {
    pub fn new(transport: Arc<dyn SnmpTransport>, settings: &Settings) -> Self {
        Self {
            transport,
            connection: settings.connection.clone(),
            community: settings.auth.v2c.community.clone(),
            discovery: settings.discovery.clone(),
        }
    }

    pub fn filter(&self) -> VlanFilter {
        VlanFilter {
            name_contains: self.discovery.name_contains.clone(),
        }
    }

    fn target_for(&self, switch: &Switch) -> SnmpTarget {
        SnmpTarget {
            address: (switch.ip_address, self.connection.port).into(),
            community: switch.community_or(&self.community).to_string(),
            timeout: self.connection.timeout(),
            retries: self.connection.retries,
        }
    }

    /// Опрашивает коммутатор и возвращает отфильтрованный список VLAN в порядке обхода имён.
    ///
    /// Пустой список значит "ничего не прошло фильтр"; недоступность коммутатора —
    /// всегда `QueryFailure`.
    pub async fn discover(
        &self,
        switch: &Switch,
        mode: DiscoveryMode,
    ) -> Result<Vec<VlanRecord>, QueryFailure> {
        let walks = self.walk_all(&self.target_for(switch)).await;

        let records = correlate(walks).inspect_err(|e| {
            warn!(switch = %switch.name, ip = %switch.ip_address, error = %e, "VLAN discovery failed");
        })?;

        let total = records.len();
        let filter = self.filter();
        let vlans: Vec<VlanRecord> = records
            .into_iter()
            .filter(|record| filter.accepts(record, mode))
            .collect();

        info!(
            switch = %switch.name,
            ip = %switch.ip_address,
            ?mode,
            total,
            kept = vlans.len(),
            "VLAN discovery finished"
        );
        Ok(vlans)
    }

    /// Все пять обходов выполняются одновременно
    async fn walk_all(&self, target: &SnmpTarget) -> VlanWalks {
        let oids = &self.discovery.oids;
        let transport = self.transport.as_ref();

        let (names, status, kind, ports, routing) = tokio::join!(
            transport.walk(target, &oids.names),
            transport.walk(target, &oids.status),
            transport.walk(target, &oids.kind),
            transport.walk(target, &oids.ports),
            transport.walk(target, &oids.routing),
        );

        VlanWalks {
            names,
            status,
            kind,
            ports,
            routing,
        }
    }
}

/// Сводит обходы в записи VLAN по позиции.
///
/// Идентификатор VLAN берётся из последней дуги OID имени; по позиции в списке
/// имён берутся значения остальных списков. Короткие или неудачные
/// необязательные списки дают значения по умолчанию.
pub fn correlate(walks: VlanWalks) -> Result<Vec<VlanRecord>, QueryFailure> {
    let names = mandatory(VlanAttribute::Names, walks.names)?;
    let status = mandatory(VlanAttribute::Status, walks.status)?;
    check_alignment(&names, &status)?;

    let kind = optional(VlanAttribute::Type, walks.kind);
    let ports = optional(VlanAttribute::Ports, walks.ports);
    let routing = optional(VlanAttribute::Routing, walks.routing);

    names
        .into_iter()
        .zip(status)
        .enumerate()
        .map(|(position, ((name_oid, name), (_, raw_status)))| -> Result<VlanRecord, QueryFailure> {
            let vlan_id = name_oid
                .last_arc()
                .and_then(|arc| u32::try_from(arc).ok())
                .ok_or_else(|| QueryFailure::MalformedIndex {
                    oid: name_oid.to_string(),
                })?;

            Ok(VlanRecord {
                vlan_id,
                name,
                status: VlanStatus::from_raw(&raw_status),
                kind: value_at(&kind, position).unwrap_or(DEFAULT_TYPE).to_string(),
                ports: value_at(&ports, position)
                    .unwrap_or(DEFAULT_PORTS)
                    .to_string(),
                routing_enabled: value_at(&routing, position) == Some("1"),
            })
        })
        .collect()
}

fn mandatory(attribute: VlanAttribute, outcome: WalkOutcome) -> Result<OidWalkResult, QueryFailure> {
    outcome
        .into_values()
        .map_err(|reason| QueryFailure::Walk { attribute, reason })
}

fn optional(attribute: VlanAttribute, outcome: WalkOutcome) -> OidWalkResult {
    outcome.into_values().unwrap_or_else(|reason| {
        warn!(%attribute, %reason, "optional VLAN walk failed, using defaults");
        Vec::new()
    })
}

/// Имена и статусы должны идти парами с одинаковым индексом VLAN
fn check_alignment(names: &OidWalkResult, status: &OidWalkResult) -> Result<(), QueryFailure> {
    let misaligned = |position| QueryFailure::Misaligned {
        position,
        names: names.len(),
        status: status.len(),
    };

    if names.len() != status.len() {
        return Err(misaligned(names.len().min(status.len())));
    }

    match names
        .iter()
        .zip(status)
        .position(|((name_oid, _), (status_oid, _))| name_oid.last_arc() != status_oid.last_arc())
    {
        Some(position) => Err(misaligned(position)),
        None => Ok(()),
    }
}

fn value_at(list: &OidWalkResult, position: usize) -> Option<&str> {
    list.get(position).map(|(_, value)| value.as_str())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::snmp::ObjectId;

    fn column(root: &str, rows: &[(u64, &str)]) -> WalkOutcome {
        let root: ObjectId = root.parse().unwrap();
        WalkOutcome::Values(
            rows.iter()
                .map(|(index, value)| {
                    let mut arcs = root.arcs().to_vec();
                    arcs.extend([1, *index]);
                    (ObjectId::from_arcs(&arcs), value.to_string())
                })
                .collect(),
        )
    }

    fn walks(
        names: &[(u64, &str)],
        status: &[(u64, &str)],
        ports: &[(u64, &str)],
        routing: &[(u64, &str)],
    ) -> VlanWalks {
        VlanWalks {
            names: column("1.3.6.1.4.1.9.9.46.1.3.1.1.4", names),
            status: column("1.3.6.1.4.1.9.9.46.1.3.1.1.3", status),
            kind: column("1.3.6.1.4.1.9.9.46.1.3.1.1.14", &[]),
            ports: column("1.3.6.1.2.1.17.7.1.4.3.1.2", ports),
            routing: column("1.3.6.1.4.1.9.9.46.1.3.1.1.18", routing),
        }
    }

    fn kept(records: &[VlanRecord], mode: DiscoveryMode) -> Vec<u32> {
        let filter = VlanFilter::default();
        records
            .iter()
            .filter(|r| filter.accepts(r, mode))
            .map(|r| r.vlan_id)
            .collect()
    }

    #[test]
    fn basic_and_advanced_filters() {
        let records = correlate(walks(
            &[(10, "Network-A"), (20, "Guest")],
            &[(10, "1"), (20, "1")],
            &[(10, "Gi0/1"), (20, "None")],
            &[(10, "1"), (20, "2")],
        ))
        .unwrap();

        assert_eq!(kept(&records, DiscoveryMode::Basic), vec![10, 20]);
        assert_eq!(kept(&records, DiscoveryMode::Advanced), vec![10]);
        assert_eq!(records[0].name, "Network-A");
    }

    #[test]
    fn short_optional_lists_fall_back_to_defaults() {
        let records = correlate(walks(
            &[(1, "default"), (10, "Network-A"), (20, "Network-B")],
            &[(1, "1"), (10, "1"), (20, "2")],
            &[(1, "Gi0/1")],
            &[],
        ))
        .unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].ports, "Gi0/1");
        assert_eq!(records[1].ports, "None");
        assert_eq!(records[2].ports, "None");
        assert!(records.iter().all(|r| r.kind == DEFAULT_TYPE));
        assert!(records.iter().all(|r| !r.routing_enabled));
        assert_eq!(records[2].status, VlanStatus::Inactive);
    }

    #[test]
    fn failed_optional_walk_degrades() {
        let mut input = walks(
            &[(10, "Network-A")],
            &[(10, "1")],
            &[(10, "Gi0/1")],
            &[(10, "1")],
        );
        input.ports = WalkOutcome::TransportError("timeout".to_string());

        let records = correlate(input).unwrap();
        assert_eq!(records[0].ports, DEFAULT_PORTS);
        assert_eq!(kept(&records, DiscoveryMode::Advanced), Vec::<u32>::new());
    }

    #[test]
    fn failed_mandatory_walk_is_query_failure() {
        let mut input = walks(&[(10, "Network-A")], &[(10, "1")], &[], &[]);
        input.status = WalkOutcome::AgentError("genErr (index 1)".to_string());

        match correlate(input) {
            Err(QueryFailure::Walk { attribute, .. }) => {
                assert_eq!(attribute, VlanAttribute::Status)
            }
            other => panic!("expected walk failure, got {other:?}"),
        }
    }

    #[test]
    fn misaligned_mandatory_walks_fail_fast() {
        let shorter = correlate(walks(
            &[(10, "Network-A"), (20, "Guest")],
            &[(10, "1")],
            &[],
            &[],
        ));
        assert!(matches!(shorter, Err(QueryFailure::Misaligned { names: 2, status: 1, .. })));

        let shifted = correlate(walks(
            &[(10, "Network-A"), (20, "Guest")],
            &[(10, "1"), (30, "1")],
            &[],
            &[],
        ));
        assert!(matches!(shifted, Err(QueryFailure::Misaligned { position: 1, .. })));
    }

    #[test]
    fn empty_switch_is_empty_list() {
        assert_eq!(correlate(walks(&[], &[], &[], &[])).unwrap(), Vec::new());
    }

    #[test]
    fn vlan_id_must_fit() {
        let result = correlate(walks(
            &[(u64::from(u32::MAX) + 1, "huge")],
            &[(u64::from(u32::MAX) + 1, "1")],
            &[],
            &[],
        ));
        assert!(matches!(result, Err(QueryFailure::MalformedIndex { .. })));
    }

    #[test]
    fn name_filter_is_configurable_and_case_sensitive() {
        let records = correlate(walks(
            &[(10, "network-lower"), (20, "Corp-Net")],
            &[(10, "1"), (20, "1")],
            &[(10, "Gi0/1"), (20, "Gi0/2")],
            &[(10, "1"), (20, "1")],
        ))
        .unwrap();

        assert_eq!(kept(&records, DiscoveryMode::Advanced), Vec::<u32>::new());

        let corp = VlanFilter {
            name_contains: "Corp".to_string(),
        };
        assert!(corp.accepts(&records[1], DiscoveryMode::Advanced));
        assert!(!corp.accepts(&records[0], DiscoveryMode::Advanced));
    }
}
