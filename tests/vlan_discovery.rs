//! Обнаружение VLAN через MockTransport.

mod common;

use std::collections::HashSet;
use std::net::IpAddr;
use std::sync::Arc;

use netaccess_snmp::collector::{VlanAttribute, VlanStatus};
use netaccess_snmp::config::VlanOids;
use netaccess_snmp::snmp::mock::MockCall;
use netaccess_snmp::snmp::MockTransport;
use netaccess_snmp::{DiscoveryMode, QueryFailure, Settings, VlanCorrelator, WalkOutcome};
use pretty_assertions::assert_eq;

use common::{column, script_two_vlans, switch};

const AGENT: &str = "10.1.0.1";

fn agent() -> IpAddr {
    AGENT.parse().unwrap()
}

#[tokio::test]
async fn advanced_mode_keeps_only_routed_network_vlans() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());
    let correlator = VlanCorrelator::new(Arc::new(mock), &Settings::default());

    let advanced = correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Advanced)
        .await
        .unwrap();
    assert_eq!(advanced.len(), 1);
    assert_eq!(advanced[0].vlan_id, 10);
    assert_eq!(advanced[0].name, "Network-A");
    assert_eq!(advanced[0].ports, "Gi0/1");
    assert!(advanced[0].routing_enabled);

    let basic = correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Basic)
        .await
        .unwrap();
    assert_eq!(
        basic.iter().map(|v| v.vlan_id).collect::<Vec<_>>(),
        vec![10, 20]
    );
    assert!(basic.iter().all(|v| v.status == VlanStatus::Active));
}

#[tokio::test]
async fn discovery_is_idempotent() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());
    let correlator = VlanCorrelator::new(Arc::new(mock), &Settings::default());
    let target = switch(1, AGENT);

    let first = correlator.discover(&target, DiscoveryMode::Basic).await.unwrap();
    let second = correlator.discover(&target, DiscoveryMode::Basic).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn walks_every_attribute_once() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());
    let correlator = VlanCorrelator::new(Arc::new(mock.clone()), &Settings::default());

    correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Advanced)
        .await
        .unwrap();

    let roots: HashSet<String> = mock
        .calls()
        .into_iter()
        .filter_map(|call| match call {
            MockCall::Walk { root, .. } => Some(root.to_string()),
            MockCall::Get { .. } => None,
        })
        .collect();
    let oids = VlanOids::default();
    let expected: HashSet<String> = [oids.names, oids.status, oids.kind, oids.ports, oids.routing]
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(roots, expected);
    assert_eq!(mock.calls().len(), 5);
}

/// Сбой обязательного обхода — ошибка, а не пустой список.
#[tokio::test]
async fn status_walk_failure_is_query_failure() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());
    mock.on_walk(
        agent(),
        &VlanOids::default().status,
        WalkOutcome::TransportError("no response after 2 attempts".to_string()),
    );
    let correlator = VlanCorrelator::new(Arc::new(mock), &Settings::default());

    let result = correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Basic)
        .await;
    match result {
        Err(QueryFailure::Walk { attribute, reason }) => {
            assert_eq!(attribute, VlanAttribute::Status);
            assert!(reason.contains("no response"));
        }
        other => panic!("expected QueryFailure, got {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_switch_is_query_failure() {
    let correlator = VlanCorrelator::new(Arc::new(MockTransport::new()), &Settings::default());
    let result = correlator
        .discover(&switch(9, "10.1.9.9"), DiscoveryMode::Advanced)
        .await;
    assert!(matches!(
        result,
        Err(QueryFailure::Walk {
            attribute: VlanAttribute::Names,
            ..
        })
    ));
}

/// Короткий список портов: недостающие позиции получают "None".
#[tokio::test]
async fn short_ports_list_defaults_to_none() {
    let oids = VlanOids::default();
    let mock = MockTransport::new();
    mock.on_walk_values(
        agent(),
        &oids.names,
        column(&oids.names, &[(10, "Network-A"), (20, "Network-B"), (30, "Network-C")]),
    )
    .on_walk_values(agent(), &oids.status, column(&oids.status, &[(10, "1"), (20, "1"), (30, "1")]))
    .on_walk_values(agent(), &oids.ports, column(&oids.ports, &[(10, "Gi0/1")]));

    let correlator = VlanCorrelator::new(Arc::new(mock), &Settings::default());
    let vlans = correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Basic)
        .await
        .unwrap();

    assert_eq!(
        vlans.iter().map(|v| v.ports.as_str()).collect::<Vec<_>>(),
        vec!["Gi0/1", "None", "None"]
    );
    assert!(vlans.iter().all(|v| v.kind == "Unknown" && !v.routing_enabled));
}

#[tokio::test]
async fn name_filter_comes_from_settings() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());

    let mut settings = Settings::default();
    settings.discovery.name_contains = "Net".to_string();
    let correlator = VlanCorrelator::new(Arc::new(mock), &settings);

    let vlans = correlator
        .discover(&switch(1, AGENT), DiscoveryMode::Advanced)
        .await
        .unwrap();
    assert_eq!(vlans.len(), 1);
    assert_eq!(correlator.filter().name_contains, "Net");
}

#[tokio::test]
async fn walks_use_switch_community() {
    let mock = MockTransport::new();
    script_two_vlans(&mock, agent());
    let correlator = VlanCorrelator::new(Arc::new(mock.clone()), &Settings::default());

    let mut target = switch(1, AGENT);
    target.community = Some("lab".to_string());
    correlator.discover(&target, DiscoveryMode::Basic).await.unwrap();

    assert!(mock.calls().iter().all(|call| matches!(
        call,
        MockCall::Walk { community, .. } if community == "lab"
    )));
}
