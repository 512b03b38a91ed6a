//! Общие заготовки для интеграционных тестов.

#![allow(dead_code)]

use std::net::IpAddr;

use netaccess_snmp::config::VlanOids;
use netaccess_snmp::snmp::MockTransport;
use netaccess_snmp::{ObjectId, Switch, SwitchId};

pub fn switch(id: u64, ip: &str) -> Switch {
    Switch {
        id: SwitchId(id),
        name: format!("sw-{id}"),
        ip_address: ip.parse().unwrap(),
        secret: "testing123".to_string(),
        description: None,
        community: None,
    }
}

/// Строки столбца VTP: `<root>.1.<vlan>` = value
pub fn column(root: &ObjectId, rows: &[(u64, &str)]) -> Vec<(ObjectId, String)> {
    rows.iter()
        .map(|(vlan, value)| {
            let mut arcs = root.arcs().to_vec();
            arcs.extend([1, *vlan]);
            (ObjectId::from_arcs(&arcs), value.to_string())
        })
        .collect()
}

/// Скриптует агента с двумя VLAN: 10 "Network-A" (маршрутизируемый, с портами)
/// и 20 "Guest" (без маршрутизации и портов).
pub fn script_two_vlans(mock: &MockTransport, agent: IpAddr) {
    let oids = VlanOids::default();
    mock.on_walk_values(agent, &oids.names, column(&oids.names, &[(10, "Network-A"), (20, "Guest")]))
        .on_walk_values(agent, &oids.status, column(&oids.status, &[(10, "1"), (20, "1")]))
        .on_walk_values(agent, &oids.kind, column(&oids.kind, &[(10, "1"), (20, "1")]))
        .on_walk_values(agent, &oids.ports, column(&oids.ports, &[(10, "Gi0/1"), (20, "None")]))
        .on_walk_values(agent, &oids.routing, column(&oids.routing, &[(10, "1"), (20, "2")]));
}
