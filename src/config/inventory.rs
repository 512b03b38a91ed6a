use std::collections::HashSet;
use std::net::IpAddr;

use anyhow::{Result, bail};

use crate::models::{Switch, SwitchId};

/// Источник списка коммутаторов для проверки доступности.
///
/// Только чтение; реализуется слоем учёта.
pub trait SwitchDirectory: Send + Sync {
    fn switches_needing_probe(&self) -> Result<Vec<Switch>>;
}

/// Учёт коммутаторов из файла конфигурации
#[derive(Debug, Clone, Default)]
pub struct Inventory {
    switches: Vec<Switch>,
}

impl Inventory {
    /// Проверяет, что адреса и идентификаторы не повторяются: результаты
    /// проверки доступности сводятся в карту по идентификатору.
    pub fn new(switches: Vec<Switch>) -> Result<Self> {
        let mut addresses = HashSet::new();
        let mut ids = HashSet::new();
        for switch in &switches {
            if switch.id == SwitchId::UNREGISTERED {
                bail!(
                    "Идентификатор {} зарезервирован (коммутатор '{}')",
                    switch.id,
                    switch.name
                );
            }
            if !ids.insert(switch.id) {
                bail!(
                    "Идентификатор {} указан у нескольких коммутаторов (последний: '{}')",
                    switch.id,
                    switch.name
                );
            }
            if !addresses.insert(switch.ip_address) {
                bail!(
                    "Адрес {} указан у нескольких коммутаторов (последний: '{}')",
                    switch.ip_address,
                    switch.name
                );
            }
        }

        Ok(Self { switches })
    }

    pub fn switches(&self) -> &[Switch] {
        &self.switches
    }

    pub fn find_by_ip(&self, ip: IpAddr) -> Option<&Switch> {
        self.switches.iter().find(|s| s.ip_address == ip)
    }

    pub fn len(&self) -> usize {
        self.switches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.switches.is_empty()
    }
}

impl SwitchDirectory for Inventory {
    fn switches_needing_probe(&self) -> Result<Vec<Switch>> {
        Ok(self.switches.clone())
    }
}
