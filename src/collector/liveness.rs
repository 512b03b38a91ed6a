use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio::time::{Instant, timeout_at};
use tracing::{debug, info, warn};

use super::types::LivenessResult;
use crate::config::{ProbeSettings, Settings, SwitchDirectory};
use crate::models::{Switch, SwitchId};
use crate::snmp::{GetOutcome, SnmpTarget, SnmpTransport};

/// Проверка доступности коммутаторов одним GET.
///
/// Любая ошибка агента или транспорта означает "недоступен"; наружу ничего не пробрасывается.
pub struct LivenessProber {
    transport: Arc<dyn SnmpTransport>,
    probe: ProbeSettings,
    port: u16,
    community: String,
}

impl LivenessProber {
    pub fn new(transport: Arc<dyn SnmpTransport>, settings: &Settings) -> Self {
        Self {
            transport,
            probe: settings.probe.clone(),
            port: settings.connection.port,
            community: settings.auth.v2c.community.clone(),
        }
    }

    fn target_for(&self, switch: &Switch) -> SnmpTarget {
        SnmpTarget {
            address: (switch.ip_address, self.port).into(),
            community: switch.community_or(&self.community).to_string(),
            timeout: self.probe.timeout(),
            retries: self.probe.retries,
        }
    }

    pub async fn probe(&self, switch: &Switch) -> bool {
        self.check(switch).await.is_online
    }

    pub async fn check(&self, switch: &Switch) -> LivenessResult {
        let outcome = self
            .transport
            .get(&self.target_for(switch), &self.probe.oid)
            .await;
        classify(switch, &outcome)
    }

    /// Проверяет список одновременно, не более `max_concurrent` за раз.
    ///
    /// Результаты идут в порядке входного списка. Коммутаторы, не успевшие
    /// ответить до `batch_deadline`, считаются недоступными.
    pub async fn check_all(&self, switches: &[Switch]) -> Vec<LivenessResult> {
        let semaphore = Arc::new(Semaphore::new(self.probe.max_concurrent.max(1)));
        let mut tasks = JoinSet::new();

        for (index, switch) in switches.iter().enumerate() {
            let transport = Arc::clone(&self.transport);
            let semaphore = Arc::clone(&semaphore);
            let target = self.target_for(switch);
            let oid = self.probe.oid.clone();

            tasks.spawn(async move {
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return (index, GetOutcome::TransportError("probe pool closed".to_string()));
                };
                (index, transport.get(&target, &oid).await)
            });
        }

        let mut results: Vec<Option<LivenessResult>> = vec![None; switches.len()];
        let deadline = Instant::now() + self.probe.batch_deadline();

        let finished = timeout_at(deadline, async {
            while let Some(joined) = tasks.join_next().await {
                match joined {
                    Ok((index, outcome)) => results[index] = Some(classify(&switches[index], &outcome)),
                    Err(e) => warn!("SNMP probe task failed: {}", e),
                }
            }
        })
        .await;

        if finished.is_err() {
            warn!(
                pending = tasks.len(),
                deadline = ?self.probe.batch_deadline(),
                "liveness batch deadline reached, abandoning remaining probes"
            );
            tasks.abort_all();
        }

        results
            .into_iter()
            .zip(switches)
            .map(|(result, switch)| result.unwrap_or_else(|| LivenessResult::new(switch.id, false)))
            .collect()
    }

    pub async fn probe_all(&self, switches: &[Switch]) -> HashMap<SwitchId, bool> {
        self.check_all(switches)
            .await
            .into_iter()
            .map(|result| (result.switch_id, result.is_online))
            .collect()
    }

    /// Проверяет всё, что отдаёт учёт. Ошибка — только если не удалось получить список.
    pub async fn probe_directory(
        &self,
        directory: &dyn SwitchDirectory,
    ) -> Result<HashMap<SwitchId, bool>> {
        let switches = directory.switches_needing_probe()?;
        let statuses = self.probe_all(&switches).await;

        let online = statuses.values().filter(|online| **online).count();
        info!(total = statuses.len(), online, "liveness sweep finished");
        Ok(statuses)
    }
}

fn classify(switch: &Switch, outcome: &GetOutcome) -> LivenessResult {
    let is_online = match outcome {
        GetOutcome::Value { oid, value } => {
            debug!(ip = %switch.ip_address, %oid, %value, "SNMP response OK");
            true
        }
        GetOutcome::AgentError(status) => {
            warn!(ip = %switch.ip_address, %status, "SNMP response error");
            false
        }
        GetOutcome::TransportError(reason) => {
            warn!(ip = %switch.ip_address, %reason, "SNMP error");
            false
        }
    };

    LivenessResult::new(switch.id, is_online)
}
