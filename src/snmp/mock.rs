//! Программируемый транспорт без сети.
//!
//! Исходы GET и WALK задаются заранее для каждого адреса агента; неизвестные
//! адреса и OID отвечают транспортной ошибкой, как недоступный коммутатор.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use super::{GetOutcome, ObjectId, OidWalkResult, SnmpTarget, SnmpTransport, WalkOutcome};

/// Записанный вызов транспорта
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Get { agent: IpAddr, community: String, oid: ObjectId },
    Walk { agent: IpAddr, community: String, root: ObjectId },
}

#[derive(Default)]
struct MockState {
    gets: HashMap<(IpAddr, ObjectId), GetOutcome>,
    walks: HashMap<(IpAddr, ObjectId), WalkOutcome>,
    latency: HashMap<IpAddr, Duration>,
    calls: Vec<MockCall>,
}

#[derive(Clone, Default)]
pub struct MockTransport {
    inner: Arc<Mutex<MockState>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_get(&self, agent: IpAddr, oid: &ObjectId, outcome: GetOutcome) -> &Self {
        self.with_state(|state| {
            state.gets.insert((agent, oid.clone()), outcome);
        });
        self
    }

    pub fn on_walk(&self, agent: IpAddr, root: &ObjectId, outcome: WalkOutcome) -> &Self {
        self.with_state(|state| {
            state.walks.insert((agent, root.clone()), outcome);
        });
        self
    }

    /// Удобная форма `on_walk` для успешного обхода
    pub fn on_walk_values(&self, agent: IpAddr, root: &ObjectId, values: OidWalkResult) -> &Self {
        self.on_walk(agent, root, WalkOutcome::Values(values))
    }

    /// Задержка перед каждым ответом агента
    pub fn with_latency(&self, agent: IpAddr, latency: Duration) -> &Self {
        self.with_state(|state| {
            state.latency.insert(agent, latency);
        });
        self
    }

    pub fn calls(&self) -> Vec<MockCall> {
        self.with_state(|state| state.calls.clone())
    }

    fn with_state<T>(&self, f: impl FnOnce(&mut MockState) -> T) -> T {
        // Паника внутри теста не должна прятать остальные проверки
        let mut state = match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        f(&mut state)
    }

    async fn delay(&self, agent: IpAddr) {
        let latency = self.with_state(|state| state.latency.get(&agent).copied());
        if let Some(latency) = latency {
            tokio::time::sleep(latency).await;
        }
    }
}

#[async_trait]
impl SnmpTransport for MockTransport {
    async fn get(&self, target: &SnmpTarget, oid: &ObjectId) -> GetOutcome {
        let agent = target.address.ip();
        self.with_state(|state| {
            state.calls.push(MockCall::Get {
                agent,
                community: target.community.clone(),
                oid: oid.clone(),
            })
        });
        self.delay(agent).await;

        self.with_state(|state| state.gets.get(&(agent, oid.clone())).cloned())
            .unwrap_or_else(|| GetOutcome::TransportError(format!("no response from {agent}")))
    }

    async fn walk(&self, target: &SnmpTarget, root: &ObjectId) -> WalkOutcome {
        let agent = target.address.ip();
        self.with_state(|state| {
            state.calls.push(MockCall::Walk {
                agent,
                community: target.community.clone(),
                root: root.clone(),
            })
        });
        self.delay(agent).await;

        self.with_state(|state| state.walks.get(&(agent, root.clone())).cloned())
            .unwrap_or_else(|| WalkOutcome::TransportError(format!("no response from {agent}")))
    }
}
