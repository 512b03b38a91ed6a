use async_trait::async_trait;
use snmp2::{AsyncSession, Oid, Value};
use tokio::time::timeout;
use tracing::debug;

use super::oid::{self, ObjectId};
use super::{GetOutcome, SnmpTarget, SnmpTransport, WalkOutcome, error_status_name};

/// SNMPv2c клиент поверх `snmp2::AsyncSession`.
///
/// Один вызов `get`/`walk` идёт через одну сессию. Повтор после таймаута открывает
/// новую сессию (новый UDP-сокет), поэтому опоздавший ответ на брошенную попытку
/// не может быть принят за ответ на текущую.
#[derive(Debug, Clone, Copy, Default)]
pub struct SnmpClientV2c;

#[derive(Debug, Clone, Copy)]
enum Request {
    Get,
    GetNext,
}

#[derive(Debug)]
enum VarValue {
    Data(String),
    EndOfMibView,
}

#[derive(Debug)]
struct Response {
    error_status: u32,
    error_index: u32,
    varbind: Option<(ObjectId, VarValue)>,
}

impl Response {
    fn agent_error(&self) -> Option<String> {
        (self.error_status != 0).then(|| {
            format!(
                "{} (index {})",
                error_status_name(self.error_status),
                self.error_index
            )
        })
    }
}

impl SnmpClientV2c {
    pub fn new() -> Self {
        Self
    }

    /// Один запрос с повторами по таймауту. Ошибка — причина транспортного сбоя.
    ///
    /// Сессия переиспользуется между шагами одного обхода; после таймаута она
    /// закрывается, и следующая попытка идёт через новый сокет.
    async fn exchange(
        &self,
        target: &SnmpTarget,
        session: &mut Option<AsyncSession>,
        request: Request,
        oid: &ObjectId,
    ) -> Result<Response, String> {
        let snmp_oid = oid.to_snmp().map_err(|e| e.to_string())?;
        let attempts = target.retries.saturating_add(1);

        for attempt in 1..=attempts {
            let mut active = match session.take() {
                Some(active) => active,
                None => AsyncSession::new_v2c(
                    target.address,
                    target.community.as_bytes(),
                    attempt as i32,
                )
                .await
                .map_err(|e| format!("не удалось открыть SNMP сессию: {e}"))?,
            };

            let reply = match request {
                Request::Get => timeout(target.timeout, active.get(&snmp_oid)).await,
                Request::GetNext => timeout(target.timeout, active.getnext(&snmp_oid)).await,
            };

            let response = match reply {
                Ok(Ok(mut pdu)) => {
                    let varbind = pdu.varbinds.next();
                    read_response(pdu.error_status, pdu.error_index, varbind)
                }
                Ok(Err(e)) => return Err(format!("SNMP {request:?} {oid} не удался: {e}")),
                Err(_) => {
                    debug!(
                        agent = %target.address,
                        %oid,
                        attempt,
                        attempts,
                        "SNMP {:?} timed out",
                        request
                    );
                    continue;
                }
            };

            *session = Some(active);
            return response;
        }

        Err(format!(
            "нет ответа от {} после {} попыток ({:?} на попытку)",
            target.address, attempts, target.timeout
        ))
    }
}

#[async_trait]
impl SnmpTransport for SnmpClientV2c {
    async fn get(&self, target: &SnmpTarget, oid: &ObjectId) -> GetOutcome {
        let mut session = None;
        let response = match self.exchange(target, &mut session, Request::Get, oid).await {
            Ok(response) => response,
            Err(reason) => return GetOutcome::TransportError(reason),
        };

        if let Some(status) = response.agent_error() {
            return GetOutcome::AgentError(status);
        }

        match response.varbind {
            Some((oid, VarValue::Data(value))) => GetOutcome::Value { oid, value },
            Some((oid, VarValue::EndOfMibView)) => GetOutcome::Value {
                oid,
                value: "endOfMibView".to_string(),
            },
            None => GetOutcome::TransportError("SNMP ответ пустой".to_string()),
        }
    }

    async fn walk(&self, target: &SnmpTarget, root: &ObjectId) -> WalkOutcome {
        let mut results = Vec::new();
        let mut current = root.clone();
        let mut session = None;

        loop {
            let response = match self
                .exchange(target, &mut session, Request::GetNext, &current)
                .await
            {
                Ok(response) => response,
                Err(reason) => return WalkOutcome::TransportError(reason),
            };

            if let Some(status) = response.agent_error() {
                return WalkOutcome::AgentError(status);
            }

            let Some((oid, value)) = response.varbind else {
                break;
            };
            let VarValue::Data(value) = value else {
                break;
            };
            if !oid.starts_with(root) {
                break;
            }
            if oid <= current {
                return WalkOutcome::TransportError(format!(
                    "агент вернул неубывающий OID {oid} после {current}"
                ));
            }

            current = oid.clone();
            results.push((oid, value));
        }

        debug!(agent = %target.address, %root, rows = results.len(), "SNMP walk finished");
        WalkOutcome::Values(results)
    }
}

fn read_response(
    error_status: u32,
    error_index: u32,
    varbind: Option<(Oid<'_>, Value<'_>)>,
) -> Result<Response, String> {
    let varbind = match varbind {
        Some((name, value)) => {
            let name = oid::from_snmp(&name).map_err(|e| e.to_string())?;
            let value = match value {
                Value::EndOfMibView => VarValue::EndOfMibView,
                other => VarValue::Data(render_value(&other)),
            };
            Some((name, value))
        }
        None => None,
    };

    Ok(Response {
        error_status,
        error_index,
        varbind,
    })
}

/// Приводит SNMP значение к строке в том виде, в каком его сравнивает коррелятор
/// (статус VLAN `"1"`, имя VLAN как текст).
pub fn render_value(value: &Value<'_>) -> String {
    match value {
        Value::Integer(v) => v.to_string(),
        Value::Counter32(v) | Value::Unsigned32(v) | Value::Timeticks(v) => v.to_string(),
        Value::Counter64(v) => v.to_string(),
        Value::Boolean(v) => v.to_string(),
        Value::Null => String::new(),
        Value::OctetString(bytes) | Value::Opaque(bytes) => render_octets(bytes),
        Value::ObjectIdentifier(oid) => oid.to_string(),
        Value::IpAddress([a, b, c, d]) => format!("{a}.{b}.{c}.{d}"),
        Value::NoSuchObject => "noSuchObject".to_string(),
        Value::NoSuchInstance => "noSuchInstance".to_string(),
        Value::EndOfMibView => "endOfMibView".to_string(),
        other => format!("{:?}", other),
    }
}

/// Печатаемый UTF-8 как есть, иначе hex (битовые карты портов и т.п.)
fn render_octets(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) if !text.chars().any(char::is_control) => text.to_string(),
        _ => bytes.iter().map(|b| format!("{b:02x}")).collect(),
    }
}
