use std::{borrow::Cow, collections::HashMap, fmt, sync::Arc};

use chrono::Utc;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use super::context::Context;

pub type AnyMap = HashMap<String, Value>;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventName {
  ProductCreate,
  ProductUpdate,
  ProductDelete,
  CartCreate,
  CartProductAdd,
}

#[derive(Serialize, Deserialize, Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum EventParameterKey {
  ProductId,
  CartId,
  Payload,
}

impl EventParameterKey {
  pub fn as_string(&self) -> Cow<'static, str> {
    match self {
      Self::ProductId => Cow::Borrowed("product_id"),
      Self::CartId => Cow::Borrowed("cart_id"),
      Self::Payload => Cow::Borrowed("payload"),
    }
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
  Fail,
  Success,
}

#[derive(Serialize, Deserialize, Debug, Clone, Display, Default)]
#[display("AuditEventData: {:?} {:?} {}", parameters, resulting_state, object_type)]
pub struct AuditEventData {
  pub parameters: AnyMap,
  pub resulting_state: AnyMap,
  pub object_type: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, Display)]
#[display("AuditEventActor: {request_id} {client} {ip_address} {x_forwarded_for} {language}")]
pub struct AuditEventActor {
  pub request_id: String,
  pub client: String,
  pub ip_address: String,
  pub x_forwarded_for: String,
  pub language: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct EventError {
  #[serde(skip_serializing_if = "String::is_empty")]
  pub description: String,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub status_code: Option<u16>,
}

impl fmt::Display for EventError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "EventError: {} {}", self.description, self.status_code.unwrap_or(0))
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Display)]
#[display("AuditRecord: {event_name} {status} {event} {actor} {timestamp}")]
pub struct AuditRecord {
  pub event_name: EventName,
  pub status: EventStatus,
  pub event: AuditEventData,
  pub actor: AuditEventActor,
  /// Unix milliseconds at which the record was opened.
  pub timestamp: i64,

  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<EventError>,
}

impl AuditRecord {
  pub fn new(ctx: Arc<Context>, event: EventName, initial_status: EventStatus) -> Self {
    Self {
      event_name: event,
      status: initial_status,
      actor: AuditEventActor {
        request_id: ctx.request_id.clone(),
        client: ctx.user_agent.clone(),
        ip_address: ctx.ip_address.clone(),
        x_forwarded_for: ctx.x_forwarded_for.clone(),
        language: ctx.accept_language().to_string(),
      },
      event: AuditEventData::default(),
      timestamp: Utc::now().timestamp_millis(),
      error: None,
    }
  }

  pub fn success(&mut self) {
    self.status = EventStatus::Success;
    self.error = None;
  }

  pub fn fail(&mut self, description: impl Into<String>, status_code: Option<u16>) {
    self.status = EventStatus::Fail;
    self.error = Some(EventError { description: description.into(), status_code });
  }

  pub fn set_event_parameter(&mut self, key: EventParameterKey, val: Value) {
    self.event.parameters.insert(key.as_string().into_owned(), val);
  }

  pub fn set_resulting_state(&mut self, object_type: &str, data: Value) {
    self.event.object_type = object_type.to_string();
    self.event.resulting_state = match data {
      Value::Object(map) => map.into_iter().collect(),
      other => HashMap::from([("value".to_string(), other)]),
    };
  }

  /// Writes the record to the `audit` log target as a single JSON line.
  pub fn log(&self) {
    match serde_json::to_string(self) {
      Ok(line) => info!(target: "audit", event = %self.event_name, status = %self.status, "{line}"),
      Err(_) => info!(target: "audit", "{}", self),
    }
  }
}
