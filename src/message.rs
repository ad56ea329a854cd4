//! The inter-service message model and its wire-level result types.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::MalformedMessage;

/// Wire-format revision tag applied when a message omits `protocol`.
pub const PROTOCOL_VERSION: &str = "MCP-v1";

fn default_status() -> String {
    "pending".to_string()
}

fn default_protocol() -> String {
    PROTOCOL_VERSION.to_string()
}

/// One inter-service message.
///
/// `body` is an opaque payload: the router forwards it untouched and never
/// inspects it. `metadata` is a tracing bag that is only ever populated when
/// the caller left it out entirely (see [`McpMessage::enrich`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpMessage {
    pub sender: String,
    pub receiver: String,
    /// Free-form classification tag ("request", "response", "search", ...).
    pub message_type: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default = "default_protocol")]
    pub protocol: String,
    pub body: Map<String, Value>,
    #[serde(default)]
    pub metadata: Option<Map<String, Value>>,
}

impl McpMessage {
    /// Strict construction from a raw batch element.
    ///
    /// `sender`, `receiver`, `message_type` and `body` must be present and
    /// `body` must be an object; `sender` must be non-empty. `receiver` is
    /// deliberately not checked against the registry here; an unresolvable
    /// receiver is a dispatch-time error, not a validation-time one.
    pub fn parse(raw: &Value) -> Result<Self, MalformedMessage> {
        let message: McpMessage = serde_json::from_value(raw.clone())?;
        if message.sender.is_empty() {
            return Err(MalformedMessage::new("sender must be a non-empty string"));
        }
        Ok(message)
    }

    /// Populates `metadata` with `{hops: [sender], timestamp}` when it is
    /// entirely absent; otherwise the identity function, whatever shape the
    /// caller supplied (an empty object counts as present). Idempotent.
    pub fn enrich(mut self) -> Self {
        if self.metadata.is_none() {
            let mut metadata = Map::new();
            metadata.insert("hops".to_string(), json!([self.sender]));
            metadata.insert("timestamp".to_string(), json!(Utc::now().to_rfc3339()));
            self.metadata = Some(metadata);
        }
        self
    }
}

/// Per-message outcome of a batch send, in the external wire shape.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SendResult {
    Success {
        message_id: usize,
        receiver_response: Value,
    },
    Error {
        error: String,
        /// The message exactly as submitted, before any enrichment.
        message: Value,
    },
}

impl SendResult {
    pub fn error(error: impl ToString, message: Value) -> Self {
        SendResult::Error {
            error: error.to_string(),
            message,
        }
    }
}
