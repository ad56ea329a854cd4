//! Append-only history of successfully forwarded messages.

use std::sync::RwLock;

use crate::message::McpMessage;

/// Capability interface over the message history, so a durable backend can
/// replace the in-memory one without touching router logic.
///
/// Appends must be serialized by the implementation: the returned length is
/// handed to callers as a `message_id` and has to be unique and strictly
/// increasing.
pub trait MessageLog: Send + Sync {
    /// Appends one confirmed delivery and returns the new length, which
    /// doubles as the message id.
    fn append(&self, message: McpMessage) -> usize;

    /// The full history in append order.
    fn snapshot(&self) -> Vec<McpMessage>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Process-lifetime log; never pruned, never mutated after append.
#[derive(Debug, Default)]
pub struct InMemoryLog {
    entries: RwLock<Vec<McpMessage>>,
}

impl InMemoryLog {
    pub fn new() -> Self {
        InMemoryLog::default()
    }
}

impl MessageLog for InMemoryLog {
    fn append(&self, message: McpMessage) -> usize {
        let mut entries = self.entries.write().unwrap();
        entries.push(message);
        entries.len()
    }

    fn snapshot(&self) -> Vec<McpMessage> {
        self.entries.read().unwrap().clone()
    }

    fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }
}
