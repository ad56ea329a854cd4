//! Error types for message validation and dispatch
//!
//! The display strings of these errors are wire-visible: they are returned
//! verbatim in the `error` field of a per-message result.

/// Structural validation failure for an inbound message.
///
/// Recovered locally as a per-message result; it never aborts the batch.
#[derive(Debug, thiserror::Error)]
#[error("MalformedMessage: {reason}")]
pub struct MalformedMessage {
    reason: String,
}

impl MalformedMessage {
    pub fn new(reason: impl Into<String>) -> Self {
        MalformedMessage {
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for MalformedMessage {
    fn from(err: serde_json::Error) -> Self {
        MalformedMessage {
            reason: err.to_string(),
        }
    }
}

/// Errors produced while resolving and forwarding a single message.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    /// The receiver is not present in the service registry. A client-side
    /// error: the message was unroutable as submitted, never retried.
    #[error("UnknownReceiver: {receiver}")]
    UnknownReceiver { receiver: String },

    /// Transport error, timeout or a non-2xx answer from the receiver. An
    /// upstream error, distinct from an unroutable message.
    #[error("ForwardingFailed: {receiver}: {reason}")]
    ForwardingFailed { receiver: String, reason: String },
}

/// Result type for dispatch operations
pub type DispatchResult<T> = Result<T, DispatchError>;
