//! Message router for MCP inter-service traffic.
//!
//! Inbound batches are validated and enriched one element at a time, then
//! forwarded to the receiver resolved from the service registry. Confirmed
//! deliveries land in an append-only in-memory log; every element gets its
//! own success or error result, so one failure never aborts a batch.

pub mod config;
pub mod error;
pub mod message;
pub mod message_log;
pub mod registry;
pub mod router_state;
pub mod server;
