//! Shared router state and the dispatch/orchestration logic built on it.

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::future::join_all;
use serde::Serialize;
use serde_json::Value;

use crate::config::RouterConfig;
use crate::error::{DispatchError, DispatchResult};
use crate::message::{McpMessage, SendResult};
use crate::message_log::{InMemoryLog, MessageLog};
use crate::registry::ServiceRegistry;

/// Well-known inbound path every routable service exposes.
pub const RECEIVE_PATH: &str = "/receive-mcp";
const SEARCH_PATH: &str = "/search";
const HEALTH_PATH: &str = "/health";

/// Everything the handlers share: the registry, one reqwest client bounded
/// by the per-call timeout, and the append-only message log.
#[derive(Clone)]
pub struct RouterState {
    pub registry: ServiceRegistry,
    pub client: reqwest::Client,
    pub log: Arc<dyn MessageLog>,
    pub search_service: String,
    pub search_timeout: Duration,
    pub log_interval: u64,
}

impl RouterState {
    pub fn new(config: &RouterConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(RouterState {
            registry: ServiceRegistry::new(config.services.clone()),
            client,
            log: Arc::new(InMemoryLog::new()),
            search_service: config.search_service.clone(),
            search_timeout: Duration::from_secs(config.search_timeout_secs),
            log_interval: config.log_interval_secs,
        })
    }

    /// Resolves the receiver and forwards one enriched message to its
    /// `/receive-mcp` endpoint. Exactly one attempt, no retries; the 2xx
    /// response body is returned verbatim and never interpreted.
    pub async fn dispatch(&self, message: &McpMessage) -> DispatchResult<Value> {
        let addr = self
            .registry
            .resolve(&message.receiver)
            .ok_or_else(|| DispatchError::UnknownReceiver {
                receiver: message.receiver.clone(),
            })?;
        let url = addr.endpoint(RECEIVE_PATH);
        let response = self.post_json(&message.receiver, &url, message, None).await?;
        log::info!("Forwarded message to {} at {}", message.receiver, url);
        Ok(response)
    }

    /// Routes a batch. Each element is handled independently and in
    /// submission order; one failure never aborts the rest of the batch,
    /// and exactly one result is produced per input.
    pub async fn send_batch(&self, batch: Vec<Value>) -> Vec<SendResult> {
        let mut results = Vec::with_capacity(batch.len());
        for raw in batch {
            let message = match McpMessage::parse(&raw) {
                Ok(message) => message.enrich(),
                Err(e) => {
                    results.push(SendResult::error(e, raw));
                    continue;
                }
            };
            match self.dispatch(&message).await {
                Ok(receiver_response) => {
                    // Only confirmed deliveries reach the log; the new
                    // length is the message id.
                    let message_id = self.log.append(message);
                    results.push(SendResult::Success {
                        message_id,
                        receiver_response,
                    });
                }
                Err(e) => results.push(SendResult::error(e, raw)),
            }
        }
        results
    }

    /// Direct search pass-through that bypasses message routing: posts the
    /// raw query to the configured search service's `/search` endpoint with
    /// the longer search timeout.
    pub async fn execute_search(&self, query: &Value) -> DispatchResult<Value> {
        let addr = self
            .registry
            .resolve(&self.search_service)
            .ok_or_else(|| DispatchError::UnknownReceiver {
                receiver: self.search_service.clone(),
            })?;
        let url = addr.endpoint(SEARCH_PATH);
        self.post_json(&self.search_service, &url, query, Some(self.search_timeout))
            .await
    }

    /// Probes `/health` on every registered service concurrently. Purely
    /// observational; results are ordered by service name.
    pub async fn probe_services(&self) -> Vec<(String, bool)> {
        let targets: Vec<(String, String)> = self
            .registry
            .names()
            .into_iter()
            .filter_map(|name| {
                let url = self.registry.resolve(&name)?.endpoint(HEALTH_PATH);
                Some((name, url))
            })
            .collect();
        let probes = targets.iter().map(|(_, url)| {
            let client = self.client.clone();
            let url = url.clone();
            async move {
                match client.get(&url).send().await {
                    Ok(response) => response.status().is_success(),
                    Err(_) => false,
                }
            }
        });
        let statuses = join_all(probes).await;
        targets
            .into_iter()
            .zip(statuses)
            .map(|((name, _), up)| (name, up))
            .collect()
    }

    /// One outbound POST carrying `payload` as JSON, expecting a 2xx JSON
    /// answer. A 2xx body that is not valid JSON counts as a forwarding
    /// failure too.
    async fn post_json<T: Serialize>(
        &self,
        service: &str,
        url: &str,
        payload: &T,
        timeout: Option<Duration>,
    ) -> DispatchResult<Value> {
        let mut request = self.client.post(url).json(payload);
        if let Some(timeout) = timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| self.forwarding_failure(service, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(self.forwarding_failure(service, format!("receiver returned {}", status)));
        }
        let body: Bytes = response
            .bytes()
            .await
            .map_err(|e| self.forwarding_failure(service, e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| {
            self.forwarding_failure(service, format!("response body was not valid JSON: {}", e))
        })
    }

    fn forwarding_failure(&self, service: &str, reason: String) -> DispatchError {
        log::error!("Failed to forward to {}: {}", service, reason);
        DispatchError::ForwardingFailed {
            receiver: service.to_string(),
            reason,
        }
    }
}
