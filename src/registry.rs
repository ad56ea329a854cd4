//! Static mapping from logical service names to network addresses.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Network address of one registered service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceAddr {
    pub host: String,
    pub port: u16,
}

impl ServiceAddr {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        ServiceAddr {
            host: host.into(),
            port,
        }
    }

    /// Builds the full endpoint URL for a path on this service.
    pub fn endpoint(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("http://{}:{}{}", self.host, self.port, path)
        } else {
            format!("http://{}:{}/{}", self.host, self.port, path)
        }
    }
}

/// Read-only registry resolving logical service names to addresses.
///
/// The contents are fixed configuration supplied at startup and injected
/// into the router; nothing mutates the registry at runtime.
#[derive(Debug, Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, ServiceAddr>,
}

impl ServiceRegistry {
    pub fn new(services: HashMap<String, ServiceAddr>) -> Self {
        ServiceRegistry { services }
    }

    /// Pure lookup. Absence is not an error here; the dispatcher turns it
    /// into a reportable one.
    pub fn resolve(&self, name: &str) -> Option<&ServiceAddr> {
        self.services.get(name)
    }

    /// Registered service names, sorted for stable listings.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.services.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn services(&self) -> &HashMap<String, ServiceAddr> {
        &self.services
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
