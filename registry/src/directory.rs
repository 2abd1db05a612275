//! Registry directory: registry identifier → remote endpoint.
//!
//! Built from configuration at service start and handed to the client;
//! explicitly constructed, never ambient module state.

use crate::RegistryError;
use std::collections::HashMap;
use veriport_types::RegistryId;

/// The set of federated registries this deployment may talk to.
#[derive(Clone, Debug, Default)]
pub struct RegistryDirectory {
    endpoints: HashMap<RegistryId, String>,
}

impl RegistryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (RegistryId, String)>) -> Self {
        let mut directory = Self::new();
        for (id, url) in entries {
            directory.register(id, url);
        }
        directory
    }

    /// Register (or replace) a registry endpoint.
    pub fn register(&mut self, id: RegistryId, base_url: impl Into<String>) {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        self.endpoints.insert(id, base_url);
    }

    /// Resolve a registry identifier to its base URL.
    pub fn resolve(&self, id: &RegistryId) -> Result<&str, RegistryError> {
        self.endpoints
            .get(id)
            .map(String::as_str)
            .ok_or_else(|| RegistryError::UnknownRegistry(id.to_string()))
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }
}
