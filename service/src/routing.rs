//! Carrier-to-registry routing table.
//!
//! The mapping from a carrier to the registry holding its travelers' records
//! is an external input (configuration today, a lookup service tomorrow). The
//! orchestrator consumes the table; it never edits it.

use std::collections::HashMap;
use veriport_types::{CarrierId, RegistryId};

#[derive(Clone, Debug, Default)]
pub struct CarrierRouting {
    routes: HashMap<CarrierId, RegistryId>,
    default_registry: Option<RegistryId>,
}

impl CarrierRouting {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (CarrierId, RegistryId)>) -> Self {
        Self {
            routes: entries.into_iter().collect(),
            default_registry: None,
        }
    }

    /// Registry consulted for carriers without an explicit route.
    pub fn with_default(mut self, registry: RegistryId) -> Self {
        self.default_registry = Some(registry);
        self
    }

    pub fn add_route(&mut self, carrier: CarrierId, registry: RegistryId) {
        self.routes.insert(carrier, registry);
    }

    /// Resolve the registry for a carrier, falling back to the default route
    /// when one is configured.
    pub fn route(&self, carrier: &CarrierId) -> Option<&RegistryId> {
        self.routes.get(carrier).or(self.default_registry.as_ref())
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty() && self.default_registry.is_none()
    }
}
