//! Node assembly.
//!
//! A [`Node`] owns every subsystem of a running verification endpoint: the
//! registry client, the trust cache, the billing engine, the orchestrating
//! service and the RPC server, plus the background sweep that evicts expired
//! trust entries. Construction wires them from a [`NodeConfig`]; `start`
//! runs them until shutdown.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use veriport_billing::{BillingEngine, LogSink};
use veriport_cache::{MemoryTrustCache, TrustStore};
use veriport_registry::{RegistryClient, RegistryDirectory};
use veriport_rpc::{RpcServer, RpcState, VerificationMetrics};
use veriport_service::{CarrierRouting, VerificationService};
use veriport_types::{CarrierId, RegistryId, Timestamp};

use crate::{NodeConfig, NodeError, ShutdownController};

const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(5);

/// A fully wired verification node.
pub struct Node {
    config: NodeConfig,
    service: Arc<VerificationService>,
    metrics: Arc<VerificationMetrics>,
    shutdown: ShutdownController,
    task_handles: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// Wire every subsystem from the configuration.
    ///
    /// The routing table and the default registry are checked against the
    /// registry directory here, so a misconfigured node refuses to start
    /// instead of failing one request at a time.
    pub fn new(config: NodeConfig) -> Result<Self, NodeError> {
        if config.registries.is_empty() {
            return Err(NodeError::Config("no registries configured".to_string()));
        }

        let mut directory = RegistryDirectory::new();
        for (id, base_url) in &config.registries {
            let registry_id = RegistryId::new(id.clone());
            if !registry_id.is_valid() {
                return Err(NodeError::Config(format!("invalid registry id: {id}")));
            }
            if base_url.trim().is_empty() {
                return Err(NodeError::Config(format!(
                    "registry {id} has an empty base URL"
                )));
            }
            directory.register(registry_id, base_url.clone());
        }

        let mut routing = CarrierRouting::new();
        for (carrier, registry) in &config.routing {
            let carrier_id = CarrierId::new(carrier.clone());
            if !carrier_id.is_valid() {
                return Err(NodeError::Config(format!(
                    "invalid carrier id in routing table: {carrier}"
                )));
            }
            if !config.registries.contains_key(registry) {
                return Err(NodeError::Config(format!(
                    "carrier {carrier} routes to unknown registry {registry}"
                )));
            }
            routing.add_route(carrier_id, RegistryId::new(registry.clone()));
        }
        let routing = match &config.default_registry {
            Some(registry) => {
                if !config.registries.contains_key(registry) {
                    return Err(NodeError::Config(format!(
                        "default registry {registry} is not in the directory"
                    )));
                }
                routing.with_default(RegistryId::new(registry.clone()))
            }
            None => routing,
        };

        let registry = Arc::new(
            RegistryClient::new(directory)
                .with_timeout(Duration::from_secs(config.registry_timeout_secs)),
        );
        let cache: Arc<dyn TrustStore> =
            Arc::new(MemoryTrustCache::with_shards(config.cache_shards));
        let billing = Arc::new(BillingEngine::new(Arc::new(LogSink)));
        let service = Arc::new(VerificationService::new(registry, cache, billing, routing));
        let metrics = Arc::new(VerificationMetrics::new());

        Ok(Self {
            config,
            service,
            metrics,
            shutdown: ShutdownController::new(),
            task_handles: Vec::new(),
        })
    }

    /// Start the RPC server and the expiry sweep, then wait for the shutdown
    /// signal.
    pub async fn start(&mut self) {
        tracing::info!(
            listen = %self.config.listen_addr,
            registries = self.config.registries.len(),
            routes = self.config.routing.len(),
            cache_shards = self.config.cache_shards,
            "veriport node starting"
        );

        // ── RPC server ─────────────────────────────────────────────────
        let rpc_state = Arc::new(RpcState::new(
            Arc::clone(&self.service),
            Arc::clone(&self.metrics),
        ));
        let rpc_server = RpcServer::new(self.config.listen_addr.clone(), rpc_state);
        let mut shutdown_rx_rpc = self.shutdown.subscribe();

        let rpc_handle = tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx_rpc.recv().await;
            };
            match rpc_server.start(shutdown).await {
                Ok(()) => tracing::info!("rpc server exited"),
                Err(e) => tracing::error!("rpc server error: {e}"),
            }
        });
        self.task_handles.push(rpc_handle);

        // ── Trust cache expiry sweep ───────────────────────────────────
        let sweep_service = Arc::clone(&self.service);
        let sweep_metrics = Arc::clone(&self.metrics);
        let sweep_interval = self.config.sweep_interval_secs.max(1);
        let mut shutdown_rx_sweep = self.shutdown.subscribe();

        let sweep_handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(sweep_interval));
            loop {
                tokio::select! {
                    biased;
                    _ = shutdown_rx_sweep.recv() => {
                        tracing::debug!("expiry sweep shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        match sweep_service.purge_expired(Timestamp::now()) {
                            Ok(purged) if purged > 0 => {
                                tracing::info!(purged, "expired trust entries purged");
                            }
                            Ok(_) => {}
                            Err(e) => tracing::warn!("expiry sweep failed: {e}"),
                        }
                        if let Ok(count) = sweep_service.cached_identities() {
                            sweep_metrics.cached_identities.set(count as i64);
                        }
                    }
                }
            }
        });
        self.task_handles.push(sweep_handle);

        tracing::info!("veriport node started, all subsystems running");

        self.shutdown.wait_for_signal().await;
    }

    /// Stop the node gracefully: signal every background task, then wait for
    /// them to drain with a timeout.
    pub async fn stop(&mut self) {
        tracing::info!("veriport node stopping");

        self.shutdown.shutdown();

        let handles: Vec<JoinHandle<()>> = self.task_handles.drain(..).collect();
        let wait_all = async {
            for handle in handles {
                let _ = handle.await;
            }
        };
        if tokio::time::timeout(SHUTDOWN_TIMEOUT, wait_all)
            .await
            .is_err()
        {
            tracing::warn!(
                "shutdown timeout after {:?}, some tasks may still be running",
                SHUTDOWN_TIMEOUT
            );
        }

        if let Ok(count) = self.service.cached_identities() {
            self.metrics.cached_identities.set(count as i64);
        }

        tracing::info!("veriport node stopped");
    }
}
