//! Nullable trust store — a cache that is always offline.

use veriport_cache::{CacheError, TrustEntry, TrustStore};
use veriport_types::{CarrierId, CheckpointType, IdentityHash, Timestamp};

/// A trust store whose every operation reports the backend as unavailable.
///
/// Drives the degraded path in tests: callers must fall back to live
/// verification and keep serving.
pub struct FailingTrustStore;

impl FailingTrustStore {
    fn offline<T>() -> Result<T, CacheError> {
        Err(CacheError::Unavailable("trust store offline".to_string()))
    }
}

impl TrustStore for FailingTrustStore {
    fn get(
        &self,
        _identity: &IdentityHash,
        _now: Timestamp,
    ) -> Result<Option<TrustEntry>, CacheError> {
        Self::offline()
    }

    fn insert(&self, _entry: TrustEntry) -> Result<(), CacheError> {
        Self::offline()
    }

    fn record_checkpoint(
        &self,
        _identity: &IdentityHash,
        _checkpoint: CheckpointType,
        _carrier: CarrierId,
        _now: Timestamp,
    ) -> Result<Option<TrustEntry>, CacheError> {
        Self::offline()
    }

    fn remove(&self, _identity: &IdentityHash) -> Result<bool, CacheError> {
        Self::offline()
    }

    fn purge_expired(&self, _now: Timestamp) -> Result<usize, CacheError> {
        Self::offline()
    }

    fn len(&self) -> Result<usize, CacheError> {
        Self::offline()
    }
}
