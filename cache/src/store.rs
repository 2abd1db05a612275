//! Trust storage trait.
//!
//! Every cache backend (in-memory, or a future remote store) implements this
//! trait; the orchestrator depends only on it. All time-dependent operations
//! take `now` explicitly so expiry is deterministic under test.

use crate::{CacheError, TrustEntry};
use veriport_types::{CarrierId, CheckpointType, IdentityHash, Timestamp};

pub trait TrustStore: Send + Sync {
    /// Look up an identity. Expiry is checked eagerly: an expired entry is
    /// never returned, even if still physically present.
    fn get(&self, identity: &IdentityHash, now: Timestamp)
        -> Result<Option<TrustEntry>, CacheError>;

    /// Store the entry produced by a live verification, replacing any
    /// previous entry for that identity.
    fn insert(&self, entry: TrustEntry) -> Result<(), CacheError>;

    /// The cache-hit path as one atomic step: if the identity is present and
    /// unexpired, append `checkpoint`/`carrier`, increment the verification
    /// count, and return the updated entry. Returns `None` on absence or
    /// expiry. Never touches `expires_at`.
    fn record_checkpoint(
        &self,
        identity: &IdentityHash,
        checkpoint: CheckpointType,
        carrier: CarrierId,
        now: Timestamp,
    ) -> Result<Option<TrustEntry>, CacheError>;

    /// Manual invalidation (e.g. revocation). Returns whether an entry was
    /// present.
    fn remove(&self, identity: &IdentityHash) -> Result<bool, CacheError>;

    /// Physically evict expired entries, returning how many were dropped.
    /// Correctness never depends on this being called.
    fn purge_expired(&self, now: Timestamp) -> Result<usize, CacheError>;

    /// Number of physically present entries (expired ones included until
    /// purged).
    fn len(&self) -> Result<usize, CacheError>;
}
