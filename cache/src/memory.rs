//! Sharded in-memory trust cache.

use crate::{CacheError, TrustEntry, TrustStore};
use std::collections::HashMap;
use std::sync::RwLock;
use veriport_types::{CarrierId, CheckpointType, IdentityHash, Timestamp};

const DEFAULT_SHARDS: usize = 64;

/// In-memory `TrustStore` backed by sharded `RwLock<HashMap>`s.
///
/// Reads take a shard read lock, so concurrent lookups never block each
/// other. Mutations take the shard write lock, which makes same-identity
/// updates linearizable while identities on other shards proceed untouched.
pub struct MemoryTrustCache {
    shards: Vec<RwLock<HashMap<IdentityHash, TrustEntry>>>,
}

impl MemoryTrustCache {
    pub fn new() -> Self {
        Self::with_shards(DEFAULT_SHARDS)
    }

    pub fn with_shards(shards: usize) -> Self {
        let shards = shards.max(1);
        Self {
            shards: (0..shards).map(|_| RwLock::new(HashMap::new())).collect(),
        }
    }

    /// Identity hashes are uniformly distributed, so their leading bytes
    /// serve directly as the shard index.
    fn shard(&self, identity: &IdentityHash) -> &RwLock<HashMap<IdentityHash, TrustEntry>> {
        let mut prefix = [0u8; 8];
        prefix.copy_from_slice(&identity.as_bytes()[..8]);
        let index = u64::from_be_bytes(prefix) as usize % self.shards.len();
        &self.shards[index]
    }
}

impl Default for MemoryTrustCache {
    fn default() -> Self {
        Self::new()
    }
}

impl TrustStore for MemoryTrustCache {
    fn get(
        &self,
        identity: &IdentityHash,
        now: Timestamp,
    ) -> Result<Option<TrustEntry>, CacheError> {
        let shard = self.shard(identity).read().map_err(|_| CacheError::Poisoned)?;
        Ok(shard
            .get(identity)
            .filter(|entry| !entry.is_expired(now))
            .cloned())
    }

    fn insert(&self, entry: TrustEntry) -> Result<(), CacheError> {
        let mut shard = self
            .shard(&entry.identity_hash)
            .write()
            .map_err(|_| CacheError::Poisoned)?;
        shard.insert(entry.identity_hash, entry);
        Ok(())
    }

    fn record_checkpoint(
        &self,
        identity: &IdentityHash,
        checkpoint: CheckpointType,
        carrier: CarrierId,
        now: Timestamp,
    ) -> Result<Option<TrustEntry>, CacheError> {
        let mut shard = self.shard(identity).write().map_err(|_| CacheError::Poisoned)?;
        match shard.get_mut(identity) {
            Some(entry) if !entry.is_expired(now) => {
                entry.record(checkpoint, carrier);
                Ok(Some(entry.clone()))
            }
            Some(_) => {
                // Expired: evict while we hold the write lock anyway.
                shard.remove(identity);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn remove(&self, identity: &IdentityHash) -> Result<bool, CacheError> {
        let mut shard = self.shard(identity).write().map_err(|_| CacheError::Poisoned)?;
        Ok(shard.remove(identity).is_some())
    }

    fn purge_expired(&self, now: Timestamp) -> Result<usize, CacheError> {
        let mut dropped = 0;
        for shard in &self.shards {
            let mut shard = shard.write().map_err(|_| CacheError::Poisoned)?;
            let before = shard.len();
            shard.retain(|_, entry| !entry.is_expired(now));
            dropped += before - shard.len();
        }
        Ok(dropped)
    }

    fn len(&self) -> Result<usize, CacheError> {
        let mut total = 0;
        for shard in &self.shards {
            total += shard.read().map_err(|_| CacheError::Poisoned)?.len();
        }
        Ok(total)
    }
}
