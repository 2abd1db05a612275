//! The trust cache: identity hash → cached trust entry, 24-hour TTL.
//!
//! An entry is created only by a live verification and its expiry is fixed at
//! that moment; reuse appends to the entry but never extends the window, so
//! stale reputation is bounded. Expiry is checked eagerly on every read,
//! physical eviction may lag.
//!
//! Concurrency contract: concurrent reads never block each other, mutations
//! to the same identity are linearizable, and distinct identities are fully
//! independent.

pub mod entry;
pub mod error;
pub mod memory;
pub mod store;

pub use entry::TrustEntry;
pub use error::CacheError;
pub use memory::MemoryTrustCache;
pub use store::TrustStore;
