use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    /// The backend cannot be reached. Callers degrade to live verification.
    #[error("cache backend unavailable: {0}")]
    Unavailable(String),

    /// A shard lock was poisoned by a panicking writer.
    #[error("cache lock poisoned")]
    Poisoned,
}
