//! Operating parameters of the verification core.

/// Validity window of a trust cache entry, anchored to the live verification
/// that created it. Reuse never extends it.
pub const TRUST_TTL_SECS: u64 = 24 * 3600;

/// Soft end-to-end latency target for a live (cache-miss) verification, in
/// milliseconds. Exceeding it logs a warning; it is never a hard timeout.
pub const SOFT_LATENCY_BUDGET_MS: u64 = 1_000;
