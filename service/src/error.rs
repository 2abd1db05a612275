use thiserror::Error;
use veriport_billing::BillingError;
use veriport_cache::CacheError;

/// Failures surfaced by the administrative service operations.
///
/// `verify_traveler` never returns these: verification failures travel inside
/// the outcome envelope so a caller always gets a response.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("trust cache error: {0}")]
    Cache(#[from] CacheError),

    #[error("billing ledger error: {0}")]
    Billing(#[from] BillingError),
}
