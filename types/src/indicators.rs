//! Bucketed trust indicators — the only signal shape a registry may emit.
//!
//! Buckets are a deliberate privacy control (k-anonymity-style
//! generalization). Raw verification counts and raw timestamps never cross
//! into this subsystem; narrowing a bucket to a finer granularity is a
//! privacy regression, not a refactor.

use serde::{Deserialize, Serialize};

/// How many prior verifications the registry has on file, bucketed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountBucket {
    None,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

/// How recently the identity was last verified, bucketed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecencyBucket {
    Never,
    Old,
    Moderate,
    Recent,
    VeryRecent,
}

/// The registry's risk assessment, bucketed.
///
/// `Unknown` is a first-class answer: registries without an established risk
/// model report it instead of guessing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskBucket {
    Unknown,
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

/// The full bucketed signal set returned by an existence check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrustIndicators {
    pub verification_count: CountBucket,
    pub last_verified: RecencyBucket,
    pub risk_level: RiskBucket,
}

impl TrustIndicators {
    /// The signal set of a brand-new identity: no history, no risk model.
    pub fn unestablished() -> Self {
        Self {
            verification_count: CountBucket::None,
            last_verified: RecencyBucket::Never,
            risk_level: RiskBucket::Unknown,
        }
    }
}
