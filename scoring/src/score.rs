//! The weighted-sum scorer and its level thresholds.

use veriport_types::{CountBucket, RecencyBucket, RiskBucket, TrustIndicators, TrustLevel};

/// Upper bound of the trust score. The three dimension maxima (40 + 30 + 30)
/// sum exactly to it.
pub const MAX_SCORE: u8 = 100;

/// Verification-count contribution, 0–40.
fn count_weight(bucket: CountBucket) -> u8 {
    match bucket {
        CountBucket::None => 0,
        CountBucket::VeryLow => 10,
        CountBucket::Low => 20,
        CountBucket::Medium => 30,
        CountBucket::High => 35,
        CountBucket::VeryHigh => 40,
    }
}

/// Last-verified recency contribution, 0–30.
fn recency_weight(bucket: RecencyBucket) -> u8 {
    match bucket {
        RecencyBucket::Never => 0,
        RecencyBucket::Old => 10,
        RecencyBucket::Moderate => 20,
        RecencyBucket::Recent => 25,
        RecencyBucket::VeryRecent => 30,
    }
}

/// Risk contribution, 0–30. `Unknown` sits at the midpoint so identities from
/// registries without an established risk model are not penalized down to the
/// floor.
fn risk_weight(bucket: RiskBucket) -> u8 {
    match bucket {
        RiskBucket::VeryLow => 30,
        RiskBucket::Low => 25,
        RiskBucket::Medium => 15,
        RiskBucket::High => 5,
        RiskBucket::VeryHigh => 0,
        RiskBucket::Unknown => 15,
    }
}

/// Map a score to its categorical level.
pub fn level_for_score(score: u8) -> TrustLevel {
    match score {
        85.. => TrustLevel::VeryHigh,
        70..=84 => TrustLevel::High,
        50..=69 => TrustLevel::Medium,
        30..=49 => TrustLevel::Low,
        _ => TrustLevel::VeryLow,
    }
}

/// Score a set of bucketed indicators.
///
/// Deterministic weighted sum of the three dimensions; the level is derived
/// from the score through [`level_for_score`].
pub fn score(indicators: &TrustIndicators) -> (u8, TrustLevel) {
    let total = count_weight(indicators.verification_count)
        + recency_weight(indicators.last_verified)
        + risk_weight(indicators.risk_level);
    (total, level_for_score(total))
}
