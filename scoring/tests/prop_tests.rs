use proptest::prelude::*;

use veriport_scoring::{level_for_score, score, MAX_SCORE};
use veriport_types::{CountBucket, RecencyBucket, RiskBucket, TrustIndicators, TrustLevel};

static COUNTS: [CountBucket; 6] = [
    CountBucket::None,
    CountBucket::VeryLow,
    CountBucket::Low,
    CountBucket::Medium,
    CountBucket::High,
    CountBucket::VeryHigh,
];

static RECENCIES: [RecencyBucket; 5] = [
    RecencyBucket::Never,
    RecencyBucket::Old,
    RecencyBucket::Moderate,
    RecencyBucket::Recent,
    RecencyBucket::VeryRecent,
];

static RISKS: [RiskBucket; 6] = [
    RiskBucket::Unknown,
    RiskBucket::VeryLow,
    RiskBucket::Low,
    RiskBucket::Medium,
    RiskBucket::High,
    RiskBucket::VeryHigh,
];

fn any_indicators() -> impl Strategy<Value = TrustIndicators> {
    (
        prop::sample::select(&COUNTS[..]),
        prop::sample::select(&RECENCIES[..]),
        prop::sample::select(&RISKS[..]),
    )
        .prop_map(|(verification_count, last_verified, risk_level)| TrustIndicators {
            verification_count,
            last_verified,
            risk_level,
        })
}

proptest! {
    /// Identical input always yields identical output.
    #[test]
    fn score_is_deterministic(indicators in any_indicators()) {
        prop_assert_eq!(score(&indicators), score(&indicators));
    }

    /// The score never exceeds the 0–100 range.
    #[test]
    fn score_is_bounded(indicators in any_indicators()) {
        let (s, _) = score(&indicators);
        prop_assert!(s <= MAX_SCORE);
    }

    /// The returned level always agrees with the threshold mapping.
    #[test]
    fn level_agrees_with_thresholds(indicators in any_indicators()) {
        let (s, level) = score(&indicators);
        prop_assert_eq!(level, level_for_score(s));
        match level {
            TrustLevel::VeryHigh => prop_assert!(s >= 85),
            TrustLevel::High => prop_assert!((70u8..85).contains(&s)),
            TrustLevel::Medium => prop_assert!((50u8..70).contains(&s)),
            TrustLevel::Low => prop_assert!((30u8..50).contains(&s)),
            TrustLevel::VeryLow => prop_assert!(s < 30),
        }
    }

    /// More prior verifications never lower the score (other dimensions fixed).
    #[test]
    fn count_dimension_is_monotone(
        a in 0usize..6,
        b in 0usize..6,
        recency in prop::sample::select(&RECENCIES[..]),
        risk in prop::sample::select(&RISKS[..]),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let scored = |count: CountBucket| {
            score(&TrustIndicators {
                verification_count: count,
                last_verified: recency,
                risk_level: risk,
            })
            .0
        };
        prop_assert!(scored(COUNTS[lo]) <= scored(COUNTS[hi]));
    }

    /// Fresher verification history never lowers the score.
    #[test]
    fn recency_dimension_is_monotone(
        a in 0usize..5,
        b in 0usize..5,
        count in prop::sample::select(&COUNTS[..]),
        risk in prop::sample::select(&RISKS[..]),
    ) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        let scored = |recency: RecencyBucket| {
            score(&TrustIndicators {
                verification_count: count,
                last_verified: recency,
                risk_level: risk,
            })
            .0
        };
        prop_assert!(scored(RECENCIES[lo]) <= scored(RECENCIES[hi]));
    }
}
