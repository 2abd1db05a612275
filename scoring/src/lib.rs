//! Deterministic trust scoring.
//!
//! Maps bucketed trust indicators to a 0–100 score and a categorical level.
//! The scorer is a pure function: identical input always yields identical
//! output, so every score a carrier was billed against can be re-derived
//! during an audit.

pub mod score;

pub use score::{level_for_score, score, MAX_SCORE};
