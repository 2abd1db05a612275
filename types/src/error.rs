//! Parse errors for the wire forms of core types.

use thiserror::Error;

/// Failure to parse an identifier or hash from its string form.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("invalid length: expected {expected} characters, got {got}")]
    Length { expected: usize, got: usize },

    #[error("invalid hex: {0}")]
    Hex(String),
}
