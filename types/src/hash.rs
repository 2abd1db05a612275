//! The identity hash — the privacy-preserving primary key of the system.

use crate::error::ParseError;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A 32-byte non-reversible identity digest.
///
/// Stands in for a biometric or personal identity everywhere in this
/// subsystem; the pre-image never enters the process. On the wire it travels
/// as a 64-character lowercase hex string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct IdentityHash([u8; 32]);

impl IdentityHash {
    /// Hex characters in the canonical string form.
    pub const HEX_LEN: usize = 64;

    pub fn new(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

/// Debug form is truncated so logs never carry the full digest.
impl fmt::Debug for IdentityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "IdentityHash({}…)", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for IdentityHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

impl FromStr for IdentityHash {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != Self::HEX_LEN {
            return Err(ParseError::Length {
                expected: Self::HEX_LEN,
                got: s.len(),
            });
        }
        let raw = hex::decode(s).map_err(|e| ParseError::Hex(e.to_string()))?;
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&raw);
        Ok(Self(bytes))
    }
}

impl Serialize for IdentityHash {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for IdentityHash {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_odd_characters() {
        let s = "zz".repeat(32);
        assert!(matches!(s.parse::<IdentityHash>(), Err(ParseError::Hex(_))));
    }

    #[test]
    fn rejects_short_input() {
        let err = "abcd".parse::<IdentityHash>().unwrap_err();
        assert!(matches!(err, ParseError::Length { expected: 64, got: 4 }));
    }

    #[test]
    fn debug_is_truncated() {
        let hash = IdentityHash::new([0xab; 32]);
        let dbg = format!("{hash:?}");
        assert!(dbg.starts_with("IdentityHash(abababab"));
        assert!(!dbg.contains(&"ab".repeat(32)));
    }
}
