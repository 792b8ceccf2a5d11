//! Participant identity: a 20-byte address written as `0x`-prefixed hex.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::TypesError;

/// Identity of an election participant.
///
/// The address is attested by an external identity collaborator; the ledger
/// only compares addresses for equality and uses them as map keys.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VoterAddress([u8; 20]);

impl VoterAddress {
    /// Byte length of an address.
    pub const LEN: usize = 20;

    pub fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a `0x`-prefixed (or bare) 40-digit hex string.
    pub fn parse(s: &str) -> Result<Self, TypesError> {
        let digits = s
            .strip_prefix("0x")
            .or_else(|| s.strip_prefix("0X"))
            .unwrap_or(s);
        if digits.len() != Self::LEN * 2 {
            return Err(TypesError::InvalidAddress(s.to_string()));
        }
        let mut bytes = [0u8; 20];
        hex::decode_to_slice(digits, &mut bytes)
            .map_err(|_| TypesError::InvalidAddress(s.to_string()))?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VoterAddress(0x{})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for VoterAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl FromStr for VoterAddress {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<[u8; 20]> for VoterAddress {
    fn from(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }
}

// Serialized as the hex string so addresses read naturally in TOML and JSON.
impl Serialize for VoterAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for VoterAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_prefixed_and_bare_hex() {
        let prefixed: VoterAddress = "0x00000000000000000000000000000000000000c0"
            .parse()
            .unwrap();
        let bare = VoterAddress::parse("00000000000000000000000000000000000000C0").unwrap();
        assert_eq!(prefixed, bare);
        assert_eq!(prefixed.as_bytes()[19], 0xc0);
    }

    #[test]
    fn display_is_lowercase_prefixed() {
        let mut bytes = [0u8; 20];
        bytes[0] = 0xAB;
        let addr = VoterAddress::new(bytes);
        assert_eq!(
            addr.to_string(),
            "0xab00000000000000000000000000000000000000"
        );
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(matches!(
            VoterAddress::parse("0x1234"),
            Err(TypesError::InvalidAddress(_))
        ));
    }

    #[test]
    fn rejects_non_hex() {
        assert!(VoterAddress::parse("0xzz000000000000000000000000000000000000c0").is_err());
    }
}
