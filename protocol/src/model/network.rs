//! Network identifiers and the generation hash that pins a ledger instance.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::GENERATION_HASH_LENGTH;
use crate::error::{Result, SdkError};

// ---------------------------------------------------------------------------
// NetworkType
// ---------------------------------------------------------------------------

/// The ledger networks an address or transaction can belong to.
///
/// The discriminant is the byte written into transactions and into the
/// first byte of every address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum NetworkType {
    /// Public main network.
    MainNet = 0x68,
    /// Public test network.
    TestNet = 0x98,
    /// Private network.
    Mijin = 0x60,
    /// Private test network.
    MijinTest = 0x90,
}

impl NetworkType {
    pub const ALL: [NetworkType; 4] = [
        NetworkType::MainNet,
        NetworkType::TestNet,
        NetworkType::Mijin,
        NetworkType::MijinTest,
    ];

    /// The wire byte.
    pub fn value(self) -> u8 {
        self as u8
    }

    /// Look a network up by its wire byte.
    pub fn from_value(value: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|n| n.value() == value)
    }

    /// First character of every base32 address on this network.
    pub fn address_prefix(self) -> char {
        match self {
            Self::MainNet => 'N',
            Self::TestNet => 'T',
            Self::Mijin => 'M',
            Self::MijinTest => 'S',
        }
    }
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::MainNet => "MAIN_NET",
            Self::TestNet => "TEST_NET",
            Self::Mijin => "MIJIN",
            Self::MijinTest => "MIJIN_TEST",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// GenerationHash
// ---------------------------------------------------------------------------

/// The 32-byte seed identifying a ledger instance. Mixed into every signature
/// and hash so a payload signed for one network cannot be replayed on another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenerationHash([u8; GENERATION_HASH_LENGTH]);

impl GenerationHash {
    pub const fn from_bytes(bytes: [u8; GENERATION_HASH_LENGTH]) -> Self {
        Self(bytes)
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        hex::decode(input.trim())
            .ok()
            .and_then(|bytes| bytes.try_into().ok())
            .map(Self)
            .ok_or_else(|| {
                SdkError::invalid(format!("generation hash must be 64 hex characters: {input}"))
            })
    }

    pub fn as_bytes(&self) -> &[u8; GENERATION_HASH_LENGTH] {
        &self.0
    }
}

impl fmt::Display for GenerationHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode_upper(self.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn network_bytes_roundtrip() {
        for network in NetworkType::ALL {
            assert_eq!(NetworkType::from_value(network.value()), Some(network));
        }
        assert_eq!(NetworkType::from_value(0x00), None);
    }

    #[test]
    fn wire_values() {
        assert_eq!(NetworkType::MainNet.value(), 104);
        assert_eq!(NetworkType::TestNet.value(), 152);
        assert_eq!(NetworkType::MijinTest.value(), 144);
    }

    #[test]
    fn serde_uses_screaming_names() {
        let json = serde_json::to_string(&NetworkType::MijinTest).unwrap();
        assert_eq!(json, "\"MIJIN_TEST\"");
        assert_eq!(NetworkType::MijinTest.to_string(), "MIJIN_TEST");
    }

    #[test]
    fn generation_hash_parsing() {
        let hex_str = "A94B1BE81F1D4C95D6D252AD7BA3FFFB1674991FD880B7A57DC3180AF8D69C32";
        let gh = GenerationHash::from_hex(hex_str).unwrap();
        assert_eq!(gh.to_string(), hex_str);
        assert!(GenerationHash::from_hex("A94B").is_err());
    }
}
