//! # Addresses
//!
//! An address is 24 bytes:
//!
//! ```text
//! network(1) | RIPEMD-160(SHA3-256(public_key))(20) | checksum(3)
//! ```
//!
//! where the checksum is the first three bytes of SHA3-256 over the first 21
//! bytes. Users see it as 39 base32 characters (RFC 4648 alphabet, no
//! padding), optionally grouped with dashes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{
    ADDRESS_CHECKSUM_LENGTH, ADDRESS_DECODED_LENGTH, ADDRESS_ENCODED_LENGTH, ADDRESS_RIPEMD_LENGTH,
};
use crate::crypto::hash::{ripemd160, sha3_256};
use crate::crypto::keys::PublicKey;
use crate::error::{Result, SdkError};
use crate::model::network::NetworkType;

const BASE32_ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// A checksummed account address.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Address {
    bytes: [u8; ADDRESS_DECODED_LENGTH],
    network_type: NetworkType,
}

impl Address {
    /// Derive the address of `public_key` on `network_type`.
    pub fn from_public_key(public_key: &PublicKey, network_type: NetworkType) -> Self {
        let account_hash = ripemd160(&sha3_256(public_key.as_bytes()));

        let mut bytes = [0u8; ADDRESS_DECODED_LENGTH];
        bytes[0] = network_type.value();
        bytes[1..=ADDRESS_RIPEMD_LENGTH].copy_from_slice(&account_hash);
        let checksum = checksum(&bytes);
        bytes[ADDRESS_DECODED_LENGTH - ADDRESS_CHECKSUM_LENGTH..].copy_from_slice(&checksum);
        Self {
            bytes,
            network_type,
        }
    }

    /// Parse the base32 form, with or without dashes, in either case.
    pub fn from_raw_address(raw: &str) -> Result<Self> {
        let plain: String = raw
            .chars()
            .filter(|c| *c != '-')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        if plain.len() != ADDRESS_ENCODED_LENGTH {
            return Err(SdkError::invalid(format!(
                "address {raw} must be {ADDRESS_ENCODED_LENGTH} characters long"
            )));
        }

        // 24 bytes need 38.4 base32 characters; the ledger renders 25 bytes
        // (one zero byte appended) and drops the last character.
        let decoded = base32_decode(&format!("{plain}A"))
            .ok_or_else(|| SdkError::invalid(format!("address {raw} is not valid base32")))?;
        let mut bytes = [0u8; ADDRESS_DECODED_LENGTH];
        bytes.copy_from_slice(&decoded[..ADDRESS_DECODED_LENGTH]);
        Self::from_bytes(bytes)
    }

    /// Parse the 48-character hex form used inside payloads and DTOs.
    pub fn from_encoded(encoded: &str) -> Result<Self> {
        let bytes: [u8; ADDRESS_DECODED_LENGTH] = hex::decode(encoded.trim())
            .ok()
            .and_then(|b| b.try_into().ok())
            .ok_or_else(|| {
                SdkError::invalid(format!("encoded address {encoded} must be 48 hex characters"))
            })?;
        Self::from_bytes(bytes)
    }

    /// Validate raw address bytes: known network byte and matching checksum.
    pub fn from_bytes(bytes: [u8; ADDRESS_DECODED_LENGTH]) -> Result<Self> {
        let network_type = NetworkType::from_value(bytes[0]).ok_or_else(|| {
            SdkError::invalid(format!(
                "address {} has unknown network byte 0x{:02X}",
                hex::encode_upper(bytes),
                bytes[0]
            ))
        })?;
        if bytes[ADDRESS_DECODED_LENGTH - ADDRESS_CHECKSUM_LENGTH..] != checksum(&bytes) {
            return Err(SdkError::invalid(format!(
                "address {} has an invalid checksum",
                hex::encode_upper(bytes)
            )));
        }
        Ok(Self {
            bytes,
            network_type,
        })
    }

    pub fn as_bytes(&self) -> &[u8; ADDRESS_DECODED_LENGTH] {
        &self.bytes
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// The 39-character base32 form.
    pub fn plain(&self) -> String {
        let mut padded = [0u8; ADDRESS_DECODED_LENGTH + 1];
        padded[..ADDRESS_DECODED_LENGTH].copy_from_slice(&self.bytes);
        let mut encoded = base32_encode(&padded);
        encoded.truncate(ADDRESS_ENCODED_LENGTH);
        encoded
    }

    /// The base32 form in dash-separated groups of six.
    pub fn pretty(&self) -> String {
        self.plain()
            .as_bytes()
            .chunks(6)
            .map(|chunk| String::from_utf8_lossy(chunk).into_owned())
            .collect::<Vec<_>>()
            .join("-")
    }

    /// Uppercase hex of the 24 raw bytes.
    pub fn encoded(&self) -> String {
        hex::encode_upper(self.bytes)
    }
}

fn checksum(bytes: &[u8; ADDRESS_DECODED_LENGTH]) -> [u8; ADDRESS_CHECKSUM_LENGTH] {
    let hash = sha3_256(&bytes[..=ADDRESS_RIPEMD_LENGTH]);
    let mut out = [0u8; ADDRESS_CHECKSUM_LENGTH];
    out.copy_from_slice(&hash[..ADDRESS_CHECKSUM_LENGTH]);
    out
}

/// RFC 4648 base32 over whole 5-byte groups.
fn base32_encode(data: &[u8]) -> String {
    let mut out = String::with_capacity(data.len() / 5 * 8);
    for chunk in data.chunks(5) {
        let mut group = [0u8; 5];
        group[..chunk.len()].copy_from_slice(chunk);
        let bits = group.iter().fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
        for i in (0..8).rev() {
            out.push(BASE32_ALPHABET[((bits >> (i * 5)) & 0x1F) as usize] as char);
        }
    }
    out
}

/// Inverse of [`base32_encode`]. Input length must be a multiple of 8.
fn base32_decode(input: &str) -> Option<Vec<u8>> {
    if input.len() % 8 != 0 {
        return None;
    }
    let mut out = Vec::with_capacity(input.len() / 8 * 5);
    for chunk in input.as_bytes().chunks(8) {
        let mut bits = 0u64;
        for c in chunk {
            let value = BASE32_ALPHABET.iter().position(|a| a == c)?;
            bits = (bits << 5) | value as u64;
        }
        for i in (0..5).rev() {
            out.push((bits >> (i * 8)) as u8);
        }
    }
    Some(out)
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.plain())
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.plain()
    }
}

impl TryFrom<String> for Address {
    type Error = SdkError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_raw_address(&value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
