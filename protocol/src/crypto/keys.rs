//! # Key Management
//!
//! Ed25519 keypairs, public keys and signatures as the ledger sees them.
//!
//! The ledger uses plain RFC 8032 Ed25519 (SHA-512 inside the signature
//! scheme), so `ed25519-dalek` does all of the real work here. These types
//! only fix the byte widths, the uppercase hex rendering the node API uses,
//! and the error mapping.
//!
//! Key bytes are never logged. `Debug` on [`KeyPair`] prints the public half
//! only.

use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{PRIVATE_KEY_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH};

/// Errors that can occur while parsing key material.
///
/// Private key failures say nothing about the input. Public data (keys and
/// signatures) is echoed back since it is not secret.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("invalid private key: expected 32 bytes of hex")]
    InvalidPrivateKey,

    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

fn decode_fixed<const N: usize>(input: &str) -> Option<[u8; N]> {
    let bytes = hex::decode(input).ok()?;
    bytes.try_into().ok()
}

// ---------------------------------------------------------------------------
// KeyPair
// ---------------------------------------------------------------------------

/// An account keypair wrapping an Ed25519 signing key.
///
/// Like the rest of the crate it does not implement `Serialize`: exporting
/// a private key has to be spelled out with [`KeyPair::private_key_hex`].
///
/// # Examples
///
/// ```
/// use symbol_protocol::crypto::keys::KeyPair;
///
/// let kp = KeyPair::generate();
/// let sig = kp.sign(b"payload");
/// assert!(kp.public_key().verify(b"payload", &sig));
/// ```
pub struct KeyPair {
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a fresh keypair from the OS RNG.
    pub fn generate() -> Self {
        Self {
            signing_key: SigningKey::generate(&mut OsRng),
        }
    }

    /// Build a keypair from the 32-byte private key.
    pub fn from_bytes(private_key: &[u8; PRIVATE_KEY_LENGTH]) -> Self {
        Self {
            signing_key: SigningKey::from_bytes(private_key),
        }
    }

    /// Parse a hex-encoded private key (either case).
    pub fn from_hex(private_key: &str) -> Result<Self, KeyError> {
        let bytes = decode_fixed::<PRIVATE_KEY_LENGTH>(private_key.trim())
            .ok_or(KeyError::InvalidPrivateKey)?;
        Ok(Self::from_bytes(&bytes))
    }

    /// The public half of the keypair.
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.signing_key.verifying_key().to_bytes())
    }

    /// Sign arbitrary bytes. Ed25519 is deterministic, so the same message
    /// always yields the same signature.
    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature(self.signing_key.sign(message).to_bytes())
    }

    /// Uppercase hex of the private key. Handle with care.
    pub fn private_key_hex(&self) -> String {
        hex::encode_upper(self.signing_key.to_bytes())
    }
}

impl Clone for KeyPair {
    fn clone(&self) -> Self {
        Self::from_bytes(&self.signing_key.to_bytes())
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyPair(pub={})", self.public_key())
    }
}

// ---------------------------------------------------------------------------
// PublicKey
// ---------------------------------------------------------------------------

/// A 32-byte Ed25519 public key.
///
/// Any 32 bytes are accepted on construction, matching what the node hands
/// back. Whether the bytes form a valid curve point is only checked when a
/// signature is verified.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PublicKey([u8; PUBLIC_KEY_LENGTH]);

impl PublicKey {
    /// Wrap raw key bytes.
    pub const fn from_bytes(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a 64-character hex string.
    pub fn from_hex(input: &str) -> Result<Self, KeyError> {
        decode_fixed::<PUBLIC_KEY_LENGTH>(input.trim())
            .map(Self)
            .ok_or_else(|| KeyError::InvalidPublicKey(input.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        &self.0
    }

    /// Uppercase hex, the form the node API uses.
    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// Check `signature` over `message`. Returns `false` for keys that are
    /// not valid curve points rather than erroring.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let Ok(verifying_key) = VerifyingKey::from_bytes(&self.0) else {
            return false;
        };
        verifying_key
            .verify(message, &DalekSignature::from_bytes(&signature.0))
            .is_ok()
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PublicKey({})", &self.to_hex()[..16])
    }
}

impl From<PublicKey> for String {
    fn from(key: PublicKey) -> Self {
        key.to_hex()
    }
}

impl TryFrom<String> for PublicKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

// ---------------------------------------------------------------------------
// Signature
// ---------------------------------------------------------------------------

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; SIGNATURE_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Parse a 128-character hex string.
    pub fn from_hex(input: &str) -> Result<Self, KeyError> {
        decode_fixed::<SIGNATURE_LENGTH>(input.trim())
            .map(Self)
            .ok_or_else(|| KeyError::InvalidSignature(input.to_string()))
    }

    pub fn as_bytes(&self) -> &[u8; SIGNATURE_LENGTH] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }

    /// The `R` component, which the ledger mixes into transaction hashes.
    pub fn r_part(&self) -> &[u8] {
        &self.0[..SIGNATURE_LENGTH / 2]
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hex_str = self.to_hex();
        write!(f, "Signature({}...{})", &hex_str[..8], &hex_str[hex_str.len() - 8..])
    }
}

impl From<Signature> for String {
    fn from(signature: Signature) -> Self {
        signature.to_hex()
    }
}

impl TryFrom<String> for Signature {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728";
    const PUBLIC_KEY: &str = "F6503F78FBF99544B906872DDB392F4BE707180D285E7919DBACEF2E9573B1E6";

    #[test]
    fn known_private_key_derives_known_public_key() {
        let kp = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(kp.public_key().to_hex(), PUBLIC_KEY);
    }

    #[test]
    fn private_key_hex_roundtrip_is_uppercase() {
        let kp = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        assert_eq!(kp.private_key_hex(), PRIVATE_KEY.to_uppercase());
    }

    #[test]
    fn malformed_private_keys_are_rejected() {
        assert_eq!(KeyPair::from_hex("deadbeef").unwrap_err(), KeyError::InvalidPrivateKey);
        assert!(KeyPair::from_hex("not-hex").is_err());
        assert!(KeyPair::from_hex(&"0".repeat(66)).is_err());
    }

    #[test]
    fn signatures_are_deterministic_and_verify() {
        let kp = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let sig1 = kp.sign(b"symbol");
        let sig2 = kp.sign(b"symbol");
        assert_eq!(sig1, sig2);
        assert!(kp.public_key().verify(b"symbol", &sig1));
        assert!(!kp.public_key().verify(b"symbol!", &sig1));
    }

    #[test]
    fn foreign_key_does_not_verify() {
        let kp = KeyPair::generate();
        let other = KeyPair::generate();
        let sig = kp.sign(b"message");
        assert!(!other.public_key().verify(b"message", &sig));
    }

    #[test]
    fn public_key_parses_either_case() {
        let upper = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let lower = PublicKey::from_hex(&PUBLIC_KEY.to_lowercase()).unwrap();
        assert_eq!(upper, lower);
        assert!(PublicKey::from_hex("ABCD").is_err());
    }

    #[test]
    fn signature_hex_roundtrip() {
        let kp = KeyPair::generate();
        let sig = kp.sign(b"test");
        assert_eq!(Signature::from_hex(&sig.to_hex()).unwrap(), sig);
        assert_eq!(sig.r_part(), &sig.as_bytes()[..32]);
    }

    #[test]
    fn public_key_serializes_as_hex_string() {
        let key = PublicKey::from_hex(PUBLIC_KEY).unwrap();
        let json = serde_json::to_string(&key).unwrap();
        assert_eq!(json, format!("\"{PUBLIC_KEY}\""));
        let back: PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(back, key);
    }

    #[test]
    fn debug_does_not_leak_private_key() {
        let kp = KeyPair::from_hex(PRIVATE_KEY).unwrap();
        let debug_str = format!("{:?}", kp);
        assert!(debug_str.starts_with("KeyPair(pub="));
        assert!(!debug_str.to_lowercase().contains(PRIVATE_KEY));
    }
}
