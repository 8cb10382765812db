//! # Cryptographic Primitives
//!
//! Thin, typed wrappers over audited implementations:
//!
//! - **Ed25519** (`ed25519-dalek`) for account keys, transaction signatures
//!   and cosignatures.
//! - **SHA3-256** (`sha3`) for transaction hashes, address checksums, id
//!   derivation and Merkle roots.
//! - **RIPEMD-160** (`ripemd`) for the account part of an address.

pub mod hash;
pub mod keys;

pub use hash::{merkle_root, ripemd160, sha3_256, sha3_256_multi};
pub use keys::{KeyError, KeyPair, PublicKey, Signature};
