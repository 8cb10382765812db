//! # Hashing Utilities
//!
//! The ledger hashes with SHA3-256 everywhere: transaction hashes, address
//! checksums, id derivation and the Merkle root over embedded transactions.
//! RIPEMD-160 appears exactly once, when an address is derived from a public
//! key.

use ripemd::Ripemd160;
use sha3::{Digest, Sha3_256};

use crate::config::HASH_LENGTH;

/// SHA3-256 of `data`.
pub fn sha3_256(data: &[u8]) -> [u8; HASH_LENGTH] {
    Sha3_256::digest(data).into()
}

/// SHA3-256 over the concatenation of `parts`, without building the
/// concatenated buffer.
pub fn sha3_256_multi(parts: &[&[u8]]) -> [u8; HASH_LENGTH] {
    let mut hasher = Sha3_256::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}

/// RIPEMD-160 of `data`.
pub fn ripemd160(data: &[u8]) -> [u8; 20] {
    let mut hasher = Ripemd160::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// Merkle root the ledger stores as an aggregate's transactions hash.
///
/// Pairs are hashed with SHA3-256. An odd node at any level is paired with
/// itself. An empty tree hashes to all zeros.
pub fn merkle_root(leaves: &[[u8; HASH_LENGTH]]) -> [u8; HASH_LENGTH] {
    if leaves.is_empty() {
        return [0u8; HASH_LENGTH];
    }

    let mut level = leaves.to_vec();
    while level.len() > 1 {
        level = level
            .chunks(2)
            .map(|pair| {
                let right = pair.get(1).unwrap_or(&pair[0]);
                sha3_256_multi(&[&pair[0], right])
            })
            .collect();
    }
    level[0]
}
