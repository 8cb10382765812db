//! # Protocol Configuration & Constants
//!
//! Every fixed width, offset and default used by the codec and the signer
//! lives here. The binary layout is owned by the ledger, not by us: if one of
//! these numbers changes, every payload this crate has ever produced stops
//! being announceable.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Cryptographic Parameters
// ---------------------------------------------------------------------------

/// Ed25519 private key length in bytes.
pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Ed25519 public key length in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// Ed25519 signature length. Always 64 bytes.
pub const SIGNATURE_LENGTH: usize = 64;

/// SHA3-256 output length, used for transaction hashes and Merkle roots.
pub const HASH_LENGTH: usize = 32;

/// Length of the network generation hash mixed into every signature.
pub const GENERATION_HASH_LENGTH: usize = 32;

// ---------------------------------------------------------------------------
// Addresses
// ---------------------------------------------------------------------------

/// Decoded address: network byte, RIPEMD-160 of the key hash, 3-byte checksum.
pub const ADDRESS_DECODED_LENGTH: usize = 24;

/// Base32 rendering of an address without dashes.
pub const ADDRESS_ENCODED_LENGTH: usize = 39;

/// Trailing checksum bytes of a decoded address.
pub const ADDRESS_CHECKSUM_LENGTH: usize = 3;

/// RIPEMD-160 digest length (the account part of an address).
pub const ADDRESS_RIPEMD_LENGTH: usize = 20;

// ---------------------------------------------------------------------------
// Transaction Layout
// ---------------------------------------------------------------------------

/// `size(4) | reserved(4) | signature(64) | signer(32) | reserved(4) |
/// version(1) | network(1) | type(2) | max_fee(8) | deadline(8)`.
pub const STANDALONE_HEADER_SIZE: usize = 128;

/// `size(4) | reserved(4) | signer(32) | reserved(4) | version(1) |
/// network(1) | type(2)`.
pub const EMBEDDED_HEADER_SIZE: usize = 48;

/// Offset of the signature inside a standalone payload.
pub const SIGNATURE_OFFSET: usize = 8;

/// Offset of the signer public key inside a standalone payload.
pub const SIGNER_OFFSET: usize = SIGNATURE_OFFSET + SIGNATURE_LENGTH;

/// Offset of the first signed byte (the version field).
pub const SIGNED_RANGE_OFFSET: usize = SIGNER_OFFSET + PUBLIC_KEY_LENGTH + 4;

/// Offset of the transaction type inside a standalone payload.
pub const TYPE_OFFSET: usize = SIGNED_RANGE_OFFSET + 2;

/// Aggregates sign only their header fields plus the transactions hash:
/// `version(1) | network(1) | type(2) | max_fee(8) | deadline(8) | hash(32)`.
pub const AGGREGATE_SIGNED_RANGE_LENGTH: usize = 52;

/// Embedded transactions inside an aggregate are padded to this boundary.
pub const AGGREGATE_ALIGNMENT: usize = 8;

/// `version(8) | signer(32) | signature(64)`.
pub const COSIGNATURE_SIZE: usize = 8 + PUBLIC_KEY_LENGTH + SIGNATURE_LENGTH;

/// Version written into cosignatures produced by this crate.
pub const COSIGNATURE_VERSION: u64 = 0;

/// Largest value a transaction factory accepts for a metadata value.
pub const MAX_METADATA_VALUE_SIZE: usize = i16::MAX as usize;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// How far in the future `Deadline::create` places a transaction.
pub const DEFAULT_DEADLINE: Duration = Duration::from_secs(2 * 60 * 60);

/// Seconds between the Unix epoch and the public mainnet nemesis block.
pub const MAINNET_EPOCH_ADJUSTMENT: Duration = Duration::from_secs(1_615_853_185);

/// Seconds between the Unix epoch and the public testnet nemesis block.
pub const TESTNET_EPOCH_ADJUSTMENT: Duration = Duration::from_secs(1_667_250_467);

// ---------------------------------------------------------------------------
// Namespaces
// ---------------------------------------------------------------------------

/// Namespaces nest at most this deep (`a.b.c`).
pub const MAX_NAMESPACE_DEPTH: usize = 3;

/// Longest allowed namespace part.
pub const MAX_NAMESPACE_PART_LENGTH: usize = 64;
