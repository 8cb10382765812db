//! # Transaction Module
//!
//! Construction, binary encoding, signing and verification of ledger
//! transactions.
//!
//! ## Architecture
//!
//! ```text
//! types.rs        — TransactionType, bodies, Message, Cosignature, TransactionInfo
//! metadata.rs     — MetadataValue and the XOR delta used for updates
//! builder.rs      — Transaction and the per-variant TransactionFactory
//! codec.rs        — Standalone and embedded binary layouts, both directions
//! signing.rs      — Ed25519 signing, transaction hash, cosigning
//! verification.rs — Signature and cosignature checks on payloads
//! ```
//!
//! ## Transaction Lifecycle
//!
//! 1. **Build** — call a [`TransactionFactory`] constructor, override the
//!    envelope if needed, `.build()`.
//! 2. **Sign** — [`sign_transaction`] with the signer's keypair and the
//!    network generation hash.
//! 3. **Announce** — hand [`SignedTransaction::payload`] to a node (outside
//!    this crate).
//! 4. **Cosign** — for aggregate bonded, cosigners call [`cosign_hash`] on the
//!    announced hash.
//!
//! ## Design Decisions
//!
//! - Variants form a closed enum ([`TransactionBody`]); the codec matches on
//!   it, so an unhandled variant is a compile error.
//! - All amounts are `u64` in the smallest unit. Negative values are
//!   rejected when converting from signed input.
//! - Transactions are immutable; attaching a signature or confirmation info
//!   returns a new value.

pub mod builder;
pub mod codec;
pub mod metadata;
pub mod signing;
pub mod types;
pub mod verification;

pub use builder::{Transaction, TransactionFactory};
pub use codec::transactions_hash;
pub use metadata::MetadataValue;
pub use signing::{
    cosign_hash, sign_transaction, sign_with_cosignatories, sign_with_private_key,
    signing_bytes, transaction_hash, CosignatureSignedTransaction, SignedTransaction,
};
pub use types::{
    AggregateBody, AggregateKind, Cosignature, Message, MessageType, MetadataBody, MetadataTarget,
    MosaicSupplyRevocationBody, MultisigAccountModificationBody, TransactionBody, TransactionInfo,
    TransactionType, TransferBody,
};
pub use verification::{
    verify_cosignature, verify_cosignatures, verify_payload, verify_signed_transaction,
};
