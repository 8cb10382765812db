// Copyright (c) 2026 ALAS Technology. MIT License.
// See LICENSE for details.

//! # Symbol Protocol — Core Library
//!
//! Client-side building blocks for the Symbol ledger family (MAIN_NET,
//! TEST_NET, MIJIN, MIJIN_TEST): build a transaction, encode it byte for byte
//! the way the ledger does, sign and hash it, and read back the structures
//! nodes report about aliases and multisig accounts.
//!
//! Nothing here talks to a node. Callers bring typed values in and take
//! payloads and validated objects out.
//!
//! ## Architecture
//!
//! - **config** — Protocol constants: lengths, header offsets, epochs.
//! - **crypto** — Ed25519 keys, SHA3-256, RIPEMD-160, Merkle root.
//! - **model** — Network types, addresses, ids, amounts, deadlines, accounts.
//! - **transaction** — Factories, binary codec, signing and verification.
//! - **receipt** — Receipt types and alias resolution entries.
//! - **multisig** — Multisig account info and the leveled multisig graph.
//! - **error** — The crate-wide [`SdkError`].
//!
//! ## Quick Start
//!
//! ```
//! use symbol_protocol::model::{Account, Address, Currency, Deadline, GenerationHash, NetworkType};
//! use symbol_protocol::transaction::{verify_signed_transaction, Message, TransactionFactory};
//!
//! let account = Account::generate(NetworkType::TestNet);
//! let recipient = Account::generate(NetworkType::TestNet);
//!
//! let tx = TransactionFactory::transfer(
//!     NetworkType::TestNet,
//!     Deadline::new(1),
//!     *recipient.address(),
//!     vec![Currency::SYMBOL_XYM.create_relative(1).unwrap()],
//!     Some(Message::plain("hello")),
//! )
//! .unwrap()
//! .max_fee(100_000)
//! .build()
//! .unwrap();
//!
//! let generation_hash = GenerationHash::from_bytes([0x49; 32]);
//! let signed = account.sign(&tx, &generation_hash).unwrap();
//! assert!(verify_signed_transaction(&signed, &generation_hash).is_ok());
//! ```

pub mod config;
pub mod crypto;
pub mod error;
pub mod model;
pub mod multisig;
pub mod receipt;
pub mod transaction;

pub use error::{Result, SdkError};
