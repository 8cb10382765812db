//! # Receipts
//!
//! Read-side models of the receipts a node attaches to blocks. Only the
//! alias resolution receipts carry structure here; the other receipt types
//! are known by code so they can be recognised and rejected.

pub mod receipt_type;
pub mod resolution;

pub use receipt_type::ReceiptType;
pub use resolution::{ReceiptSource, ResolutionEntry, ResolutionStatement, ResolvedValue};
