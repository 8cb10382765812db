//! # Multisig
//!
//! ```text
//! account_info.rs — MultisigAccountInfo, one account's thresholds and links
//! graph.rs        — MultisigAccountGraphInfo and MultisigGraphResolver
//! ```

pub mod account_info;
pub mod graph;

pub use account_info::MultisigAccountInfo;
pub use graph::{MultisigAccountGraphInfo, MultisigAccountSource, MultisigGraphResolver};
