//! # Primitive Types
//!
//! Fixed-size value types every other module is built from.
//!
//! ```text
//! network.rs    — NetworkType, GenerationHash
//! address.rs    — Address (base32 + SHA3 checksum)
//! primitives.rs — MosaicId, NamespaceId, Amount, Mosaic, Currency, Deadline
//! account.rs    — PublicAccount, Account
//! ```

pub mod account;
pub mod address;
pub mod network;
pub mod primitives;

pub use account::{Account, PublicAccount};
pub use address::Address;
pub use network::{GenerationHash, NetworkType};
pub use primitives::{Amount, Currency, Deadline, Mosaic, MosaicId, NamespaceId};
