//! Core enums and per-variant bodies of ledger transactions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::builder::Transaction;
use crate::crypto::keys::{PublicKey, Signature};
use crate::model::address::Address;
use crate::model::primitives::{Mosaic, MosaicId, NamespaceId};

// ---------------------------------------------------------------------------
// TransactionType
// ---------------------------------------------------------------------------

/// The closed set of transaction variants this crate can build and decode.
///
/// The discriminant is the little-endian `u16` written at offset 110 of a
/// standalone payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum TransactionType {
    Transfer = 0x4154,
    AccountMetadata = 0x4144,
    MosaicMetadata = 0x4244,
    NamespaceMetadata = 0x4344,
    MosaicSupplyRevocation = 0x434D,
    MultisigAccountModification = 0x4155,
    AggregateComplete = 0x4141,
    AggregateBonded = 0x4241,
}

impl TransactionType {
    pub const ALL: [TransactionType; 8] = [
        TransactionType::Transfer,
        TransactionType::AccountMetadata,
        TransactionType::MosaicMetadata,
        TransactionType::NamespaceMetadata,
        TransactionType::MosaicSupplyRevocation,
        TransactionType::MultisigAccountModification,
        TransactionType::AggregateComplete,
        TransactionType::AggregateBonded,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// Version a freshly built transaction of this type carries.
    pub fn default_version(self) -> u8 {
        1
    }

    pub fn is_aggregate(self) -> bool {
        matches!(self, Self::AggregateComplete | Self::AggregateBonded)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Transfer => "TRANSFER",
            Self::AccountMetadata => "ACCOUNT_METADATA",
            Self::MosaicMetadata => "MOSAIC_METADATA",
            Self::NamespaceMetadata => "NAMESPACE_METADATA",
            Self::MosaicSupplyRevocation => "MOSAIC_SUPPLY_REVOCATION",
            Self::MultisigAccountModification => "MULTISIG_ACCOUNT_MODIFICATION",
            Self::AggregateComplete => "AGGREGATE_COMPLETE",
            Self::AggregateBonded => "AGGREGATE_BONDED",
        };
        f.write_str(name)
    }
}

// ---------------------------------------------------------------------------
// TransactionInfo
// ---------------------------------------------------------------------------

/// Where a confirmed transaction ended up. Only the node knows these values,
/// so they are attached after the fact and never encoded.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionInfo {
    pub height: u64,
    pub index: u32,
    pub id: String,
    pub hash: Option<String>,
    pub merkle_component_hash: Option<String>,
    /// Set for transactions embedded in an aggregate.
    pub aggregate_hash: Option<String>,
    pub aggregate_id: Option<String>,
}

impl TransactionInfo {
    pub fn is_embedded(&self) -> bool {
        self.aggregate_hash.is_some() || self.aggregate_id.is_some()
    }
}

// ---------------------------------------------------------------------------
// Message
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum MessageType {
    Plain = 0x00,
    Encrypted = 0x01,
    PersistentHarvestingDelegation = 0xFE,
}

impl MessageType {
    pub fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0x00 => Some(Self::Plain),
            0x01 => Some(Self::Encrypted),
            0xFE => Some(Self::PersistentHarvestingDelegation),
            _ => None,
        }
    }
}

/// A transfer message: one type byte followed by the payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub message_type: MessageType,
    pub payload: Vec<u8>,
}

impl Message {
    pub fn new(message_type: MessageType, payload: impl Into<Vec<u8>>) -> Self {
        Self {
            message_type,
            payload: payload.into(),
        }
    }

    /// A UTF-8 plain text message.
    pub fn plain(text: &str) -> Self {
        Self::new(MessageType::Plain, text.as_bytes())
    }

    /// Encoded length including the type byte.
    pub fn size(&self) -> usize {
        1 + self.payload.len()
    }
}

// ---------------------------------------------------------------------------
// Bodies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferBody {
    pub recipient_address: Address,
    /// Ascending by id.
    pub mosaics: Vec<Mosaic>,
    pub message: Option<Message>,
}

/// What a metadata entry is attached to, beyond the target account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MetadataTarget {
    Account,
    Mosaic(MosaicId),
    Namespace(NamespaceId),
}

/// Shared body of the account, mosaic and namespace metadata transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataBody {
    pub target_address: Address,
    pub scoped_metadata_key: u64,
    pub target: MetadataTarget,
    pub value_size_delta: i16,
    pub value: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MosaicSupplyRevocationBody {
    pub source_address: Address,
    pub mosaic: Mosaic,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountModificationBody {
    pub min_removal_delta: i8,
    pub min_approval_delta: i8,
    pub address_additions: Vec<Address>,
    pub address_deletions: Vec<Address>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AggregateKind {
    /// All cosignatures are present at announcement.
    Complete,
    /// Cosignatures are collected on the network after a hash lock.
    Bonded,
}

/// An approval of an aggregate by an account other than its signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cosignature {
    pub version: u64,
    pub signer: PublicKey,
    pub signature: Signature,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateBody {
    pub kind: AggregateKind,
    /// Each has a signer and none is itself an aggregate.
    pub inner_transactions: Vec<Transaction>,
    pub cosignatures: Vec<Cosignature>,
}

/// Variant-specific part of a [`Transaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "body", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionBody {
    Transfer(TransferBody),
    Metadata(MetadataBody),
    MosaicSupplyRevocation(MosaicSupplyRevocationBody),
    MultisigAccountModification(MultisigAccountModificationBody),
    Aggregate(AggregateBody),
}

impl TransactionBody {
    pub fn transaction_type(&self) -> TransactionType {
        match self {
            Self::Transfer(_) => TransactionType::Transfer,
            Self::Metadata(body) => match body.target {
                MetadataTarget::Account => TransactionType::AccountMetadata,
                MetadataTarget::Mosaic(_) => TransactionType::MosaicMetadata,
                MetadataTarget::Namespace(_) => TransactionType::NamespaceMetadata,
            },
            Self::MosaicSupplyRevocation(_) => TransactionType::MosaicSupplyRevocation,
            Self::MultisigAccountModification(_) => TransactionType::MultisigAccountModification,
            Self::Aggregate(body) => match body.kind {
                AggregateKind::Complete => TransactionType::AggregateComplete,
                AggregateKind::Bonded => TransactionType::AggregateBonded,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn type_codes_roundtrip() {
        for t in TransactionType::ALL {
            assert_eq!(TransactionType::from_code(t.code()), Some(t));
            assert_eq!(t.default_version(), 1);
        }
        assert_eq!(TransactionType::from_code(0x0000), None);
    }

    #[test]
    fn known_wire_codes() {
        assert_eq!(TransactionType::MosaicSupplyRevocation.code().to_le_bytes(), [0x4D, 0x43]);
        assert_eq!(TransactionType::Transfer.code(), 16724);
        assert_eq!(TransactionType::AggregateBonded.code(), 16961);
    }

    #[test]
    fn only_aggregates_are_aggregates() {
        let aggregates: Vec<_> =
            TransactionType::ALL.into_iter().filter(|t| t.is_aggregate()).collect();
        assert_eq!(
            aggregates,
            vec![TransactionType::AggregateComplete, TransactionType::AggregateBonded]
        );
    }

    #[test]
    fn display_uses_ledger_names() {
        assert_eq!(
            TransactionType::MultisigAccountModification.to_string(),
            "MULTISIG_ACCOUNT_MODIFICATION"
        );
        assert_eq!(
            serde_json::to_string(&TransactionType::MosaicSupplyRevocation).unwrap(),
            "\"MOSAIC_SUPPLY_REVOCATION\""
        );
    }

    #[test]
    fn plain_message_size_counts_type_byte() {
        let message = Message::plain("hi");
        assert_eq!(message.size(), 3);
        assert_eq!(MessageType::from_value(0xFE), Some(MessageType::PersistentHarvestingDelegation));
        assert_eq!(MessageType::from_value(0x02), None);
    }
}
