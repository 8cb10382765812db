//! Alias resolution receipts.
//!
//! When a transaction references an alias (a namespace standing in for an
//! address or a mosaic id), the node records what the alias resolved to at
//! that point in the block. A [`ResolutionEntry`] is one such record; a
//! [`ResolutionStatement`] collects every resolution of one alias in a block.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::receipt_type::ReceiptType;
use crate::error::{Result, SdkError};
use crate::model::address::Address;
use crate::model::primitives::{MosaicId, NamespaceId};

// ---------------------------------------------------------------------------
// ReceiptSource
// ---------------------------------------------------------------------------

/// Position of the transaction that caused a receipt: its index in the block
/// and, for embedded transactions, its index in the aggregate. Both 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptSource {
    pub primary_id: u32,
    pub secondary_id: u32,
}

impl ReceiptSource {
    pub fn new(primary_id: u32, secondary_id: u32) -> Self {
        Self {
            primary_id,
            secondary_id,
        }
    }
}

// ---------------------------------------------------------------------------
// ResolvedValue
// ---------------------------------------------------------------------------

/// What an alias resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResolvedValue {
    Address(Address),
    MosaicId(MosaicId),
}

impl ResolvedValue {
    /// Name of the value's type, as used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Address(_) => "Address",
            Self::MosaicId(_) => "MosaicId",
        }
    }

    /// The receipt type that records a resolution to this kind of value.
    pub fn receipt_type(&self) -> ReceiptType {
        match self {
            Self::Address(_) => ReceiptType::AddressAliasResolution,
            Self::MosaicId(_) => ReceiptType::MosaicAliasResolution,
        }
    }

    pub fn as_address(&self) -> Option<&Address> {
        match self {
            Self::Address(address) => Some(address),
            Self::MosaicId(_) => None,
        }
    }

    pub fn as_mosaic_id(&self) -> Option<&MosaicId> {
        match self {
            Self::MosaicId(id) => Some(id),
            Self::Address(_) => None,
        }
    }
}

impl From<Address> for ResolvedValue {
    fn from(address: Address) -> Self {
        Self::Address(address)
    }
}

impl From<MosaicId> for ResolvedValue {
    fn from(id: MosaicId) -> Self {
        Self::MosaicId(id)
    }
}

impl fmt::Display for ResolvedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Address(address) => write!(f, "{address}"),
            Self::MosaicId(id) => write!(f, "{id}"),
        }
    }
}

// ---------------------------------------------------------------------------
// ResolutionEntry
// ---------------------------------------------------------------------------

/// A resolved value tagged with the receipt type and source that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionEntry {
    resolved: ResolvedValue,
    receipt_source: ReceiptSource,
    receipt_type: ReceiptType,
}

impl ResolutionEntry {
    /// Pair `resolved` with `receipt_type`.
    ///
    /// The receipt type is checked first and must be one of the two alias
    /// resolution types. The value must then be of the kind that type
    /// records: an [`Address`] for `ADDRESS_ALIAS_RESOLUTION`, a [`MosaicId`]
    /// for `MOSAIC_ALIAS_RESOLUTION`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_protocol::model::MosaicId;
    /// use symbol_protocol::receipt::{ReceiptSource, ReceiptType, ResolutionEntry};
    ///
    /// let err = ResolutionEntry::new(
    ///     MosaicId::new(1),
    ///     ReceiptSource::new(1, 1),
    ///     ReceiptType::NamespaceRentalFee,
    /// )
    /// .unwrap_err();
    /// assert_eq!(err.to_string(), "Receipt type: [NAMESPACE_RENTAL_FEE] is not valid.");
    /// ```
    pub fn new(
        resolved: impl Into<ResolvedValue>,
        receipt_source: ReceiptSource,
        receipt_type: ReceiptType,
    ) -> Result<Self> {
        if !receipt_type.is_resolution() {
            return Err(SdkError::invalid(format!(
                "Receipt type: [{receipt_type}] is not valid."
            )));
        }

        let resolved = resolved.into();
        if resolved.receipt_type() != receipt_type {
            return Err(SdkError::invalid(format!(
                "Resolved type: [{}] is not valid for this ResolutionEntry of type [{receipt_type}]",
                expected_kind(receipt_type)
            )));
        }

        Ok(Self {
            resolved,
            receipt_source,
            receipt_type,
        })
    }

    /// An address resolution. Cannot fail.
    pub fn address(address: Address, receipt_source: ReceiptSource) -> Self {
        Self {
            resolved: ResolvedValue::Address(address),
            receipt_source,
            receipt_type: ReceiptType::AddressAliasResolution,
        }
    }

    /// A mosaic id resolution. Cannot fail.
    pub fn mosaic_id(id: MosaicId, receipt_source: ReceiptSource) -> Self {
        Self {
            resolved: ResolvedValue::MosaicId(id),
            receipt_source,
            receipt_type: ReceiptType::MosaicAliasResolution,
        }
    }

    pub fn resolved(&self) -> &ResolvedValue {
        &self.resolved
    }

    pub fn receipt_source(&self) -> &ReceiptSource {
        &self.receipt_source
    }

    pub fn receipt_type(&self) -> ReceiptType {
        self.receipt_type
    }
}

/// Kind of value a resolution receipt type records. Callers have already
/// checked that `receipt_type` is a resolution type.
fn expected_kind(receipt_type: ReceiptType) -> &'static str {
    match receipt_type {
        ReceiptType::AddressAliasResolution => "Address",
        _ => "MosaicId",
    }
}

// ---------------------------------------------------------------------------
// ResolutionStatement
// ---------------------------------------------------------------------------

/// Every resolution of one alias within a block, ordered by source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionStatement {
    receipt_type: ReceiptType,
    height: u64,
    unresolved: NamespaceId,
    entries: Vec<ResolutionEntry>,
}

impl ResolutionStatement {
    /// Group `entries` under `unresolved`. Every entry must carry
    /// `receipt_type`. Entries are kept sorted by source.
    pub fn new(
        receipt_type: ReceiptType,
        height: u64,
        unresolved: NamespaceId,
        mut entries: Vec<ResolutionEntry>,
    ) -> Result<Self> {
        if !receipt_type.is_resolution() {
            return Err(SdkError::invalid(format!(
                "Receipt type: [{receipt_type}] is not valid."
            )));
        }
        if let Some(entry) = entries.iter().find(|e| e.receipt_type() != receipt_type) {
            return Err(SdkError::invalid(format!(
                "ResolutionEntry of type [{}] cannot be part of a statement of type [{receipt_type}]",
                entry.receipt_type()
            )));
        }
        entries.sort_by_key(|e| e.receipt_source);

        Ok(Self {
            receipt_type,
            height,
            unresolved,
            entries,
        })
    }

    pub fn receipt_type(&self) -> ReceiptType {
        self.receipt_type
    }

    pub fn height(&self) -> u64 {
        self.height
    }

    pub fn unresolved(&self) -> NamespaceId {
        self.unresolved
    }

    pub fn entries(&self) -> &[ResolutionEntry] {
        &self.entries
    }

    /// The value the alias had for the transaction at `source`: the entry
    /// with the greatest source not after it.
    pub fn resolve(&self, source: ReceiptSource) -> Option<&ResolvedValue> {
        self.entries
            .iter()
            .rev()
            .find(|e| e.receipt_source <= source)
            .map(ResolutionEntry::resolved)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn address() -> Address {
        Address::from_raw_address("SDZWZJ-UAYNOW-GBTCUD-BY3SE5-JF4NCC-2RDM6S-IGQ").unwrap()
    }

    fn mosaic_id() -> MosaicId {
        MosaicId::from_hex("85BBEA6CC462B244").unwrap()
    }

    #[test]
    fn address_resolution_entry() {
        let source = ReceiptSource::new(1, 1);
        let entry =
            ResolutionEntry::new(address(), source, ReceiptType::AddressAliasResolution).unwrap();
        assert_eq!(entry.receipt_type(), ReceiptType::AddressAliasResolution);
        assert_eq!(entry.receipt_source(), &source);
        assert_eq!(entry.resolved().as_address(), Some(&address()));
        assert_eq!(entry, ResolutionEntry::address(address(), source));
    }

    #[test]
    fn mosaic_resolution_entry() {
        let source = ReceiptSource::new(1, 1);
        let entry =
            ResolutionEntry::new(mosaic_id(), source, ReceiptType::MosaicAliasResolution).unwrap();
        assert_eq!(entry.resolved().as_mosaic_id(), Some(&mosaic_id()));
        assert_eq!(entry.resolved().as_address(), None);
    }

    #[test]
    fn wrong_receipt_type_is_rejected() {
        let err = ResolutionEntry::new(
            address(),
            ReceiptSource::new(1, 1),
            ReceiptType::NamespaceRentalFee,
        )
        .unwrap_err();
        assert_eq!(
            err,
            SdkError::InvalidArgument("Receipt type: [NAMESPACE_RENTAL_FEE] is not valid.".into())
        );
    }

    #[test]
    fn wrong_resolved_kind_is_rejected() {
        let err = ResolutionEntry::new(
            mosaic_id(),
            ReceiptSource::new(1, 1),
            ReceiptType::AddressAliasResolution,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resolved type: [Address] is not valid for this ResolutionEntry of type [ADDRESS_ALIAS_RESOLUTION]"
        );

        let err = ResolutionEntry::new(
            address(),
            ReceiptSource::new(1, 1),
            ReceiptType::MosaicAliasResolution,
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Resolved type: [MosaicId] is not valid for this ResolutionEntry of type [MOSAIC_ALIAS_RESOLUTION]"
        );
    }

    #[test]
    fn receipt_type_is_checked_before_value_kind() {
        // Both are wrong: an address for an inflation receipt.
        let err =
            ResolutionEntry::new(address(), ReceiptSource::new(1, 0), ReceiptType::Inflation)
                .unwrap_err();
        assert!(err.to_string().starts_with("Receipt type: [INFLATION]"));
    }

    #[test]
    fn statement_resolves_by_source() {
        let first = MosaicId::new(1);
        let second = MosaicId::new(2);
        let statement = ResolutionStatement::new(
            ReceiptType::MosaicAliasResolution,
            10,
            NamespaceId::from_name("cat.currency").unwrap(),
            vec![
                ResolutionEntry::mosaic_id(second, ReceiptSource::new(3, 0)),
                ResolutionEntry::mosaic_id(first, ReceiptSource::new(1, 0)),
            ],
        )
        .unwrap();

        assert_eq!(statement.entries()[0].resolved().as_mosaic_id(), Some(&first));
        assert_eq!(statement.resolve(ReceiptSource::new(0, 5)), None);
        assert_eq!(
            statement.resolve(ReceiptSource::new(2, 4)).and_then(ResolvedValue::as_mosaic_id),
            Some(&first)
        );
        assert_eq!(
            statement.resolve(ReceiptSource::new(3, 0)).and_then(ResolvedValue::as_mosaic_id),
            Some(&second)
        );
    }

    #[test]
    fn statement_rejects_mixed_entries() {
        let err = ResolutionStatement::new(
            ReceiptType::AddressAliasResolution,
            1,
            NamespaceId::new(0x8000_0000_0000_0001),
            vec![ResolutionEntry::mosaic_id(mosaic_id(), ReceiptSource::new(1, 0))],
        )
        .unwrap_err();
        assert!(err.to_string().contains("cannot be part of a statement"));
    }
}
