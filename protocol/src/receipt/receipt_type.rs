//! Receipt type codes as the ledger emits them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of ledger receipt types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u16)]
pub enum ReceiptType {
    HarvestFee = 0x2143,
    AddressAliasResolution = 0xF143,
    MosaicAliasResolution = 0xF243,
    TransactionGroup = 0xE143,
    MosaicExpired = 0x414D,
    MosaicRentalFee = 0x124D,
    NamespaceExpired = 0x414E,
    NamespaceDeleted = 0x424E,
    NamespaceRentalFee = 0x134E,
    LockHashCreated = 0x3148,
    LockHashCompleted = 0x2248,
    LockHashExpired = 0x2348,
    LockSecretCreated = 0x3152,
    LockSecretCompleted = 0x2252,
    LockSecretExpired = 0x2352,
    Inflation = 0x5143,
}

impl ReceiptType {
    pub const ALL: [ReceiptType; 16] = [
        ReceiptType::HarvestFee,
        ReceiptType::AddressAliasResolution,
        ReceiptType::MosaicAliasResolution,
        ReceiptType::TransactionGroup,
        ReceiptType::MosaicExpired,
        ReceiptType::MosaicRentalFee,
        ReceiptType::NamespaceExpired,
        ReceiptType::NamespaceDeleted,
        ReceiptType::NamespaceRentalFee,
        ReceiptType::LockHashCreated,
        ReceiptType::LockHashCompleted,
        ReceiptType::LockHashExpired,
        ReceiptType::LockSecretCreated,
        ReceiptType::LockSecretCompleted,
        ReceiptType::LockSecretExpired,
        ReceiptType::Inflation,
    ];

    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn from_code(code: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.code() == code)
    }

    /// The two alias resolution types, the only ones a resolution entry accepts.
    pub fn is_resolution(self) -> bool {
        matches!(self, Self::AddressAliasResolution | Self::MosaicAliasResolution)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::HarvestFee => "HARVEST_FEE",
            Self::AddressAliasResolution => "ADDRESS_ALIAS_RESOLUTION",
            Self::MosaicAliasResolution => "MOSAIC_ALIAS_RESOLUTION",
            Self::TransactionGroup => "TRANSACTION_GROUP",
            Self::MosaicExpired => "MOSAIC_EXPIRED",
            Self::MosaicRentalFee => "MOSAIC_RENTAL_FEE",
            Self::NamespaceExpired => "NAMESPACE_EXPIRED",
            Self::NamespaceDeleted => "NAMESPACE_DELETED",
            Self::NamespaceRentalFee => "NAMESPACE_RENTAL_FEE",
            Self::LockHashCreated => "LOCK_HASH_CREATED",
            Self::LockHashCompleted => "LOCK_HASH_COMPLETED",
            Self::LockHashExpired => "LOCK_HASH_EXPIRED",
            Self::LockSecretCreated => "LOCK_SECRET_CREATED",
            Self::LockSecretCompleted => "LOCK_SECRET_COMPLETED",
            Self::LockSecretExpired => "LOCK_SECRET_EXPIRED",
            Self::Inflation => "INFLATION",
        }
    }
}

impl fmt::Display for ReceiptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_roundtrip() {
        for t in ReceiptType::ALL {
            assert_eq!(ReceiptType::from_code(t.code()), Some(t));
        }
        assert_eq!(ReceiptType::from_code(0x0001), None);
    }

    #[test]
    fn names_match_serde() {
        for t in ReceiptType::ALL {
            assert_eq!(serde_json::to_string(&t).unwrap(), format!("\"{t}\""));
        }
    }

    #[test]
    fn only_alias_resolutions_are_resolutions() {
        let resolutions: Vec<_> = ReceiptType::ALL.into_iter().filter(|t| t.is_resolution()).collect();
        assert_eq!(
            resolutions,
            vec![ReceiptType::AddressAliasResolution, ReceiptType::MosaicAliasResolution]
        );
    }
}
