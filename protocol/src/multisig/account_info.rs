//! Multisig state of a single account, as reported by a node.

use serde::{Deserialize, Serialize};

use crate::model::address::Address;

/// Multisig relationships of one account.
///
/// Lists are kept in the order the node returned them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigAccountInfo {
    pub account_address: Address,
    /// Cosignatures required to approve a transaction.
    pub min_approval: u32,
    /// Cosignatures required to remove a cosignatory.
    pub min_removal: u32,
    /// Accounts that cosign for this one.
    pub cosignatory_addresses: Vec<Address>,
    /// Accounts this one cosigns for.
    pub multisig_addresses: Vec<Address>,
}

impl MultisigAccountInfo {
    pub fn new(
        account_address: Address,
        min_approval: u32,
        min_removal: u32,
        cosignatory_addresses: Vec<Address>,
        multisig_addresses: Vec<Address>,
    ) -> Self {
        Self {
            account_address,
            min_approval,
            min_removal,
            cosignatory_addresses,
            multisig_addresses,
        }
    }

    /// `true` if the account is itself a multisig account.
    pub fn is_multisig(&self) -> bool {
        self.min_approval != 0 && self.min_removal != 0
    }

    /// `true` if `address` cosigns for this account.
    pub fn has_cosigner(&self, address: &Address) -> bool {
        self.cosignatory_addresses.contains(address)
    }

    /// `true` if this account cosigns for `address`.
    pub fn is_cosigner_of_multisig_account(&self, address: &Address) -> bool {
        self.multisig_addresses.contains(address)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::model::network::NetworkType;

    fn address() -> Address {
        Address::from_public_key(&KeyPair::generate().public_key(), NetworkType::MijinTest)
    }

    #[test]
    fn multisig_needs_both_thresholds() {
        let account = address();
        assert!(MultisigAccountInfo::new(account, 1, 1, vec![address()], vec![]).is_multisig());
        assert!(!MultisigAccountInfo::new(account, 1, 0, vec![], vec![]).is_multisig());
        assert!(!MultisigAccountInfo::new(account, 0, 0, vec![], vec![address()]).is_multisig());
    }

    #[test]
    fn cosigner_lookups() {
        let cosigner = address();
        let multisig = address();
        let info = MultisigAccountInfo::new(address(), 1, 1, vec![cosigner], vec![multisig]);
        assert!(info.has_cosigner(&cosigner));
        assert!(!info.has_cosigner(&multisig));
        assert!(info.is_cosigner_of_multisig_account(&multisig));
    }

    #[test]
    fn order_is_preserved() {
        let cosigners: Vec<_> = (0..5).map(|_| address()).collect();
        let info = MultisigAccountInfo::new(address(), 3, 2, cosigners.clone(), vec![]);
        assert_eq!(info.cosignatory_addresses, cosigners);
    }
}
