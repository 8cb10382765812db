//! Accounts: a public key bound to a network, and its signing counterpart.

use serde::{Deserialize, Serialize};

use crate::crypto::keys::{KeyPair, PublicKey};
use crate::error::Result;
use crate::model::address::Address;
use crate::model::network::{GenerationHash, NetworkType};
use crate::transaction::builder::Transaction;
use crate::transaction::signing::{self, CosignatureSignedTransaction, SignedTransaction};

/// A public key together with the address it derives on one network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicAccount {
    public_key: PublicKey,
    address: Address,
}

impl PublicAccount {
    pub fn new(public_key: PublicKey, network_type: NetworkType) -> Self {
        Self {
            public_key,
            address: Address::from_public_key(&public_key, network_type),
        }
    }

    pub fn from_public_key_hex(public_key: &str, network_type: NetworkType) -> Result<Self> {
        Ok(Self::new(PublicKey::from_hex(public_key)?, network_type))
    }

    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn network_type(&self) -> NetworkType {
        self.address.network_type()
    }
}

/// An account that can sign: keypair plus network.
#[derive(Debug, Clone)]
pub struct Account {
    keypair: KeyPair,
    public_account: PublicAccount,
}

impl Account {
    pub fn new(keypair: KeyPair, network_type: NetworkType) -> Self {
        let public_account = PublicAccount::new(keypair.public_key(), network_type);
        Self {
            keypair,
            public_account,
        }
    }

    /// Load an account from a hex private key. A malformed key is a
    /// [`SigningError`](crate::SdkError::SigningError).
    pub fn from_private_key(private_key: &str, network_type: NetworkType) -> Result<Self> {
        Ok(Self::new(KeyPair::from_hex(private_key)?, network_type))
    }

    pub fn generate(network_type: NetworkType) -> Self {
        Self::new(KeyPair::generate(), network_type)
    }

    pub fn keypair(&self) -> &KeyPair {
        &self.keypair
    }

    pub fn public_account(&self) -> &PublicAccount {
        &self.public_account
    }

    pub fn public_key(&self) -> &PublicKey {
        self.public_account.public_key()
    }

    pub fn address(&self) -> &Address {
        self.public_account.address()
    }

    /// Sign `transaction` for the ledger identified by `generation_hash`.
    pub fn sign(
        &self,
        transaction: &Transaction,
        generation_hash: &GenerationHash,
    ) -> Result<SignedTransaction> {
        signing::sign_transaction(transaction, &self.keypair, generation_hash)
    }

    /// Sign an aggregate and attach cosignatures from `cosignatories`.
    pub fn sign_with_cosignatories(
        &self,
        transaction: &Transaction,
        cosignatories: &[Account],
        generation_hash: &GenerationHash,
    ) -> Result<SignedTransaction> {
        let keypairs: Vec<&KeyPair> = cosignatories.iter().map(Account::keypair).collect();
        signing::sign_with_cosignatories(transaction, &self.keypair, &keypairs, generation_hash)
    }

    /// Cosign an announced aggregate by its hash.
    pub fn cosign(&self, parent_hash: &str) -> Result<CosignatureSignedTransaction> {
        signing::cosign_hash(&self.keypair, parent_hash)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn account_derives_public_account() {
        let account = Account::from_private_key(
            "041e2ce90c31cd65620ed16ab7a5a485e5b335d7e61c75cd9b3a2fed3e091728",
            NetworkType::MijinTest,
        )
        .unwrap();
        assert_eq!(
            account.public_key().to_hex(),
            "F6503F78FBF99544B906872DDB392F4BE707180D285E7919DBACEF2E9573B1E6"
        );
        assert_eq!(account.address().plain(), "SCBQEX7TVCVVVUIEMMP3G4HSSAAESUWND7O4JSI");
        assert_eq!(account.public_account().network_type(), NetworkType::MijinTest);
    }

    #[test]
    fn malformed_private_key_is_a_signing_error() {
        let err = Account::from_private_key("zz", NetworkType::MijinTest).unwrap_err();
        assert!(matches!(err, crate::SdkError::SigningError(_)));
    }

    #[test]
    fn public_account_from_hex() {
        let public = PublicAccount::from_public_key_hex(
            "F6503F78FBF99544B906872DDB392F4BE707180D285E7919DBACEF2E9573B1E6",
            NetworkType::TestNet,
        )
        .unwrap();
        assert_eq!(public.address().plain(), "TCBQEX7TVCVVVUIEMMP3G4HSSAAESUWND64TDYA");
        assert!(PublicAccount::from_public_key_hex("F650", NetworkType::TestNet).is_err());
    }
}
