//! Transaction construction via per-variant factories.
//!
//! Each variant has a constructor on [`TransactionFactory`] that takes only
//! the fields meaningful to it, validates them, and returns a builder. The
//! builder accepts the optional envelope overrides (signer, version, max fee,
//! transaction info and, for aggregates, cosignatures) and `.build()` hands
//! back an immutable [`Transaction`].
//!
//! The factories do not sign. That happens in [`super::signing`], which keeps
//! construction testable without key material.

use serde::Serialize;
use std::collections::BTreeSet;

use super::codec;
use super::metadata::MetadataValue;
use super::types::{
    AggregateBody, AggregateKind, Cosignature, Message, MetadataBody, MetadataTarget,
    MosaicSupplyRevocationBody, MultisigAccountModificationBody, TransactionBody, TransactionInfo,
    TransactionType, TransferBody,
};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Result, SdkError};
use crate::model::account::PublicAccount;
use crate::model::address::Address;
use crate::model::network::NetworkType;
use crate::model::primitives::{Deadline, Mosaic, MosaicId, NamespaceId};

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A ledger transaction: the common envelope plus a variant body.
///
/// Values are immutable. Operations that attach information (a signature
/// decoded from a payload, confirmation info from a node) return a new value.
///
/// Transactions embedded in an aggregate keep only what the embedded form
/// encodes: max fee and deadline are zero and there is no signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    network_type: NetworkType,
    version: u8,
    max_fee: u64,
    deadline: Deadline,
    signer: Option<PublicKey>,
    signature: Option<Signature>,
    transaction_info: Option<TransactionInfo>,
    #[serde(flatten)]
    body: TransactionBody,
}

impl Transaction {
    pub(crate) fn from_parts(
        network_type: NetworkType,
        version: u8,
        max_fee: u64,
        deadline: Deadline,
        signer: Option<PublicKey>,
        signature: Option<Signature>,
        body: TransactionBody,
    ) -> Self {
        Self {
            network_type,
            version,
            max_fee,
            deadline,
            signer,
            signature,
            transaction_info: None,
            body,
        }
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.body.transaction_type()
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    pub fn version(&self) -> u8 {
        self.version
    }

    pub fn max_fee(&self) -> u64 {
        self.max_fee
    }

    pub fn deadline(&self) -> Deadline {
        self.deadline
    }

    pub fn signer(&self) -> Option<&PublicKey> {
        self.signer.as_ref()
    }

    pub fn signature(&self) -> Option<&Signature> {
        self.signature.as_ref()
    }

    pub fn transaction_info(&self) -> Option<&TransactionInfo> {
        self.transaction_info.as_ref()
    }

    pub fn body(&self) -> &TransactionBody {
        &self.body
    }

    pub fn is_aggregate(&self) -> bool {
        self.transaction_type().is_aggregate()
    }

    pub fn is_signed(&self) -> bool {
        self.signature.is_some()
    }

    /// `true` once a node has reported the transaction in a block.
    pub fn is_confirmed(&self) -> bool {
        self.transaction_info.as_ref().is_some_and(|info| info.height > 0)
    }

    /// Standalone binary form.
    pub fn serialize(&self) -> Result<Vec<u8>> {
        codec::encode_standalone(self)
    }

    /// Embedded binary form, as it appears inside an aggregate (unpadded).
    pub fn serialize_embedded(&self) -> Result<Vec<u8>> {
        codec::encode_embedded(self)
    }

    /// Decode a standalone payload.
    pub fn deserialize(bytes: &[u8]) -> Result<Self> {
        codec::decode_standalone(bytes)
    }

    /// Decode a standalone payload given as hex.
    pub fn from_payload(payload: &str) -> Result<Self> {
        let bytes = hex::decode(payload.trim())
            .map_err(|e| SdkError::malformed(format!("payload is not hex: {e}")))?;
        Self::deserialize(&bytes)
    }

    /// Length of the standalone binary form.
    pub fn size(&self) -> Result<usize> {
        Ok(self.serialize()?.len())
    }

    /// Copy with node confirmation info attached.
    pub fn with_transaction_info(&self, info: TransactionInfo) -> Self {
        Self {
            transaction_info: Some(info),
            ..self.clone()
        }
    }

    /// Copy carrying a signature and signer, e.g. as decoded from a payload.
    pub fn with_signature(&self, signer: PublicKey, signature: Signature) -> Self {
        Self {
            signer: Some(signer),
            signature: Some(signature),
            ..self.clone()
        }
    }

    /// The view of this transaction an aggregate stores.
    fn to_embedded(&self) -> Self {
        Self {
            max_fee: 0,
            deadline: Deadline::new(0),
            signature: None,
            transaction_info: None,
            ..self.clone()
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionFactory
// ---------------------------------------------------------------------------

/// Fluent builder returned by the per-variant constructors.
///
/// # Usage
///
/// ```
/// use symbol_protocol::model::{Address, Currency, Deadline, NetworkType};
/// use symbol_protocol::transaction::TransactionFactory;
///
/// let source = Address::from_raw_address("SDZWZJUAYNOWGBTCUDBY3SE5JF4NCC2RDM6SIGQ").unwrap();
/// let tx = TransactionFactory::mosaic_supply_revocation(
///     NetworkType::MijinTest,
///     Deadline::new(1),
///     source,
///     Currency::CAT_CURRENCY.create_relative(10).unwrap(),
/// )
/// .unwrap()
/// .max_fee(100)
/// .build()
/// .unwrap();
///
/// assert_eq!(tx.max_fee(), 100);
/// assert!(!tx.is_signed());
/// ```
///
/// Max fee defaults to zero and version to the type's current version.
#[derive(Debug, Clone)]
pub struct TransactionFactory {
    network_type: NetworkType,
    deadline: Deadline,
    version: u8,
    max_fee: u64,
    signer: Option<PublicKey>,
    transaction_info: Option<TransactionInfo>,
    cosignatures: Option<Vec<Cosignature>>,
    body: TransactionBody,
}

impl TransactionFactory {
    fn new(network_type: NetworkType, deadline: Deadline, body: TransactionBody) -> Self {
        Self {
            network_type,
            deadline,
            version: body.transaction_type().default_version(),
            max_fee: 0,
            signer: None,
            transaction_info: None,
            cosignatures: None,
            body,
        }
    }

    // -- Variant constructors ------------------------------------------------

    /// Send mosaics and an optional message to `recipient`.
    ///
    /// Mosaics are sorted by id; the same id may not appear twice.
    pub fn transfer(
        network_type: NetworkType,
        deadline: Deadline,
        recipient: Address,
        mut mosaics: Vec<Mosaic>,
        message: Option<Message>,
    ) -> Result<Self> {
        check_network("recipient", &recipient, network_type)?;
        check_count("mosaics", mosaics.len(), u8::MAX as usize)?;
        mosaics.sort_by_key(|m| m.id);
        if let Some(pair) = mosaics.windows(2).find(|pair| pair[0].id == pair[1].id) {
            return Err(SdkError::invalid(format!(
                "mosaic {} appears more than once",
                pair[0].id
            )));
        }
        if let Some(message) = &message {
            if message.size() > u16::MAX as usize {
                return Err(SdkError::invalid(format!(
                    "message of {} bytes exceeds the maximum of {}",
                    message.size(),
                    u16::MAX
                )));
            }
        }

        Ok(Self::new(
            network_type,
            deadline,
            TransactionBody::Transfer(TransferBody {
                recipient_address: recipient,
                mosaics,
                message,
            }),
        ))
    }

    /// Take `mosaic` back from `source`. Only the mosaic creator can announce
    /// this, and only for revokable mosaics.
    pub fn mosaic_supply_revocation(
        network_type: NetworkType,
        deadline: Deadline,
        source: Address,
        mosaic: Mosaic,
    ) -> Result<Self> {
        check_network("source", &source, network_type)?;
        Ok(Self::new(
            network_type,
            deadline,
            TransactionBody::MosaicSupplyRevocation(MosaicSupplyRevocationBody {
                source_address: source,
                mosaic,
            }),
        ))
    }

    /// Attach a key/value pair to an account.
    pub fn account_metadata(
        network_type: NetworkType,
        deadline: Deadline,
        target: &PublicAccount,
        scoped_metadata_key: u64,
        value: MetadataValue,
    ) -> Result<Self> {
        Self::metadata(
            network_type,
            deadline,
            target,
            scoped_metadata_key,
            MetadataTarget::Account,
            value,
        )
    }

    /// Attach a key/value pair to a mosaic owned by `target`.
    pub fn mosaic_metadata(
        network_type: NetworkType,
        deadline: Deadline,
        target: &PublicAccount,
        scoped_metadata_key: u64,
        mosaic_id: MosaicId,
        value: MetadataValue,
    ) -> Result<Self> {
        Self::metadata(
            network_type,
            deadline,
            target,
            scoped_metadata_key,
            MetadataTarget::Mosaic(mosaic_id),
            value,
        )
    }

    /// Attach a key/value pair to a namespace owned by `target`.
    pub fn namespace_metadata(
        network_type: NetworkType,
        deadline: Deadline,
        target: &PublicAccount,
        scoped_metadata_key: u64,
        namespace_id: NamespaceId,
        value: MetadataValue,
    ) -> Result<Self> {
        Self::metadata(
            network_type,
            deadline,
            target,
            scoped_metadata_key,
            MetadataTarget::Namespace(namespace_id),
            value,
        )
    }

    fn metadata(
        network_type: NetworkType,
        deadline: Deadline,
        target: &PublicAccount,
        scoped_metadata_key: u64,
        metadata_target: MetadataTarget,
        value: MetadataValue,
    ) -> Result<Self> {
        check_network("metadata target", target.address(), network_type)?;
        let (value, value_size_delta) = value.into_parts();
        Ok(Self::new(
            network_type,
            deadline,
            TransactionBody::Metadata(MetadataBody {
                target_address: *target.address(),
                scoped_metadata_key,
                target: metadata_target,
                value_size_delta,
                value,
            }),
        ))
    }

    /// Change the cosignatories and thresholds of a multisig account.
    pub fn multisig_account_modification(
        network_type: NetworkType,
        deadline: Deadline,
        min_approval_delta: i8,
        min_removal_delta: i8,
        address_additions: Vec<Address>,
        address_deletions: Vec<Address>,
    ) -> Result<Self> {
        check_count("address additions", address_additions.len(), u8::MAX as usize)?;
        check_count("address deletions", address_deletions.len(), u8::MAX as usize)?;
        for address in address_additions.iter().chain(&address_deletions) {
            check_network("cosignatory", address, network_type)?;
        }

        let mut seen = BTreeSet::new();
        let duplicate = address_additions
            .iter()
            .chain(&address_deletions)
            .find(|a| !seen.insert(**a));
        if let Some(dup) = duplicate {
            return Err(SdkError::invalid(format!(
                "cosignatory {dup} is listed more than once"
            )));
        }

        Ok(Self::new(
            network_type,
            deadline,
            TransactionBody::MultisigAccountModification(MultisigAccountModificationBody {
                min_removal_delta,
                min_approval_delta,
                address_additions,
                address_deletions,
            }),
        ))
    }

    /// Aggregate whose cosignatures are all present at announcement.
    pub fn aggregate_complete(
        network_type: NetworkType,
        deadline: Deadline,
        inner_transactions: Vec<Transaction>,
    ) -> Result<Self> {
        Self::aggregate(network_type, deadline, AggregateKind::Complete, inner_transactions)
    }

    /// Aggregate that collects cosignatures on the network. Needs a hash lock.
    pub fn aggregate_bonded(
        network_type: NetworkType,
        deadline: Deadline,
        inner_transactions: Vec<Transaction>,
    ) -> Result<Self> {
        Self::aggregate(network_type, deadline, AggregateKind::Bonded, inner_transactions)
    }

    fn aggregate(
        network_type: NetworkType,
        deadline: Deadline,
        kind: AggregateKind,
        inner_transactions: Vec<Transaction>,
    ) -> Result<Self> {
        let mut embedded = Vec::with_capacity(inner_transactions.len());
        for (index, inner) in inner_transactions.iter().enumerate() {
            if inner.is_aggregate() {
                return Err(SdkError::invalid(format!(
                    "inner transaction {index} is an aggregate; aggregates cannot be embedded"
                )));
            }
            if inner.signer().is_none() {
                return Err(SdkError::invalid(format!(
                    "inner transaction {index} ({}) has no signer",
                    inner.transaction_type()
                )));
            }
            if inner.network_type() != network_type {
                return Err(SdkError::invalid(format!(
                    "inner transaction {index} is for {} but the aggregate is for {network_type}",
                    inner.network_type()
                )));
            }
            embedded.push(inner.to_embedded());
        }

        Ok(Self::new(
            network_type,
            deadline,
            TransactionBody::Aggregate(AggregateBody {
                kind,
                inner_transactions: embedded,
                cosignatures: Vec::new(),
            }),
        ))
    }

    // -- Envelope overrides --------------------------------------------------

    pub fn max_fee(mut self, max_fee: u64) -> Self {
        self.max_fee = max_fee;
        self
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    /// Set the signer, required for transactions that will be embedded.
    pub fn signer(mut self, signer: PublicKey) -> Self {
        self.signer = Some(signer);
        self
    }

    pub fn transaction_info(mut self, info: TransactionInfo) -> Self {
        self.transaction_info = Some(info);
        self
    }

    /// Cosignatures of an aggregate. Rejected by `build()` on other types.
    pub fn cosignatures(mut self, cosignatures: Vec<Cosignature>) -> Self {
        self.cosignatures = Some(cosignatures);
        self
    }

    /// Produce the immutable, unsigned [`Transaction`].
    pub fn build(self) -> Result<Transaction> {
        let mut body = self.body;
        if let Some(cosignatures) = self.cosignatures {
            match &mut body {
                TransactionBody::Aggregate(aggregate) => aggregate.cosignatures = cosignatures,
                other => {
                    return Err(SdkError::invalid(format!(
                        "cosignatures only apply to aggregates, not {}",
                        other.transaction_type()
                    )))
                }
            }
        }

        let mut tx = Transaction::from_parts(
            self.network_type,
            self.version,
            self.max_fee,
            self.deadline,
            self.signer,
            None,
            body,
        );
        tx.transaction_info = self.transaction_info;
        Ok(tx)
    }
}

fn check_network(field: &str, address: &Address, network_type: NetworkType) -> Result<()> {
    if address.network_type() != network_type {
        return Err(SdkError::invalid(format!(
            "{field} address {address} belongs to {} but the transaction is for {network_type}",
            address.network_type()
        )));
    }
    Ok(())
}

fn check_count(field: &str, count: usize, max: usize) -> Result<()> {
    if count > max {
        return Err(SdkError::invalid(format!(
            "{count} {field} exceed the maximum of {max}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
