//! Transaction signing with Ed25519 keypairs.
//!
//! Signing is a separate step from building because the key may not be
//! available at construction time. The input [`Transaction`] is never
//! mutated; the result is a [`SignedTransaction`] holding the announceable
//! payload and its hash.
//!
//! ```text
//! signing data = generation_hash ‖ payload[108..]             (regular)
//!              = generation_hash ‖ payload[108..108 + 52]     (aggregate)
//! hash         = SHA3-256(signature[..32] ‖ signer ‖ signing data)
//! ```
//!
//! Aggregates sign only their header and transactions hash, so cosignatures
//! can be appended after signing without invalidating the signature or
//! changing the hash.

use serde::Serialize;
use tracing::debug;

use super::builder::Transaction;
use super::types::{Cosignature, TransactionType};
use crate::config::{
    AGGREGATE_SIGNED_RANGE_LENGTH, COSIGNATURE_VERSION, HASH_LENGTH, PUBLIC_KEY_LENGTH,
    SIGNATURE_OFFSET, SIGNED_RANGE_OFFSET, SIGNER_OFFSET, STANDALONE_HEADER_SIZE, TYPE_OFFSET,
};
use crate::crypto::hash::sha3_256_multi;
use crate::crypto::keys::{KeyPair, PublicKey, Signature};
use crate::error::{Result, SdkError};
use crate::model::network::{GenerationHash, NetworkType};

// ---------------------------------------------------------------------------
// SignedTransaction
// ---------------------------------------------------------------------------

/// A signed, announceable transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTransaction {
    payload: String,
    hash: String,
    signer: PublicKey,
    transaction_type: TransactionType,
    network_type: NetworkType,
}

impl SignedTransaction {
    /// Uppercase hex of the full standalone payload.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Uppercase hex of the 32-byte transaction hash.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn signer(&self) -> &PublicKey {
        &self.signer
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }

    pub fn network_type(&self) -> NetworkType {
        self.network_type
    }

    /// Decode the payload back into a [`Transaction`].
    pub fn transaction(&self) -> Result<Transaction> {
        Transaction::from_payload(&self.payload)
    }
}

/// A cosigner's approval of an announced aggregate, identified by its hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CosignatureSignedTransaction {
    parent_hash: String,
    signature: Signature,
    signer: PublicKey,
    version: u64,
}

impl CosignatureSignedTransaction {
    pub fn parent_hash(&self) -> &str {
        &self.parent_hash
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    pub fn signer(&self) -> &PublicKey {
        &self.signer
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// The cosignature as it is stored in an aggregate body.
    pub fn to_cosignature(&self) -> Cosignature {
        Cosignature {
            version: self.version,
            signer: self.signer,
            signature: self.signature,
        }
    }
}

// ---------------------------------------------------------------------------
// Signing
// ---------------------------------------------------------------------------

/// Sign `tx` with `keypair` for the ledger identified by `generation_hash`.
///
/// The keypair's public key becomes the signer, replacing any signer set on
/// the transaction.
///
/// # Example
///
/// ```
/// use symbol_protocol::crypto::keys::KeyPair;
/// use symbol_protocol::model::{Address, Currency, Deadline, GenerationHash, NetworkType};
/// use symbol_protocol::transaction::{sign_transaction, TransactionFactory};
///
/// let kp = KeyPair::generate();
/// let tx = TransactionFactory::mosaic_supply_revocation(
///     NetworkType::MijinTest,
///     Deadline::new(1),
///     Address::from_raw_address("SDZWZJUAYNOWGBTCUDBY3SE5JF4NCC2RDM6SIGQ").unwrap(),
///     Currency::CAT_CURRENCY.create_absolute(1),
/// )
/// .unwrap()
/// .build()
/// .unwrap();
///
/// let signed = sign_transaction(&tx, &kp, &GenerationHash::from_bytes([7; 32])).unwrap();
/// assert_eq!(signed.hash().len(), 64);
/// assert!(!tx.is_signed());
/// ```
pub fn sign_transaction(
    tx: &Transaction,
    keypair: &KeyPair,
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction> {
    let (payload, hash) = sign_payload(tx, keypair, generation_hash)?;
    Ok(signed(tx, payload, &hash, keypair.public_key()))
}

/// Same as [`sign_transaction`] with the key given as 64 hex characters.
/// A malformed key is a [`SdkError::SigningError`].
pub fn sign_with_private_key(
    tx: &Transaction,
    private_key: &str,
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction> {
    let keypair = KeyPair::from_hex(private_key)?;
    sign_transaction(tx, &keypair, generation_hash)
}

/// Sign an aggregate with `initiator` and append a cosignature from each of
/// `cosignatories` over its hash.
pub fn sign_with_cosignatories(
    tx: &Transaction,
    initiator: &KeyPair,
    cosignatories: &[&KeyPair],
    generation_hash: &GenerationHash,
) -> Result<SignedTransaction> {
    if !tx.is_aggregate() {
        return Err(SdkError::invalid(format!(
            "{} is not an aggregate and cannot carry cosignatures",
            tx.transaction_type()
        )));
    }

    let (mut payload, hash) = sign_payload(tx, initiator, generation_hash)?;
    for cosignatory in cosignatories {
        payload.extend_from_slice(&COSIGNATURE_VERSION.to_le_bytes());
        payload.extend_from_slice(cosignatory.public_key().as_bytes());
        payload.extend_from_slice(cosignatory.sign(&hash).as_bytes());
    }
    let size = u32::try_from(payload.len())
        .map_err(|_| SdkError::invalid("aggregate with cosignatures exceeds u32 size"))?;
    payload[..4].copy_from_slice(&size.to_le_bytes());

    debug!(cosignatures = cosignatories.len(), "attached cosignatures");
    Ok(signed(tx, payload, &hash, initiator.public_key()))
}

/// Cosign an announced aggregate bonded given its 64-hex-character hash.
pub fn cosign_hash(keypair: &KeyPair, parent_hash: &str) -> Result<CosignatureSignedTransaction> {
    let hash: [u8; HASH_LENGTH] = hex::decode(parent_hash.trim())
        .ok()
        .and_then(|bytes| bytes.try_into().ok())
        .ok_or_else(|| {
            SdkError::invalid(format!("parent hash must be 64 hex characters: {parent_hash}"))
        })?;

    Ok(CosignatureSignedTransaction {
        parent_hash: hex::encode_upper(hash),
        signature: keypair.sign(&hash),
        signer: keypair.public_key(),
        version: COSIGNATURE_VERSION,
    })
}

fn sign_payload(
    tx: &Transaction,
    keypair: &KeyPair,
    generation_hash: &GenerationHash,
) -> Result<(Vec<u8>, [u8; HASH_LENGTH])> {
    let mut payload = tx.serialize()?;
    let signature = keypair.sign(&signing_bytes(&payload, generation_hash)?);
    let signer = keypair.public_key();

    payload[SIGNATURE_OFFSET..SIGNER_OFFSET].copy_from_slice(signature.as_bytes());
    payload[SIGNER_OFFSET..SIGNER_OFFSET + PUBLIC_KEY_LENGTH].copy_from_slice(signer.as_bytes());

    let hash = transaction_hash(&payload, generation_hash)?;
    debug!(
        tx_type = %tx.transaction_type(),
        signer = %signer,
        hash = %hex::encode_upper(hash),
        "signed transaction"
    );
    Ok((payload, hash))
}

fn signed(
    tx: &Transaction,
    payload: Vec<u8>,
    hash: &[u8; HASH_LENGTH],
    signer: PublicKey,
) -> SignedTransaction {
    SignedTransaction {
        payload: hex::encode_upper(payload),
        hash: hex::encode_upper(hash),
        signer,
        transaction_type: tx.transaction_type(),
        network_type: tx.network_type(),
    }
}

// ---------------------------------------------------------------------------
// Signed range & hash
// ---------------------------------------------------------------------------

/// The part of a standalone payload covered by the signature.
pub fn signed_range(payload: &[u8]) -> Result<&[u8]> {
    if payload.len() < STANDALONE_HEADER_SIZE {
        return Err(SdkError::malformed(format!(
            "payload of {} bytes is shorter than the {STANDALONE_HEADER_SIZE}-byte header",
            payload.len()
        )));
    }

    let code = u16::from_le_bytes([payload[TYPE_OFFSET], payload[TYPE_OFFSET + 1]]);
    let is_aggregate = TransactionType::from_code(code).is_some_and(TransactionType::is_aggregate);
    if !is_aggregate {
        return Ok(&payload[SIGNED_RANGE_OFFSET..]);
    }

    let end = SIGNED_RANGE_OFFSET + AGGREGATE_SIGNED_RANGE_LENGTH;
    payload.get(SIGNED_RANGE_OFFSET..end).ok_or_else(|| {
        SdkError::malformed(format!(
            "aggregate payload of {} bytes has no transactions hash",
            payload.len()
        ))
    })
}

/// Bytes the signer signs: generation hash followed by the signed range.
pub fn signing_bytes(payload: &[u8], generation_hash: &GenerationHash) -> Result<Vec<u8>> {
    let range = signed_range(payload)?;
    let mut data = Vec::with_capacity(generation_hash.as_bytes().len() + range.len());
    data.extend_from_slice(generation_hash.as_bytes());
    data.extend_from_slice(range);
    Ok(data)
}

/// Hash of a signed standalone payload.
pub fn transaction_hash(
    payload: &[u8],
    generation_hash: &GenerationHash,
) -> Result<[u8; HASH_LENGTH]> {
    let range = signed_range(payload)?;
    let signature = Signature::from_bytes(read_array(payload, SIGNATURE_OFFSET));
    Ok(sha3_256_multi(&[
        signature.r_part(),
        &payload[SIGNER_OFFSET..SIGNER_OFFSET + PUBLIC_KEY_LENGTH],
        generation_hash.as_bytes(),
        range,
    ]))
}

/// Copy `N` bytes at `offset`. Callers have checked the header length.
pub(crate) fn read_array<const N: usize>(payload: &[u8], offset: usize) -> [u8; N] {
    let mut out = [0u8; N];
    out.copy_from_slice(&payload[offset..offset + N]);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
