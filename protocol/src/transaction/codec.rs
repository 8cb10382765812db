//! # Binary Codec
//!
//! Byte-exact encoding of transactions in the ledger's two layouts. All
//! integers are little-endian.
//!
//! ```text
//! standalone: size(4) reserved(4) signature(64) signer(32) reserved(4)
//!             version(1) network(1) type(2) max_fee(8) deadline(8) body
//! embedded:   size(4) reserved(4) signer(32) reserved(4)
//!             version(1) network(1) type(2) body
//! ```
//!
//! Inside an aggregate every embedded transaction is zero-padded to an 8-byte
//! boundary. Its `size` excludes the padding, and the aggregate's
//! transactions hash is the Merkle root over the SHA3-256 of each unpadded
//! embedded transaction.
//!
//! Decoding is the exact inverse and fails with
//! [`SdkError::MalformedBinary`] on anything it cannot account for.

use tracing::trace;

use super::builder::Transaction;
use super::types::{
    AggregateBody, AggregateKind, Cosignature, Message, MessageType, MetadataBody, MetadataTarget,
    MosaicSupplyRevocationBody, MultisigAccountModificationBody, TransactionBody,
    TransactionType, TransferBody,
};
use crate::config::{
    ADDRESS_DECODED_LENGTH, AGGREGATE_ALIGNMENT, COSIGNATURE_SIZE, EMBEDDED_HEADER_SIZE,
    HASH_LENGTH, PUBLIC_KEY_LENGTH, SIGNATURE_LENGTH, STANDALONE_HEADER_SIZE,
};
use crate::crypto::hash::{merkle_root, sha3_256};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Result, SdkError};
use crate::model::address::Address;
use crate::model::network::NetworkType;
use crate::model::primitives::{Amount, Deadline, Mosaic, MosaicId, NamespaceId};

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

pub(crate) fn encode_standalone(tx: &Transaction) -> Result<Vec<u8>> {
    let body = encode_body(tx.body())?;
    let size = STANDALONE_HEADER_SIZE + body.len();

    let mut buf = Vec::with_capacity(size);
    buf.extend_from_slice(&to_u32(size, "transaction size")?.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    match tx.signature() {
        Some(signature) => buf.extend_from_slice(signature.as_bytes()),
        None => buf.extend_from_slice(&[0u8; SIGNATURE_LENGTH]),
    }
    put_signer(&mut buf, tx.signer());
    buf.extend_from_slice(&[0u8; 4]);
    buf.push(tx.version());
    buf.push(tx.network_type().value());
    buf.extend_from_slice(&tx.transaction_type().code().to_le_bytes());
    buf.extend_from_slice(&tx.max_fee().to_le_bytes());
    buf.extend_from_slice(&tx.deadline().value().to_le_bytes());
    buf.extend_from_slice(&body);

    trace!(tx_type = %tx.transaction_type(), size, "encoded standalone transaction");
    Ok(buf)
}

pub(crate) fn encode_embedded(tx: &Transaction) -> Result<Vec<u8>> {
    let body = encode_body(tx.body())?;
    let size = EMBEDDED_HEADER_SIZE + body.len();

    let mut buf = Vec::with_capacity(size);
    buf.extend_from_slice(&to_u32(size, "embedded transaction size")?.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    put_signer(&mut buf, tx.signer());
    buf.extend_from_slice(&[0u8; 4]);
    buf.push(tx.version());
    buf.push(tx.network_type().value());
    buf.extend_from_slice(&tx.transaction_type().code().to_le_bytes());
    buf.extend_from_slice(&body);
    Ok(buf)
}

/// Merkle root over the embedded forms of `inner_transactions`, as stored in
/// an aggregate body.
pub fn transactions_hash(inner_transactions: &[Transaction]) -> Result<[u8; HASH_LENGTH]> {
    let hashes = inner_transactions
        .iter()
        .map(|tx| encode_embedded(tx).map(|bytes| sha3_256(&bytes)))
        .collect::<Result<Vec<_>>>()?;
    Ok(merkle_root(&hashes))
}

fn put_signer(buf: &mut Vec<u8>, signer: Option<&PublicKey>) {
    match signer {
        Some(signer) => buf.extend_from_slice(signer.as_bytes()),
        None => buf.extend_from_slice(&[0u8; PUBLIC_KEY_LENGTH]),
    }
}

fn encode_body(body: &TransactionBody) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    match body {
        TransactionBody::Transfer(transfer) => encode_transfer(&mut buf, transfer)?,
        TransactionBody::Metadata(metadata) => encode_metadata(&mut buf, metadata)?,
        TransactionBody::MosaicSupplyRevocation(revocation) => {
            buf.extend_from_slice(revocation.source_address.as_bytes());
            put_mosaic(&mut buf, &revocation.mosaic);
        }
        TransactionBody::MultisigAccountModification(modification) => {
            encode_multisig_modification(&mut buf, modification)?
        }
        TransactionBody::Aggregate(aggregate) => encode_aggregate(&mut buf, aggregate)?,
    }
    Ok(buf)
}

fn encode_transfer(buf: &mut Vec<u8>, body: &TransferBody) -> Result<()> {
    let message_size = body.message.as_ref().map_or(0, Message::size);

    buf.extend_from_slice(body.recipient_address.as_bytes());
    buf.extend_from_slice(&to_u16(message_size, "message size")?.to_le_bytes());
    buf.push(to_u8(body.mosaics.len(), "mosaics count")?);
    buf.extend_from_slice(&[0u8; 4]);
    buf.push(0);
    for mosaic in &body.mosaics {
        put_mosaic(buf, mosaic);
    }
    if let Some(message) = &body.message {
        buf.push(message.message_type.value());
        buf.extend_from_slice(&message.payload);
    }
    Ok(())
}

fn encode_metadata(buf: &mut Vec<u8>, body: &MetadataBody) -> Result<()> {
    buf.extend_from_slice(body.target_address.as_bytes());
    buf.extend_from_slice(&body.scoped_metadata_key.to_le_bytes());
    match body.target {
        MetadataTarget::Account => {}
        MetadataTarget::Mosaic(id) => buf.extend_from_slice(&id.id().to_le_bytes()),
        MetadataTarget::Namespace(id) => buf.extend_from_slice(&id.id().to_le_bytes()),
    }
    buf.extend_from_slice(&body.value_size_delta.to_le_bytes());
    buf.extend_from_slice(&to_u16(body.value.len(), "metadata value size")?.to_le_bytes());
    buf.extend_from_slice(&body.value);
    Ok(())
}

fn encode_multisig_modification(
    buf: &mut Vec<u8>,
    body: &MultisigAccountModificationBody,
) -> Result<()> {
    buf.extend_from_slice(&body.min_removal_delta.to_le_bytes());
    buf.extend_from_slice(&body.min_approval_delta.to_le_bytes());
    buf.push(to_u8(body.address_additions.len(), "address additions count")?);
    buf.push(to_u8(body.address_deletions.len(), "address deletions count")?);
    buf.extend_from_slice(&[0u8; 4]);
    for address in body.address_additions.iter().chain(&body.address_deletions) {
        buf.extend_from_slice(address.as_bytes());
    }
    Ok(())
}

fn encode_aggregate(buf: &mut Vec<u8>, body: &AggregateBody) -> Result<()> {
    let mut payload = Vec::new();
    let mut hashes = Vec::with_capacity(body.inner_transactions.len());
    for inner in &body.inner_transactions {
        let embedded = encode_embedded(inner)?;
        hashes.push(sha3_256(&embedded));
        payload.extend_from_slice(&embedded);
        payload.resize(payload.len() + padding(embedded.len()), 0);
    }

    buf.extend_from_slice(&merkle_root(&hashes));
    buf.extend_from_slice(&to_u32(payload.len(), "aggregate payload size")?.to_le_bytes());
    buf.extend_from_slice(&[0u8; 4]);
    buf.extend_from_slice(&payload);
    for cosignature in &body.cosignatures {
        buf.extend_from_slice(&cosignature.version.to_le_bytes());
        buf.extend_from_slice(cosignature.signer.as_bytes());
        buf.extend_from_slice(cosignature.signature.as_bytes());
    }
    Ok(())
}

fn put_mosaic(buf: &mut Vec<u8>, mosaic: &Mosaic) {
    buf.extend_from_slice(&mosaic.id.id().to_le_bytes());
    buf.extend_from_slice(&mosaic.amount.value().to_le_bytes());
}

fn padding(size: usize) -> usize {
    (AGGREGATE_ALIGNMENT - size % AGGREGATE_ALIGNMENT) % AGGREGATE_ALIGNMENT
}

fn to_u8(value: usize, field: &str) -> Result<u8> {
    u8::try_from(value).map_err(|_| SdkError::invalid(format!("{field} {value} exceeds u8")))
}

fn to_u16(value: usize, field: &str) -> Result<u16> {
    u16::try_from(value).map_err(|_| SdkError::invalid(format!("{field} {value} exceeds u16")))
}

fn to_u32(value: usize, field: &str) -> Result<u32> {
    u32::try_from(value).map_err(|_| SdkError::invalid(format!("{field} {value} exceeds u32")))
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

pub(crate) fn decode_standalone(bytes: &[u8]) -> Result<Transaction> {
    let mut r = Reader::new(bytes);
    let size = r.u32("size")?;
    check_size(size, bytes.len())?;
    r.take(4, "header reserved")?;
    let signature = r.array::<SIGNATURE_LENGTH>("signature")?;
    let signer = r.array::<PUBLIC_KEY_LENGTH>("signer")?;
    r.take(4, "entity reserved")?;
    let version = r.u8("version")?;
    let network_type = read_network(&mut r)?;
    let transaction_type = read_type(&mut r)?;
    let max_fee = r.u64("max fee")?;
    let deadline = r.u64("deadline")?;
    let body = decode_body(&mut r, transaction_type)?;
    r.finish(transaction_type)?;

    trace!(tx_type = %transaction_type, size, "decoded standalone transaction");
    Ok(Transaction::from_parts(
        network_type,
        version,
        max_fee,
        Deadline::new(deadline),
        non_zero_signer(signer),
        non_zero_signature(signature),
        body,
    ))
}

pub(crate) fn decode_embedded(bytes: &[u8]) -> Result<Transaction> {
    let mut r = Reader::new(bytes);
    let size = r.u32("size")?;
    check_size(size, bytes.len())?;
    r.take(4, "header reserved")?;
    let signer = r.array::<PUBLIC_KEY_LENGTH>("signer")?;
    r.take(4, "entity reserved")?;
    let version = r.u8("version")?;
    let network_type = read_network(&mut r)?;
    let transaction_type = read_type(&mut r)?;
    let body = decode_body(&mut r, transaction_type)?;
    r.finish(transaction_type)?;

    Ok(Transaction::from_parts(
        network_type,
        version,
        0,
        Deadline::new(0),
        non_zero_signer(signer),
        None,
        body,
    ))
}

fn check_size(size: u32, actual: usize) -> Result<()> {
    if size as usize != actual {
        return Err(SdkError::malformed(format!(
            "size field says {size} bytes but the buffer holds {actual}"
        )));
    }
    Ok(())
}

fn read_network(r: &mut Reader<'_>) -> Result<NetworkType> {
    let value = r.u8("network type")?;
    NetworkType::from_value(value)
        .ok_or_else(|| SdkError::malformed(format!("unknown network type 0x{value:02X}")))
}

fn read_type(r: &mut Reader<'_>) -> Result<TransactionType> {
    let code = r.u16("transaction type")?;
    TransactionType::from_code(code)
        .ok_or_else(|| SdkError::malformed(format!("unknown transaction type 0x{code:04X}")))
}

fn non_zero_signer(bytes: [u8; PUBLIC_KEY_LENGTH]) -> Option<PublicKey> {
    (bytes != [0u8; PUBLIC_KEY_LENGTH]).then(|| PublicKey::from_bytes(bytes))
}

fn non_zero_signature(bytes: [u8; SIGNATURE_LENGTH]) -> Option<Signature> {
    (bytes != [0u8; SIGNATURE_LENGTH]).then(|| Signature::from_bytes(bytes))
}

fn decode_body(r: &mut Reader<'_>, transaction_type: TransactionType) -> Result<TransactionBody> {
    let body = match transaction_type {
        TransactionType::Transfer => TransactionBody::Transfer(decode_transfer(r)?),
        TransactionType::AccountMetadata => {
            TransactionBody::Metadata(decode_metadata(r, |_| Ok(MetadataTarget::Account))?)
        }
        TransactionType::MosaicMetadata => TransactionBody::Metadata(decode_metadata(r, |r| {
            Ok(MetadataTarget::Mosaic(MosaicId::new(r.u64("target mosaic id")?)))
        })?),
        TransactionType::NamespaceMetadata => {
            TransactionBody::Metadata(decode_metadata(r, |r| {
                Ok(MetadataTarget::Namespace(NamespaceId::new(r.u64("target namespace id")?)))
            })?)
        }
        TransactionType::MosaicSupplyRevocation => {
            TransactionBody::MosaicSupplyRevocation(MosaicSupplyRevocationBody {
                source_address: read_address(r, "source address")?,
                mosaic: read_mosaic(r)?,
            })
        }
        TransactionType::MultisigAccountModification => {
            TransactionBody::MultisigAccountModification(decode_multisig_modification(r)?)
        }
        TransactionType::AggregateComplete => {
            TransactionBody::Aggregate(decode_aggregate(r, AggregateKind::Complete)?)
        }
        TransactionType::AggregateBonded => {
            TransactionBody::Aggregate(decode_aggregate(r, AggregateKind::Bonded)?)
        }
    };
    Ok(body)
}

fn decode_transfer(r: &mut Reader<'_>) -> Result<TransferBody> {
    let recipient_address = read_address(r, "recipient address")?;
    let message_size = r.u16("message size")?;
    let mosaics_count = r.u8("mosaics count")?;
    r.take(4, "transfer reserved")?;
    r.take(1, "transfer reserved")?;
    let mosaics = (0..mosaics_count)
        .map(|_| read_mosaic(r))
        .collect::<Result<Vec<_>>>()?;

    let message = match message_size {
        0 => None,
        size => {
            let bytes = r.take(size as usize, "message")?;
            let message_type = MessageType::from_value(bytes[0]).ok_or_else(|| {
                SdkError::malformed(format!("unknown message type 0x{:02X}", bytes[0]))
            })?;
            Some(Message::new(message_type, &bytes[1..]))
        }
    };

    Ok(TransferBody {
        recipient_address,
        mosaics,
        message,
    })
}

fn decode_metadata(
    r: &mut Reader<'_>,
    read_target: impl FnOnce(&mut Reader<'_>) -> Result<MetadataTarget>,
) -> Result<MetadataBody> {
    let target_address = read_address(r, "target address")?;
    let scoped_metadata_key = r.u64("scoped metadata key")?;
    let target = read_target(r)?;
    let value_size_delta = r.i16("value size delta")?;
    let value_size = r.u16("value size")?;
    let value = r.take(value_size as usize, "value")?.to_vec();

    Ok(MetadataBody {
        target_address,
        scoped_metadata_key,
        target,
        value_size_delta,
        value,
    })
}

fn decode_multisig_modification(r: &mut Reader<'_>) -> Result<MultisigAccountModificationBody> {
    let min_removal_delta = r.i8("min removal delta")?;
    let min_approval_delta = r.i8("min approval delta")?;
    let additions = r.u8("address additions count")?;
    let deletions = r.u8("address deletions count")?;
    r.take(4, "multisig reserved")?;
    let address_additions = (0..additions)
        .map(|_| read_address(r, "address addition"))
        .collect::<Result<Vec<_>>>()?;
    let address_deletions = (0..deletions)
        .map(|_| read_address(r, "address deletion"))
        .collect::<Result<Vec<_>>>()?;

    Ok(MultisigAccountModificationBody {
        min_removal_delta,
        min_approval_delta,
        address_additions,
        address_deletions,
    })
}

fn decode_aggregate(r: &mut Reader<'_>, kind: AggregateKind) -> Result<AggregateBody> {
    let declared_hash = r.array::<HASH_LENGTH>("transactions hash")?;
    let payload_size = r.u32("payload size")?;
    r.take(4, "aggregate reserved")?;
    let payload = r.take(payload_size as usize, "embedded transactions")?;

    let mut inner = Reader::new(payload);
    let mut inner_transactions = Vec::new();
    let mut hashes = Vec::new();
    while inner.remaining() > 0 {
        let size = inner.peek_u32("embedded size")? as usize;
        if size < EMBEDDED_HEADER_SIZE {
            return Err(SdkError::malformed(format!(
                "embedded transaction of {size} bytes is shorter than its header"
            )));
        }
        let bytes = inner.take(size, "embedded transaction")?;
        let tx = decode_embedded(bytes)?;
        if tx.is_aggregate() {
            return Err(SdkError::malformed("aggregate embedded inside an aggregate"));
        }
        hashes.push(sha3_256(bytes));
        inner_transactions.push(tx);
        inner.take(padding(size), "embedded padding")?;
    }

    if merkle_root(&hashes) != declared_hash {
        return Err(SdkError::malformed(
            "transactions hash does not match the embedded transactions",
        ));
    }

    if r.remaining() % COSIGNATURE_SIZE != 0 {
        return Err(SdkError::malformed(format!(
            "{} trailing bytes are not a whole number of cosignatures",
            r.remaining()
        )));
    }
    let mut cosignatures = Vec::with_capacity(r.remaining() / COSIGNATURE_SIZE);
    while r.remaining() > 0 {
        cosignatures.push(Cosignature {
            version: r.u64("cosignature version")?,
            signer: PublicKey::from_bytes(r.array("cosignature signer")?),
            signature: Signature::from_bytes(r.array("cosignature signature")?),
        });
    }

    Ok(AggregateBody {
        kind,
        inner_transactions,
        cosignatures,
    })
}

fn read_address(r: &mut Reader<'_>, field: &str) -> Result<Address> {
    let bytes = r.array::<ADDRESS_DECODED_LENGTH>(field)?;
    Address::from_bytes(bytes).map_err(|e| SdkError::malformed(format!("{field}: {e}")))
}

fn read_mosaic(r: &mut Reader<'_>) -> Result<Mosaic> {
    Ok(Mosaic::new(
        MosaicId::new(r.u64("mosaic id")?),
        Amount::new(r.u64("mosaic amount")?),
    ))
}

// ---------------------------------------------------------------------------
// Reader
// ---------------------------------------------------------------------------

/// Cursor over a borrowed buffer that turns every short read into a
/// `MalformedBinary` naming the field being read.
struct Reader<'a> {
    bytes: &'a [u8],
    offset: usize,
}

impl<'a> Reader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, offset: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.offset
    }

    fn take(&mut self, len: usize, field: &str) -> Result<&'a [u8]> {
        if len > self.remaining() {
            return Err(SdkError::malformed(format!(
                "truncated at offset {}: {field} needs {len} bytes, {} left",
                self.offset,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.offset..self.offset + len];
        self.offset += len;
        Ok(slice)
    }

    fn array<const N: usize>(&mut self, field: &str) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N, field)?);
        Ok(out)
    }

    fn peek_u32(&self, field: &str) -> Result<u32> {
        let mut probe = Reader {
            bytes: self.bytes,
            offset: self.offset,
        };
        probe.u32(field)
    }

    fn u8(&mut self, field: &str) -> Result<u8> {
        Ok(self.array::<1>(field)?[0])
    }

    fn i8(&mut self, field: &str) -> Result<i8> {
        Ok(i8::from_le_bytes(self.array(field)?))
    }

    fn u16(&mut self, field: &str) -> Result<u16> {
        Ok(u16::from_le_bytes(self.array(field)?))
    }

    fn i16(&mut self, field: &str) -> Result<i16> {
        Ok(i16::from_le_bytes(self.array(field)?))
    }

    fn u32(&mut self, field: &str) -> Result<u32> {
        Ok(u32::from_le_bytes(self.array(field)?))
    }

    fn u64(&mut self, field: &str) -> Result<u64> {
        Ok(u64::from_le_bytes(self.array(field)?))
    }

    fn finish(&self, transaction_type: TransactionType) -> Result<()> {
        match self.remaining() {
            0 => Ok(()),
            n => Err(SdkError::malformed(format!(
                "{n} trailing bytes after {transaction_type} body"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::model::account::PublicAccount;
    use crate::model::primitives::Currency;
    use crate::transaction::builder::TransactionFactory;
    use crate::transaction::metadata::MetadataValue;

    const SIGNER: &str = "F6503F78FBF99544B906872DDB392F4BE707180D285E7919DBACEF2E9573B1E6";
    const SOURCE: &str = "SDZWZJUAYNOWGBTCUDBY3SE5JF4NCC2RDM6SIGQ";
    const REVOCATION_BODY: &str =
        "90F36CA680C35D630662A0C38DC89D4978D10B511B3D241A44B262C46CEABB858096980000000000";

    fn signer() -> PublicKey {
        PublicKey::from_hex(SIGNER).unwrap()
    }

    fn source() -> Address {
        Address::from_raw_address(SOURCE).unwrap()
    }

    fn revocation() -> Transaction {
        TransactionFactory::mosaic_supply_revocation(
            NetworkType::MijinTest,
            Deadline::new(1),
            source(),
            Currency::CAT_CURRENCY.create_relative(10).unwrap(),
        )
        .unwrap()
        .signer(signer())
        .build()
        .unwrap()
    }

    fn roundtrip(tx: &Transaction) {
        let bytes = tx.serialize().unwrap();
        assert_eq!(&decode_standalone(&bytes).unwrap(), tx);
    }

    #[test]
    fn revocation_standalone_fixture() {
        let expected = format!(
            "A800000000000000{}{SIGNER}0000000001904D4300000000000000000100000000000000{REVOCATION_BODY}",
            "00".repeat(64)
        );
        assert_eq!(hex::encode_upper(revocation().serialize().unwrap()), expected);
    }

    #[test]
    fn revocation_embedded_fixture() {
        let expected = format!("5800000000000000{SIGNER}0000000001904D43{REVOCATION_BODY}");
        assert_eq!(hex::encode_upper(revocation().serialize_embedded().unwrap()), expected);
    }

    #[test]
    fn encoding_is_deterministic() {
        assert_eq!(revocation().serialize().unwrap(), revocation().serialize().unwrap());
    }

    #[test]
    fn unsigned_transaction_encodes_zero_signer() {
        let tx = TransactionFactory::mosaic_supply_revocation(
            NetworkType::MijinTest,
            Deadline::new(1),
            source(),
            Currency::CAT_CURRENCY.create_absolute(1),
        )
        .unwrap()
        .build()
        .unwrap();
        let bytes = tx.serialize().unwrap();
        assert!(bytes[8..108].iter().all(|b| *b == 0));
        assert!(decode_standalone(&bytes).unwrap().signer().is_none());
    }

    #[test]
    fn revocation_roundtrip_both_forms() {
        let tx = revocation();
        roundtrip(&tx);
        let embedded = tx.serialize_embedded().unwrap();
        let decoded = decode_embedded(&embedded).unwrap();
        assert_eq!(decoded.signer(), Some(&signer()));
        assert_eq!(decoded.deadline().value(), 0);
    }

    #[test]
    fn transfer_roundtrip() {
        let tx = TransactionFactory::transfer(
            NetworkType::MijinTest,
            Deadline::new(77),
            source(),
            vec![
                Currency::CAT_CURRENCY.create_absolute(5),
                Mosaic::new(MosaicId::new(1), Amount::new(2)),
            ],
            Some(Message::plain("symbol")),
        )
        .unwrap()
        .max_fee(20_000)
        .build()
        .unwrap();
        roundtrip(&tx);
        assert_eq!(tx.size().unwrap(), STANDALONE_HEADER_SIZE + 24 + 8 + 2 * 16 + 7);
    }

    #[test]
    fn transfer_without_message_roundtrip() {
        let tx = TransactionFactory::transfer(
            NetworkType::MijinTest,
            Deadline::new(1),
            source(),
            Vec::new(),
            None,
        )
        .unwrap()
        .build()
        .unwrap();
        roundtrip(&tx);
    }

    #[test]
    fn metadata_roundtrip_all_targets() {
        let target = PublicAccount::new(signer(), NetworkType::MijinTest);
        let value = || MetadataValue::try_from("some value").unwrap();
        let deadline = Deadline::new(1);
        let network = NetworkType::MijinTest;
        let txs = [
            TransactionFactory::account_metadata(network, deadline, &target, 1, value()),
            TransactionFactory::mosaic_metadata(
                network,
                deadline,
                &target,
                2,
                MosaicId::new(0xABCD),
                value(),
            ),
            TransactionFactory::namespace_metadata(
                network,
                deadline,
                &target,
                3,
                NamespaceId::from_name("cat.currency").unwrap(),
                value(),
            ),
        ];
        for factory in txs {
            roundtrip(&factory.unwrap().build().unwrap());
        }
    }

    #[test]
    fn multisig_modification_roundtrip() {
        let other = Address::from_public_key(&KeyPair::generate().public_key(), NetworkType::MijinTest);
        let tx = TransactionFactory::multisig_account_modification(
            NetworkType::MijinTest,
            Deadline::new(1),
            2,
            -1,
            vec![source()],
            vec![other],
        )
        .unwrap()
        .build()
        .unwrap();
        roundtrip(&tx);
    }

    #[test]
    fn aggregate_roundtrip_with_padding_and_cosignatures() {
        let kp = KeyPair::generate();
        let transfer = TransactionFactory::transfer(
            NetworkType::MijinTest,
            Deadline::new(1),
            source(),
            Vec::new(),
            Some(Message::plain("odd")),
        )
        .unwrap()
        .signer(kp.public_key())
        .build()
        .unwrap();
        let cosignature = Cosignature {
            version: 0,
            signer: kp.public_key(),
            signature: kp.sign(b"anything"),
        };

        let aggregate = TransactionFactory::aggregate_bonded(
            NetworkType::MijinTest,
            Deadline::new(1),
            vec![transfer.clone(), revocation()],
        )
        .unwrap()
        .cosignatures(vec![cosignature])
        .build()
        .unwrap();

        // 24 + 2 + 1 + 5 + 4 byte message = 36 body bytes, padded by 4.
        assert_eq!(transfer.serialize_embedded().unwrap().len(), 84);
        let bytes = aggregate.serialize().unwrap();
        assert_eq!(bytes.len(), STANDALONE_HEADER_SIZE + 40 + 88 + 88 + COSIGNATURE_SIZE);
        roundtrip(&aggregate);
    }

    #[test]
    fn empty_aggregate_has_zero_transactions_hash() {
        let aggregate = TransactionFactory::aggregate_complete(
            NetworkType::MijinTest,
            Deadline::new(1),
            Vec::new(),
        )
        .unwrap()
        .build()
        .unwrap();
        let bytes = aggregate.serialize().unwrap();
        assert!(bytes[STANDALONE_HEADER_SIZE..STANDALONE_HEADER_SIZE + 32].iter().all(|b| *b == 0));
        assert_eq!(transactions_hash(&[]).unwrap(), [0u8; 32]);
        roundtrip(&aggregate);
    }

    #[test]
    fn truncated_buffer_is_malformed() {
        let bytes = revocation().serialize().unwrap();
        for len in [0, 3, 100, bytes.len() - 1] {
            let err = decode_standalone(&bytes[..len]).unwrap_err();
            assert!(matches!(err, SdkError::MalformedBinary(_)), "len {len}: {err}");
        }
    }

    #[test]
    fn size_mismatch_is_malformed() {
        let mut bytes = revocation().serialize().unwrap();
        bytes.push(0);
        let err = decode_standalone(&bytes).unwrap_err();
        assert!(err.to_string().contains("size field"));
    }

    #[test]
    fn trailing_body_bytes_are_malformed() {
        let mut bytes = revocation().serialize().unwrap();
        bytes.extend_from_slice(&[0, 0]);
        let size = bytes.len() as u32;
        bytes[..4].copy_from_slice(&size.to_le_bytes());
        let err = decode_standalone(&bytes).unwrap_err();
        assert!(err.to_string().contains("2 trailing bytes"));
    }

    #[test]
    fn unknown_type_and_network_are_malformed() {
        let mut bytes = revocation().serialize().unwrap();
        bytes[110] = 0xFF;
        assert!(decode_standalone(&bytes).unwrap_err().to_string().contains("transaction type"));

        let mut bytes = revocation().serialize().unwrap();
        bytes[109] = 0x01;
        assert!(decode_standalone(&bytes).unwrap_err().to_string().contains("network type"));
    }

    #[test]
    fn tampered_transactions_hash_is_malformed() {
        let aggregate = TransactionFactory::aggregate_complete(
            NetworkType::MijinTest,
            Deadline::new(1),
            vec![revocation()],
        )
        .unwrap()
        .build()
        .unwrap();
        let mut bytes = aggregate.serialize().unwrap();
        bytes[STANDALONE_HEADER_SIZE] ^= 0x01;
        let err = decode_standalone(&bytes).unwrap_err();
        assert!(err.to_string().contains("transactions hash"));
    }

    #[test]
    fn partial_cosignature_is_malformed() {
        let aggregate = TransactionFactory::aggregate_complete(
            NetworkType::MijinTest,
            Deadline::new(1),
            vec![revocation()],
        )
        .unwrap()
        .build()
        .unwrap();
        let mut bytes = aggregate.serialize().unwrap();
        bytes.extend_from_slice(&[0u8; 10]);
        let size = bytes.len() as u32;
        bytes[..4].copy_from_slice(&size.to_le_bytes());
        let err = decode_standalone(&bytes).unwrap_err();
        assert!(err.to_string().contains("cosignatures"));
    }
}
