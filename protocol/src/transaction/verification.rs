//! Cryptographic verification of signed payloads.
//!
//! The checks are ordered from cheapest to most expensive: header length,
//! then the initiator's signature, then the recorded hash, then each
//! cosignature of an aggregate.

use tracing::debug;

use super::builder::Transaction;
use super::signing::{read_array, signing_bytes, transaction_hash, SignedTransaction};
use super::types::{Cosignature, TransactionBody};
use crate::config::{HASH_LENGTH, SIGNATURE_OFFSET, SIGNER_OFFSET};
use crate::crypto::keys::{PublicKey, Signature};
use crate::error::{Result, SdkError};
use crate::model::network::GenerationHash;

/// Verify the initiator signature embedded in a standalone payload.
///
/// # Errors
///
/// [`SdkError::MalformedBinary`] when the payload is too short to carry a
/// header, [`SdkError::VerificationFailed`] when the signature does not
/// verify.
pub fn verify_payload(payload: &[u8], generation_hash: &GenerationHash) -> Result<()> {
    let data = signing_bytes(payload, generation_hash)?;
    let signature = Signature::from_bytes(read_array(payload, SIGNATURE_OFFSET));
    let signer = PublicKey::from_bytes(read_array(payload, SIGNER_OFFSET));

    if !signer.verify(&data, &signature) {
        debug!(signer = %signer, "signature did not verify");
        return Err(SdkError::VerificationFailed {
            signer: signer.to_hex(),
        });
    }
    Ok(())
}

/// Verify a [`SignedTransaction`]: its signature, that its recorded signer
/// and hash match the payload, and every cosignature it carries.
pub fn verify_signed_transaction(
    signed: &SignedTransaction,
    generation_hash: &GenerationHash,
) -> Result<()> {
    let payload = hex::decode(signed.payload())
        .map_err(|e| SdkError::malformed(format!("payload is not hex: {e}")))?;
    verify_payload(&payload, generation_hash)?;

    let failed = || SdkError::VerificationFailed {
        signer: signed.signer().to_hex(),
    };
    if PublicKey::from_bytes(read_array(&payload, SIGNER_OFFSET)) != *signed.signer() {
        return Err(failed());
    }
    if hex::encode_upper(transaction_hash(&payload, generation_hash)?) != signed.hash() {
        return Err(failed());
    }

    verify_cosignatures(&payload, generation_hash)
}

/// Verify every cosignature of an aggregate payload against its hash.
/// Payloads of other types have none and pass.
pub fn verify_cosignatures(payload: &[u8], generation_hash: &GenerationHash) -> Result<()> {
    let tx = Transaction::deserialize(payload)?;
    let TransactionBody::Aggregate(aggregate) = tx.body() else {
        return Ok(());
    };

    let hash = transaction_hash(payload, generation_hash)?;
    for cosignature in &aggregate.cosignatures {
        if !verify_cosignature(&hash, cosignature) {
            return Err(SdkError::VerificationFailed {
                signer: cosignature.signer.to_hex(),
            });
        }
    }
    Ok(())
}

/// `true` if `cosignature` is a valid signature of `parent_hash`.
pub fn verify_cosignature(parent_hash: &[u8; HASH_LENGTH], cosignature: &Cosignature) -> bool {
    cosignature.signer.verify(parent_hash, &cosignature.signature)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::KeyPair;
    use crate::model::address::Address;
    use crate::model::network::NetworkType;
    use crate::model::primitives::{Currency, Deadline};
    use crate::transaction::builder::TransactionFactory;
    use crate::transaction::signing::{cosign_hash, sign_transaction, sign_with_cosignatories};

    fn generation_hash() -> GenerationHash {
        GenerationHash::from_bytes([0xA9; 32])
    }

    fn revocation(signer: &KeyPair) -> Transaction {
        TransactionFactory::mosaic_supply_revocation(
            NetworkType::MijinTest,
            Deadline::new(1),
            Address::from_raw_address("SDZWZJUAYNOWGBTCUDBY3SE5JF4NCC2RDM6SIGQ").unwrap(),
            Currency::CAT_CURRENCY.create_relative(10).unwrap(),
        )
        .unwrap()
        .signer(signer.public_key())
        .build()
        .unwrap()
    }

    #[test]
    fn valid_signature_passes() {
        let kp = KeyPair::generate();
        let signed = sign_transaction(&revocation(&kp), &kp, &generation_hash()).unwrap();
        assert!(verify_signed_transaction(&signed, &generation_hash()).is_ok());
    }

    #[test]
    fn tampered_body_fails() {
        let kp = KeyPair::generate();
        let signed = sign_transaction(&revocation(&kp), &kp, &generation_hash()).unwrap();
        let mut payload = hex::decode(signed.payload()).unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0x01;

        let err = verify_payload(&payload, &generation_hash()).unwrap_err();
        assert_eq!(
            err,
            SdkError::VerificationFailed {
                signer: kp.public_key().to_hex()
            }
        );
    }

    #[test]
    fn wrong_generation_hash_fails() {
        let kp = KeyPair::generate();
        let signed = sign_transaction(&revocation(&kp), &kp, &generation_hash()).unwrap();
        let other = GenerationHash::from_bytes([0x01; 32]);
        assert!(verify_signed_transaction(&signed, &other).is_err());
    }

    #[test]
    fn unsigned_payload_fails() {
        let kp = KeyPair::generate();
        let payload = revocation(&kp).serialize().unwrap();
        assert!(verify_payload(&payload, &generation_hash()).is_err());
    }

    #[test]
    fn cosignatures_verify_over_the_aggregate_hash() {
        let initiator = KeyPair::generate();
        let cosigner = KeyPair::generate();
        let aggregate = TransactionFactory::aggregate_complete(
            NetworkType::MijinTest,
            Deadline::new(1),
            vec![revocation(&cosigner)],
        )
        .unwrap()
        .build()
        .unwrap();

        let signed =
            sign_with_cosignatories(&aggregate, &initiator, &[&cosigner], &generation_hash())
                .unwrap();
        assert!(verify_signed_transaction(&signed, &generation_hash()).is_ok());

        let hash: [u8; 32] = hex::decode(signed.hash()).unwrap().try_into().unwrap();
        let detached = cosign_hash(&cosigner, signed.hash()).unwrap();
        assert!(verify_cosignature(&hash, &detached.to_cosignature()));
        assert!(!verify_cosignature(&[0u8; 32], &detached.to_cosignature()));
    }

    #[test]
    fn forged_cosignature_fails() {
        let initiator = KeyPair::generate();
        let cosigner = KeyPair::generate();
        let aggregate = TransactionFactory::aggregate_complete(
            NetworkType::MijinTest,
            Deadline::new(1),
            vec![revocation(&cosigner)],
        )
        .unwrap()
        .build()
        .unwrap();

        let signed =
            sign_with_cosignatories(&aggregate, &initiator, &[&cosigner], &generation_hash())
                .unwrap();
        let mut payload = hex::decode(signed.payload()).unwrap();
        let last = payload.len() - 1;
        payload[last] ^= 0x01;

        assert!(verify_payload(&payload, &generation_hash()).is_ok());
        let err = verify_cosignatures(&payload, &generation_hash()).unwrap_err();
        assert_eq!(
            err,
            SdkError::VerificationFailed {
                signer: cosigner.public_key().to_hex()
            }
        );
    }
}
