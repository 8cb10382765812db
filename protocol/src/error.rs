//! Error types shared by every module of the crate.
//!
//! The taxonomy is deliberately small. Construction problems surface as
//! [`SdkError::InvalidArgument`], decoding problems as
//! [`SdkError::MalformedBinary`], and key or signature problems as
//! [`SdkError::SigningError`] or [`SdkError::VerificationFailed`]. Nothing in
//! the crate retries or repairs its input.

use thiserror::Error;

use crate::crypto::keys::KeyError;

/// Errors produced by the transaction codec, the signer and the read-side models.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SdkError {
    /// A field value was rejected while building a value object.
    #[error("{0}")]
    InvalidArgument(String),

    /// A binary payload could not be decoded.
    #[error("malformed binary: {0}")]
    MalformedBinary(String),

    /// The private key was malformed or the signing primitive failed.
    #[error("signing error: {0}")]
    SigningError(String),

    /// A signature did not verify against its signer and signed bytes.
    #[error("signature verification failed for {signer}")]
    VerificationFailed {
        /// Hex-encoded public key the signature was checked against.
        signer: String,
    },
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, SdkError>;

impl SdkError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedBinary(message.into())
    }
}

impl From<KeyError> for SdkError {
    fn from(err: KeyError) -> Self {
        match err {
            KeyError::InvalidPrivateKey => Self::SigningError(err.to_string()),
            KeyError::InvalidPublicKey(_) | KeyError::InvalidSignature(_) => {
                Self::InvalidArgument(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_argument_displays_message_verbatim() {
        let err = SdkError::invalid("Receipt type: [INFLATION] is not valid.");
        assert_eq!(err.to_string(), "Receipt type: [INFLATION] is not valid.");
    }

    #[test]
    fn private_key_errors_become_signing_errors() {
        let err: SdkError = KeyError::InvalidPrivateKey.into();
        assert!(matches!(err, SdkError::SigningError(_)));
    }

    #[test]
    fn public_key_errors_become_invalid_arguments() {
        let err: SdkError = KeyError::InvalidPublicKey("zz".into()).into();
        assert!(matches!(err, SdkError::InvalidArgument(_)));
    }
}
