//! Metadata values and the delta encoding the ledger applies to updates.
//!
//! A metadata transaction never carries the full new value of an existing
//! entry. It carries `previous XOR new` (the shorter side zero-padded) and the
//! signed length change, and the node reconstructs the new value from what it
//! already stores.

use serde::Serialize;

use crate::config::MAX_METADATA_VALUE_SIZE;
use crate::error::{Result, SdkError};

/// A metadata value ready to be placed in a metadata transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataValue {
    value: Vec<u8>,
    value_size_delta: i16,
}

impl MetadataValue {
    /// First value written under a key. The delta is the full length.
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self> {
        let value = value.into();
        let value_size_delta = checked_len(&value)?;
        Ok(Self {
            value,
            value_size_delta,
        })
    }

    /// Replace `previous` with `new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use symbol_protocol::transaction::MetadataValue;
    ///
    /// let update = MetadataValue::update(b"abc", b"ab").unwrap();
    /// assert_eq!(update.value_size_delta(), -1);
    /// assert_eq!(update.value(), &[0, 0, b'c']);
    /// ```
    pub fn update(previous: &[u8], new: &[u8]) -> Result<Self> {
        let previous_len = checked_len(previous)?;
        let new_len = checked_len(new)?;

        let width = previous.len().max(new.len());
        let value = (0..width)
            .map(|i| previous.get(i).copied().unwrap_or(0) ^ new.get(i).copied().unwrap_or(0))
            .collect();

        Ok(Self {
            value,
            value_size_delta: new_len - previous_len,
        })
    }

    pub fn value(&self) -> &[u8] {
        &self.value
    }

    pub fn value_size_delta(&self) -> i16 {
        self.value_size_delta
    }

    pub(crate) fn into_parts(self) -> (Vec<u8>, i16) {
        (self.value, self.value_size_delta)
    }
}

impl TryFrom<&str> for MetadataValue {
    type Error = SdkError;

    fn try_from(value: &str) -> Result<Self> {
        Self::new(value.as_bytes())
    }
}

fn checked_len(value: &[u8]) -> Result<i16> {
    if value.len() > MAX_METADATA_VALUE_SIZE {
        return Err(SdkError::invalid(format!(
            "metadata value of {} bytes exceeds the maximum of {MAX_METADATA_VALUE_SIZE}",
            value.len()
        )));
    }
    i16::try_from(value.len())
        .map_err(|_| SdkError::invalid("metadata value length does not fit in i16"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_value_delta_is_its_length() {
        let value = MetadataValue::try_from("hello").unwrap();
        assert_eq!(value.value(), b"hello");
        assert_eq!(value.value_size_delta(), 5);
    }

    #[test]
    fn update_xors_and_pads() {
        let update = MetadataValue::update(b"ab", b"abcd").unwrap();
        assert_eq!(update.value_size_delta(), 2);
        assert_eq!(update.value(), &[0, 0, b'c', b'd']);
    }

    #[test]
    fn update_applied_twice_restores_value() {
        let previous = b"first value";
        let update = MetadataValue::update(previous, b"second").unwrap();
        let restored: Vec<u8> = update
            .value()
            .iter()
            .enumerate()
            .map(|(i, b)| b ^ previous.get(i).copied().unwrap_or(0))
            .collect();
        assert_eq!(&restored[..6], b"second");
        assert!(restored[6..].iter().all(|b| *b == 0));
    }

    #[test]
    fn oversized_value_is_rejected() {
        let big = vec![0u8; MAX_METADATA_VALUE_SIZE + 1];
        assert!(matches!(MetadataValue::new(big), Err(SdkError::InvalidArgument(_))));
    }
}
