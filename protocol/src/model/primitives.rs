//! Fixed-width value types: mosaic and namespace ids, amounts, currencies
//! and deadlines.
//!
//! These are intentionally small and `Copy` so they can be passed around by
//! value on the encoding path.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::config::{DEFAULT_DEADLINE, MAX_NAMESPACE_DEPTH, MAX_NAMESPACE_PART_LENGTH};
use crate::crypto::hash::{sha3_256, sha3_256_multi};
use crate::error::{Result, SdkError};
use crate::model::address::Address;

fn parse_u64_hex(kind: &str, input: &str) -> Result<u64> {
    let bytes: [u8; 8] = hex::decode(input.trim())
        .ok()
        .and_then(|b| b.try_into().ok())
        .ok_or_else(|| SdkError::invalid(format!("{kind} must be 16 hex characters: {input}")))?;
    Ok(u64::from_be_bytes(bytes))
}

fn first_u64_le(hash: &[u8; 32]) -> u64 {
    let mut bytes = [0u8; 8];
    bytes.copy_from_slice(&hash[..8]);
    u64::from_le_bytes(bytes)
}

// ---------------------------------------------------------------------------
// MosaicId
// ---------------------------------------------------------------------------

/// An 8-byte mosaic identifier. Treated as opaque once constructed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MosaicId(u64);

impl MosaicId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Parse the 16-character big-endian hex form (`85BBEA6CC462B244`).
    pub fn from_hex(input: &str) -> Result<Self> {
        parse_u64_hex("mosaic id", input).map(Self)
    }

    /// Derive the id the ledger assigns to a mosaic created by `owner` with
    /// `nonce`: the low 63 bits of SHA3-256(nonce ‖ owner).
    pub fn from_nonce_and_owner(nonce: u32, owner: &Address) -> Self {
        let hash = sha3_256_multi(&[&nonce.to_le_bytes(), owner.as_bytes()]);
        Self(first_u64_le(&hash) & !(1 << 63))
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }
}

impl fmt::Display for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for MosaicId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MosaicId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// NamespaceId
// ---------------------------------------------------------------------------

/// An 8-byte namespace identifier. Generated ids always have the high bit set.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NamespaceId(u64);

impl NamespaceId {
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn from_hex(input: &str) -> Result<Self> {
        parse_u64_hex("namespace id", input).map(Self)
    }

    /// Id of a full dotted name such as `cat.currency`.
    pub fn from_name(name: &str) -> Result<Self> {
        Self::from_path(name)?
            .last()
            .copied()
            .ok_or_else(|| SdkError::invalid("namespace name must not be empty"))
    }

    /// Ids of every level of a dotted name, root first.
    pub fn from_path(name: &str) -> Result<Vec<Self>> {
        let parts: Vec<&str> = name.split('.').collect();
        if parts.len() > MAX_NAMESPACE_DEPTH {
            return Err(SdkError::invalid(format!(
                "namespace {name} has more than {MAX_NAMESPACE_DEPTH} levels"
            )));
        }

        let mut path = Vec::with_capacity(parts.len());
        let mut parent = Self(0);
        for part in parts {
            if !is_valid_namespace_part(part) {
                return Err(SdkError::invalid(format!(
                    "namespace part [{part}] of {name} is not valid"
                )));
            }
            parent = Self::child_of(parent, part);
            path.push(parent);
        }
        Ok(path)
    }

    fn child_of(parent: Self, part: &str) -> Self {
        let hash = sha3_256_multi(&[&parent.0.to_le_bytes(), part.as_bytes()]);
        Self(first_u64_le(&hash) | (1 << 63))
    }

    pub fn id(&self) -> u64 {
        self.0
    }

    pub fn to_hex(&self) -> String {
        format!("{:016X}", self.0)
    }
}

fn is_valid_namespace_part(part: &str) -> bool {
    !part.is_empty()
        && part.len() <= MAX_NAMESPACE_PART_LENGTH
        && part
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'_' || b == b'-')
}

impl fmt::Display for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for NamespaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NamespaceId({})", self.to_hex())
    }
}

// ---------------------------------------------------------------------------
// Amount & Mosaic
// ---------------------------------------------------------------------------

/// An absolute amount in the smallest unit of a mosaic.
///
/// Negative values cannot be represented; signed inputs go through
/// `TryFrom<i64>`, which rejects them.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(u64);

impl Amount {
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl TryFrom<i64> for Amount {
    type Error = SdkError;

    fn try_from(value: i64) -> Result<Self> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| SdkError::invalid(format!("amount must not be negative: {value}")))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A quantity of one mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Mosaic {
    pub id: MosaicId,
    pub amount: Amount,
}

impl Mosaic {
    pub fn new(id: MosaicId, amount: Amount) -> Self {
        Self { id, amount }
    }
}

// ---------------------------------------------------------------------------
// Currency
// ---------------------------------------------------------------------------

/// A mosaic with a known divisibility, used to turn human amounts into
/// absolute ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Currency {
    /// Dotted namespace alias, e.g. `symbol.xym`.
    pub name: &'static str,
    pub mosaic_id: MosaicId,
    /// Number of decimal places in one whole unit.
    pub divisibility: u8,
}

impl Currency {
    /// Currency of private (MIJIN) networks, aliased by `cat.currency`.
    pub const CAT_CURRENCY: Currency = Currency {
        name: "cat.currency",
        mosaic_id: MosaicId::new(0x85BB_EA6C_C462_B244),
        divisibility: 6,
    };

    /// Currency of the public networks, aliased by `symbol.xym`.
    pub const SYMBOL_XYM: Currency = Currency {
        name: "symbol.xym",
        mosaic_id: MosaicId::new(0xE74B_99BA_41F4_AFEE),
        divisibility: 6,
    };

    /// `amount` whole units, scaled by the divisibility.
    pub fn create_relative(&self, amount: u64) -> Result<Mosaic> {
        10u64
            .checked_pow(u32::from(self.divisibility))
            .and_then(|scale| amount.checked_mul(scale))
            .map(|absolute| Mosaic::new(self.mosaic_id, Amount::new(absolute)))
            .ok_or_else(|| {
                SdkError::invalid(format!(
                    "relative amount {amount} of {} overflows the absolute range",
                    self.name
                ))
            })
    }

    /// `amount` in the smallest unit.
    pub fn create_absolute(&self, amount: u64) -> Mosaic {
        Mosaic::new(self.mosaic_id, Amount::new(amount))
    }

    /// The namespace id the currency name resolves through.
    pub fn namespace_id(&self) -> Result<NamespaceId> {
        NamespaceId::from_name(self.name)
    }
}

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// Milliseconds since the network epoch after which a transaction is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Deadline(u64);

impl Deadline {
    /// Wrap a raw network-relative value.
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Two hours from now on a network whose epoch starts `epoch_adjustment`
    /// after the Unix epoch.
    pub fn create(epoch_adjustment: Duration) -> Result<Self> {
        Self::create_with(epoch_adjustment, DEFAULT_DEADLINE)
    }

    /// `duration` from now on a network whose epoch starts `epoch_adjustment`
    /// after the Unix epoch. `duration` must be non-zero so the deadline lies
    /// in the future.
    pub fn create_with(epoch_adjustment: Duration, duration: Duration) -> Result<Self> {
        if duration.is_zero() {
            return Err(SdkError::invalid("deadline duration must be greater than zero"));
        }
        let now_ms = u64::try_from(Utc::now().timestamp_millis())
            .map_err(|_| SdkError::invalid("system clock is before the Unix epoch"))?;
        let since_epoch = millis(epoch_adjustment)
            .and_then(|epoch_ms| now_ms.checked_sub(epoch_ms))
            .ok_or_else(|| {
                SdkError::invalid(format!(
                    "epoch adjustment of {}s lies in the future",
                    epoch_adjustment.as_secs()
                ))
            })?;
        millis(duration)
            .and_then(|duration_ms| since_epoch.checked_add(duration_ms))
            .map(Self)
            .ok_or_else(|| {
                SdkError::invalid(format!(
                    "deadline {}s from now overflows the deadline range",
                    duration.as_secs()
                ))
            })
    }

    pub fn value(&self) -> u64 {
        self.0
    }

    /// Wall-clock instant of the deadline. `None` if it falls outside what
    /// `chrono` can represent.
    pub fn to_datetime(&self, epoch_adjustment: Duration) -> Option<DateTime<Utc>> {
        let unix_ms = self.0.checked_add(millis(epoch_adjustment)?)?;
        DateTime::from_timestamp_millis(i64::try_from(unix_ms).ok()?)
    }
}

fn millis(duration: Duration) -> Option<u64> {
    u64::try_from(duration.as_millis()).ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::keys::PublicKey;
    use crate::model::network::NetworkType;

    #[test]
    fn mosaic_id_hex_is_big_endian() {
        let id = MosaicId::from_hex("85BBEA6CC462B244").unwrap();
        assert_eq!(id.id(), 9_636_553_580_561_478_212);
        assert_eq!(id.to_hex(), "85BBEA6CC462B244");
        assert!(MosaicId::from_hex("85BB").is_err());
    }

    #[test]
    fn mosaic_id_from_nonce_and_owner() {
        let key =
            PublicKey::from_hex("F6503F78FBF99544B906872DDB392F4BE707180D285E7919DBACEF2E9573B1E6")
                .unwrap();
        let owner = Address::from_public_key(&key, NetworkType::MijinTest);
        let id = MosaicId::from_nonce_and_owner(0, &owner);
        assert_eq!(id.to_hex(), "07440A6783D4C121");
    }

    #[test]
    fn namespace_ids_match_known_aliases() {
        assert_eq!(NamespaceId::from_name("symbol").unwrap().to_hex(), "A95F1F8A96159516");
        assert_eq!(NamespaceId::from_name("symbol.xym").unwrap().to_hex(), "E74B99BA41F4AFEE");
        assert_eq!(
            NamespaceId::from_name("cat.currency").unwrap().id(),
            Currency::CAT_CURRENCY.mosaic_id.id()
        );
    }

    #[test]
    fn namespace_path_lists_every_level() {
        let path = NamespaceId::from_path("symbol.xym").unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(path[0], NamespaceId::from_name("symbol").unwrap());
    }

    #[test]
    fn invalid_namespace_names_are_rejected() {
        assert!(NamespaceId::from_name("").is_err());
        assert!(NamespaceId::from_name("a..b").is_err());
        assert!(NamespaceId::from_name("Upper").is_err());
        assert!(NamespaceId::from_name("a.b.c.d").is_err());
        assert!(NamespaceId::from_name(&"a".repeat(65)).is_err());
    }

    #[test]
    fn negative_amounts_are_rejected() {
        assert_eq!(Amount::try_from(10i64).unwrap(), Amount::new(10));
        let err = Amount::try_from(-1i64).unwrap_err();
        assert_eq!(err, SdkError::invalid("amount must not be negative: -1"));
    }

    #[test]
    fn relative_amounts_scale_by_divisibility() {
        let mosaic = Currency::CAT_CURRENCY.create_relative(10).unwrap();
        assert_eq!(mosaic.amount.value(), 10_000_000);
        assert_eq!(mosaic.id.id(), 9_636_553_580_561_478_212);
        assert!(Currency::SYMBOL_XYM.create_relative(u64::MAX).is_err());
        assert_eq!(Currency::SYMBOL_XYM.create_absolute(5).amount.value(), 5);
    }

    #[test]
    fn deadline_is_in_the_future() {
        let epoch = Duration::from_secs(100);
        let deadline = Deadline::create(epoch).unwrap();
        let at = deadline.to_datetime(epoch).unwrap();
        assert!(at > Utc::now());
        assert!(at <= Utc::now() + chrono::Duration::hours(2));
    }

    #[test]
    fn deadline_rejects_zero_duration_and_future_epoch() {
        assert!(Deadline::create_with(Duration::from_secs(1), Duration::ZERO).is_err());
        assert!(Deadline::create(Duration::from_secs(u32::MAX as u64 * 10)).is_err());
    }

    #[test]
    fn deadline_far_past_chrono_range_has_no_datetime() {
        let epoch = Duration::from_secs(100);
        assert_eq!(Deadline::new(u64::MAX).to_datetime(epoch), None);
        assert_eq!(Deadline::new(1).to_datetime(Duration::MAX), None);
        assert_eq!(
            Deadline::new(1_000).to_datetime(epoch).map(|at| at.timestamp_millis()),
            Some(101_000)
        );
    }

    #[test]
    fn deadline_duration_overflow_is_invalid() {
        let epoch = Duration::from_secs(100);
        let err = Deadline::create_with(epoch, Duration::from_secs(u64::MAX / 1000)).unwrap_err();
        assert!(matches!(err, SdkError::InvalidArgument(_)));
        assert!(Deadline::create_with(epoch, Duration::MAX).is_err());
        assert!(Deadline::create_with(Duration::MAX, Duration::from_secs(1)).is_err());
    }
}
