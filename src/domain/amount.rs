use std::fmt;
use std::ops::{Add, Sub};

use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer, ser};
use serde_json::{Number, Value};

use super::error::DomainError;

/// Trait representing a monetary amount with fixed precision
pub trait AmountType:
    Copy
    + Ord
    + Add<Output = Self>
    + Sub<Output = Self>
    + Default
    + Send
    + Sync
    + fmt::Debug
    + fmt::Display
    + Serialize
    + DeserializeOwned
    + 'static
{
    /// Parse from decimal string (e.g., "1.5000")
    fn from_decimal_str(s: &str) -> Result<Self, DomainError>;

    /// Convert to decimal string with 4 decimal places
    fn to_decimal_string(&self) -> String;

    /// Checked addition, returns None on overflow
    fn checked_add(&self, other: Self) -> Option<Self>;

    /// Checked subtraction, returns None on underflow
    fn checked_sub(&self, other: Self) -> Option<Self>;

    /// Zero value
    fn zero() -> Self;

    fn is_positive(&self) -> bool {
        *self > Self::zero()
    }
}

/// Fixed-point decimal backed by an i64 scaled by 10,000.
///
/// Balances are never stored as floats; JSON floats are converted through
/// their shortest decimal representation on the way in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct FixedPoint(i64);

impl FixedPoint {
    const SCALE: i64 = 10_000;

    /// Create from raw scaled value
    pub fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from a whole number of units
    pub fn from_units(units: i64) -> Option<Self> {
        units.checked_mul(Self::SCALE).map(Self)
    }

    /// Get raw scaled value
    pub fn raw(&self) -> i64 {
        self.0
    }

    /// Decimal text without trailing fractional zeros
    fn to_json_text(self) -> String {
        let text = self.to_decimal_string();
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    }

    fn from_json_number(number: &Number) -> Result<Self, DomainError> {
        let text = number.to_string();
        if !text.contains(['e', 'E']) {
            return Self::from_decimal_str(&text);
        }
        // Exponent notation goes through the shortest f64 representation
        match number.as_f64() {
            Some(value) if value.is_finite() => Self::from_decimal_str(&value.to_string()),
            _ => Err(DomainError::InvalidAmount),
        }
    }
}

impl AmountType for FixedPoint {
    fn from_decimal_str(s: &str) -> Result<Self, DomainError> {
        let s = s.trim();

        let (is_negative, s) = match s.strip_prefix('-') {
            Some(stripped) => (true, stripped),
            None => (false, s),
        };

        let (integer_part, decimal_part) = match s.split_once('.') {
            Some((int, dec)) if !dec.contains('.') => (int, dec),
            Some(_) => return Err(DomainError::InvalidAmount),
            None => (s, ""),
        };

        if decimal_part.len() > 4 || !decimal_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidAmount);
        }

        // i64::from_str accepts a leading '+', which would let "-+1" through
        if !integer_part.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidAmount);
        }

        let integer: i64 = integer_part
            .parse()
            .map_err(|_| DomainError::InvalidAmount)?;

        let decimal: i64 = format!("{:0<4}", decimal_part)
            .parse()
            .map_err(|_| DomainError::InvalidAmount)?;

        // Negatives are built downwards so i64::MIN stays reachable
        let raw = integer
            .checked_mul(Self::SCALE)
            .and_then(|v| {
                if is_negative {
                    v.checked_neg().and_then(|v| v.checked_sub(decimal))
                } else {
                    v.checked_add(decimal)
                }
            })
            .ok_or(DomainError::Overflow)?;

        Ok(Self(raw))
    }

    fn to_decimal_string(&self) -> String {
        let abs_value = self.0.unsigned_abs();
        let scale = Self::SCALE as u64;

        let sign = if self.0 < 0 { "-" } else { "" };
        format!("{}{}.{:04}", sign, abs_value / scale, abs_value % scale)
    }

    fn checked_add(&self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    fn checked_sub(&self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    fn zero() -> Self {
        Self(0)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

impl Add for FixedPoint {
    type Output = Self;

    /// Saturates at the i64 bounds; ledger mutations use `checked_add`
    fn add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    /// Saturates at the i64 bounds; ledger mutations use `checked_sub`
    fn sub(self, other: Self) -> Self {
        Self(self.0.saturating_sub(other.0))
    }
}

impl Serialize for FixedPoint {
    /// Written as an exact JSON number, e.g. `1.5` or `922337203685477.5807`
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let number: Number = self.to_json_text().parse().map_err(ser::Error::custom)?;
        number.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for FixedPoint {
    /// Accepts JSON numbers and decimal strings; number text is parsed as
    /// written, never through a float
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Value::deserialize(deserializer)? {
            Value::Number(number) => Self::from_json_number(&number).map_err(de::Error::custom),
            Value::String(text) => Self::from_decimal_str(&text).map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "expected a decimal amount with at most 4 fractional digits, found {other}"
            ))),
        }
    }
}
