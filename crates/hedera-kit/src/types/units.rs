//! Hbar amount type.

use std::fmt::{self, Display};
use std::ops::{Add, Neg, Sub};
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ParseAmountError;

/// Tinybars in one hbar (10^8).
const TINYBAR_PER_HBAR: i64 = 100_000_000;
/// Decimal places of an hbar.
const HBAR_DECIMALS: usize = 8;

/// An hbar amount with tinybar precision (10^-8 ℏ).
///
/// Amounts are signed because transfer lists carry debits as negative values.
/// Entities that declare an amount non-negative check it at construction.
///
/// # Creating Amounts
///
/// ```
/// use hedera_kit::Hbar;
///
/// let five = Hbar::hbar(5);
/// let dust = Hbar::tinybar(1);
/// assert_eq!(five.as_tinybars(), 500_000_000);
/// assert!(dust < five);
/// ```
///
/// # Parsing from Strings
///
/// - `"5 hbar"`, `"5 HBAR"` or `"5 ℏ"` - whole hbar
/// - `"1.5 hbar"` - decimal hbar (up to 8 places)
/// - `"100 tinybar"` or `"100 tℏ"` - tinybars
///
/// Raw numbers are NOT accepted to prevent unit confusion.
///
/// ```
/// use hedera_kit::Hbar;
///
/// let amount: Hbar = "1.5 hbar".parse().unwrap();
/// assert_eq!(amount.as_tinybars(), 150_000_000);
/// assert!("150".parse::<Hbar>().is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Hbar(i64);

impl Hbar {
    /// Zero hbar.
    pub const ZERO: Self = Self(0);
    /// One tinybar.
    pub const ONE_TINYBAR: Self = Self(1);
    /// One hbar.
    pub const ONE_HBAR: Self = Self(TINYBAR_PER_HBAR);
    /// Total supply: 50 billion hbar.
    pub const MAX_SUPPLY: Self = Self(50_000_000_000 * TINYBAR_PER_HBAR);

    /// Create from whole hbar.
    pub const fn hbar(hbar: i64) -> Self {
        Self(hbar * TINYBAR_PER_HBAR)
    }

    /// Create from tinybars.
    pub const fn tinybar(tinybar: i64) -> Self {
        Self(tinybar)
    }

    /// Create from tinybars (long form).
    pub const fn from_tinybars(tinybars: i64) -> Self {
        Self(tinybars)
    }

    /// Parse from decimal hbar (e.g., `-1.5`).
    pub fn from_hbar_decimal(s: &str) -> Result<Self, ParseAmountError> {
        let s = s.trim();
        let (negative, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };

        let (integer_part, decimal_part) = digits.split_once('.').unwrap_or((digits, ""));
        if integer_part.is_empty() && decimal_part.is_empty() {
            return Err(ParseAmountError::InvalidNumber(s.to_string()));
        }
        if decimal_part.len() > HBAR_DECIMALS {
            return Err(ParseAmountError::InvalidNumber(s.to_string()));
        }

        let parse_part = |part: &str| -> Result<i64, ParseAmountError> {
            if part.is_empty() {
                return Ok(0);
            }
            if !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseAmountError::InvalidNumber(s.to_string()));
            }
            part.parse().map_err(|_| ParseAmountError::Overflow)
        };

        let integer = parse_part(integer_part)?;
        let scale = 10i64.pow((HBAR_DECIMALS - decimal_part.len()) as u32);
        let fraction = parse_part(decimal_part)? * scale;

        let total = integer
            .checked_mul(TINYBAR_PER_HBAR)
            .and_then(|v| v.checked_add(fraction))
            .ok_or(ParseAmountError::Overflow)?;

        Ok(Self(if negative { -total } else { total }))
    }

    /// Get the raw tinybar value.
    pub const fn as_tinybars(&self) -> i64 {
        self.0
    }

    /// Get whole hbar (truncated toward zero).
    pub const fn as_hbar(&self) -> i64 {
        self.0 / TINYBAR_PER_HBAR
    }

    /// Get the value as hbar (may lose precision).
    pub fn as_hbar_f64(&self) -> f64 {
        self.0 as f64 / TINYBAR_PER_HBAR as f64
    }

    /// Checked addition.
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }

    /// Checked subtraction.
    pub fn checked_sub(self, other: Self) -> Option<Self> {
        self.0.checked_sub(other.0).map(Self)
    }

    /// Saturating addition.
    pub fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Check if zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Check if negative (a debit).
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }
}

impl FromStr for Hbar {
    type Err = ParseAmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        // "X tinybar" or "X tℏ"
        if let Some(value) = s
            .strip_suffix(" tinybar")
            .or_else(|| s.strip_suffix(" tℏ"))
        {
            let value = value.trim();
            let digits = value.strip_prefix('-').unwrap_or(value);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ParseAmountError::InvalidNumber(s.to_string()));
            }
            return value
                .parse()
                .map(Self)
                .map_err(|_| ParseAmountError::Overflow);
        }

        // "X hbar", "X HBAR" or "X ℏ"
        if let Some(value) = s
            .strip_suffix(" hbar")
            .or_else(|| s.strip_suffix(" HBAR"))
            .or_else(|| s.strip_suffix(" ℏ"))
        {
            return Self::from_hbar_decimal(value);
        }

        // Bare number = error (ambiguous)
        if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
            return Err(ParseAmountError::AmbiguousAmount(s.to_string()));
        }

        Err(ParseAmountError::InvalidFormat(s.to_string()))
    }
}

impl TryFrom<&str> for Hbar {
    type Error = ParseAmountError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Display for Hbar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let whole = abs / TINYBAR_PER_HBAR as u64;
        let remainder = abs % TINYBAR_PER_HBAR as u64;

        if remainder == 0 {
            write!(f, "{sign}{whole} ℏ")
        } else {
            let decimal = format!("{:08}", remainder);
            write!(f, "{sign}{whole}.{} ℏ", decimal.trim_end_matches('0'))
        }
    }
}

impl Add for Hbar {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl Sub for Hbar {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl Neg for Hbar {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

// Serde: integer tinybars, as mirror-node REST responses carry them
impl Serialize for Hbar {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_i64(self.0)
    }
}

impl<'de> Deserialize<'de> for Hbar {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v: i64 = Deserialize::deserialize(d)?;
        Ok(Self(v))
    }
}

// ============================================================================
// IntoHbar trait
// ============================================================================

/// Trait for types that can be converted into an [`Hbar`] amount.
///
/// Typed request constructors accept both `Hbar` values and strings:
///
/// ```
/// use hedera_kit::{Hbar, IntoHbar};
///
/// fn example(amount: impl IntoHbar) -> Hbar {
///     amount.into_hbar().unwrap()
/// }
///
/// assert_eq!(example(Hbar::hbar(5)), example("5 hbar"));
/// ```
pub trait IntoHbar {
    /// Convert into Hbar.
    fn into_hbar(self) -> Result<Hbar, ParseAmountError>;
}

impl IntoHbar for Hbar {
    fn into_hbar(self) -> Result<Hbar, ParseAmountError> {
        Ok(self)
    }
}

impl IntoHbar for &str {
    fn into_hbar(self) -> Result<Hbar, ParseAmountError> {
        self.parse()
    }
}

impl IntoHbar for String {
    fn into_hbar(self) -> Result<Hbar, ParseAmountError> {
        self.parse()
    }
}

impl IntoHbar for &String {
    fn into_hbar(self) -> Result<Hbar, ParseAmountError> {
        self.parse()
    }
}
