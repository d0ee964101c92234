// ============================================================================
// Fixed-Point Decimal
// Exact money arithmetic with compile-time precision
// ============================================================================

use super::errors::{NumericError, NumericResult};
use rust_decimal::Decimal;
use std::fmt;
use std::fmt::Write as _;
use std::ops::Neg;

/// Fixed-point decimal number with compile-time precision.
///
/// Internally stores `value × 10^DECIMALS` as an i64. Addition and subtraction
/// are exact, which is what lets a profit split satisfy `major + minor == total`
/// without any tolerance.
///
/// # Type Parameter
/// - `DECIMALS`: Number of decimal places (0-18). Default is 2.
///
/// # Value Range
/// With DECIMALS=2 (default):
/// - Minimum: -92,233,720,368,547,758.08
/// - Maximum: +92,233,720,368,547,758.07
/// - Precision: 0.01
///
/// Every integer up to 2^53 is representable.
///
/// # Example
/// ```
/// use profit_split::numeric::Amount;
///
/// let profit = Amount::from_integer(40_000_000).unwrap();
/// let share = profit.checked_mul_div(60, 130).unwrap();
/// assert_eq!(share.to_grouped_string(2), "18,461,538.46");
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct FixedDecimal<const DECIMALS: u8 = 2>(i64);

// ============================================================================
// Scale Constants
// ============================================================================

/// Compute 10^n at compile time
const fn pow10(n: u8) -> i64 {
    let mut result: i64 = 1;
    let mut i = 0;
    while i < n {
        result *= 10;
        i += 1;
    }
    result
}

/// Divide and round half away from zero.
pub(crate) fn div_round(numerator: i128, denominator: i128) -> NumericResult<i128> {
    if denominator == 0 {
        return Err(NumericError::DivisionByZero);
    }

    let quotient = numerator
        .checked_div(denominator)
        .ok_or(NumericError::Overflow)?;
    let remainder = numerator
        .checked_rem(denominator)
        .ok_or(NumericError::Overflow)?;

    if remainder.unsigned_abs() * 2 >= denominator.unsigned_abs() {
        let away = if (numerator < 0) != (denominator < 0) { -1 } else { 1 };
        quotient.checked_add(away).ok_or(NumericError::Overflow)
    } else {
        Ok(quotient)
    }
}

impl<const D: u8> FixedDecimal<D> {
    /// The scale factor (10^DECIMALS)
    pub const SCALE: i64 = pow10(D);

    /// Zero value
    pub const ZERO: Self = Self(0);

    /// Maximum representable value
    pub const MAX: Self = Self(i64::MAX);

    // ========================================================================
    // Construction
    // ========================================================================

    /// Create from raw internal representation.
    #[inline]
    pub(crate) const fn from_raw(raw: i64) -> Self {
        Self(raw)
    }

    /// Create from an integer value.
    ///
    /// # Errors
    /// Returns `Overflow` if the value is too large to represent.
    #[inline]
    pub fn from_integer(value: i64) -> NumericResult<Self> {
        value
            .checked_mul(Self::SCALE)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from integer and fractional parts.
    ///
    /// `fraction` is expressed in units of `10^-DECIMALS`, must be below
    /// `SCALE`, and takes the sign of `integer`.
    #[inline]
    pub fn from_parts(integer: i64, fraction: u64) -> NumericResult<Self> {
        if fraction >= Self::SCALE as u64 {
            return Err(NumericError::InvalidInput);
        }

        let int_scaled = integer
            .checked_mul(Self::SCALE)
            .ok_or(NumericError::Overflow)?;

        let frac_signed = if integer < 0 {
            -(fraction as i64)
        } else {
            fraction as i64
        };

        int_scaled
            .checked_add(frac_signed)
            .map(Self)
            .ok_or(NumericError::Overflow)
    }

    /// Create from a floating-point value, rounding half away from zero at
    /// `DECIMALS` places.
    ///
    /// # Errors
    /// - `InvalidInput` for NaN and infinities
    /// - `Overflow` / `Underflow` when the value is out of range
    pub fn from_f64(value: f64) -> NumericResult<Self> {
        if !value.is_finite() {
            return Err(NumericError::InvalidInput);
        }

        let scaled = (value * Self::SCALE as f64).round();
        if scaled >= i64::MAX as f64 {
            Err(NumericError::Overflow)
        } else if scaled < i64::MIN as f64 {
            Err(NumericError::Underflow)
        } else {
            Ok(Self(scaled as i64))
        }
    }

    /// Build from the rational `numerator / denominator` expressed in raw units.
    pub(crate) fn from_raw_ratio(numerator: i128, denominator: i128) -> NumericResult<Self> {
        let raw = div_round(numerator, denominator)?;
        if raw > i64::MAX as i128 {
            Err(NumericError::Overflow)
        } else if raw < i64::MIN as i128 {
            Err(NumericError::Underflow)
        } else {
            Ok(Self(raw as i64))
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Get the raw internal value (scaled).
    #[inline]
    pub const fn raw_value(self) -> i64 {
        self.0
    }

    /// Get the integer part (truncated toward zero).
    #[inline]
    pub const fn integer_part(self) -> i64 {
        self.0 / Self::SCALE
    }

    /// Get the fractional part as a positive value.
    #[inline]
    pub const fn fractional_part(self) -> u64 {
        (self.0 % Self::SCALE).unsigned_abs()
    }

    /// Largest integer less than or equal to the value.
    #[inline]
    pub const fn floor_integer(self) -> i64 {
        self.0.div_euclid(Self::SCALE)
    }

    #[inline]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    // ========================================================================
    // Arithmetic Operations
    // ========================================================================

    /// Checked addition.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_add(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 > 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    /// Returns `Overflow` or `Underflow` if the result is out of range.
    #[inline]
    pub fn checked_sub(self, rhs: Self) -> NumericResult<Self> {
        self.0.checked_sub(rhs.0).map(Self).ok_or_else(|| {
            if rhs.0 < 0 {
                NumericError::Overflow
            } else {
                NumericError::Underflow
            }
        })
    }

    /// Multiply by `numerator / denominator` with round half away from zero.
    ///
    /// Uses an i128 intermediate so the product never overflows before the
    /// division.
    ///
    /// # Errors
    /// - `DivisionByZero` if `denominator` is zero
    /// - `Overflow` / `Underflow` if the result is out of range
    #[inline]
    pub fn checked_mul_div(self, numerator: i64, denominator: i64) -> NumericResult<Self> {
        let product = (self.0 as i128) * (numerator as i128);
        Self::from_raw_ratio(product, denominator as i128)
    }

    // ========================================================================
    // Presentation
    // ========================================================================

    /// Render with `,` thousands separators and exactly `digits` fraction
    /// digits, rounding half away from zero.
    ///
    /// The grouping is fixed (en-US style); no locale is consulted.
    pub fn to_grouped_string(self, digits: u8) -> String {
        let kept = digits.min(D);
        let divisor = pow10(D - kept) as i128;
        // divisor is a positive power of ten and the raw value fits in i64
        let units = div_round(self.0 as i128, divisor).unwrap_or_default();

        let unit_scale = pow10(kept) as u128;
        let magnitude = units.unsigned_abs();
        let int_part = magnitude / unit_scale;
        let frac_part = magnitude % unit_scale;

        let mut out = String::new();
        if units < 0 {
            out.push('-');
        }
        out.push_str(&group_thousands(int_part));

        if digits > 0 {
            out.push('.');
            if kept > 0 {
                let _ = write!(out, "{:0>width$}", frac_part, width = kept as usize);
            }
            for _ in kept..digits {
                out.push('0');
            }
        }
        out
    }
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

// ============================================================================
// Trait Implementations
// ============================================================================

impl<const D: u8> Neg for FixedDecimal<D> {
    type Output = Self;

    /// Saturates at `MAX` for `MIN`.
    #[inline]
    fn neg(self) -> Self::Output {
        Self(self.0.checked_neg().unwrap_or(i64::MAX))
    }
}

impl<const D: u8> fmt::Debug for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FixedDecimal<{}>({}, raw={})", D, self, self.0)
    }
}

impl<const D: u8> fmt::Display for FixedDecimal<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let int_part = self.integer_part();
        let frac_part = self.fractional_part();

        if D == 0 {
            write!(f, "{}", int_part)
        } else if self.0 < 0 && int_part == 0 {
            write!(f, "-0.{:0>width$}", frac_part, width = D as usize)
        } else {
            write!(f, "{}.{:0>width$}", int_part, frac_part, width = D as usize)
        }
    }
}

// ============================================================================
// Conversion to rust_decimal (for presentation boundaries)
// ============================================================================

impl<const D: u8> FixedDecimal<D> {
    /// Convert to rust_decimal::Decimal, keeping `DECIMALS` places of scale.
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, D as u32)
    }
}

// ============================================================================
// String Parsing
// ============================================================================

impl<const D: u8> std::str::FromStr for FixedDecimal<D> {
    type Err = NumericError;

    /// Strict decimal parse.
    ///
    /// # Examples
    /// - "123" -> 123.00
    /// - "123.4" -> 123.40
    /// - "-0.05" -> -0.05
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        let (is_negative, s) = if let Some(rest) = s.strip_prefix('-') {
            (true, rest)
        } else {
            (false, s.strip_prefix('+').unwrap_or(s))
        };

        let (int_str, frac_str) = match s.split_once('.') {
            Some((int_str, frac_str)) => (int_str, frac_str),
            None => (s, ""),
        };

        if int_str.is_empty() && frac_str.is_empty() {
            return Err(NumericError::InvalidInput);
        }
        if !int_str.bytes().chain(frac_str.bytes()).all(|b| b.is_ascii_digit()) {
            return Err(NumericError::InvalidInput);
        }

        let int_val: i64 = if int_str.is_empty() {
            0
        } else {
            int_str.parse().map_err(|_| NumericError::Overflow)?
        };

        let frac_val: u64 = if frac_str.is_empty() {
            0
        } else if frac_str.len() > D as usize {
            return Err(NumericError::PrecisionLoss);
        } else {
            let padded = format!("{:0<width$}", frac_str, width = D as usize);
            padded.parse().map_err(|_| NumericError::InvalidInput)?
        };

        let result = Self::from_parts(int_val, frac_val)?;
        Ok(if is_negative { -result } else { result })
    }
}

// ============================================================================
// Serde (decimal strings, so raw scaling never leaks into payloads)
// ============================================================================

#[cfg(feature = "serde")]
impl<const D: u8> serde::Serialize for FixedDecimal<D> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(feature = "serde")]
impl<'de, const D: u8> serde::Deserialize<'de> for FixedDecimal<D> {
    fn deserialize<De: serde::Deserializer<'de>>(deserializer: De) -> Result<Self, De::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Type Aliases
// ============================================================================

/// Number of decimal places carried by [`Amount`].
pub const AMOUNT_DECIMALS: u8 = 2;

/// Money value (revenue, profit) with 2 decimal places
pub type Amount = FixedDecimal<AMOUNT_DECIMALS>;

// ============================================================================
// Tests
// ============================================================================
