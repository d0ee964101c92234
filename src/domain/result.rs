// ============================================================================
// Profit Result
// Three-way split produced by the profit engine
// ============================================================================

use crate::numeric::Amount;
use rust_decimal::Decimal;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Outcome of a profit computation.
///
/// When `valid` is true, `major + minor == total` holds exactly: `major` is
/// computed as `total - minor` on fixed-point amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ProfitResult {
    /// Profit attributable to the whole major holding
    pub total: Amount,
    /// Part of `total` kept by the major holder
    pub major: Amount,
    /// Part of `total` passed on to the minor holder
    pub minor: Amount,
    pub valid: bool,
}

impl ProfitResult {
    /// Result reported for inputs that fail validation
    pub const INVALID: Self = Self {
        total: Amount::ZERO,
        major: Amount::ZERO,
        minor: Amount::ZERO,
        valid: false,
    };

    /// Whether the split adds up. Invalid results are checked for all zeros.
    pub fn check(&self) -> bool {
        if self.valid {
            self.major.checked_add(self.minor) == Ok(self.total)
        } else {
            *self == Self::INVALID
        }
    }

    /// `(total, major, minor)` as decimals for presentation layers
    pub fn to_decimals(&self) -> (Decimal, Decimal, Decimal) {
        (
            self.total.to_decimal(),
            self.major.to_decimal(),
            self.minor.to_decimal(),
        )
    }
}

impl Default for ProfitResult {
    fn default() -> Self {
        Self::INVALID
    }
}
