// ============================================================================
// Calculator State
// The six user-editable inputs of the profit split
// ============================================================================

use super::config::DEFAULT_TOTAL_SHARES;
use crate::numeric::{parser, Amount};
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

// ============================================================================
// State Record
// ============================================================================

/// Input record of the calculator.
///
/// Passed by value everywhere; nothing in the crate keeps a reference to a
/// caller's state between calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CalculatorState {
    /// A: revenue attributable to this line of holders
    pub attributable_revenue: Amount,
    /// B: total revenue across the platform
    pub total_revenue: Amount,
    /// C: net profit, may be negative
    pub net_profit: Amount,
    /// D: size of the share pool
    pub total_shares: u32,
    /// Shares held by the major holder
    pub major_shares: u32,
    /// Shares carved out of the major holding for the minor holder
    pub minor_shares: u32,
}

impl Default for CalculatorState {
    /// Zero amounts and holdings over the conventional pool.
    fn default() -> Self {
        Self {
            attributable_revenue: Amount::ZERO,
            total_revenue: Amount::ZERO,
            net_profit: Amount::ZERO,
            total_shares: DEFAULT_TOTAL_SHARES,
            major_shares: 0,
            minor_shares: 0,
        }
    }
}

impl CalculatorState {
    pub fn new(
        attributable_revenue: Amount,
        total_revenue: Amount,
        net_profit: Amount,
        total_shares: u32,
        major_shares: u32,
        minor_shares: u32,
    ) -> Self {
        Self {
            attributable_revenue,
            total_revenue,
            net_profit,
            total_shares,
            major_shares,
            minor_shares,
        }
    }

    /// Build a state from whole-unit amounts, saturating anything that does
    /// not fit an [`Amount`] to zero.
    pub fn from_integers(
        attributable_revenue: i64,
        total_revenue: i64,
        net_profit: i64,
        total_shares: u32,
        major_shares: u32,
        minor_shares: u32,
    ) -> Self {
        let amount = |value: i64| Amount::from_integer(value).unwrap_or(Amount::ZERO);
        Self::new(
            amount(attributable_revenue),
            amount(total_revenue),
            amount(net_profit),
            total_shares,
            major_shares,
            minor_shares,
        )
    }

    /// Demonstration inputs shown when a calculator opens without a link:
    /// 10M of 50M revenue, 40M profit, 60 of 130 shares.
    pub fn sample() -> Self {
        Self::from_integers(10_000_000, 50_000_000, 40_000_000, DEFAULT_TOTAL_SHARES, 60, 0)
    }

    /// Builder method: Set the share pool size
    pub fn with_total_shares(mut self, total_shares: u32) -> Self {
        self.total_shares = total_shares;
        self
    }

    /// Return a copy with one field replaced by the parsed value of `raw`.
    ///
    /// Holdings invariants are NOT applied here; callers run
    /// [`with_invariant`](crate::domain::holdings::with_invariant) afterwards.
    pub fn with_field_text(mut self, field: StateField, raw: &str) -> Self {
        match field {
            StateField::AttributableRevenue => {
                self.attributable_revenue = parser::parse_amount(raw)
            },
            StateField::TotalRevenue => self.total_revenue = parser::parse_amount(raw),
            StateField::NetProfit => self.net_profit = parser::parse_amount(raw),
            StateField::TotalShares => self.total_shares = parser::to_share_count(raw),
            StateField::MajorShares => self.major_shares = parser::to_share_count(raw),
            StateField::MinorShares => self.minor_shares = parser::to_share_count(raw),
        }
        self
    }

    /// Whether every amount is a whole number, i.e. the state survives a
    /// share-token round trip unchanged.
    pub fn is_integer_valued(&self) -> bool {
        [
            self.attributable_revenue,
            self.total_revenue,
            self.net_profit,
        ]
        .iter()
        .all(|amount| amount.fractional_part() == 0)
    }
}

// ============================================================================
// Field Identifiers
// ============================================================================

/// Identifies one editable input of [`CalculatorState`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum StateField {
    /// A
    AttributableRevenue,
    /// B
    TotalRevenue,
    /// C
    NetProfit,
    /// D
    TotalShares,
    MajorShares,
    MinorShares,
}

impl StateField {
    /// All fields in token order
    pub const ALL: [StateField; 6] = [
        StateField::AttributableRevenue,
        StateField::TotalRevenue,
        StateField::NetProfit,
        StateField::TotalShares,
        StateField::MajorShares,
        StateField::MinorShares,
    ];

    /// Key used by the legacy `key=value` link format
    pub fn query_key(&self) -> &'static str {
        match self {
            StateField::AttributableRevenue => "a",
            StateField::TotalRevenue => "b",
            StateField::NetProfit => "c",
            StateField::TotalShares => "d",
            StateField::MajorShares => "major",
            StateField::MinorShares => "minor",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.query_key() == key)
    }

    /// Only net profit may go negative
    pub fn is_signed(&self) -> bool {
        matches!(self, StateField::NetProfit)
    }

    /// Fields whose change requires the holdings invariant to run again
    pub fn affects_holdings(&self) -> bool {
        matches!(
            self,
            StateField::TotalShares | StateField::MajorShares | StateField::MinorShares
        )
    }
}

impl fmt::Display for StateField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}
