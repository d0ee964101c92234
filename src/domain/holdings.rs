// ============================================================================
// Holdings Invariant
// Keeps share counts ordered: minor <= major <= pool
// ============================================================================

use super::state::CalculatorState;
use tracing::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Message shown when the minor holding exceeds the major one
pub const MINOR_EXCEEDS_MAJOR: &str = "minor holding cannot exceed major holding";

// ============================================================================
// Clamping
// ============================================================================

/// Clamp share counts so that `major <= total_shares` and `minor <= major`.
///
/// The major holding is clamped first so the minor holding is bounded by
/// the already-corrected value.
pub fn clamp(state: CalculatorState) -> CalculatorState {
    let major_shares = state.major_shares.min(state.total_shares);
    let minor_shares = state.minor_shares.min(major_shares);

    CalculatorState {
        major_shares,
        minor_shares,
        ..state
    }
}

/// Post-mutation pass run at every state transition boundary.
///
/// Same as [`clamp`], but logs when a correction was necessary.
pub fn with_invariant(state: CalculatorState) -> CalculatorState {
    let clamped = clamp(state);
    if clamped != state {
        debug!(
            total_shares = state.total_shares,
            major_before = state.major_shares,
            minor_before = state.minor_shares,
            major_after = clamped.major_shares,
            minor_after = clamped.minor_shares,
            "clamped holdings"
        );
    }
    clamped
}

/// Whether the share fields already satisfy the ordering constraints
pub fn holds(state: &CalculatorState) -> bool {
    state.major_shares <= state.total_shares && state.minor_shares <= state.major_shares
}

// ============================================================================
// Classification
// ============================================================================

/// Display classification of a major/minor split
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HoldingsStatus {
    pub valid: bool,
    /// Major holder's uncommitted reserve fell below the minimum
    pub warn: bool,
    pub message: Option<String>,
}

impl HoldingsStatus {
    fn ok() -> Self {
        Self {
            valid: true,
            warn: false,
            message: None,
        }
    }

    /// Neither invalid nor warning
    pub fn is_clear(&self) -> bool {
        self.valid && !self.warn
    }
}

/// Classify share counts as they are typed, before clamping.
///
/// Once any minor allocation exists, the major holder must keep at least
/// `min_reserve` shares for itself.
pub fn classify(major_shares: u32, minor_shares: u32, min_reserve: u32) -> HoldingsStatus {
    if minor_shares > major_shares {
        return HoldingsStatus {
            valid: false,
            warn: false,
            message: Some(MINOR_EXCEEDS_MAJOR.to_string()),
        };
    }

    let kept = reserve(major_shares, minor_shares);
    if minor_shares > 0 && kept < min_reserve {
        return HoldingsStatus {
            valid: true,
            warn: true,
            message: Some(format!(
                "major holder keeps {} shares, at least {} required",
                kept, min_reserve
            )),
        };
    }

    HoldingsStatus::ok()
}

/// Shares the major holder keeps after the minor allocation
pub fn reserve(major_shares: u32, minor_shares: u32) -> u32 {
    major_shares.saturating_sub(minor_shares)
}
