// ============================================================================
// Profit Engine
// Pure mapping from calculator inputs to a three-way profit split
// ============================================================================

use crate::domain::{CalculatorState, ProfitResult};
use crate::numeric::{Amount, NumericError, NumericResult};
use tracing::{debug, warn};

/// Check the inputs a split needs.
///
/// A zero attributable revenue is accepted and yields a zero split.
pub fn check_inputs(state: &CalculatorState) -> Result<(), &'static str> {
    if state.attributable_revenue.is_negative() {
        return Err("attributable revenue cannot be negative");
    }
    if !state.total_revenue.is_positive() {
        return Err("total revenue must be positive");
    }
    if state.total_shares == 0 {
        return Err("total shares must be positive");
    }
    if state.major_shares == 0 {
        return Err("major holding must be positive");
    }
    if state.attributable_revenue > state.total_revenue {
        return Err("attributable revenue cannot exceed total revenue");
    }
    Ok(())
}

/// Compute the profit split for `state`.
///
/// ```text
/// total = C * (A / B) * (major / D)
/// minor = total * minor_shares / major_shares   (0 unless 0 < minor <= major)
/// major = total - minor
/// ```
///
/// Never fails: inputs that do not pass [`check_inputs`], or that overflow the
/// fixed-point range, produce [`ProfitResult::INVALID`].
///
/// # Example
/// ```
/// use profit_split::domain::CalculatorState;
/// use profit_split::engine::compute;
///
/// let result = compute(CalculatorState::sample());
/// assert!(result.valid);
/// assert_eq!(result.total.to_grouped_string(2), "3,692,307.69");
/// ```
pub fn compute(state: CalculatorState) -> ProfitResult {
    if let Err(reason) = check_inputs(&state) {
        debug!(reason, "profit inputs rejected");
        return ProfitResult::INVALID;
    }

    match split(&state) {
        Ok(result) => result,
        Err(error) => {
            warn!(%error, ?state, "profit split out of range");
            ProfitResult::INVALID
        },
    }
}

/// Evaluate the split on validated inputs.
///
/// `total` is evaluated as the single rational `C·A·major / (B·D)` so that
/// only one rounding step happens before `minor` is derived from it.
fn split(state: &CalculatorState) -> NumericResult<ProfitResult> {
    let total = scaled_share(state)?;

    let minor = if state.minor_shares > 0 && state.minor_shares <= state.major_shares {
        total.checked_mul_div(state.minor_shares as i64, state.major_shares as i64)?
    } else {
        Amount::ZERO
    };
    let major = total.checked_sub(minor)?;

    Ok(ProfitResult {
        total,
        major,
        minor,
        valid: true,
    })
}

/// `C·A·major / (B·D)` in raw units, rounded half away from zero.
///
/// The four-factor product can exceed 128 bits, so it is reduced in two
/// exact steps instead:
///
/// ```text
/// |C|·A        = k·B + r
/// k·major      = m·D + s
/// |C|·A·major / (B·D) = m + (s·B + r·major) / (B·D)
/// ```
///
/// With `A <= B` (checked beforehand) `k <= |C|`, so every intermediate stays
/// below 2^128 for any i64 amounts and u32 shares.
fn scaled_share(state: &CalculatorState) -> NumericResult<Amount> {
    let magnitude = state.net_profit.raw_value().unsigned_abs() as u128;
    let attributable = state.attributable_revenue.raw_value().unsigned_abs() as u128;
    let revenue = state.total_revenue.raw_value().unsigned_abs() as u128;
    let major = state.major_shares as u128;
    let pool = state.total_shares as u128;

    if revenue == 0 || pool == 0 {
        return Err(NumericError::DivisionByZero);
    }

    let product = magnitude * attributable;
    let (k, r) = (product / revenue, product % revenue);
    let scaled = k.checked_mul(major).ok_or(NumericError::Overflow)?;
    let (mut quotient, s) = (scaled / pool, scaled % pool);

    let denominator = revenue * pool;
    let remainder = s * revenue + r * major;
    quotient += remainder / denominator;
    if (remainder % denominator) * 2 >= denominator {
        quotient += 1;
    }

    let raw = i64::try_from(quotient).map_err(|_| NumericError::Overflow)?;
    let signed = if state.net_profit.is_negative() { -raw } else { raw };
    Ok(Amount::from_raw(signed))
}
