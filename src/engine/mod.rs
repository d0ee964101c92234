// ============================================================================
// Engine Module
// Profit computation and the stateful calculator built on it
// ============================================================================

mod calculator;
mod profit;

pub use calculator::Calculator;
pub use profit::{check_inputs, compute};
