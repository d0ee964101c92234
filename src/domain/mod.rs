// ============================================================================
// Domain Models Module
// Calculator inputs, results, configuration and the holdings invariant
// ============================================================================

pub mod config;
pub mod holdings;
pub mod result;
pub mod state;

pub use config::{CalculatorConfig, DEFAULT_MIN_RESERVE, DEFAULT_TOTAL_SHARES};
pub use holdings::{clamp, classify, with_invariant, HoldingsStatus};
pub use result::ProfitResult;
pub use state::{CalculatorState, StateField};
