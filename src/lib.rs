// ============================================================================
// Profit Split Library
// Hierarchical profit split over a share pool, with shareable state tokens
// ============================================================================

//! # Profit Split
//!
//! Computes how a platform's net profit flows to the holders of a share pool,
//! and turns the calculator inputs into a short token that can travel in a
//! link.
//!
//! ## Features
//!
//! - **Exact splits** on fixed-point amounts: `major + minor == total`, always
//! - **Holdings invariant**: minor holding ≤ major holding ≤ share pool
//! - **Reserve warnings** when the major holder keeps too few shares
//! - **Share tokens** (`v1:` + base-36 fields, zig-zag for negative profit)
//!   with a legacy `key=value` fallback
//! - **Tolerant parsing**: free-form text never fails, it reads as zero
//!
//! ## Example
//!
//! ```rust
//! use profit_split::prelude::*;
//! use std::sync::Arc;
//!
//! let config = CalculatorConfig::default();
//! let mut calc = Calculator::new(config, Arc::new(NoOpEventHandler)).unwrap();
//!
//! // 10M of 50M revenue, 40M net profit, 60 of 130 shares
//! assert_eq!(calc.result().total.to_grouped_string(2), "3,692,307.69");
//!
//! // Carve 30 shares out for a minor holder
//! calc.set_field(StateField::MinorShares, "30");
//! let result = calc.result();
//! assert_eq!(result.major.checked_add(result.minor), Ok(result.total));
//!
//! // Share and restore
//! let token = calc.share_token();
//! assert_eq!(decode(&token), Some(calc.state()));
//! ```

pub mod codec;
pub mod domain;
pub mod engine;
pub mod interfaces;
pub mod numeric;
#[cfg(feature = "logging")]
pub mod utils;

// Re-exports for convenience
pub mod prelude {
    pub use crate::codec::{decode, encode, restore, ShareToken, TokenError};
    pub use crate::domain::{
        clamp, classify, with_invariant, CalculatorConfig, CalculatorState, HoldingsStatus,
        ProfitResult, StateField,
    };
    pub use crate::engine::{compute, Calculator};
    pub use crate::interfaces::{
        CalculatorEvent, EventHandler, LoggingEventHandler, NoOpEventHandler,
    };
    pub use crate::numeric::{parser, Amount};
}
