// ============================================================================
// Numeric Module
// Fixed-point money arithmetic and tolerant input parsing
// ============================================================================
//
// This module provides:
// - FixedDecimal<D>: Fixed-point decimal with compile-time precision
// - Amount: the money type used by calculator state and results
// - parser: total text-to-number conversions for user input
// - NumericError: Error types for arithmetic operations
//
// Design principles:
// - Money values never go through floating point once parsed
// - All arithmetic returns Result (no panics)
// - Parsing never fails; garbage reads as zero

mod errors;
mod fixed_decimal;
pub mod parser;

pub use errors::{NumericError, NumericResult};
pub use fixed_decimal::{Amount, FixedDecimal, AMOUNT_DECIMALS};
