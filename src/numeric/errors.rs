// ============================================================================
// Numeric Errors
// Error types for fixed-point amount arithmetic
// ============================================================================

use std::fmt;

/// Errors that can occur during fixed-point amount arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericError {
    /// Result exceeded the largest representable amount
    Overflow,
    /// Result below the smallest representable amount
    Underflow,
    /// Attempted division by zero
    DivisionByZero,
    /// Conversion would lose significant digits
    PrecisionLoss,
    /// Input string or value is invalid
    InvalidInput,
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::Overflow => {
                write!(f, "arithmetic overflow: result exceeded maximum value")
            },
            NumericError::Underflow => {
                write!(f, "arithmetic underflow: result below minimum value")
            },
            NumericError::DivisionByZero => write!(f, "division by zero"),
            NumericError::PrecisionLoss => write!(
                f,
                "precision loss: conversion would lose significant digits"
            ),
            NumericError::InvalidInput => write!(f, "invalid input: could not parse value"),
        }
    }
}

impl std::error::Error for NumericError {}

/// Result type alias for numeric operations
pub type NumericResult<T> = Result<T, NumericError>;
