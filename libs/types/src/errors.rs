//! Error types for display-unit conversion

use thiserror::Error;

/// Errors raised when converting between smallest units and decimal strings
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UnitsError {
    /// Decimal string could not be parsed for the given precision
    #[error("Invalid amount '{input}' for {decimals} decimals: {reason}")]
    InvalidAmount {
        input: String,
        decimals: u8,
        reason: String,
    },

    /// Negative amounts have no smallest-unit representation
    #[error("Negative amount '{input}' is not allowed")]
    Negative { input: String },

    /// Decimal count outside what unit conversion supports
    #[error("Unsupported decimal count: {decimals}")]
    UnsupportedDecimals { decimals: u8 },

    /// Value does not fit the display type
    #[error("Value {value} is out of range for decimal display")]
    OutOfRange { value: String },
}
