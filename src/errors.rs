//! Unified error types for configuration and parameter construction.
//!
//! The schedule engine itself never returns these: its operations are total and
//! report business irregularities as findings. Errors here cover caller bugs
//! (unknown periodicity, out-of-range counts) and plan loading.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised while loading plans or building schedule parameters.
#[derive(Debug, Error)]
pub enum Error {
    /// Plan file could not be parsed.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong
        message: String,
    },

    /// Plan file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing a text summary failed.
    #[error("Formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),

    /// Periodicity string is not one of the supported values.
    #[error("Unknown periodicity: {value:?} (expected monthly, biweekly or weekly)")]
    UnknownPeriodicity {
        /// The rejected input
        value: String,
    },

    /// Requested installment count exceeds the limit.
    #[error("Installment count {count} is out of range (1..={max})")]
    InstallmentCountOutOfRange {
        /// Requested count
        count: u32,
        /// Largest accepted count
        max: u32,
    },

    /// Contract value or down payment is negative or inconsistent.
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: Decimal,
    },
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
