//! Error types for mortgage cost calculations
//!
//! Only input validation and I/O can fail. The formulas themselves are
//! total over validated inputs.

use thiserror::Error;

/// Result alias used throughout the crate
pub type MortgageResult<T> = Result<T, MortgageError>;

/// Errors raised while validating inputs or loading scenarios
#[derive(Error, Debug)]
pub enum MortgageError {
    /// Purchase price must be a positive, finite amount
    #[error("Invalid purchase price: {0}. Must be positive.")]
    InvalidPurchasePrice(f64),

    /// Down payment must satisfy 0 <= down payment < purchase price
    #[error("Invalid down payment: {down_payment} for purchase price {purchase_price}")]
    InvalidDownPayment {
        down_payment: f64,
        purchase_price: f64,
    },

    /// Amortization must be between one and 100 years
    #[error("Invalid amortization: {0} years. Must be between 1 and 100.")]
    InvalidAmortization(u32),

    /// Term must be positive and no longer than the amortization
    #[error("Invalid term: {term_years} years for a {amortization_years}-year amortization")]
    InvalidTerm {
        term_years: u32,
        amortization_years: u32,
    },

    /// An annual rate was negative or not finite
    #[error("Invalid {name} rate: {value}%")]
    InvalidRate { name: &'static str, value: f64 },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
