//! Mortgage Compare - lifetime cost of insured versus uninsured Canadian mortgages
//!
//! This library provides:
//! - Monthly payments under the semi-annual compounding convention
//! - Principal amortization over a term
//! - Mortgage default insurance premiums and provincial premium tax
//! - Term-by-term cost projection over the full amortization
//! - Insured vs. uninsured comparison, single or batched

pub mod error;
pub mod loan;
pub mod rates;
pub mod insurance;
pub mod projection;
pub mod comparison;

// Re-export commonly used types
pub use error::{MortgageError, MortgageResult};
pub use loan::{assess_eligibility, Eligibility, LoanParameters, Province};
pub use rates::{LtvBand, RateScenario};
pub use insurance::{insurance_premium, InsuranceQuote};
pub use projection::{
    amortized_principal, evaluate_term_cost, mortgage_payment, total_mortgage_cost,
    CostProjection, MortgageCostEngine, PaymentBasis, ProjectionConfig, TermRow,
};
pub use comparison::{CheaperOption, ComparisonResult, ComparisonRunner};
