//! Loan inputs, province handling and scenario loading

mod data;
pub mod loader;

pub use data::{
    assess_eligibility, Eligibility, IneligibleReason, LoanParameters, Province,
    MAX_AMORTIZATION_YEARS, MAX_INSURABLE_PRICE, MAX_INSURED_AMORTIZATION_YEARS,
    MIN_UNINSURED_DOWN_PAYMENT_RATIO,
};
pub use loader::{load_scenarios, load_scenarios_from_reader, LoanScenario};
