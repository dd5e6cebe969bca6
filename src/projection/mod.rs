//! Payment, amortization and term-by-term cost projection

mod state;
mod engine;
mod cashflows;
pub mod payment;
pub mod amortization;

pub use state::AmortizationState;
pub use engine::{
    evaluate_term_cost, total_mortgage_cost, MortgageCostEngine, PaymentBasis, ProjectionConfig,
    TermCost,
};
pub use cashflows::{CostProjection, CostSummary, TermRow};
pub use payment::{level_payment, monthly_rate, mortgage_payment};
pub use amortization::{amortization_schedule, amortized_principal, ScheduleRow};
