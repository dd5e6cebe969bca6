//! Working state of a mortgage while it is rolled forward term by term

use crate::loan::LoanParameters;

/// Balance and schedule position between terms
#[derive(Debug, Clone)]
pub struct AmortizationState {
    /// Outstanding balance at the start of the next term
    pub balance: f64,

    /// Amortization years not yet covered by an evaluated term
    pub remaining_amortization: u32,

    /// Number of terms evaluated so far
    pub terms_completed: u32,

    /// Running total cost (payments plus anything paid up front)
    pub total_cost: f64,
}

impl AmortizationState {
    /// Initialize state at origination, before any insurance is added
    pub fn from_loan(loan: &LoanParameters) -> Self {
        Self {
            balance: loan.loan_amount(),
            remaining_amortization: loan.amortization_years,
            terms_completed: 0,
            total_cost: 0.0,
        }
    }

    /// The next term is the initial one until a term has been evaluated
    pub fn is_initial_term(&self) -> bool {
        self.terms_completed == 0
    }

    /// Whether another full renewal term fits in the remaining amortization
    pub fn has_renewal(&self, term_years: u32) -> bool {
        self.remaining_amortization >= term_years
    }

    /// Record a completed term
    pub fn complete_term(&mut self, term_years: u32, term_cost: f64, principal_repaid: f64) {
        self.total_cost += term_cost;
        self.balance -= principal_repaid;
        self.remaining_amortization = self.remaining_amortization.saturating_sub(term_years);
        self.terms_completed += 1;
    }
}
