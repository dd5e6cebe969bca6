//! Term-by-term mortgage cost projection

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::error::MortgageResult;
use crate::insurance::insurance_premium;
use crate::loan::{LoanParameters, Province};
use crate::rates::RateScenario;
use super::amortization::{amortization_schedule, amortized_principal, ScheduleRow};
use super::cashflows::{CostProjection, TermRow};
use super::payment::{monthly_rate, mortgage_payment};
use super::state::AmortizationState;

/// Amortization the payment is recomputed over at each renewal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PaymentBasis {
    /// Years left in the schedule at the start of the term
    #[default]
    Remaining,
    /// The full amortization chosen at origination, every term
    Original,
}

/// Configuration for a projection run
///
/// Built once per comparison and shared by reference; nothing in the
/// engine reads rates or province from anywhere else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Rates for every term type and LTV band
    pub rates: RateScenario,

    /// Province, for the premium tax
    pub province: Province,

    /// How renewal payments are sized
    pub payment_basis: PaymentBasis,
}

impl ProjectionConfig {
    pub fn new(rates: RateScenario, province: Province) -> Self {
        Self {
            rates,
            province,
            payment_basis: PaymentBasis::default(),
        }
    }

    pub fn with_payment_basis(mut self, payment_basis: PaymentBasis) -> Self {
        self.payment_basis = payment_basis;
        self
    }
}

/// Cost of a single term
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermCost {
    /// Annual rate selected for the term (percent)
    pub rate: f64,
    pub monthly_payment: f64,
    /// `monthly_payment * 12 * term_years`
    pub term_cost: f64,
    pub principal_repaid: f64,
}

/// Price one term of a mortgage
///
/// Selects the term's rate (uninsured renewals by LTV of `loan_amount` over
/// `purchase_price`), sizes the payment over `amortization_years`, and
/// tracks principal over the term.
pub fn evaluate_term_cost(
    term_years: u32,
    loan_amount: f64,
    purchase_price: f64,
    insured: bool,
    amortization_years: u32,
    is_initial: bool,
    rates: &RateScenario,
) -> TermCost {
    let rate = rates.select(insured, is_initial, loan_amount / purchase_price);
    let monthly_payment = mortgage_payment(rate, loan_amount, amortization_years);

    let first_interest = loan_amount * monthly_rate(rate);
    if monthly_payment <= first_interest {
        warn!(
            "Payment {:.2} does not cover first-month interest {:.2} at {}%",
            monthly_payment, first_interest, rate
        );
    }

    TermCost {
        rate,
        monthly_payment,
        term_cost: monthly_payment * 12.0 * term_years as f64,
        principal_repaid: amortized_principal(term_years, loan_amount, rate, monthly_payment),
    }
}

/// Lifetime cost of a mortgage from raw inputs
///
/// Validates the inputs, then runs [`MortgageCostEngine::project`].
pub fn total_mortgage_cost(
    term_years: u32,
    loan_amount: f64,
    purchase_price: f64,
    insured: bool,
    amortization_years: u32,
    config: &ProjectionConfig,
) -> MortgageResult<f64> {
    let loan = LoanParameters::from_loan_amount(
        purchase_price,
        loan_amount,
        amortization_years,
        term_years,
    )?;
    Ok(MortgageCostEngine::new(config.clone()).project(&loan, insured).total_cost)
}

/// Rolls a mortgage forward term by term and totals its cost
pub struct MortgageCostEngine {
    config: ProjectionConfig,
}

impl MortgageCostEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the projection for one financing option
    ///
    /// If insured, the premium is financed into the balance and the premium
    /// tax is paid up front. The initial term is followed by renewals while a
    /// full term still fits in the remaining amortization; whatever balance is
    /// left is added as a final lump sum.
    pub fn project(&self, loan: &LoanParameters, insured: bool) -> CostProjection {
        let mut result = CostProjection::new(insured);
        let mut state = AmortizationState::from_loan(loan);

        if insured {
            let quote = insurance_premium(loan.loan_amount(), loan.down_payment, &self.config.province);
            debug!(
                "Insurance premium {:.2} ({:.1}% at LTV {:.4}), tax {:.2} in {}",
                quote.premium,
                quote.premium_rate * 100.0,
                quote.ltv,
                quote.premium_tax,
                self.config.province.name()
            );
            state.balance += quote.premium;
            state.total_cost += quote.premium_tax;
            result.insurance = Some(quote);
        }

        let row = self.run_term(loan, insured, &mut state);
        result.add_term(row);

        while state.has_renewal(loan.term_years) {
            let row = self.run_term(loan, insured, &mut state);
            result.add_term(row);
        }

        result.final_lump_sum = state.balance;
        result.total_cost = state.total_cost + state.balance;

        info!(
            "{} projection: {} terms, lump sum {:.2}, total cost {:.2}",
            if insured { "Insured" } else { "Uninsured" },
            result.terms.len(),
            result.final_lump_sum,
            result.total_cost
        );

        result
    }

    /// Month-by-month schedule across every evaluated term
    pub fn monthly_schedule(&self, loan: &LoanParameters, insured: bool) -> Vec<ScheduleRow> {
        let projection = self.project(loan, insured);
        let mut rows = Vec::new();

        for term in &projection.terms {
            let offset = rows.len() as u32;
            rows.extend(
                amortization_schedule(loan.term_years, term.opening_balance, term.rate, term.monthly_payment)
                    .into_iter()
                    .map(|row| ScheduleRow {
                        month: row.month + offset,
                        ..row
                    }),
            );
        }

        rows
    }

    fn run_term(&self, loan: &LoanParameters, insured: bool, state: &mut AmortizationState) -> TermRow {
        let is_initial = state.is_initial_term();
        let payment_amortization_years = match self.config.payment_basis {
            PaymentBasis::Remaining => state.remaining_amortization,
            PaymentBasis::Original => loan.amortization_years,
        };
        let opening_balance = state.balance;

        let cost = evaluate_term_cost(
            loan.term_years,
            opening_balance,
            loan.purchase_price,
            insured,
            payment_amortization_years,
            is_initial,
            &self.config.rates,
        );

        state.complete_term(loan.term_years, cost.term_cost, cost.principal_repaid);

        debug!(
            "Term {}: rate {}%, payment {:.2}, cost {:.2}, principal {:.2}, balance {:.2}",
            state.terms_completed,
            cost.rate,
            cost.monthly_payment,
            cost.term_cost,
            cost.principal_repaid,
            state.balance
        );

        TermRow {
            term: state.terms_completed,
            is_initial,
            rate: cost.rate,
            payment_amortization_years,
            monthly_payment: cost.monthly_payment,
            term_cost: cost.term_cost,
            principal_repaid: cost.principal_repaid,
            opening_balance,
            closing_balance: state.balance,
            remaining_amortization: state.remaining_amortization,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MortgageError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn config() -> ProjectionConfig {
        let rates = RateScenario::new(4.5, 5.0, 5.5, 5.1, 5.2, 5.3, 5.4).unwrap();
        ProjectionConfig::new(rates, Province::Ontario)
    }

    fn loan() -> LoanParameters {
        LoanParameters::new(500_000.0, 100_000.0, 25, 5).unwrap()
    }

    #[test]
    fn test_evaluate_initial_term() {
        let rates = config().rates;
        let cost = evaluate_term_cost(5, 400_000.0, 500_000.0, false, 25, true, &rates);
        assert_eq!(cost.rate, 5.5);
        assert_relative_eq!(cost.monthly_payment, mortgage_payment(5.5, 400_000.0, 25));
        assert_relative_eq!(cost.term_cost, cost.monthly_payment * 60.0);
        assert_relative_eq!(
            cost.principal_repaid,
            amortized_principal(5, 400_000.0, 5.5, cost.monthly_payment)
        );
    }

    #[test]
    fn test_uninsured_renewal_uses_ltv_band() {
        let rates = config().rates;
        let cost = evaluate_term_cost(5, 340_000.0, 500_000.0, false, 20, false, &rates);
        assert_eq!(cost.rate, 5.2);
        let cost = evaluate_term_cost(5, 300_000.0, 500_000.0, false, 20, false, &rates);
        assert_eq!(cost.rate, 5.1);
        let insured = evaluate_term_cost(5, 300_000.0, 500_000.0, true, 20, false, &rates);
        assert_eq!(insured.rate, 5.0);
    }

    #[test]
    fn test_projection_walks_every_term() {
        let engine = MortgageCostEngine::new(config());
        let projection = engine.project(&loan(), false);

        assert_eq!(projection.terms.len(), 5);
        assert!(projection.terms[0].is_initial);
        assert!(projection.terms[1..].iter().all(|t| !t.is_initial));

        let remaining: Vec<u32> = projection.terms.iter().map(|t| t.remaining_amortization).collect();
        assert_eq!(remaining, vec![20, 15, 10, 5, 0]);

        let payment_years: Vec<u32> = projection.terms.iter().map(|t| t.payment_amortization_years).collect();
        assert_eq!(payment_years, vec![25, 20, 15, 10, 5]);

        for pair in projection.terms.windows(2) {
            assert_eq!(pair[0].closing_balance, pair[1].opening_balance);
            assert!(pair[1].closing_balance < pair[0].closing_balance);
        }

        let rates: Vec<f64> = projection.terms.iter().map(|t| t.rate).collect();
        assert_eq!(rates, vec![5.5, 5.3, 5.1, 5.1, 5.1]);

        assert_abs_diff_eq!(projection.final_lump_sum, 0.0, epsilon = 1e-4);
        assert_relative_eq!(projection.total_cost, 717_557.9857936143, epsilon = 1e-4);
    }

    #[test]
    fn test_insured_projection_finances_premium() {
        let engine = MortgageCostEngine::new(config());
        let projection = engine.project(&loan(), true);

        let quote = projection.insurance.unwrap();
        assert_relative_eq!(quote.premium, 9_600.0, epsilon = 1e-9);
        assert_relative_eq!(quote.premium_tax, 1_248.0, epsilon = 1e-9);
        assert_relative_eq!(projection.terms[0].opening_balance, 409_600.0);

        let summary = projection.summary();
        assert_relative_eq!(
            summary.total_cost,
            summary.premium_tax + summary.total_payments + summary.final_lump_sum,
            max_relative = 1e-12
        );
        assert_relative_eq!(projection.total_cost, 704_416.7863715109, epsilon = 1e-4);
    }

    #[test]
    fn test_uninsured_projection_has_no_insurance() {
        let engine = MortgageCostEngine::new(config());
        let projection = engine.project(&loan(), false);
        assert!(projection.insurance.is_none());

        let summary = projection.summary();
        assert_eq!(summary.premium, 0.0);
        assert_eq!(summary.premium_tax, 0.0);
        assert_relative_eq!(
            projection.total_cost,
            summary.total_payments + summary.final_lump_sum,
            max_relative = 1e-12
        );
        assert_relative_eq!(projection.terms[0].opening_balance, 400_000.0);
    }

    #[test]
    fn test_single_term_covers_whole_amortization() {
        let loan = LoanParameters::new(500_000.0, 100_000.0, 25, 25).unwrap();
        let engine = MortgageCostEngine::new(config());
        let projection = engine.project(&loan, false);

        assert_eq!(projection.terms.len(), 1);
        let term = projection.terms[0];
        assert_relative_eq!(
            projection.total_cost,
            term.term_cost + projection.final_lump_sum,
            max_relative = 1e-12
        );
        assert_relative_eq!(projection.total_cost, 732_469.7791968045, epsilon = 1e-4);
    }

    #[test]
    fn test_partial_final_term_becomes_lump_sum() {
        let loan = LoanParameters::new(500_000.0, 100_000.0, 25, 10).unwrap();
        let engine = MortgageCostEngine::new(config());
        let projection = engine.project(&loan, false);

        assert_eq!(projection.terms.len(), 2);
        assert_eq!(projection.terms[1].remaining_amortization, 5);
        assert_relative_eq!(projection.final_lump_sum, 125_966.90738528088, epsilon = 1e-4);
        assert_relative_eq!(projection.total_cost, 704_536.0550869191, epsilon = 1e-4);
    }

    #[test]
    fn test_original_basis_keeps_full_amortization() {
        let engine = MortgageCostEngine::new(config().with_payment_basis(PaymentBasis::Original));
        let projection = engine.project(&loan(), false);

        assert!(projection.terms.iter().all(|t| t.payment_amortization_years == 25));
        assert_relative_eq!(projection.final_lump_sum, 220_971.80240501795, epsilon = 1e-4);
        assert_relative_eq!(projection.total_cost, 794_355.4610972654, epsilon = 1e-4);

        let insured = engine.project(&loan(), true);
        assert_relative_eq!(insured.total_cost, 779_820.8443440427, epsilon = 1e-4);
    }

    #[test]
    fn test_total_mortgage_cost_matches_projection() {
        let cfg = config();
        let total = total_mortgage_cost(5, 400_000.0, 500_000.0, true, 25, &cfg).unwrap();
        let projected = MortgageCostEngine::new(cfg).project(&loan(), true).total_cost;
        assert_eq!(total, projected);
    }

    #[test]
    fn test_total_mortgage_cost_rejects_bad_term() {
        let cfg = config();
        assert!(total_mortgage_cost(0, 400_000.0, 500_000.0, false, 25, &cfg).is_err());
        assert!(total_mortgage_cost(30, 400_000.0, 500_000.0, false, 25, &cfg).is_err());
    }

    #[test]
    fn test_total_mortgage_cost_rejects_oversized_amortization() {
        let cfg = config();
        assert!(matches!(
            total_mortgage_cost(400_000_000, 400_000.0, 500_000.0, false, 400_000_000, &cfg),
            Err(MortgageError::InvalidAmortization(400_000_000))
        ));
    }

    #[test]
    fn test_zero_rate_projection_repays_exactly_the_loan() {
        let rates = RateScenario::flat(0.0).unwrap();
        let engine = MortgageCostEngine::new(ProjectionConfig::new(rates, Province::Ontario));
        let projection = engine.project(&loan(), false);

        assert_eq!(projection.terms.len(), 5);
        for term in &projection.terms {
            assert_eq!(term.rate, 0.0);
            assert_relative_eq!(term.principal_repaid, term.term_cost, max_relative = 1e-9);
        }
        assert_abs_diff_eq!(projection.final_lump_sum, 0.0, epsilon = 1e-6);
        assert_relative_eq!(projection.total_cost, 400_000.0, max_relative = 1e-9);

        let cfg = ProjectionConfig::new(rates, Province::Ontario);
        let total = total_mortgage_cost(5, 400_000.0, 500_000.0, false, 25, &cfg).unwrap();
        assert_relative_eq!(total, 400_000.0, max_relative = 1e-9);
    }

    #[test]
    fn test_monthly_schedule_spans_all_terms() {
        let engine = MortgageCostEngine::new(config());
        let schedule = engine.monthly_schedule(&loan(), false);
        assert_eq!(schedule.len(), 300);
        assert_eq!(schedule[0].month, 1);
        assert_eq!(schedule[299].month, 300);
        assert_eq!(schedule[0].opening_balance, 400_000.0);
        assert_abs_diff_eq!(schedule[299].closing_balance, 0.0, epsilon = 1e-4);
    }
}
