//! Insured versus uninsured comparison runner
//!
//! Runs both projections for a loan and reports which is cheaper over the
//! life of the mortgage. Batches of scenarios are compared in parallel.

use rayon::prelude::*;
use serde::Serialize;

use crate::loan::{assess_eligibility, Eligibility, LoanParameters, LoanScenario};
use crate::projection::{CostProjection, MortgageCostEngine, PaymentBasis, ProjectionConfig};

/// Which financing option costs less overall
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CheaperOption {
    Insured,
    Uninsured,
    Equal,
}

impl CheaperOption {
    pub fn from_totals(insured_total: f64, uninsured_total: f64) -> Self {
        if insured_total < uninsured_total {
            CheaperOption::Insured
        } else if uninsured_total < insured_total {
            CheaperOption::Uninsured
        } else {
            CheaperOption::Equal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CheaperOption::Insured => "Insured",
            CheaperOption::Uninsured => "Uninsured",
            CheaperOption::Equal => "Equal",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            CheaperOption::Insured => "The insured mortgage is less expensive.",
            CheaperOption::Uninsured => "The uninsured mortgage is less expensive.",
            CheaperOption::Equal => "Both options have the same overall cost.",
        }
    }
}

/// Both projections for one loan
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonResult {
    pub loan: LoanParameters,
    pub insured: CostProjection,
    pub uninsured: CostProjection,
    pub cheaper: CheaperOption,
    /// Absolute difference between the two totals
    pub difference: f64,
}

/// Compares insured and uninsured financing under one configuration
///
/// # Example
/// ```ignore
/// let config = ProjectionConfig::new(rates, Province::parse("Ontario"));
/// let runner = ComparisonRunner::new(config);
/// let result = runner.compare(&loan);
/// println!("{}", result.cheaper.message());
/// ```
#[derive(Debug, Clone)]
pub struct ComparisonRunner {
    config: ProjectionConfig,
}

impl ComparisonRunner {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Run both projections (concurrently) and compare totals
    ///
    /// Does not apply the eligibility screen; see [`ComparisonRunner::screen_and_compare`].
    pub fn compare(&self, loan: &LoanParameters) -> ComparisonResult {
        let engine = MortgageCostEngine::new(self.config.clone());
        let (insured, uninsured) = rayon::join(
            || engine.project(loan, true),
            || engine.project(loan, false),
        );

        let cheaper = CheaperOption::from_totals(insured.total_cost, uninsured.total_cost);
        let difference = (uninsured.total_cost - insured.total_cost).abs();

        ComparisonResult {
            loan: *loan,
            insured,
            uninsured,
            cheaper,
            difference,
        }
    }

    /// Compare only when insurance is actually optional for the loan
    pub fn screen_and_compare(&self, loan: &LoanParameters) -> (Eligibility, Option<ComparisonResult>) {
        let eligibility = assess_eligibility(loan);
        let comparison = eligibility.is_comparable().then(|| self.compare(loan));
        (eligibility, comparison)
    }
}

/// Result of screening and comparing one batch scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioOutcome {
    pub scenario_id: u32,
    pub eligibility: Eligibility,
    pub comparison: Option<ComparisonResult>,
}

/// Screen and compare many scenarios in parallel
///
/// Each scenario carries its own rates and province; the payment basis is
/// shared across the batch. Output order matches input order.
pub fn compare_scenarios(scenarios: &[LoanScenario], payment_basis: PaymentBasis) -> Vec<ScenarioOutcome> {
    scenarios
        .par_iter()
        .map(|scenario| {
            let config = ProjectionConfig::new(scenario.rates, scenario.province.clone())
                .with_payment_basis(payment_basis);
            let (eligibility, comparison) =
                ComparisonRunner::new(config).screen_and_compare(&scenario.loan);
            ScenarioOutcome {
                scenario_id: scenario.scenario_id,
                eligibility,
                comparison,
            }
        })
        .collect()
}
