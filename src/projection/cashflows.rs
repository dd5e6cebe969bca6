//! Term-level output structures for mortgage cost projections

use serde::{Deserialize, Serialize};

use crate::insurance::InsuranceQuote;

/// One evaluated term of the mortgage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermRow {
    /// Term number (1 = initial term)
    pub term: u32,
    pub is_initial: bool,

    /// Annual rate applied over the term (percent)
    pub rate: f64,

    /// Amortization years the payment was computed over
    pub payment_amortization_years: u32,

    pub monthly_payment: f64,

    /// Sum of all payments made during the term
    pub term_cost: f64,
    pub principal_repaid: f64,

    pub opening_balance: f64,
    pub closing_balance: f64,

    /// Amortization years left after the term
    pub remaining_amortization: u32,
}

impl TermRow {
    /// Interest portion of the term's payments
    pub fn interest_paid(&self) -> f64 {
        self.term_cost - self.principal_repaid
    }
}

/// Complete cost projection for one financing option
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostProjection {
    pub insured: bool,

    /// Present only when the mortgage is insured
    pub insurance: Option<InsuranceQuote>,

    pub terms: Vec<TermRow>,

    /// Balance left after the last full term, paid as a lump sum
    pub final_lump_sum: f64,

    /// Premium tax + every term's payments + final lump sum
    pub total_cost: f64,
}

impl CostProjection {
    pub fn new(insured: bool) -> Self {
        Self {
            insured,
            insurance: None,
            terms: Vec::new(),
            final_lump_sum: 0.0,
            total_cost: 0.0,
        }
    }

    pub fn add_term(&mut self, row: TermRow) {
        self.terms.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> CostSummary {
        let total_payments: f64 = self.terms.iter().map(|t| t.term_cost).sum();
        let total_principal: f64 = self.terms.iter().map(|t| t.principal_repaid).sum();
        let total_interest: f64 = self.terms.iter().map(|t| t.interest_paid()).sum();

        let (premium, premium_tax) = self
            .insurance
            .map(|q| (q.premium, q.premium_tax))
            .unwrap_or((0.0, 0.0));

        CostSummary {
            term_count: self.terms.len() as u32,
            premium,
            premium_tax,
            total_payments,
            total_principal,
            total_interest,
            final_lump_sum: self.final_lump_sum,
            total_cost: self.total_cost,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CostSummary {
    pub term_count: u32,
    pub premium: f64,
    pub premium_tax: f64,
    pub total_payments: f64,
    pub total_principal: f64,
    pub total_interest: f64,
    pub final_lump_sum: f64,
    pub total_cost: f64,
}
