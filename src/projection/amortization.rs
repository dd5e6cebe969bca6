//! Month-by-month principal tracking over a term

use serde::{Deserialize, Serialize};

use super::payment::monthly_rate;

/// One month of an amortization schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// Month within the schedule (1-indexed)
    pub month: u32,
    pub opening_balance: f64,
    pub interest: f64,
    pub principal: f64,
    pub closing_balance: f64,
}

/// Total principal repaid over `term_years * 12` monthly payments
///
/// Each month the payment first covers interest on the remaining balance;
/// the rest reduces principal. The payment is not checked against the
/// interest charge: a payment smaller than the first month's interest yields
/// negative principal and a growing balance.
pub fn amortized_principal(term_years: u32, loan_amount: f64, annual_rate_pct: f64, payment: f64) -> f64 {
    let rate = monthly_rate(annual_rate_pct);
    let mut balance = loan_amount;
    let mut principal_paid = 0.0;

    for _ in 0..term_years * 12 {
        let principal = payment - balance * rate;
        principal_paid += principal;
        balance -= principal;
    }

    principal_paid
}

/// The same iteration as [`amortized_principal`], keeping every month
pub fn amortization_schedule(
    term_years: u32,
    loan_amount: f64,
    annual_rate_pct: f64,
    payment: f64,
) -> Vec<ScheduleRow> {
    let rate = monthly_rate(annual_rate_pct);
    let months = term_years * 12;
    let mut balance = loan_amount;
    let mut rows = Vec::with_capacity(months as usize);

    for month in 1..=months {
        let interest = balance * rate;
        let principal = payment - interest;
        let opening_balance = balance;
        balance -= principal;
        rows.push(ScheduleRow {
            month,
            opening_balance,
            interest,
            principal,
            closing_balance: balance,
        });
    }

    rows
}
