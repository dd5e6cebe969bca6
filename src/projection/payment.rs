//! Monthly payment under the Canadian semi-annual compounding convention
//!
//! Mortgage rates in Canada are quoted as nominal annual rates compounded
//! semi-annually. Payments are monthly, so the quoted rate is first turned
//! into the equivalent effective monthly rate.

/// Effective monthly rate for an annual percentage rate compounded semi-annually
///
/// `(1 + rate/200)^(1/6) - 1`
pub fn monthly_rate(annual_rate_pct: f64) -> f64 {
    (1.0 + annual_rate_pct / 200.0).powf(1.0 / 6.0) - 1.0
}

/// Level payment that fully amortizes `principal` over `months` periods
///
/// Payments are at the end of each period and the future value is zero.
/// A zero rate degenerates to straight-line repayment.
pub fn level_payment(periodic_rate: f64, months: u32, principal: f64) -> f64 {
    let n = months as f64;
    if periodic_rate == 0.0 {
        return principal / n;
    }
    let growth = (1.0 + periodic_rate).powi(months as i32);
    principal * periodic_rate * growth / (growth - 1.0)
}

/// Fixed monthly payment for a loan
///
/// # Arguments
/// * `annual_rate_pct` - Nominal annual rate in percent, compounded semi-annually
/// * `loan_amount` - Principal borrowed
/// * `amortization_years` - Years over which the loan fully amortizes
pub fn mortgage_payment(annual_rate_pct: f64, loan_amount: f64, amortization_years: u32) -> f64 {
    level_payment(
        monthly_rate(annual_rate_pct),
        amortization_years * 12,
        loan_amount,
    )
}
