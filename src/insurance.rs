//! Mortgage default insurance premium and provincial premium tax
//!
//! Premiums are a percentage of the loan chosen by loan-to-value band. The
//! premium is normally financed into the mortgage; the provincial tax on it
//! is paid up front.

use serde::{Deserialize, Serialize};

use crate::loan::Province;

/// Premium rate for LTV <= 65%
pub const PREMIUM_RATE_UP_TO_65: f64 = 0.006;
/// Premium rate for 65% < LTV <= 75%
pub const PREMIUM_RATE_UP_TO_75: f64 = 0.017;
/// Premium rate for LTV > 75%
pub const PREMIUM_RATE_OVER_75: f64 = 0.024;

/// Insurance cost for a loan
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InsuranceQuote {
    /// Loan-to-value used to pick the premium band
    pub ltv: f64,

    /// Premium as a fraction of the loan
    pub premium_rate: f64,

    /// Premium amount (financed)
    pub premium: f64,

    /// Provincial sales tax on the premium (paid up front)
    pub premium_tax: f64,
}

/// Premium rate for a loan-to-value ratio
pub fn premium_rate(ltv: f64) -> f64 {
    if ltv <= 0.65 {
        PREMIUM_RATE_UP_TO_65
    } else if ltv <= 0.75 {
        PREMIUM_RATE_UP_TO_75
    } else {
        PREMIUM_RATE_OVER_75
    }
}

/// Quote the premium and premium tax for a loan
///
/// LTV is `loan / (loan + down_payment)`, i.e. loan over purchase price.
pub fn insurance_premium(loan_amount: f64, down_payment: f64, province: &Province) -> InsuranceQuote {
    let ltv = loan_amount / (loan_amount + down_payment);
    let premium_rate = premium_rate(ltv);
    let premium = premium_rate * loan_amount;
    let premium_tax = premium * province.premium_tax_rate();

    InsuranceQuote {
        ltv,
        premium_rate,
        premium,
        premium_tax,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ontario_high_ltv_quote() {
        let quote = insurance_premium(400_000.0, 100_000.0, &Province::Ontario);
        assert_relative_eq!(quote.ltv, 0.8);
        assert_relative_eq!(quote.premium, 0.024 * 400_000.0);
        assert_relative_eq!(quote.premium_tax, 0.13 * quote.premium);
        assert_relative_eq!(quote.premium, 9_600.0, epsilon = 1e-9);
        assert_relative_eq!(quote.premium_tax, 1_248.0, epsilon = 1e-9);
    }

    #[test]
    fn test_premium_bands() {
        assert_eq!(premium_rate(0.50), 0.006);
        assert_eq!(premium_rate(0.65), 0.006);
        assert_eq!(premium_rate(0.70), 0.017);
        assert_eq!(premium_rate(0.75), 0.017);
        assert_eq!(premium_rate(0.76), 0.024);
    }

    #[test]
    fn test_province_tax_rates() {
        let quebec = insurance_premium(300_000.0, 200_000.0, &Province::parse("Québec"));
        assert_relative_eq!(quebec.premium, 0.006 * 300_000.0);
        assert_relative_eq!(quebec.premium_tax, quebec.premium * 0.09975);

        let sask = insurance_premium(350_000.0, 150_000.0, &Province::Saskatchewan);
        assert_relative_eq!(sask.premium, 0.017 * 350_000.0);
        assert_relative_eq!(sask.premium_tax, sask.premium * 0.06);

        let other = insurance_premium(400_000.0, 100_000.0, &Province::parse("Manitoba"));
        assert_relative_eq!(other.premium, 9_600.0, epsilon = 1e-9);
        assert_eq!(other.premium_tax, 0.0);
    }

    #[test]
    fn test_accented_and_plain_quebec_quote_identically() {
        let a = insurance_premium(400_000.0, 100_000.0, &Province::parse("QUÉBEC"));
        let b = insurance_premium(400_000.0, 100_000.0, &Province::parse("quebec"));
        assert_eq!(a, b);
    }
}
