//! Loan parameters, province recognition and the insurance eligibility screen

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};

/// Homes priced at or above this amount cannot be insured
pub const MAX_INSURABLE_PRICE: f64 = 1_000_000.0;

/// Down payment ratio below which insurance is mandatory
pub const MIN_UNINSURED_DOWN_PAYMENT_RATIO: f64 = 0.20;

/// Longest amortization allowed on an insured mortgage
pub const MAX_INSURED_AMORTIZATION_YEARS: u32 = 25;

/// Longest amortization accepted at all
pub const MAX_AMORTIZATION_YEARS: u32 = 100;

/// Validated inputs for a single mortgage comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Purchase price of the property
    pub purchase_price: f64,

    /// Cash put down at purchase
    pub down_payment: f64,

    /// Total amortization period in years
    pub amortization_years: u32,

    /// Length of each fixed-rate term in years
    pub term_years: u32,
}

impl LoanParameters {
    /// Validate raw inputs
    ///
    /// Rejects non-positive prices, down payments outside `[0, price)`,
    /// amortizations of zero or over [`MAX_AMORTIZATION_YEARS`], and terms
    /// that are zero or longer than the amortization.
    pub fn new(
        purchase_price: f64,
        down_payment: f64,
        amortization_years: u32,
        term_years: u32,
    ) -> MortgageResult<Self> {
        if !purchase_price.is_finite() || purchase_price <= 0.0 {
            return Err(MortgageError::InvalidPurchasePrice(purchase_price));
        }
        if !down_payment.is_finite() || down_payment < 0.0 || down_payment >= purchase_price {
            return Err(MortgageError::InvalidDownPayment {
                down_payment,
                purchase_price,
            });
        }
        if amortization_years == 0 || amortization_years > MAX_AMORTIZATION_YEARS {
            return Err(MortgageError::InvalidAmortization(amortization_years));
        }
        if term_years == 0 || term_years > amortization_years {
            return Err(MortgageError::InvalidTerm {
                term_years,
                amortization_years,
            });
        }

        Ok(Self {
            purchase_price,
            down_payment,
            amortization_years,
            term_years,
        })
    }

    /// Build from a loan amount instead of a down payment
    pub fn from_loan_amount(
        purchase_price: f64,
        loan_amount: f64,
        amortization_years: u32,
        term_years: u32,
    ) -> MortgageResult<Self> {
        Self::new(
            purchase_price,
            purchase_price - loan_amount,
            amortization_years,
            term_years,
        )
    }

    /// Amount borrowed
    pub fn loan_amount(&self) -> f64 {
        self.purchase_price - self.down_payment
    }

    /// Down payment as a fraction of the purchase price
    pub fn down_payment_ratio(&self) -> f64 {
        self.down_payment / self.purchase_price
    }

    /// Loan-to-value at origination
    pub fn ltv(&self) -> f64 {
        self.loan_amount() / self.purchase_price
    }
}

/// Province where the property is located
///
/// Only the provinces that levy sales tax on mortgage insurance premiums are
/// distinguished; every other name is carried as `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Province {
    Quebec,
    Ontario,
    Saskatchewan,
    Other(String),
}

impl Province {
    /// Recognize a free-form province name
    ///
    /// Matching ignores case, surrounding whitespace and French accents, so
    /// "Québec", "quebec" and "QUEBEC" are all Quebec. Unrecognized names
    /// never fail.
    pub fn parse(name: &str) -> Self {
        match normalize_name(name).as_str() {
            "quebec" => Province::Quebec,
            "ontario" => Province::Ontario,
            "saskatchewan" => Province::Saskatchewan,
            _ => Province::Other(name.trim().to_string()),
        }
    }

    /// Sales tax rate applied to the insurance premium
    pub fn premium_tax_rate(&self) -> f64 {
        match self {
            Province::Quebec => 0.09975,
            Province::Ontario => 0.13,
            Province::Saskatchewan => 0.06,
            Province::Other(_) => 0.0,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Province::Quebec => "Quebec",
            Province::Ontario => "Ontario",
            Province::Saskatchewan => "Saskatchewan",
            Province::Other(name) => name.as_str(),
        }
    }
}

/// Lowercase and strip the accents that appear in Canadian place names
fn normalize_name(name: &str) -> String {
    name.trim()
        .to_lowercase()
        .chars()
        .map(|c| match c {
            'à' | 'â' | 'ä' | 'á' => 'a',
            'é' | 'è' | 'ê' | 'ë' => 'e',
            'î' | 'ï' | 'í' => 'i',
            'ô' | 'ö' | 'ó' => 'o',
            'ù' | 'û' | 'ü' | 'ú' => 'u',
            'ç' => 'c',
            'ÿ' => 'y',
            other => other,
        })
        .collect()
}

/// Why a loan cannot be insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IneligibleReason {
    /// Purchase price at or above [`MAX_INSURABLE_PRICE`]
    PriceTooHigh,
    /// Amortization longer than [`MAX_INSURED_AMORTIZATION_YEARS`]
    AmortizationTooLong,
}

/// Outcome of the eligibility screen run before any comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Eligibility {
    /// Insurance is optional, so insured and uninsured costs can be compared
    Comparable,
    /// Down payment is under 20%; insurance is mandatory
    InsuranceRequired,
    /// The loan cannot be insured at all
    NotInsurable(IneligibleReason),
}

impl Eligibility {
    pub fn is_comparable(&self) -> bool {
        matches!(self, Eligibility::Comparable)
    }

    /// Short machine-friendly label used in batch output
    pub fn as_str(&self) -> &'static str {
        match self {
            Eligibility::Comparable => "Comparable",
            Eligibility::InsuranceRequired => "InsuranceRequired",
            Eligibility::NotInsurable(IneligibleReason::PriceTooHigh) => "PriceTooHigh",
            Eligibility::NotInsurable(IneligibleReason::AmortizationTooLong) => {
                "AmortizationTooLong"
            }
        }
    }

    /// Explanation shown to the borrower
    pub fn message(&self) -> &'static str {
        match self {
            Eligibility::Comparable => {
                "Insurance is optional; comparing insured and uninsured costs."
            }
            Eligibility::InsuranceRequired => {
                "Since your down payment is less than 20%, you will need to get mortgage insurance."
            }
            Eligibility::NotInsurable(IneligibleReason::PriceTooHigh) => {
                "The house is not eligible for mortgage insurance since it costs $1 million or more."
            }
            Eligibility::NotInsurable(IneligibleReason::AmortizationTooLong) => {
                "Insured mortgages cannot have amortizations longer than 25 years."
            }
        }
    }
}

/// Screen a loan before comparing insured and uninsured costs
///
/// Checks run in order: price cap, mandatory insurance, amortization cap.
pub fn assess_eligibility(loan: &LoanParameters) -> Eligibility {
    if loan.purchase_price >= MAX_INSURABLE_PRICE {
        Eligibility::NotInsurable(IneligibleReason::PriceTooHigh)
    } else if loan.down_payment_ratio() < MIN_UNINSURED_DOWN_PAYMENT_RATIO {
        Eligibility::InsuranceRequired
    } else if loan.amortization_years > MAX_INSURED_AMORTIZATION_YEARS {
        Eligibility::NotInsurable(IneligibleReason::AmortizationTooLong)
    } else {
        Eligibility::Comparable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_parameters_derived_values() {
        let loan = LoanParameters::new(500_000.0, 100_000.0, 25, 5).unwrap();
        assert_eq!(loan.loan_amount(), 400_000.0);
        assert_eq!(loan.down_payment_ratio(), 0.2);
        assert_eq!(loan.ltv(), 0.8);

        let same = LoanParameters::from_loan_amount(500_000.0, 400_000.0, 25, 5).unwrap();
        assert_eq!(loan, same);
    }

    #[test]
    fn test_loan_parameters_rejects_bad_inputs() {
        assert!(matches!(
            LoanParameters::new(0.0, 0.0, 25, 5),
            Err(MortgageError::InvalidPurchasePrice(_))
        ));
        assert!(matches!(
            LoanParameters::new(f64::NAN, 0.0, 25, 5),
            Err(MortgageError::InvalidPurchasePrice(_))
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, 500_000.0, 25, 5),
            Err(MortgageError::InvalidDownPayment { .. })
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, -1.0, 25, 5),
            Err(MortgageError::InvalidDownPayment { .. })
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, 100_000.0, 0, 0),
            Err(MortgageError::InvalidAmortization(0))
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, 100_000.0, 25, 0),
            Err(MortgageError::InvalidTerm { .. })
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, 100_000.0, 25, 30),
            Err(MortgageError::InvalidTerm { .. })
        ));
    }

    #[test]
    fn test_amortization_cap() {
        assert!(LoanParameters::new(500_000.0, 100_000.0, MAX_AMORTIZATION_YEARS, 5).is_ok());
        assert!(matches!(
            LoanParameters::new(500_000.0, 100_000.0, MAX_AMORTIZATION_YEARS + 1, 5),
            Err(MortgageError::InvalidAmortization(101))
        ));
        assert!(matches!(
            LoanParameters::new(500_000.0, 100_000.0, u32::MAX, u32::MAX),
            Err(MortgageError::InvalidAmortization(u32::MAX))
        ));
    }

    #[test]
    fn test_province_matching_ignores_case_and_accents() {
        for name in ["Québec", "quebec", "QUEBEC", "QUÉBEC", "  Quebec "] {
            assert_eq!(Province::parse(name), Province::Quebec, "{name}");
        }
        assert_eq!(Province::parse("ONTARIO"), Province::Ontario);
        assert_eq!(Province::parse("saskatchewan"), Province::Saskatchewan);
    }

    #[test]
    fn test_unrecognized_province_has_no_tax() {
        let province = Province::parse("British Columbia");
        assert_eq!(province, Province::Other("British Columbia".to_string()));
        assert_eq!(province.premium_tax_rate(), 0.0);
        assert_eq!(province.name(), "British Columbia");
    }

    #[test]
    fn test_eligibility_screen() {
        let comparable = LoanParameters::new(500_000.0, 100_000.0, 25, 5).unwrap();
        assert_eq!(assess_eligibility(&comparable), Eligibility::Comparable);

        let low_down = LoanParameters::new(500_000.0, 99_999.0, 25, 5).unwrap();
        assert_eq!(assess_eligibility(&low_down), Eligibility::InsuranceRequired);

        let expensive = LoanParameters::new(1_000_000.0, 500_000.0, 25, 5).unwrap();
        assert_eq!(
            assess_eligibility(&expensive),
            Eligibility::NotInsurable(IneligibleReason::PriceTooHigh)
        );

        let long = LoanParameters::new(500_000.0, 100_000.0, 30, 5).unwrap();
        assert_eq!(
            assess_eligibility(&long),
            Eligibility::NotInsurable(IneligibleReason::AmortizationTooLong)
        );
    }

    #[test]
    fn test_price_cap_checked_before_down_payment() {
        let loan = LoanParameters::new(1_200_000.0, 10_000.0, 30, 5).unwrap();
        assert_eq!(
            assess_eligibility(&loan),
            Eligibility::NotInsurable(IneligibleReason::PriceTooHigh)
        );
    }
}
