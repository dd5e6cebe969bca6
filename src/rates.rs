//! Interest rate scenarios keyed by insurance status, term and LTV band

use serde::{Deserialize, Serialize};

use crate::error::{MortgageError, MortgageResult};

/// Loan-to-value band used to price uninsured renewals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LtvBand {
    /// LTV <= 65%
    UpTo65,
    /// 65% < LTV <= 70%
    UpTo70,
    /// 70% < LTV <= 75%
    UpTo75,
    /// LTV > 75%
    Over75,
}

impl LtvBand {
    /// Band for a loan-to-value ratio (upper bounds are inclusive)
    pub fn from_ratio(ltv: f64) -> Self {
        if ltv <= 0.65 {
            LtvBand::UpTo65
        } else if ltv <= 0.70 {
            LtvBand::UpTo70
        } else if ltv <= 0.75 {
            LtvBand::UpTo75
        } else {
            LtvBand::Over75
        }
    }
}

/// Annual percentage rates (e.g. 5.25 for 5.25%) for one comparison run
///
/// Rates are nominal, compounded semi-annually.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateScenario {
    /// Initial term rate when insured
    pub insured_initial: f64,

    /// Expected renewal rate when insured
    pub insured_renewal: f64,

    /// Initial term rate when uninsured
    pub uninsured_initial: f64,

    /// Expected uninsured renewal rate at LTV <= 65%
    pub uninsured_renewal_65: f64,

    /// Expected uninsured renewal rate at 65% < LTV <= 70%
    pub uninsured_renewal_70: f64,

    /// Expected uninsured renewal rate at 70% < LTV <= 75%
    pub uninsured_renewal_75: f64,

    /// Expected uninsured renewal rate at LTV > 75%
    pub uninsured_renewal_80: f64,
}

impl RateScenario {
    /// Validate and build a scenario; every rate must be finite and non-negative
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        insured_initial: f64,
        insured_renewal: f64,
        uninsured_initial: f64,
        uninsured_renewal_65: f64,
        uninsured_renewal_70: f64,
        uninsured_renewal_75: f64,
        uninsured_renewal_80: f64,
    ) -> MortgageResult<Self> {
        let scenario = Self {
            insured_initial,
            insured_renewal,
            uninsured_initial,
            uninsured_renewal_65,
            uninsured_renewal_70,
            uninsured_renewal_75,
            uninsured_renewal_80,
        };
        scenario.validate()?;
        Ok(scenario)
    }

    /// Same rate everywhere; handy for sensitivity runs
    pub fn flat(rate: f64) -> MortgageResult<Self> {
        Self::new(rate, rate, rate, rate, rate, rate, rate)
    }

    /// Check every rate is finite and non-negative
    pub fn validate(&self) -> MortgageResult<()> {
        let named = [
            ("insured initial", self.insured_initial),
            ("insured renewal", self.insured_renewal),
            ("uninsured initial", self.uninsured_initial),
            ("uninsured renewal (0-65% LTV)", self.uninsured_renewal_65),
            ("uninsured renewal (65-70% LTV)", self.uninsured_renewal_70),
            ("uninsured renewal (70-75% LTV)", self.uninsured_renewal_75),
            ("uninsured renewal (75-80% LTV)", self.uninsured_renewal_80),
        ];
        for (name, value) in named {
            if !value.is_finite() || value < 0.0 {
                return Err(MortgageError::InvalidRate { name, value });
            }
        }
        Ok(())
    }

    /// Uninsured renewal rate for a band
    pub fn uninsured_renewal(&self, band: LtvBand) -> f64 {
        match band {
            LtvBand::UpTo65 => self.uninsured_renewal_65,
            LtvBand::UpTo70 => self.uninsured_renewal_70,
            LtvBand::UpTo75 => self.uninsured_renewal_75,
            LtvBand::Over75 => self.uninsured_renewal_80,
        }
    }

    /// Rate applicable to a term
    ///
    /// Uninsured renewals are priced off the current LTV; every other
    /// combination has a single rate.
    pub fn select(&self, insured: bool, is_initial: bool, current_ltv: f64) -> f64 {
        match (insured, is_initial) {
            (true, true) => self.insured_initial,
            (true, false) => self.insured_renewal,
            (false, true) => self.uninsured_initial,
            (false, false) => self.uninsured_renewal(LtvBand::from_ratio(current_ltv)),
        }
    }
}
