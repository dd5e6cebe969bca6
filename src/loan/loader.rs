//! Load loan scenarios for batch comparisons from CSV

use super::{LoanParameters, Province};
use crate::error::MortgageResult;
use crate::rates::RateScenario;
use csv::Reader;
use serde::Serialize;
use std::path::Path;

/// Raw CSV row matching the batch scenario columns
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "PurchasePrice")]
    purchase_price: f64,
    #[serde(rename = "DownPayment")]
    down_payment: f64,
    #[serde(rename = "Amortization")]
    amortization: u32,
    #[serde(rename = "Term")]
    term: u32,
    #[serde(rename = "Province")]
    province: String,
    #[serde(rename = "InsuredInitial")]
    insured_initial: f64,
    #[serde(rename = "InsuredRenewal")]
    insured_renewal: f64,
    #[serde(rename = "UninsuredInitial")]
    uninsured_initial: f64,
    #[serde(rename = "UninsuredRenewal65")]
    uninsured_renewal_65: f64,
    #[serde(rename = "UninsuredRenewal70")]
    uninsured_renewal_70: f64,
    #[serde(rename = "UninsuredRenewal75")]
    uninsured_renewal_75: f64,
    #[serde(rename = "UninsuredRenewal80")]
    uninsured_renewal_80: f64,
}

impl CsvRow {
    fn into_scenario(self) -> MortgageResult<LoanScenario> {
        let loan = LoanParameters::new(
            self.purchase_price,
            self.down_payment,
            self.amortization,
            self.term,
        )?;
        let rates = RateScenario::new(
            self.insured_initial,
            self.insured_renewal,
            self.uninsured_initial,
            self.uninsured_renewal_65,
            self.uninsured_renewal_70,
            self.uninsured_renewal_75,
            self.uninsured_renewal_80,
        )?;

        Ok(LoanScenario {
            scenario_id: self.scenario_id,
            loan,
            province: Province::parse(&self.province),
            rates,
        })
    }
}

/// One row of a batch: a loan, where it is, and the rates to price it with
#[derive(Debug, Clone, Serialize)]
pub struct LoanScenario {
    pub scenario_id: u32,
    pub loan: LoanParameters,
    pub province: Province,
    pub rates: RateScenario,
}

/// Load all scenarios from a CSV file
pub fn load_scenarios<P: AsRef<Path>>(path: P) -> MortgageResult<Vec<LoanScenario>> {
    let reader = Reader::from_path(path)?;
    collect_scenarios(reader)
}

/// Load scenarios from any reader (e.g., string buffer, stdin)
pub fn load_scenarios_from_reader<R: std::io::Read>(reader: R) -> MortgageResult<Vec<LoanScenario>> {
    collect_scenarios(Reader::from_reader(reader))
}

fn collect_scenarios<R: std::io::Read>(mut reader: Reader<R>) -> MortgageResult<Vec<LoanScenario>> {
    let mut scenarios = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        scenarios.push(row.into_scenario()?);
    }

    Ok(scenarios)
}
