//! Run insured vs. uninsured comparisons for a CSV of loan scenarios
//!
//! Usage: run_batch --input scenarios.csv --output comparison_output.csv

use anyhow::{Context, Result};
use clap::Parser;
use log::warn;
use mortgage_compare::comparison::{compare_scenarios, ScenarioOutcome};
use mortgage_compare::loan::load_scenarios;
use mortgage_compare::PaymentBasis;
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "run_batch")]
#[command(about = "Batch insured vs. uninsured mortgage comparisons", long_about = None)]
struct Args {
    /// Scenario CSV to read
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the comparison CSV
    #[arg(short, long, default_value = "comparison_output.csv")]
    output: PathBuf,

    /// Size renewal payments over the original amortization instead of the remaining one
    #[arg(long)]
    original_amortization: bool,
}

/// One output row per scenario
#[derive(Serialize)]
struct OutputRow {
    #[serde(rename = "ScenarioID")]
    scenario_id: u32,
    #[serde(rename = "Eligibility")]
    eligibility: &'static str,
    #[serde(rename = "Premium")]
    premium: Option<f64>,
    #[serde(rename = "PremiumTax")]
    premium_tax: Option<f64>,
    #[serde(rename = "InsuredTotal")]
    insured_total: Option<f64>,
    #[serde(rename = "UninsuredTotal")]
    uninsured_total: Option<f64>,
    #[serde(rename = "Cheaper")]
    cheaper: Option<&'static str>,
    #[serde(rename = "Difference")]
    difference: Option<f64>,
}

impl From<&ScenarioOutcome> for OutputRow {
    fn from(outcome: &ScenarioOutcome) -> Self {
        let comparison = outcome.comparison.as_ref();
        let quote = comparison.and_then(|c| c.insured.insurance);
        Self {
            scenario_id: outcome.scenario_id,
            eligibility: outcome.eligibility.as_str(),
            premium: quote.map(|q| round_cents(q.premium)),
            premium_tax: quote.map(|q| round_cents(q.premium_tax)),
            insured_total: comparison.map(|c| round_cents(c.insured.total_cost)),
            uninsured_total: comparison.map(|c| round_cents(c.uninsured.total_cost)),
            cheaper: comparison.map(|c| c.cheaper.as_str()),
            difference: comparison.map(|c| round_cents(c.difference)),
        }
    }
}

fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    println!("Loading scenarios from {}...", args.input.display());
    let scenarios = load_scenarios(&args.input)
        .with_context(|| format!("failed to load scenarios from {}", args.input.display()))?;
    println!("Loaded {} scenarios in {:?}", scenarios.len(), start.elapsed());

    let basis = if args.original_amortization {
        PaymentBasis::Original
    } else {
        PaymentBasis::Remaining
    };

    println!("Running comparisons...");
    let run_start = Instant::now();
    let outcomes = compare_scenarios(&scenarios, basis);
    println!("Comparisons complete in {:?}", run_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;
    let mut comparable = 0;
    for outcome in &outcomes {
        if outcome.comparison.is_some() {
            comparable += 1;
        } else {
            warn!(
                "Scenario {} skipped: {}",
                outcome.scenario_id,
                outcome.eligibility.message()
            );
        }
        writer.serialize(OutputRow::from(outcome))?;
    }
    writer.flush()?;

    println!("Output written to {}", args.output.display());
    println!("\nBatch Summary:");
    println!("  Scenarios:  {}", outcomes.len());
    println!("  Comparable: {}", comparable);
    println!("  Skipped:    {}", outcomes.len() - comparable);
    println!("\nTotal time: {:?}", start.elapsed());

    Ok(())
}
