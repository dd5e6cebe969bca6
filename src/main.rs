//! Mortgage Compare CLI
//!
//! Compares the lifetime cost of an insured and an uninsured mortgage.
//!
//! ```bash
//! mortgage_compare --purchase-price 500000 --down-payment 100000 \
//!     --amortization 25 --term 5 --province Ontario \
//!     --insured-initial 4.5 --insured-renewal 5.0 --uninsured-initial 5.5 \
//!     --uninsured-renewal-65 5.1 --uninsured-renewal-70 5.2 \
//!     --uninsured-renewal-75 5.3 --uninsured-renewal-80 5.4
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;
use mortgage_compare::{
    ComparisonResult, ComparisonRunner, CostProjection, LoanParameters, MortgageCostEngine,
    PaymentBasis, ProjectionConfig, Province, RateScenario,
};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Compare insured and uninsured mortgage costs over the full amortization
#[derive(Parser)]
#[command(name = "mortgage_compare")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Purchase price ($)
    #[arg(long)]
    purchase_price: f64,

    /// Down payment ($)
    #[arg(long)]
    down_payment: f64,

    /// Initial amortization period (years)
    #[arg(long)]
    amortization: u32,

    /// Term period (years)
    #[arg(long)]
    term: u32,

    /// Province where the property is located
    #[arg(long)]
    province: String,

    /// Initial interest rate if insured (%)
    #[arg(long)]
    insured_initial: f64,

    /// Estimated future interest rate if insured (%)
    #[arg(long)]
    insured_renewal: f64,

    /// Initial interest rate if uninsured (%)
    #[arg(long)]
    uninsured_initial: f64,

    /// Estimated future uninsured rate at 0-65% LTV (%)
    #[arg(long = "uninsured-renewal-65")]
    uninsured_renewal_65: f64,

    /// Estimated future uninsured rate at 65-70% LTV (%)
    #[arg(long = "uninsured-renewal-70")]
    uninsured_renewal_70: f64,

    /// Estimated future uninsured rate at 70-75% LTV (%)
    #[arg(long = "uninsured-renewal-75")]
    uninsured_renewal_75: f64,

    /// Estimated future uninsured rate at 75-80% LTV (%)
    #[arg(long = "uninsured-renewal-80")]
    uninsured_renewal_80: f64,

    /// Amortization used to size renewal payments
    #[arg(long, value_enum, default_value = "remaining")]
    payment_basis: BasisArg,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: OutputFormat,

    /// Write the month-by-month schedule of both options to this CSV file
    #[arg(long)]
    schedule: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum BasisArg {
    Remaining,
    Original,
}

impl From<BasisArg> for PaymentBasis {
    fn from(arg: BasisArg) -> Self {
        match arg {
            BasisArg::Remaining => PaymentBasis::Remaining,
            BasisArg::Original => PaymentBasis::Original,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Table,
    /// JSON with every term of both projections
    Json,
}

/// Schedule CSV row
#[derive(Serialize)]
struct ScheduleRecord {
    #[serde(rename = "Option")]
    option: &'static str,
    #[serde(rename = "Month")]
    month: u32,
    #[serde(rename = "OpeningBalance")]
    opening_balance: f64,
    #[serde(rename = "Interest")]
    interest: f64,
    #[serde(rename = "Principal")]
    principal: f64,
    #[serde(rename = "ClosingBalance")]
    closing_balance: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    let loan = LoanParameters::new(
        cli.purchase_price,
        cli.down_payment,
        cli.amortization,
        cli.term,
    )
    .context("invalid loan parameters")?;

    let eligibility = mortgage_compare::assess_eligibility(&loan);
    if !eligibility.is_comparable() {
        println!("{}", eligibility.message());
        return Ok(());
    }

    let rates = RateScenario::new(
        cli.insured_initial,
        cli.insured_renewal,
        cli.uninsured_initial,
        cli.uninsured_renewal_65,
        cli.uninsured_renewal_70,
        cli.uninsured_renewal_75,
        cli.uninsured_renewal_80,
    )
    .context("invalid rate scenario")?;

    let config = ProjectionConfig::new(rates, Province::parse(&cli.province))
        .with_payment_basis(cli.payment_basis.into());
    info!("Comparing {:?} with {:?}", loan, config);

    let runner = ComparisonRunner::new(config);
    let result = runner.compare(&loan);

    match cli.format {
        OutputFormat::Table => print_table(&result),
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&result).context("failed to serialize result")?;
            println!("{}", json);
        }
    }

    if let Some(path) = cli.schedule {
        write_schedule(&path, runner.config(), &loan)
            .with_context(|| format!("failed to write schedule to {}", path.display()))?;
        println!("\nSchedule written to: {}", path.display());
    }

    Ok(())
}

fn print_table(result: &ComparisonResult) {
    println!("Mortgage Compare v{}", env!("CARGO_PKG_VERSION"));
    println!("{}\n", "=".repeat(24));

    println!(
        "Loan: ${:.2} ({:.1}% down), {}-year amortization, {}-year terms",
        result.loan.loan_amount(),
        result.loan.down_payment_ratio() * 100.0,
        result.loan.amortization_years,
        result.loan.term_years,
    );

    if let Some(quote) = result.insured.insurance {
        println!(
            "Insurance premium: ${:.2} ({:.1}%), premium tax: ${:.2}",
            quote.premium,
            quote.premium_rate * 100.0,
            quote.premium_tax
        );
    }
    println!();

    print_terms("Insured", &result.insured);
    print_terms("Uninsured", &result.uninsured);

    println!(
        "The total cost of the insured mortgage is: ${:.2}",
        result.insured.total_cost
    );
    println!(
        "The total cost of the uninsured mortgage is: ${:.2}",
        result.uninsured.total_cost
    );
    println!("\n{}", result.cheaper.message());
    println!(
        "\nThe cost difference over the life of the loan is: ${:.2}",
        result.difference
    );
}

fn print_terms(label: &str, projection: &CostProjection) {
    println!("{} terms:", label);
    println!(
        "{:>4} {:>7} {:>12} {:>14} {:>14} {:>14}",
        "Term", "Rate", "Payment", "Term Cost", "Principal", "Balance"
    );
    println!("{}", "-".repeat(70));
    for row in &projection.terms {
        println!(
            "{:>4} {:>6.3}% {:>12.2} {:>14.2} {:>14.2} {:>14.2}",
            row.term,
            row.rate,
            row.monthly_payment,
            row.term_cost,
            row.principal_repaid,
            row.closing_balance,
        );
    }
    println!("Final lump sum: ${:.2}\n", projection.final_lump_sum);
}

fn write_schedule(path: &Path, config: &ProjectionConfig, loan: &LoanParameters) -> Result<()> {
    let engine = MortgageCostEngine::new(config.clone());
    let mut writer = csv::Writer::from_path(path)?;

    for (option, insured) in [("Insured", true), ("Uninsured", false)] {
        for row in engine.monthly_schedule(loan, insured) {
            writer.serialize(ScheduleRecord {
                option,
                month: row.month,
                opening_balance: row.opening_balance,
                interest: row.interest,
                principal: row.principal,
                closing_balance: row.closing_balance,
            })?;
        }
    }

    writer.flush()?;
    Ok(())
}
