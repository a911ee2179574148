use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use investr_core::mortgage::amortization::{self, LoanTerms};
use investr_core::mortgage::combined::{self, CombinedInput};

use crate::input;

/// Arguments for a single-loan amortization schedule
#[derive(Args)]
pub struct AmortizeArgs {
    /// Amortization horizon in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Initial loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate (e.g. 0.0135 for 1.35%)
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Contractual monthly payment once amortization begins
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,

    /// Fraction of original principal repaid extra at each year end
    #[arg(long, default_value = "0")]
    pub extra_repayment_rate: Decimal,

    /// Initial interest-only years
    #[arg(long, default_value = "0")]
    pub interest_only_years: u32,

    /// Calendar month the loan begins (1-12); only year 1 is partial
    #[arg(long, default_value = "1")]
    pub start_month: u32,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a combined multi-tranche schedule
#[derive(Args)]
pub struct CombineArgs {
    /// Path to JSON input file with the tranche list
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms: LoanTerms = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        LoanTerms {
            term_years: args
                .term_years
                .ok_or("--term-years is required (or provide --input)")?,
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate: args
                .annual_rate
                .ok_or("--annual-rate is required (or provide --input)")?,
            monthly_payment: args
                .monthly_payment
                .ok_or("--monthly-payment is required (or provide --input)")?,
            extra_annual_repayment_rate: args.extra_repayment_rate,
            interest_only_years: args.interest_only_years,
            start_month: args.start_month,
        }
    };

    let result = amortization::amortize(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_combine(args: CombineArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let combined_input: CombinedInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json> or stdin required for combined schedules".into());
    };

    let result = combined::combine(&combined_input)?;
    Ok(serde_json::to_value(result)?)
}
