use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use investr_core::mortgage::amortization::{self, LoanTerms};
use investr_core::projection::cagr;
use investr_core::projection::growth::{self, GrowthInput};
use investr_core::projection::net_worth::{self, yearly_schedule, RoiInputs};

use crate::input;

/// Arguments for the buy-vs-rent net-worth projection.
///
/// Either pass a full `RoiInputs` document (with an embedded yearly
/// schedule) via --input/stdin, or pass loan and property flags and the
/// schedule is amortized on the fly.
#[derive(Args)]
pub struct NetWorthArgs {
    /// Path to JSON input file with full projection inputs
    #[arg(long)]
    pub input: Option<String>,

    /// Amortization horizon in years
    #[arg(long)]
    pub term_years: Option<u32>,

    /// Initial loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate
    #[arg(long)]
    pub annual_rate: Option<Decimal>,

    /// Contractual monthly payment
    #[arg(long)]
    pub monthly_payment: Option<Decimal>,

    /// Fraction of original principal repaid extra at each year end
    #[arg(long, default_value = "0")]
    pub extra_repayment_rate: Decimal,

    /// Initial interest-only years
    #[arg(long, default_value = "0")]
    pub interest_only_years: u32,

    /// Calendar month the loan begins (1-12)
    #[arg(long, default_value = "1")]
    pub start_month: u32,

    /// Property value at purchase
    #[arg(long)]
    pub property_value: Option<Decimal>,

    /// Acquisition costs plus any first-year fee, sunk at year 0
    #[arg(long)]
    pub upfront_fee: Option<Decimal>,

    /// Annual cold rent the owner no longer pays
    #[arg(long)]
    pub annual_cold_rent: Option<Decimal>,

    /// Annual rent increase rate
    #[arg(long, default_value = "0")]
    pub rent_increase_rate: Decimal,

    /// Annual maintenance cost
    #[arg(long, default_value = "0")]
    pub annual_maintenance_cost: Decimal,

    /// Annual property tax
    #[arg(long, default_value = "0")]
    pub annual_property_tax: Decimal,

    /// Living surface in square meters
    #[arg(long)]
    pub living_surface: Option<Decimal>,

    /// Annual property appreciation rate
    #[arg(long, default_value = "0")]
    pub appreciation_rate: Decimal,
}

/// Arguments for the recurring savings projection
#[derive(Args)]
pub struct GrowthArgs {
    /// Portfolio value at the start
    #[arg(long, default_value = "0")]
    pub starting_value: Decimal,

    /// Monthly contribution
    #[arg(long)]
    pub monthly_investment: Option<Decimal>,

    /// Expected annual return (e.g. 0.07 for 7%)
    #[arg(long)]
    pub annual_gain_rate: Option<Decimal>,

    /// Lump sum added at the end of each year
    #[arg(long, default_value = "0")]
    pub yearly_extra: Decimal,

    /// Projection horizon in years
    #[arg(long)]
    pub years: Option<u32>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the CAGR calculation
#[derive(Args)]
pub struct CagrArgs {
    /// Value at the start of the period
    #[arg(long)]
    pub starting_value: Decimal,

    /// Value at the end of the period
    #[arg(long)]
    pub ending_value: Decimal,

    /// Length of the period in years
    #[arg(long)]
    pub years: u32,
}

pub fn run_net_worth(args: NetWorthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let roi_inputs: RoiInputs = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        let term_years = args
            .term_years
            .ok_or("--term-years is required (or provide --input)")?;
        let terms = LoanTerms {
            term_years,
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
        };
        let schedule = amortization::amortize(&terms)?;

        RoiInputs {
            schedule: yearly_schedule(&schedule.result.rows),
            property_value: args
                .property_value
                .ok_or("--property-value is required (or provide --input)")?,
            upfront_fee: args
                .upfront_fee
                .ok_or("--upfront-fee is required (or provide --input)")?,
            annual_cold_rent: args
                .annual_cold_rent
                .ok_or("--annual-cold-rent is required (or provide --input)")?,
            term_years,
            rent_increase_rate: args.rent_increase_rate,
            annual_maintenance_cost: args.annual_maintenance_cost,
            annual_property_tax: args.annual_property_tax,
            living_surface: args
                .living_surface
                .ok_or("--living-surface is required (or provide --input)")?,
            property_appreciation_rate: args.appreciation_rate,
        }
    };

    let result = net_worth::project(&roi_inputs)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_growth(args: GrowthArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let growth_input: GrowthInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        GrowthInput {
            starting_value: args.starting_value,
            monthly_investment: args
                .monthly_investment
                .ok_or("--monthly-investment is required (or provide --input)")?,
            annual_gain_rate: args
                .annual_gain_rate
                .ok_or("--annual-gain-rate is required (or provide --input)")?,
            yearly_extra: args.yearly_extra,
            n_years: args.years.ok_or("--years is required (or provide --input)")?,
        }
    };

    let result = growth::project_growth(&growth_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_cagr(args: CagrArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let rate = cagr::cagr(args.starting_value, args.ending_value, args.years)?;
    Ok(serde_json::json!({
        "starting_value": args.starting_value.to_string(),
        "ending_value": args.ending_value.to_string(),
        "years": args.years,
        "cagr": rate.to_string(),
    }))
}
