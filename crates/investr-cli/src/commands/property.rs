use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use investr_core::property::acquisition::{self, AcquisitionInput};

use crate::input;

/// Arguments for the acquisition cost assessment
#[derive(Args)]
pub struct AcquisitionArgs {
    /// Plot value
    #[arg(long)]
    pub plot_value: Option<Decimal>,

    /// Flat or house value
    #[arg(long)]
    pub house_value: Option<Decimal>,

    /// Extra house costs (outdoor works, kitchen, ...)
    #[arg(long, default_value = "0")]
    pub extra_house_cost: Decimal,

    /// Downpayment
    #[arg(long)]
    pub downpayment: Option<Decimal>,

    /// Agent commission as a fraction of plot value (e.g. 0.0357)
    #[arg(long)]
    pub real_estate_rate: Option<Decimal>,

    /// Property-transfer tax as a fraction of plot value
    #[arg(long)]
    pub transfer_tax_rate: Option<Decimal>,

    /// Notary fee as a fraction of plot value
    #[arg(long)]
    pub notary_rate: Option<Decimal>,

    /// Plot surface in square meters
    #[arg(long)]
    pub plot_surface: Option<Decimal>,

    /// Living space in square meters
    #[arg(long)]
    pub living_space: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_acquisition(args: AcquisitionArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let acquisition_input: AcquisitionInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        AcquisitionInput {
            plot_value: args
                .plot_value
                .ok_or("--plot-value is required (or provide --input)")?,
            house_value: args
                .house_value
                .ok_or("--house-value is required (or provide --input)")?,
            extra_house_cost: args.extra_house_cost,
            downpayment: args
                .downpayment
                .ok_or("--downpayment is required (or provide --input)")?,
            real_estate_rate: args
                .real_estate_rate
                .ok_or("--real-estate-rate is required (or provide --input)")?,
            property_transfer_tax_rate: args
                .transfer_tax_rate
                .ok_or("--transfer-tax-rate is required (or provide --input)")?,
            notary_rate: args
                .notary_rate
                .ok_or("--notary-rate is required (or provide --input)")?,
            plot_surface: args
                .plot_surface
                .ok_or("--plot-surface is required (or provide --input)")?,
            living_space: args
                .living_space
                .ok_or("--living-space is required (or provide --input)")?,
        }
    };

    let result = acquisition::assess(&acquisition_input)?;
    Ok(serde_json::to_value(result)?)
}
