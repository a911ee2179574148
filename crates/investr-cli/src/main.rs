mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::mortgage::{AmortizeArgs, CombineArgs};
use commands::projection::{CagrArgs, GrowthArgs, NetWorthArgs};
use commands::property::AcquisitionArgs;

/// Household mortgage and net-worth calculations
#[derive(Parser)]
#[command(
    name = "investr",
    version,
    about = "Household mortgage and net-worth calculations",
    long_about = "A CLI for household investment arithmetic with decimal precision. \
                  Amortizes mortgage loans year by year, combines multi-tranche \
                  financings, and projects net worth of buying against renting."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Year-by-year amortization schedule for a single loan
    Amortize(AmortizeArgs),
    /// Combine several loan tranches into one schedule
    Combine(CombineArgs),
    /// Project net worth of buying a property against renting
    NetWorth(NetWorthArgs),
    /// Project a recurring savings plan
    Growth(GrowthArgs),
    /// Compound annual growth rate between two values
    Cagr(CagrArgs),
    /// Acquisition cost breakdown and required loan
    Acquisition(AcquisitionArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Amortize(args) => commands::mortgage::run_amortize(args),
        Commands::Combine(args) => commands::mortgage::run_combine(args),
        Commands::NetWorth(args) => commands::projection::run_net_worth(args),
        Commands::Growth(args) => commands::projection::run_growth(args),
        Commands::Cagr(args) => commands::projection::run_cagr(args),
        Commands::Acquisition(args) => commands::property::run_acquisition(args),
        Commands::Version => {
            println!("investr {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
