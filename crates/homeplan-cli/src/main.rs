mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::affordability::AffordabilityArgs;
use commands::loan::LoanArgs;
use commands::region::{DistrictsArgs, NeighborhoodsArgs};

/// Home-purchase loan simulation and affordability checks
#[derive(Parser)]
#[command(
    name = "homeplan",
    version,
    about = "Home-purchase loan simulation and affordability checks",
    long_about = "A CLI for home-purchase financial planning with decimal precision. \
                  Computes loan repayments and schedules, checks LTV / DSR limits, \
                  and looks up provinces, districts and neighborhoods."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is unset (e.g. "debug", "homeplan_core=debug")
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Monthly payment and total interest for a loan
    Loan(LoanArgs),
    /// Month-by-month repayment schedule
    Schedule(LoanArgs),
    /// LTV / DSR checks and maximum loan amount
    Affordability(AffordabilityArgs),
    /// List the districts of a province
    Districts(DistrictsArgs),
    /// List the neighborhoods of a district
    Neighborhoods(NeighborhoodsArgs),
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

    if let Err(e) = telemetry::init(&cli.log_level) {
        eprintln!("{}: {}", "error".red().bold(), e);
        process::exit(1);
    }

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Loan(args) => commands::loan::run_loan(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Affordability(args) => commands::affordability::run_affordability(args),
        Commands::Districts(args) => commands::region::run_districts(args),
        Commands::Neighborhoods(args) => commands::region::run_neighborhoods(args),
        Commands::Version => {
            println!("homeplan {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            tracing::debug!(error = %e, "command failed");
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
