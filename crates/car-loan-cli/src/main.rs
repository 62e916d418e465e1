mod commands;
mod input;
mod output;
mod telemetry;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::ScheduleArgs;
use commands::vehicle_costs::{AutoTaxArgs, EnvChargeArgs};

/// Car loan repayment planning
#[derive(Parser)]
#[command(
    name = "carloan",
    version,
    about = "Car loan repayment schedules with vehicle tax and diesel charge",
    long_about = "A CLI for planning car loans: equal principal-and-interest repayment \
                  schedules in whole currency units, annual automobile tax by engine \
                  displacement, and the diesel environmental charge, all folded into \
                  a month-by-month outflow."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Log filter used when RUST_LOG is not set (e.g. debug, car_loan_core=trace)
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a month-by-month repayment schedule
    Schedule(ScheduleArgs),
    /// Annual automobile tax for an engine displacement
    AutoTax(AutoTaxArgs),
    /// Monthly equivalent of the diesel environmental charge
    EnvCharge(EnvChargeArgs),
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
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::AutoTax(args) => commands::vehicle_costs::run_auto_tax(args),
        Commands::EnvCharge(args) => commands::vehicle_costs::run_env_charge(args),
        Commands::Version => {
            println!("carloan {}", env!("CARGO_PKG_VERSION"));
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
