use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use car_loan_core::loan::quote::{self, LoanQuoteRequest};
use car_loan_core::FuelType;

use super::parse_amount;
use crate::input;

/// Arguments for a full repayment schedule
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Vehicle price
    #[arg(long, value_parser = parse_amount)]
    pub vehicle_price: Option<Decimal>,

    /// Down payment
    #[arg(long, value_parser = parse_amount)]
    pub down_payment: Option<Decimal>,

    /// Loan principal [default: vehicle price minus down payment]
    #[arg(long, value_parser = parse_amount)]
    pub loan_amount: Option<Decimal>,

    /// Annual interest rate in percent (5.5 = 5.5%)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Number of monthly installments [default: 36]
    #[arg(long, alias = "months")]
    pub term_months: Option<i64>,

    /// Disbursement date, YYYY-MM-DD [default: today]
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Engine displacement in cc
    #[arg(long, alias = "cc")]
    pub displacement: Option<i64>,

    /// Fuel type: diesel, gasoline, electric, hybrid or other
    #[arg(long)]
    pub fuel_type: Option<FuelType>,

    /// Semi-annual environmental charge (diesel only)
    #[arg(long, value_parser = parse_amount)]
    pub env_charge: Option<Decimal>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let request: LoanQuoteRequest = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        request_from_flags(&args)?
    };

    let result = quote::calculate_loan_quote(&request)?;
    Ok(serde_json::to_value(result)?)
}

fn request_from_flags(args: &ScheduleArgs) -> Result<LoanQuoteRequest, Box<dyn std::error::Error>> {
    Ok(LoanQuoteRequest {
        vehicle_price: args.vehicle_price,
        down_payment: args.down_payment,
        loan_amount: args.loan_amount,
        interest_rate: args
            .interest_rate
            .ok_or("--interest-rate is required (or provide --input)")?,
        term_months: args.term_months,
        start_date: args.start_date,
        engine_displacement: args.displacement,
        fuel_type: args.fuel_type,
        env_charge_semi_annual: args.env_charge,
    })
}
