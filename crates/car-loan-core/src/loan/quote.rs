//! Loan quotes: turns what a user typed into a form (price, down payment,
//! rate, optional term and start date, vehicle details) into a validated
//! [`LoanInput`], runs the amortization, and wraps the result in the
//! standard computation envelope.
//!
//! This is where the collaborator-level defaults live: a 36 month term, a
//! start date of today, a loan amount of `price - down payment`, and the
//! default diesel charge.

use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

use crate::error::CarLoanError;
use crate::loan::amortization::{compute_schedule, LoanInput, LoanSummary};
use crate::loan::env_charge::DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE;
use crate::time_value::add_months;
use crate::types::{elapsed_us, with_metadata, ComputationOutput, FuelType, Money, Rate};
use crate::CarLoanResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const DEFAULT_TERM_MONTHS: i64 = 36;
pub const MAX_TERM_MONTHS: i64 = 600;
/// Upper bound on the annual rate, in percent.
pub const MAX_INTEREST_RATE_PCT: Rate = dec!(100);

// ---------------------------------------------------------------------------
// Input Types
// ---------------------------------------------------------------------------

/// A quote request as the form or API collects it. Everything but the rate
/// is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoanQuoteRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle_price: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    /// Defaults to `max(0, vehicle_price - down_payment)`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_amount: Option<Money>,
    /// Annual percentage rate (5.5 = 5.5%).
    pub interest_rate: Rate,
    /// Defaults to 36.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub term_months: Option<i64>,
    /// Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engine_displacement: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub env_charge_semi_annual: Option<Money>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Quote a loan, defaulting the start date to the local date.
pub fn calculate_loan_quote(
    request: &LoanQuoteRequest,
) -> CarLoanResult<ComputationOutput<LoanSummary>> {
    calculate_loan_quote_on(request, Local::now().date_naive())
}

/// Quote a loan with an explicit "today" for the start-date default.
pub fn calculate_loan_quote_on(
    request: &LoanQuoteRequest,
    today: NaiveDate,
) -> CarLoanResult<ComputationOutput<LoanSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let input = build_loan_input(request, today, &mut warnings)?;
    let summary = compute_schedule(&input);

    for w in &warnings {
        warn!(warning = %w, "loan quote");
    }

    let elapsed = elapsed_us(start.elapsed());
    Ok(with_metadata(
        "Equal principal and interest amortization with monthly auto tax and diesel charge",
        &serde_json::json!({
            "loan_amount": input.loan_amount.to_string(),
            "interest_rate_pct": input.interest_rate.to_string(),
            "term_months": input.term_months,
            "start_date": input.start_date.to_string(),
            "payment_date_rule": "start date + n months, clamped to month end",
            "rounding": "level payment and monthly interest floored to whole units; final installment clears the balance",
        }),
        warnings,
        elapsed,
        summary,
    ))
}

/// Validate a request and resolve its defaults into a [`LoanInput`].
pub fn build_loan_input(
    request: &LoanQuoteRequest,
    today: NaiveDate,
    warnings: &mut Vec<String>,
) -> CarLoanResult<LoanInput> {
    if let Some(price) = request.vehicle_price {
        validate_amount("vehicle_price", price)?;
    }
    if let Some(down) = request.down_payment {
        validate_amount("down_payment", down)?;
    }
    if let Some(amount) = request.loan_amount {
        validate_amount("loan_amount", amount)?;
    }
    if let Some(charge) = request.env_charge_semi_annual {
        validate_amount("env_charge_semi_annual", charge)?;
    }

    if let (Some(price), Some(down)) = (request.vehicle_price, request.down_payment) {
        if down > price {
            return Err(CarLoanError::InvalidInput {
                field: "down_payment".into(),
                reason: "Down payment cannot exceed the vehicle price".into(),
            });
        }
    }

    let loan_amount = resolve_loan_amount(request)?;
    if loan_amount.is_zero() {
        warnings.push("Loan amount is zero; no repayment schedule is produced".into());
    }

    if request.interest_rate < Decimal::ZERO || request.interest_rate > MAX_INTEREST_RATE_PCT {
        return Err(CarLoanError::InvalidInput {
            field: "interest_rate".into(),
            reason: format!("Interest rate must be between 0 and {MAX_INTEREST_RATE_PCT} percent"),
        });
    }

    let term_months = request.term_months.unwrap_or(DEFAULT_TERM_MONTHS);
    if !(1..=MAX_TERM_MONTHS).contains(&term_months) {
        return Err(CarLoanError::InvalidInput {
            field: "term_months".into(),
            reason: format!("Term must be between 1 and {MAX_TERM_MONTHS} months"),
        });
    }

    let engine_displacement = match request.engine_displacement {
        None => None,
        Some(cc) => Some(u32::try_from(cc).map_err(|_| CarLoanError::InvalidInput {
            field: "engine_displacement".into(),
            reason: "Engine displacement must be a non-negative number of cc".into(),
        })?),
    };

    let env_charge_semi_annual = resolve_env_charge(request, warnings);

    let start_date = request.start_date.unwrap_or(today);
    // Every installment date must be representable.
    if add_months(start_date, term_months as u32).is_none() {
        return Err(CarLoanError::DateError(format!(
            "Payment dates starting {start_date} run past the supported calendar range"
        )));
    }

    let input = LoanInput {
        vehicle_price: request.vehicle_price,
        down_payment: request.down_payment,
        engine_displacement,
        fuel_type: request.fuel_type,
        env_charge_semi_annual,
        loan_amount,
        interest_rate: request.interest_rate,
        term_months: term_months as i32,
        start_date,
    };
    debug!(?input, "resolved loan quote request");
    Ok(input)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

fn validate_amount(field: &str, amount: Money) -> CarLoanResult<()> {
    if amount < Decimal::ZERO {
        return Err(CarLoanError::InvalidInput {
            field: field.into(),
            reason: "Amount cannot be negative".into(),
        });
    }
    if amount != amount.trunc() {
        return Err(CarLoanError::InvalidInput {
            field: field.into(),
            reason: "Amount must be in whole currency units".into(),
        });
    }
    Ok(())
}

fn resolve_loan_amount(request: &LoanQuoteRequest) -> CarLoanResult<Money> {
    let derived = request
        .vehicle_price
        .map(|price| (price - request.down_payment.unwrap_or(Decimal::ZERO)).max(Decimal::ZERO));

    match (request.loan_amount, derived) {
        (Some(given), Some(derived)) if given != derived => Err(CarLoanError::InvalidInput {
            field: "loan_amount".into(),
            reason: format!(
                "Loan amount {given} does not match vehicle price minus down payment ({derived})"
            ),
        }),
        (Some(given), _) => Ok(given),
        (None, Some(derived)) => Ok(derived),
        (None, None) => Err(CarLoanError::InvalidInput {
            field: "loan_amount".into(),
            reason: "Provide a loan amount or a vehicle price".into(),
        }),
    }
}

fn resolve_env_charge(request: &LoanQuoteRequest, warnings: &mut Vec<String>) -> Option<Money> {
    match (request.fuel_type, request.env_charge_semi_annual) {
        (Some(FuelType::Diesel), Some(charge)) => Some(charge),
        (Some(FuelType::Diesel), None) => {
            warnings.push(format!(
                "No environmental charge given for a diesel vehicle; assuming {DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE} per half-year"
            ));
            Some(DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE)
        }
        (fuel, Some(charge)) if charge > Decimal::ZERO => {
            let fuel = fuel.map(|f| f.to_string()).unwrap_or_else(|| "unspecified".into());
            warnings.push(format!(
                "Environmental charge applies to diesel vehicles only; ignored for fuel type {fuel}"
            ));
            None
        }
        _ => None,
    }
}
