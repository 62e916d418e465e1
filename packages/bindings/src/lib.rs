use car_loan_core::loan::{amortization, env_charge, quote, tax};
use car_loan_core::{FuelType, Money};
use napi::Result as NapiResult;
use napi_derive::napi;
use serde::Deserialize;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Loan schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan_quote(input_json: String) -> NapiResult<String> {
    let input: quote::LoanQuoteRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = quote::calculate_loan_quote(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_schedule(input_json: String) -> NapiResult<String> {
    let input: amortization::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let summary = amortization::compute_schedule(&input);
    serde_json::to_string(&summary).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Vehicle running costs
// ---------------------------------------------------------------------------

#[napi]
pub fn auto_tax(engine_displacement: u32) -> NapiResult<String> {
    let result = tax::auto_tax(Some(engine_displacement));
    serde_json::to_string(&result).map_err(to_napi_error)
}

#[derive(Deserialize)]
struct EnvChargeInput {
    semi_annual: Option<Money>,
    fuel_type: Option<FuelType>,
}

#[napi]
pub fn env_charge(input_json: String) -> NapiResult<String> {
    let input: EnvChargeInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let result = env_charge::env_charge(input.semi_annual, input.fuel_type);
    serde_json::to_string(&result).map_err(to_napi_error)
}
