//! Environmental improvement charge for diesel vehicles.
//!
//! Billed twice a year as a fixed amount; the schedule carries its
//! monthly equivalent.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{FuelType, Money};

/// Semi-annual charge assumed for a diesel vehicle when none is supplied.
pub const DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE: Money = dec!(50_000);

const MONTHS_PER_HALF_YEAR: Decimal = dec!(6);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvCharge {
    pub semi_annual: Money,
    pub monthly: Money,
}

/// floor(semi_annual / 6) for diesel vehicles with a positive charge,
/// otherwise None (absent, not zero).
pub fn monthly_env_charge(semi_annual: Money, fuel_type: FuelType) -> Option<Money> {
    if fuel_type != FuelType::Diesel || semi_annual <= Decimal::ZERO {
        return None;
    }
    Some((semi_annual / MONTHS_PER_HALF_YEAR).floor())
}

/// The charge block for a loan summary.
pub fn env_charge(semi_annual: Option<Money>, fuel_type: Option<FuelType>) -> Option<EnvCharge> {
    let semi_annual = semi_annual?;
    let monthly = monthly_env_charge(semi_annual, fuel_type?)?;
    Some(EnvCharge {
        semi_annual,
        monthly,
    })
}
