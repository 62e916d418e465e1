use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use car_loan_core::loan::env_charge::{self, DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE};
use car_loan_core::loan::tax;
use car_loan_core::FuelType;

use super::parse_amount;

/// Arguments for the annual automobile tax estimate
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct AutoTaxArgs {
    /// Engine displacement in cc
    #[arg(long, alias = "cc")]
    pub displacement: i64,
}

/// Arguments for the diesel environmental charge
#[derive(Args)]
pub struct EnvChargeArgs {
    /// Semi-annual charge [default: 50,000]
    #[arg(long, value_parser = parse_amount)]
    pub semi_annual: Option<Decimal>,

    /// Fuel type; only diesel carries the charge
    #[arg(long, default_value = "diesel")]
    pub fuel_type: FuelType,
}

pub fn run_auto_tax(args: AutoTaxArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let cc = u32::try_from(args.displacement)
        .map_err(|_| "--displacement must be a non-negative number of cc")?;

    let rate_per_cc = tax::tax_rate_per_cc(cc);
    let base_tax = Decimal::from(cc) * rate_per_cc;
    let annual = tax::annual_auto_tax(cc);

    Ok(json!({
        "result": {
            "displacement_cc": cc,
            "rate_per_cc": rate_per_cc,
            "base_tax": base_tax,
            "education_surtax": annual - base_tax,
            "annual": annual,
            "monthly": tax::monthly_auto_tax(annual),
        },
        "methodology": "Tiered per-cc automobile tax plus 30% local education surtax",
    }))
}

pub fn run_env_charge(args: EnvChargeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let semi_annual = args
        .semi_annual
        .unwrap_or(DEFAULT_DIESEL_SEMI_ANNUAL_CHARGE);
    if semi_annual < Decimal::ZERO {
        return Err("--semi-annual cannot be negative".into());
    }

    let result = match env_charge::env_charge(Some(semi_annual), Some(args.fuel_type)) {
        Some(charge) => json!({
            "fuel_type": args.fuel_type,
            "applies": true,
            "semi_annual": charge.semi_annual,
            "monthly": charge.monthly,
        }),
        None => json!({
            "fuel_type": args.fuel_type,
            "applies": false,
            "semi_annual": semi_annual,
        }),
    };

    Ok(json!({
        "result": result,
        "methodology": "Semi-annual environmental charge spread over six months (diesel only)",
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_tax_breakdown() {
        let value = run_auto_tax(AutoTaxArgs { displacement: 1598 }).unwrap();
        let result = &value["result"];
        // 1598 * 140 = 223,720 base; surtax 67,116; annual 290,836
        assert_eq!(result["base_tax"], "223720");
        assert_eq!(result["education_surtax"], "67116");
        assert_eq!(result["annual"], "290836");
        assert_eq!(result["monthly"], "24236");
    }

    #[test]
    fn test_auto_tax_rejects_negative_displacement() {
        assert!(run_auto_tax(AutoTaxArgs { displacement: -1 }).is_err());
    }

    #[test]
    fn test_env_charge_for_gasoline_does_not_apply() {
        let value = run_env_charge(EnvChargeArgs {
            semi_annual: Some(Decimal::from(50_000)),
            fuel_type: FuelType::Gasoline,
        })
        .unwrap();
        assert_eq!(value["result"]["applies"], false);
        assert!(value["result"].get("monthly").is_none());
    }

    #[test]
    fn test_env_charge_defaults_for_diesel() {
        let value = run_env_charge(EnvChargeArgs {
            semi_annual: None,
            fuel_type: FuelType::Diesel,
        })
        .unwrap();
        assert_eq!(value["result"]["monthly"], "8333");
    }
}
