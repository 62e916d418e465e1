use car_loan_core::loan::amortization::{compute_schedule, LoanInput};
use car_loan_core::loan::env_charge::{self, EnvCharge};
use car_loan_core::loan::quote::{self, LoanQuoteRequest};
use car_loan_core::loan::tax;
use car_loan_core::{CarLoanError, FuelType, Money};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn plain_loan(amount: Money, rate: Decimal, term: i32) -> LoanInput {
    LoanInput {
        vehicle_price: None,
        down_payment: None,
        engine_displacement: None,
        fuel_type: None,
        env_charge_semi_annual: None,
        loan_amount: amount,
        interest_rate: rate,
        term_months: term,
        start_date: date(2024, 1, 1),
    }
}

// ===========================================================================
// Amortization invariants
// ===========================================================================

#[test]
fn test_invariants_across_rate_and_term_grid() {
    let amounts = [dec!(1), dec!(999_999), dec!(15_000_000), dec!(87_654_321)];
    let rates = [dec!(0), dec!(0.1), dec!(3.9), dec!(7.5), dec!(24)];
    let terms = [1, 2, 12, 36, 60, 120];

    for amount in amounts {
        for rate in rates {
            for term in terms {
                let summary = compute_schedule(&plain_loan(amount, rate, term));
                let ctx = format!("{amount} @ {rate}% x {term}");

                assert_eq!(summary.schedule.len(), term as usize, "{ctx}");
                assert_eq!(summary.total_principal(), amount, "{ctx}");

                let interest: Money = summary.schedule.iter().map(|r| r.interest_payment).sum();
                assert_eq!(interest, summary.total_interest, "{ctx}");
                assert_eq!(summary.total_payment, amount + summary.total_interest, "{ctx}");

                let last = summary.schedule.last().unwrap();
                assert_eq!(last.remaining_balance, Decimal::ZERO, "{ctx}");

                for pair in summary.schedule.windows(2) {
                    assert!(
                        pair[1].remaining_balance <= pair[0].remaining_balance,
                        "{ctx}: balance rose at round {}",
                        pair[1].round
                    );
                }
            }
        }
    }
}

#[test]
fn test_zero_rate_rows_carry_no_interest() {
    let summary = compute_schedule(&plain_loan(dec!(10_000_000), Decimal::ZERO, 12));
    assert!(summary.schedule.iter().all(|r| r.interest_payment.is_zero()));
    // 10,000,000 / 12 = 833,333.33
    assert!(summary.schedule[..11]
        .iter()
        .all(|r| r.principal_payment == dec!(833_333)));
    assert_eq!(summary.schedule[11].principal_payment, dec!(833_337));
}

#[test]
fn test_degenerate_inputs() {
    for input in [
        plain_loan(Decimal::ZERO, dec!(5), 36),
        plain_loan(dec!(30_000_000), dec!(5), 0),
        plain_loan(dec!(-1), dec!(5), 36),
        plain_loan(dec!(30_000_000), dec!(5), -3),
    ] {
        let summary = compute_schedule(&input);
        assert!(summary.schedule.is_empty());
        assert_eq!(summary.total_interest, Decimal::ZERO);
        assert_eq!(summary.total_payment, Decimal::ZERO);
    }
}

#[test]
fn test_hostile_rates_do_not_panic() {
    for rate in [dec!(-50), dec!(-2400), dec!(5000)] {
        let summary = compute_schedule(&plain_loan(dec!(1_000_000), rate, 24));
        assert_eq!(summary.schedule.len(), 24);
        assert_eq!(summary.total_principal(), dec!(1_000_000));
    }
}

#[test]
fn test_out_of_range_json_input_yields_empty_schedule() {
    for body in [
        r#"{"loan_amount": "1000000000", "interest_rate": "100000000000000000000",
            "term_months": 2, "start_date": "2024-01-01"}"#,
        r#"{"loan_amount": "1000000000", "interest_rate": "-10000000000000000000000000000",
            "term_months": 2, "start_date": "2024-01-01"}"#,
        r#"{"loan_amount": "30000000", "interest_rate": "5",
            "term_months": 2147483647, "start_date": "2024-01-01"}"#,
    ] {
        let input: LoanInput = serde_json::from_str(body).unwrap();
        let summary = compute_schedule(&input);
        assert!(summary.schedule.is_empty(), "{body}");
        assert_eq!(summary.total_payment, Decimal::ZERO, "{body}");
    }
}

// ===========================================================================
// Tax and charge
// ===========================================================================

#[test]
fn test_tax_tier_reference_values() {
    assert_eq!(tax::annual_auto_tax(1000), dec!(104_000));
    assert_eq!(tax::annual_auto_tax(1600), dec!(291_200));
    assert_eq!(tax::annual_auto_tax(2000), dec!(520_000));
    assert_eq!(tax::annual_auto_tax(0), Decimal::ZERO);
}

#[test]
fn test_env_charge_applicability() {
    assert_eq!(
        env_charge::env_charge(Some(dec!(50_000)), Some(FuelType::Hybrid)),
        None
    );
    assert_eq!(
        env_charge::env_charge(Some(dec!(50_000)), Some(FuelType::Diesel)),
        Some(EnvCharge {
            semi_annual: dec!(50_000),
            monthly: dec!(8_333),
        })
    );
}

// ===========================================================================
// Serialized shape
// ===========================================================================

#[test]
fn test_summary_json_omits_absent_blocks() {
    let summary = compute_schedule(&plain_loan(dec!(5_000_000), dec!(6), 12));
    let json = serde_json::to_value(&summary).unwrap();

    assert!(json.get("auto_tax").is_none());
    assert!(json.get("env_charge").is_none());
    assert!(json.get("vehicle_price").is_none());
    assert_eq!(json["schedule"].as_array().unwrap().len(), 12);
    assert_eq!(json["schedule"][0]["payment_date"], "2024-02-01");
}

#[test]
fn test_summary_json_includes_present_blocks() {
    let input = LoanInput {
        engine_displacement: Some(998),
        fuel_type: Some(FuelType::Diesel),
        env_charge_semi_annual: Some(dec!(42_000)),
        ..plain_loan(dec!(5_000_000), dec!(6), 12)
    };
    let json = serde_json::to_value(compute_schedule(&input)).unwrap();

    // 998 * 80 * 1.3 = 103,792; / 12 = 8,649.33
    assert_eq!(json["auto_tax"]["annual"], "103792");
    assert_eq!(json["auto_tax"]["monthly"], "8649");
    assert_eq!(json["env_charge"]["monthly"], "7000");
    assert_eq!(json["schedule"][0]["monthly_tax"], "8649");
}

#[test]
fn test_loan_input_parses_from_json() {
    let input: LoanInput = serde_json::from_str(
        r#"{
            "loan_amount": "30000000",
            "interest_rate": "5",
            "term_months": 36,
            "start_date": "2024-01-01"
        }"#,
    )
    .unwrap();
    let summary = compute_schedule(&input);
    assert_eq!(summary.monthly_payment, dec!(899_126));
    assert_eq!(summary.total_interest, dec!(2_368_555));
}

// ===========================================================================
// Quote layer
// ===========================================================================

#[test]
fn test_quote_end_to_end() {
    let request = LoanQuoteRequest {
        vehicle_price: Some(dec!(28_000_000)),
        down_payment: Some(dec!(8_000_000)),
        interest_rate: dec!(5.5),
        term_months: Some(60),
        start_date: Some(date(2024, 1, 1)),
        engine_displacement: Some(1999),
        fuel_type: Some(FuelType::Gasoline),
        ..Default::default()
    };
    let output = quote::calculate_loan_quote_on(&request, date(2024, 1, 1)).unwrap();
    let summary = &output.result;

    assert_eq!(summary.monthly_payment, dec!(382_023));
    assert_eq!(summary.total_interest, dec!(2_921_355));
    assert_eq!(summary.total_principal(), dec!(20_000_000));
    assert!(output.warnings.is_empty());
}

#[test]
fn test_quote_rejects_inconsistent_amount() {
    let request = LoanQuoteRequest {
        vehicle_price: Some(dec!(28_000_000)),
        down_payment: Some(dec!(8_000_000)),
        loan_amount: Some(dec!(21_000_000)),
        interest_rate: dec!(5.5),
        ..Default::default()
    };
    let err = quote::calculate_loan_quote_on(&request, date(2024, 1, 1)).unwrap_err();
    assert!(matches!(err, CarLoanError::InvalidInput { ref field, .. } if field == "loan_amount"));
}
