//! Equal principal-and-interest amortization for car loans.
//!
//! The level payment is computed once and floored to whole currency units.
//! Each month's interest is floored too, and the final installment takes
//! whatever principal remains so the balance lands on exactly zero. The
//! monthly tax and diesel charge equivalents are computed once and repeated
//! on every row.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::loan::env_charge::{self, EnvCharge};
use crate::loan::tax::{self, AutoTax};
use crate::time_value::{add_months, level_payment, monthly_interest};
use crate::types::{FuelType, Money, Rate};

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Loan parameters for one calculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    /// Reporting only; the loan amount is never derived from it here.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_price: Option<Money>,
    /// Reporting only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    /// Engine displacement in cc. Absent or 0 means no tax block.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engine_displacement: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<FuelType>,
    /// Only used for diesel vehicles.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_charge_semi_annual: Option<Money>,
    /// Principal to amortize, trusted as given.
    pub loan_amount: Money,
    /// Nominal annual rate in percent (5.5 = 5.5%).
    pub interest_rate: Rate,
    pub term_months: i32,
    /// Disbursement date; installment i falls i months later.
    pub start_date: NaiveDate,
}

/// One installment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationScheduleItem {
    pub round: u32,
    pub payment_date: NaiveDate,
    /// Principal + interest.
    pub monthly_payment: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub remaining_balance: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_tax: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_env_charge: Option<Money>,
    /// monthly_payment + monthly_tax + monthly_env_charge.
    pub total_monthly_outflow: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_price: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub down_payment: Option<Money>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_tax: Option<AutoTax>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub env_charge: Option<EnvCharge>,
    /// Nominal floored level payment; the last row may differ.
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// Principal + interest. Tax and charge are reported separately.
    pub total_payment: Money,
    pub schedule: Vec<AmortizationScheduleItem>,
}

impl LoanSummary {
    pub fn total_principal(&self) -> Money {
        self.schedule.iter().map(|row| row.principal_payment).sum()
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Longest schedule the engine will lay out (100 years). Longer terms are
/// treated as degenerate.
pub const MAX_SCHEDULE_MONTHS: i32 = 1200;

/// Build the full repayment schedule for `input`.
///
/// Never fails. A non-positive loan amount or term (negative included)
/// yields an empty schedule with zero totals; the tax and charge blocks are
/// still reported since they do not depend on the loan. Terms beyond
/// [`MAX_SCHEDULE_MONTHS`] and rates whose arithmetic leaves the decimal
/// range degrade to the same empty result.
pub fn compute_schedule(input: &LoanInput) -> LoanSummary {
    let auto_tax = tax::auto_tax(input.engine_displacement);
    let env_charge = env_charge::env_charge(input.env_charge_semi_annual, input.fuel_type);

    if input.loan_amount <= Decimal::ZERO || input.term_months <= 0 {
        debug!(
            loan_amount = %input.loan_amount,
            term_months = input.term_months,
            "degenerate loan, returning empty schedule"
        );
        return empty_summary(input, auto_tax, env_charge);
    }

    if input.term_months > MAX_SCHEDULE_MONTHS {
        warn!(
            term_months = input.term_months,
            max = MAX_SCHEDULE_MONTHS,
            "term too long, returning empty schedule"
        );
        return empty_summary(input, auto_tax, env_charge);
    }

    let monthly_tax = auto_tax.map(|t| t.monthly);
    let monthly_env_charge = env_charge.map(|c| c.monthly);

    let Some(amortized) = amortize(input, monthly_tax, monthly_env_charge) else {
        warn!(
            loan_amount = %input.loan_amount,
            interest_rate = %input.interest_rate,
            term_months = input.term_months,
            "schedule arithmetic overflowed, returning empty schedule"
        );
        return empty_summary(input, auto_tax, env_charge);
    };

    debug!(
        loan_amount = %input.loan_amount,
        interest_rate = %input.interest_rate,
        term_months = input.term_months,
        monthly_payment = %amortized.monthly_payment,
        total_interest = %amortized.total_interest,
        "computed amortization schedule"
    );

    LoanSummary {
        vehicle_price: input.vehicle_price,
        down_payment: input.down_payment,
        auto_tax,
        env_charge,
        monthly_payment: amortized.monthly_payment,
        total_interest: amortized.total_interest,
        total_payment: amortized.total_payment,
        schedule: amortized.schedule,
    }
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

struct Amortized {
    monthly_payment: Money,
    total_interest: Money,
    total_payment: Money,
    schedule: Vec<AmortizationScheduleItem>,
}

/// The period loop with checked arithmetic. None as soon as any amount
/// leaves the decimal range.
fn amortize(
    input: &LoanInput,
    monthly_tax: Option<Money>,
    monthly_env_charge: Option<Money>,
) -> Option<Amortized> {
    let periods = input.term_months.unsigned_abs();
    let nominal_payment = level_payment(input.loan_amount, input.interest_rate, periods)?;
    let fixed_costs = monthly_tax
        .unwrap_or(Decimal::ZERO)
        .checked_add(monthly_env_charge.unwrap_or(Decimal::ZERO))?;

    let mut schedule: Vec<AmortizationScheduleItem> = Vec::with_capacity(periods as usize);
    let mut balance = input.loan_amount;
    let mut total_interest = Decimal::ZERO;

    for round in 1..=periods {
        let interest_payment = monthly_interest(balance, input.interest_rate)?;

        // The last installment clears the balance and absorbs rounding drift.
        let (principal_payment, monthly_payment) = if round == periods {
            (balance, balance.checked_add(interest_payment)?)
        } else {
            (nominal_payment.checked_sub(interest_payment)?, nominal_payment)
        };

        balance = balance.checked_sub(principal_payment)?;
        total_interest = total_interest.checked_add(interest_payment)?;

        schedule.push(AmortizationScheduleItem {
            round,
            payment_date: add_months(input.start_date, round).unwrap_or(NaiveDate::MAX),
            monthly_payment,
            principal_payment,
            interest_payment,
            remaining_balance: balance.max(Decimal::ZERO),
            monthly_tax,
            monthly_env_charge,
            total_monthly_outflow: monthly_payment.checked_add(fixed_costs)?,
        });
    }

    Some(Amortized {
        monthly_payment: nominal_payment,
        total_interest,
        total_payment: input.loan_amount.checked_add(total_interest)?,
        schedule,
    })
}

fn empty_summary(
    input: &LoanInput,
    auto_tax: Option<AutoTax>,
    env_charge: Option<EnvCharge>,
) -> LoanSummary {
    LoanSummary {
        vehicle_price: input.vehicle_price,
        down_payment: input.down_payment,
        auto_tax,
        env_charge,
        monthly_payment: Decimal::ZERO,
        total_interest: Decimal::ZERO,
        total_payment: Decimal::ZERO,
        schedule: Vec::new(),
    }
}
