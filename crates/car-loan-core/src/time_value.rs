use chrono::{Months, NaiveDate};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::types::{Money, Rate};

const PERCENT: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Nominal monthly rate as a fraction: `annual_rate_pct / 100 / 12`.
pub fn monthly_rate(annual_rate_pct: Rate) -> Decimal {
    annual_rate_pct / PERCENT / MONTHS_PER_YEAR
}

/// One month of interest on `balance`, floored to whole units.
///
/// Same value as `floor(balance * monthly_rate(annual_rate_pct))`, but the
/// multiplication happens before the division so whole-valued products
/// (e.g. 30,000,000 at 5%) are exact rather than off by one ulp.
/// None when the product leaves the decimal range.
pub fn monthly_interest(balance: Money, annual_rate_pct: Rate) -> Option<Money> {
    balance
        .checked_mul(annual_rate_pct)?
        .checked_div(PERCENT * MONTHS_PER_YEAR)
        .map(|interest| interest.floor())
}

/// Level monthly payment (annuity formula), floored once to whole units.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` at a zero rate.
/// None when the payment itself is not representable.
pub fn level_payment(principal: Money, annual_rate_pct: Rate, periods: u32) -> Option<Money> {
    if periods == 0 {
        return Some(Decimal::ZERO);
    }

    let n = Decimal::from(periods);
    let r = monthly_rate(annual_rate_pct);

    if r.is_zero() {
        return Some((principal / n).floor());
    }

    match annuity_factor(r, periods) {
        Some(factor) => principal
            .checked_mul(r)?
            .checked_mul(factor)
            .map(|payment| payment.floor()),
        None => Some((principal / n).floor()),
    }
}

/// `(1+r)^n / ((1+r)^n - 1)`.
///
/// Takes its limit of 1 when the growth term leaves the decimal range.
/// Returns None when `(1+r)^n == 1` for a non-zero rate.
fn annuity_factor(r: Decimal, periods: u32) -> Option<Decimal> {
    let growth = match (Decimal::ONE + r).checked_powu(u64::from(periods)) {
        Some(g) => g,
        None => return Some(Decimal::ONE),
    };
    match growth.checked_sub(Decimal::ONE) {
        Some(denominator) => growth.checked_div(denominator),
        None => Some(Decimal::ONE),
    }
}

/// `start` advanced by `months` calendar months.
///
/// Day-of-month is kept; when the target month is shorter the date clamps to
/// its last day (Jan 31 + 1 month = Feb 28/29). Always offset from the
/// original start, so a clamped month never shifts the following ones.
pub fn add_months(start: NaiveDate, months: u32) -> Option<NaiveDate> {
    start.checked_add_months(Months::new(months))
}
