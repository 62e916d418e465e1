pub mod loan;
pub mod vehicle_costs;

use rust_decimal::Decimal;
use std::str::FromStr;

/// Parse a user-typed amount, accepting thousands separators
/// ("37,500,000" or "37_500_000").
pub fn parse_amount(raw: &str) -> Result<Decimal, String> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != ',' && *c != '_')
        .collect();
    Decimal::from_str(&cleaned).map_err(|e| format!("invalid amount '{raw}': {e}"))
}
