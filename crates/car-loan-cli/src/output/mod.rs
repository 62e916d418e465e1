pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::Value;

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// Split a result object into its scalar/nested-object fields and its
/// arrays of row objects (e.g. the repayment schedule).
pub fn split_rows(
    result: &serde_json::Map<String, Value>,
) -> (Vec<(&String, &Value)>, Vec<(&String, &Vec<Value>)>) {
    let mut fields = Vec::new();
    let mut row_sets = Vec::new();
    for (key, val) in result {
        match val {
            Value::Array(rows) if rows.iter().all(Value::is_object) && !rows.is_empty() => {
                row_sets.push((key, rows));
            }
            _ => fields.push((key, val)),
        }
    }
    (fields, row_sets)
}

/// Schedule columns in reading order; anything else follows alphabetically.
const PREFERRED_COLUMNS: [&str; 9] = [
    "round",
    "payment_date",
    "monthly_payment",
    "principal_payment",
    "interest_payment",
    "monthly_tax",
    "monthly_env_charge",
    "total_monthly_outflow",
    "remaining_balance",
];

/// Union of keys across all rows, preferred columns first. Optional columns
/// only show up when at least one row carries them.
pub fn ordered_headers(rows: &[Value]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for row in rows {
        if let Value::Object(map) = row {
            for key in map.keys() {
                if !seen.contains(key) {
                    seen.push(key.clone());
                }
            }
        }
    }

    let mut headers: Vec<String> = PREFERRED_COLUMNS
        .iter()
        .filter(|c| seen.iter().any(|k| k == *c))
        .map(|c| c.to_string())
        .collect();
    let mut rest: Vec<String> = seen
        .into_iter()
        .filter(|k| !PREFERRED_COLUMNS.contains(&k.as_str()))
        .collect();
    rest.sort();
    headers.extend(rest);
    headers
}
