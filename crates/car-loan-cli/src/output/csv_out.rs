use serde_json::Value;
use std::io;

use super::{ordered_headers, split_rows};

/// Write output as CSV to stdout.
///
/// A result carrying a repayment schedule is written as one CSV row per
/// installment; anything else becomes a two-column field/value listing.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let body = match map.get("result") {
                Some(Value::Object(result)) => result,
                _ => map,
            };
            let (fields, row_sets) = split_rows(body);
            match row_sets.first() {
                Some((_, rows)) => write_rows(&mut wtr, rows),
                None => {
                    let _ = wtr.write_record(["field", "value"]);
                    for (key, val) in fields {
                        write_field(&mut wtr, key, val);
                    }
                }
            }
        }
        Value::Array(arr) => write_rows(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_csv_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_field(wtr: &mut csv::Writer<io::StdoutLock<'_>>, key: &str, val: &Value) {
    match val {
        Value::Object(inner) => {
            for (inner_key, inner_val) in inner {
                let _ = wtr.write_record([
                    format!("{key}.{inner_key}"),
                    format_csv_value(inner_val),
                ]);
            }
        }
        _ => {
            let _ = wtr.write_record([key, format_csv_value(val).as_str()]);
        }
    }
}

fn write_rows(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    let headers = ordered_headers(rows);
    let _ = wtr.write_record(&headers);
    for row in rows {
        let record: Vec<String> = headers
            .iter()
            .map(|h| row.get(h.as_str()).map(format_csv_value).unwrap_or_default())
            .collect();
        let _ = wtr.write_record(&record);
    }
}

fn format_csv_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
