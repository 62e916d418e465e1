use serde_json::{Map, Value};

/// Headline fields, most specific first: a loan summary, then the tax and
/// charge blocks (which carry `annual` or `semi_annual` alongside `monthly`).
const HEADLINE_KEYS: [&str; 3] = ["monthly_payment", "monthly", "annual"];

/// Print just the headline figure.
///
/// For a loan this is the level payment, followed by the all-in first
/// month outflow when tax or the diesel charge add to it.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    match result {
        Value::Object(map) => println!("{}", headline(map)),
        other => println!("{}", format_minimal(other)),
    }
}

fn headline(map: &Map<String, Value>) -> String {
    let Some(figure) = HEADLINE_KEYS
        .iter()
        .find_map(|k| map.get(*k).filter(|v| !v.is_null()))
    else {
        return match map.iter().next() {
            Some((key, val)) => format!("{}: {}", key, format_minimal(val)),
            None => String::new(),
        };
    };

    let payment = format_minimal(figure);
    let outflow = map
        .get("schedule")
        .and_then(|s| s.get(0))
        .and_then(|row| row.get("total_monthly_outflow"))
        .map(format_minimal);

    match outflow {
        Some(all_in) if all_in != payment => format!("{payment} ({all_in} incl. tax and charges)"),
        _ => payment,
    }
}

fn format_minimal(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_headline_plain_loan() {
        let result = json!({
            "monthly_payment": "899126",
            "schedule": [{"total_monthly_outflow": "899126"}],
        });
        assert_eq!(headline(result.as_object().unwrap()), "899126");
    }

    #[test]
    fn test_headline_with_running_costs() {
        let result = json!({
            "monthly_payment": "382023",
            "schedule": [{"total_monthly_outflow": "424240"}],
        });
        assert_eq!(
            headline(result.as_object().unwrap()),
            "382023 (424240 incl. tax and charges)"
        );
    }

    #[test]
    fn test_headline_tax_block() {
        let result = json!({"annual": "104000", "monthly": "8666"});
        assert_eq!(headline(result.as_object().unwrap()), "8666");
    }
}
