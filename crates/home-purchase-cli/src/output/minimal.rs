use serde_json::Value;

use super::format_scalar;

/// Headline figure for each command, in order of preference.
const PRIORITY_KEYS: [&str; 7] = [
    "totalCashAtClosing",
    "monthlyPayment",
    "total",
    "premium",
    "minimumDownPayment",
    "aprPercent",
    "pst",
];

/// Print just the key answer value, falling back to the first field.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_line(value));
}

fn minimal_line(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    if let Value::Object(map) = result_obj {
        for key in PRIORITY_KEYS {
            if let Some(val) = map.get(key).filter(|v| !v.is_null()) {
                return format_scalar(val);
            }
        }
        if let Some((key, val)) = map.iter().next() {
            return format!("{key}: {}", format_scalar(val));
        }
    }

    format_scalar(result_obj)
}
