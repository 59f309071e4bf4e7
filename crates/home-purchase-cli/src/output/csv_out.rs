use serde_json::Value;
use std::io;

use super::{flatten, format_scalar};

/// Write output as a two-column `field,value` CSV to stdout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let rows = match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => flatten(result),
            _ => flatten(map),
        },
        other => vec![("value".to_string(), other.clone())],
    };

    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in rows {
        let _ = wtr.write_record([key, format_scalar(&val)]);
    }
    let _ = wtr.flush();
}
