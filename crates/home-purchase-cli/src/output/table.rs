use colored::Colorize;
use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{flatten, format_scalar};

/// Format output as a two-column table, followed by warnings and methodology.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Object(result)) => print_result_table(result, map),
            _ => println!("{}", field_table(map)),
        },
        _ => println!("{value}"),
    }
}

fn print_result_table(result: &Map<String, Value>, envelope: &Map<String, Value>) {
    println!("{}", field_table(result));

    if let Some(Value::Array(messages)) = result.get("validationMessages") {
        print_list(&"Validation:".red().bold().to_string(), messages);
    }
    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        print_list(&"Warnings:".yellow().bold().to_string(), warnings);
    }
    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {meth}");
    }
}

fn field_table(map: &Map<String, Value>) -> Table {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, val) in flatten(map) {
        if key == "validationMessages" {
            continue;
        }
        builder.push_record([key, format_scalar(&val)]);
    }
    builder.build()
}

fn print_list(heading: &str, items: &[Value]) {
    if items.is_empty() {
        return;
    }
    println!("\n{heading}");
    for item in items {
        println!("  - {}", format_scalar(item));
    }
}
