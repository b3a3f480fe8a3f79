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

/// Result fields that hold a month-by-month schedule.
pub const SCHEDULE_KEYS: [&str; 2] = ["entries", "schedule"];

/// Split a result object into its scalar fields and its schedule rows, if any.
pub fn split_schedule(
    result: &serde_json::Map<String, Value>,
) -> (Vec<(&String, &Value)>, Option<&Vec<Value>>) {
    let mut scalars = Vec::new();
    let mut rows = None;
    for (key, val) in result {
        match val {
            Value::Array(arr) if SCHEDULE_KEYS.contains(&key.as_str()) => rows = Some(arr),
            _ => scalars.push((key, val)),
        }
    }
    (scalars, rows)
}

/// Plain rendering of a JSON scalar for tables and CSV cells.
pub fn format_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
