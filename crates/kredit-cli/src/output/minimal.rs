use serde_json::Value;

use super::format_scalar;

/// Print just the headline figure of a calculation.
///
/// Looks for well-known result fields in priority order, then falls back
/// to the first field of the result object.
pub fn print_minimal(value: &Value) {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    let priority_keys = [
        "monthly_payment",
        "monthly_rate",
        "net_monthly_burden",
        "months_to_payoff",
        "final_balance",
    ];

    if let Value::Object(map) = result_obj {
        for key in &priority_keys {
            if let Some(val) = map.get(*key) {
                if !val.is_null() {
                    println!("{}", format_scalar(val));
                    return;
                }
            }
        }
        // Nested cost breakdown
        if let Some(total) = map.get("costs").and_then(|c| c.get("total")) {
            println!("{}", format_scalar(total));
            return;
        }
        if let Some((key, val)) = map.iter().next() {
            println!("{}: {}", key, format_scalar(val));
            return;
        }
    }

    println!("{}", format_scalar(result_obj));
}
