use serde_json::Value;

use super::render_value;

/// Print just the key answer from the output.
///
/// Year tables reduce to their last row's headline figure (net worth for
/// projections, ending balance for schedules); flat results print their
/// most salient summary field.
pub fn print_minimal(value: &Value) {
    let result = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    // Summary fields in order of priority
    let priority_keys = [
        "cagr",
        "final_balance",
        "total_interest",
        "loan_required",
        "total_price",
        "net_worth",
    ];

    match result {
        Value::Object(map) => {
            for key in &priority_keys {
                if let Some(val) = map.get(*key) {
                    if !val.is_null() {
                        println!("{}", render_value(val));
                        return;
                    }
                }
            }
            if let Some((key, val)) = map.iter().next() {
                println!("{}: {}", key, render_value(val));
            }
        }
        Value::Array(rows) => {
            if let Some(Value::Object(last)) = rows.last() {
                for key in &priority_keys {
                    if let Some(val) = last.get(*key) {
                        if !val.is_null() {
                            println!("{}", render_value(val));
                            return;
                        }
                    }
                }
                println!("{}", serde_json::to_string(last).unwrap_or_default());
            }
        }
        other => println!("{}", render_value(other)),
    }
}
