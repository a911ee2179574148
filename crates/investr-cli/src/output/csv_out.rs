use serde_json::Value;
use std::io;

use super::render_value;

/// Write output as CSV to stdout.
///
/// Year tables (the `rows` of a schedule or the projection itself) become
/// one CSV record per year; outputs without a row array fall back to a
/// two-column field/value layout.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => match map.get("result") {
            Some(Value::Array(rows)) => write_rows_csv(&mut wtr, rows),
            Some(Value::Object(result)) => {
                if let Some(Value::Array(rows)) = result.values().find(|v| v.is_array()) {
                    write_rows_csv(&mut wtr, rows);
                } else {
                    write_fields_csv(&mut wtr, result);
                }
            }
            _ => write_fields_csv(&mut wtr, map),
        },
        Value::Array(rows) => write_rows_csv(&mut wtr, rows),
        _ => {
            let _ = wtr.write_record([&render_value(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_rows_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, rows: &[Value]) {
    if rows.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = rows.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in rows {
            if let Value::Object(map) = item {
                let record: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(render_value).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&record);
            }
        }
    } else {
        for item in rows {
            let _ = wtr.write_record([&render_value(item)]);
        }
    }
}

fn write_fields_csv(wtr: &mut csv::Writer<io::StdoutLock<'_>>, map: &serde_json::Map<String, Value>) {
    let _ = wtr.write_record(["field", "value"]);
    for (key, val) in map {
        if !val.is_array() && !val.is_object() {
            let _ = wtr.write_record([key.as_str(), &render_value(val)]);
        }
    }
}
