use serde::Serialize;
use serde_json::Value;

use crate::error::InvestrError;
use crate::InvestrResult;

/// One observation in a long-format series, ready for charting.
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPoint {
    pub year: u64,
    pub variable: String,
    pub value: Value,
}

/// Melt a sequence of wide rows into long format, one point per
/// `(year, variable)` pair.
///
/// Rows are addressed through their serialized field names; fields missing
/// from a row are skipped so heterogeneous tables degrade gracefully.
pub fn melt<T: Serialize>(
    rows: &[T],
    year_field: &str,
    value_fields: &[&str],
) -> InvestrResult<Vec<SeriesPoint>> {
    let mut points: Vec<SeriesPoint> = Vec::with_capacity(rows.len() * value_fields.len());

    for row in rows {
        let value = serde_json::to_value(row)?;
        let object = match value {
            Value::Object(map) => map,
            other => {
                return Err(InvestrError::SerializationError(format!(
                    "Expected a struct row, got {other}"
                )))
            }
        };

        let year = object
            .get(year_field)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                InvestrError::SerializationError(format!(
                    "Row has no numeric '{year_field}' field"
                ))
            })?;

        for &field in value_fields {
            if let Some(v) = object.get(field) {
                points.push(SeriesPoint {
                    year,
                    variable: field.to_string(),
                    value: v.clone(),
                });
            }
        }
    }

    Ok(points)
}
