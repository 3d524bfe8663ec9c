//! Bounded row preview in row-oriented JSON form.

use polars::prelude::*;
use serde_json::{Map, Value};

use crate::error::Result;
use crate::utils::anyvalue_to_json;

/// Number of rows included in a report's sample.
pub const SAMPLE_ROWS: usize = 10;

/// Extract the first `n` rows as ordered column-name → value mappings.
///
/// Date and time values render in ISO-8601 text; nulls become JSON null.
pub fn sample_rows(df: &DataFrame, n: usize) -> Result<Vec<Map<String, Value>>> {
    let count = n.min(df.height());
    let mut rows = Vec::with_capacity(count);

    for i in 0..count {
        let mut row = Map::new();
        for col in df.get_columns() {
            let series = col.as_materialized_series();
            row.insert(series.name().to_string(), anyvalue_to_json(&series.get(i)?));
        }
        rows.push(row);
    }

    Ok(rows)
}
