//! Per-column statistical profiling.
//!
//! Each column is classified once by its declared dtype and routed to either
//! the numeric or the categorical branch; the two are mutually exclusive in
//! the resulting profile.

mod categorical;
mod numeric;

pub use categorical::categorical_stats;
pub use numeric::numeric_stats;

use polars::prelude::*;

use crate::error::Result;
use crate::types::VariableInfo;
use crate::utils::{DtypeClass, distinct_count, missing_count, round1, series_class};

/// Profile a single column of a table with `row_count` rows.
pub fn profile_column(series: &Series, row_count: usize) -> Result<VariableInfo> {
    let dtype = series_class(series);
    let n_missing = missing_count(series);
    let n_unique = distinct_count(series)?;
    let missing_percentage = round1(n_missing as f64 / row_count.max(1) as f64 * 100.0);

    let (numeric, categorical) = match dtype {
        DtypeClass::Numeric => (Some(numeric_stats(series, n_unique)?), None),
        _ => (None, Some(categorical_stats(series)?)),
    };

    Ok(VariableInfo {
        name: series.name().to_string(),
        dtype,
        n_missing,
        missing_percentage,
        n_unique,
        numeric,
        categorical,
    })
}
