//! Frequency statistics for categorical columns.
//!
//! Boolean, datetime, and text columns all land here; values are rendered
//! through the shared cell formatter before counting.

use std::collections::HashMap;

use polars::prelude::*;

use crate::error::Result;
use crate::types::{CategoricalStats, ValueCount};
use crate::utils::{anyvalue_to_display, round1};

/// Compute the frequency profile of a column.
///
/// Entries are ordered by count descending; ties keep first-appearance
/// order. Only the top 10 values are retained. A column with no non-missing
/// values reports an empty top value and zero frequency.
pub fn categorical_stats(series: &Series) -> Result<CategoricalStats> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut entries: Vec<(String, usize)> = Vec::new();

    for i in 0..series.len() {
        let av = series.get(i)?;
        if matches!(av, AnyValue::Null) {
            continue;
        }
        let key = anyvalue_to_display(&av);
        match index.get(&key) {
            Some(&slot) => entries[slot].1 += 1,
            None => {
                index.insert(key.clone(), entries.len());
                entries.push((key, 1));
            }
        }
    }

    let total: usize = entries.iter().map(|(_, count)| count).sum();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    let value_counts: Vec<ValueCount> = entries
        .into_iter()
        .take(10)
        .map(|(value, count)| ValueCount {
            value,
            count,
            percentage: round1(count as f64 / total.max(1) as f64 * 100.0),
        })
        .collect();

    let (top_value, top_frequency) = value_counts
        .first()
        .map(|vc| (vc.value.clone(), vc.count))
        .unwrap_or_default();

    Ok(CategoricalStats {
        top_value,
        top_frequency,
        value_counts,
    })
}
