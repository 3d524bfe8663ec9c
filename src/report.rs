//! Report orchestration.
//!
//! Composes the overview, per-column profiles, missing-value ranking,
//! correlation matrix, and row sample into one [`AnalysisReport`], then runs
//! the assembled structure through the sanitizer. Either a complete report is
//! produced or the error propagates; partial reports are never returned.

use polars::prelude::*;
use serde_json::Value;
use tracing::debug;

use crate::correlation::correlation;
use crate::error::Result;
use crate::overview::build_overview;
use crate::profiler::profile_column;
use crate::sample::{SAMPLE_ROWS, sample_rows};
use crate::sanitize::sanitize;
use crate::types::{AnalysisReport, MissingValueInfo, VariableMap};
use crate::utils::{missing_count, round1};

/// Rank columns by missing-value percentage, descending.
///
/// Only columns with at least one missing value appear; ties keep original
/// column order.
pub fn missing_report(df: &DataFrame) -> Vec<MissingValueInfo> {
    let n_rows = df.height();
    let mut entries: Vec<MissingValueInfo> = df
        .get_columns()
        .iter()
        .filter_map(|col| {
            let series = col.as_materialized_series();
            let count = missing_count(series);
            (count > 0).then(|| MissingValueInfo {
                column: series.name().to_string(),
                count,
                percentage: round1(count as f64 / n_rows.max(1) as f64 * 100.0),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.percentage
            .partial_cmp(&a.percentage)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Build the typed report for a table.
pub fn build_report(df: &DataFrame) -> Result<AnalysisReport> {
    let mut variables = Vec::with_capacity(df.width());
    for col in df.get_columns() {
        variables.push(profile_column(col.as_materialized_series(), df.height())?);
    }

    Ok(AnalysisReport {
        overview: build_overview(df)?,
        variables: VariableMap(variables),
        missing_values: missing_report(df),
        correlations: correlation(df)?,
        sample_rows: sample_rows(df, SAMPLE_ROWS)?,
    })
}

/// Run the full analysis and return the sanitized JSON report.
pub fn analyze(df: &DataFrame) -> Result<Value> {
    debug!(rows = df.height(), columns = df.width(), "analyzing table");
    let report = build_report(df)?;
    Ok(sanitize(serde_json::to_value(report)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::DtypeClass;

    fn sample_df() -> DataFrame {
        df!(
            "a" => &[Some(1i64), Some(2), Some(2), None],
            "b" => &["x", "y", "x", "x"],
        )
        .unwrap()
    }

    // ==================== missing report tests ====================

    #[test]
    fn test_missing_report_includes_only_columns_with_missing() {
        let entries = missing_report(&sample_df());

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].column, "a");
        assert_eq!(entries[0].count, 1);
        assert_eq!(entries[0].percentage, 25.0);
    }

    #[test]
    fn test_missing_report_sorted_descending() {
        let df = df!(
            "low" => &[Some(1i64), Some(2), Some(3), None],
            "high" => &[Some(1i64), None, None, None],
        )
        .unwrap();
        let entries = missing_report(&df);

        assert_eq!(entries[0].column, "high");
        assert_eq!(entries[1].column, "low");
    }

    #[test]
    fn test_missing_report_stable_on_ties() {
        let df = df!(
            "first" => &[Some(1i64), None],
            "second" => &[Some(2i64), None],
        )
        .unwrap();
        let entries = missing_report(&df);

        assert_eq!(entries[0].column, "first");
        assert_eq!(entries[1].column, "second");
    }

    // ==================== orchestration tests ====================

    #[test]
    fn test_report_covers_every_column() {
        let report = build_report(&sample_df()).unwrap();

        assert_eq!(report.overview.n_rows, 4);
        assert_eq!(report.overview.n_columns, 2);
        assert_eq!(report.variables.len(), 2);
        assert_eq!(report.variables.get("a").unwrap().dtype, DtypeClass::Numeric);
        assert_eq!(
            report.variables.get("b").unwrap().dtype,
            DtypeClass::Categorical
        );
    }

    #[test]
    fn test_report_scenario_from_mixed_table() {
        let report = build_report(&sample_df()).unwrap();

        assert_eq!(report.overview.n_duplicates, 0);
        assert_eq!(report.variables.get("a").unwrap().n_missing, 1);
        let b = report.variables.get("b").unwrap();
        let cat = b.categorical.as_ref().unwrap();
        assert_eq!(cat.top_value, "x");
        assert_eq!(cat.top_frequency, 3);
    }

    #[test]
    fn test_single_numeric_column_has_empty_correlations() {
        let report = build_report(&sample_df()).unwrap();
        assert!(report.correlations.columns.is_empty());
        assert!(report.correlations.matrix.is_empty());
    }

    #[test]
    fn test_analyze_produces_sanitized_json() {
        let value = analyze(&sample_df()).unwrap();

        assert!(value.get("overview").is_some());
        assert!(value.get("variables").is_some());
        assert!(value.get("missing_values").is_some());
        assert!(value.get("correlations").is_some());
        assert_eq!(value["sample_rows"].as_array().unwrap().len(), 4);
        assert_eq!(value["overview"]["n_rows"], 4);
    }

    #[test]
    fn test_analyze_json_variables_keep_column_order() {
        let df = df!(
            "zeta" => &[1i64, 2],
            "alpha" => &[3i64, 4],
        )
        .unwrap();
        let value = analyze(&df).unwrap();
        let keys: Vec<_> = value["variables"].as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys, vec!["zeta", "alpha"]);
    }
}
