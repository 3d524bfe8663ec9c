//! Dataset-level descriptive metrics.

use polars::prelude::*;

use crate::error::Result;
use crate::types::{DatasetOverview, DtypeSummary};
use crate::utils::{DtypeClass, format_memory, missing_count, round1, series_class};

/// Build the dataset overview: shape, memory estimate, duplicates, missing
/// totals, and the dtype class distribution.
pub fn build_overview(df: &DataFrame) -> Result<DatasetOverview> {
    let n_rows = df.height();
    let n_columns = df.width();

    let n_duplicates = n_rows
        - df.unique::<&str, &str>(None, UniqueKeepStrategy::First, None)?
            .height();

    let total_cells = n_rows * n_columns;
    let total_missing_cells: usize = df
        .get_columns()
        .iter()
        .map(|col| missing_count(col.as_materialized_series()))
        .sum();

    let mut dtypes_summary = DtypeSummary::default();
    for col in df.get_columns() {
        let slot = match series_class(col.as_materialized_series()) {
            DtypeClass::Numeric => &mut dtypes_summary.numeric,
            DtypeClass::Boolean => &mut dtypes_summary.boolean,
            DtypeClass::Datetime => &mut dtypes_summary.datetime,
            DtypeClass::Categorical => &mut dtypes_summary.categorical,
        };
        *slot = Some(slot.unwrap_or(0) + 1);
    }

    Ok(DatasetOverview {
        n_rows,
        n_columns,
        memory_usage_display: format_memory(df.estimated_size()),
        n_duplicates,
        duplicate_percentage: round1(n_duplicates as f64 / n_rows.max(1) as f64 * 100.0),
        total_missing_cells,
        missing_percentage: round1(total_missing_cells as f64 / total_cells.max(1) as f64 * 100.0),
        dtypes_summary,
        column_names: df.get_column_names().iter().map(|n| n.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_df() -> DataFrame {
        df!(
            "a" => &[Some(1i64), Some(2), Some(2), None],
            "b" => &["x", "y", "x", "x"],
        )
        .unwrap()
    }

    #[test]
    fn test_shape_and_names() {
        let overview = build_overview(&sample_df()).unwrap();

        assert_eq!(overview.n_rows, 4);
        assert_eq!(overview.n_columns, 2);
        assert_eq!(overview.column_names, vec!["a", "b"]);
    }

    #[test]
    fn test_no_duplicates_when_rows_differ() {
        let overview = build_overview(&sample_df()).unwrap();
        assert_eq!(overview.n_duplicates, 0);
        assert_eq!(overview.duplicate_percentage, 0.0);
    }

    #[test]
    fn test_duplicate_rows_counted_after_first() {
        let df = df!(
            "a" => &[1i64, 1, 1, 2],
            "b" => &["x", "x", "x", "y"],
        )
        .unwrap();
        let overview = build_overview(&df).unwrap();

        assert_eq!(overview.n_duplicates, 2);
        assert_eq!(overview.duplicate_percentage, 50.0);
    }

    #[test]
    fn test_missing_cell_totals() {
        let overview = build_overview(&sample_df()).unwrap();

        assert_eq!(overview.total_missing_cells, 1);
        // 1 of 8 cells
        assert_eq!(overview.missing_percentage, 12.5);
    }

    #[test]
    fn test_dtypes_summary_counts_by_class() {
        let df = df!(
            "n" => &[1.0f64, 2.0],
            "m" => &[3i64, 4],
            "s" => &["a", "b"],
        )
        .unwrap();
        let overview = build_overview(&df).unwrap();

        assert_eq!(overview.dtypes_summary.numeric, Some(2));
        assert_eq!(overview.dtypes_summary.categorical, Some(1));
        assert_eq!(overview.dtypes_summary.boolean, None);
        assert_eq!(overview.dtypes_summary.datetime, None);
    }

    #[test]
    fn test_memory_display_has_unit_suffix() {
        let overview = build_overview(&sample_df()).unwrap();
        let display = &overview.memory_usage_display;
        assert!(
            display.ends_with(" B") || display.ends_with(" KB") || display.ends_with(" MB"),
            "unexpected memory display: {}",
            display
        );
    }
}
