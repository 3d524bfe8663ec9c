//! Pairwise Pearson correlation over numeric columns.

use polars::prelude::*;

use crate::error::Result;
use crate::sanitize::finite;
use crate::types::CorrelationData;
use crate::utils::{DtypeClass, series_class};

/// Compute the full correlation matrix over the table's numeric columns.
///
/// Each pair uses pairwise-complete observations: rows where either value is
/// missing are excluded for that pair only. Fewer than 2 numeric columns
/// yields the empty matrix. Undefined coefficients (constant columns, fewer
/// than 2 complete observations) are `None`.
pub fn correlation(df: &DataFrame) -> Result<CorrelationData> {
    let mut columns = Vec::new();
    let mut data: Vec<Vec<Option<f64>>> = Vec::new();

    for col in df.get_columns() {
        let series = col.as_materialized_series();
        if series_class(series) != DtypeClass::Numeric {
            continue;
        }
        columns.push(series.name().to_string());
        let casted = series.cast(&DataType::Float64)?;
        let ca = casted.f64()?;
        data.push(
            ca.into_iter()
                .map(|v| v.filter(|x| !x.is_nan()))
                .collect(),
        );
    }

    if columns.len() < 2 {
        return Ok(CorrelationData::empty());
    }

    let k = columns.len();
    let mut matrix = vec![vec![None; k]; k];
    for i in 0..k {
        matrix[i][i] = has_variance(&data[i]).then_some(1.0);
        for j in (i + 1)..k {
            let r = pearson(&data[i], &data[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    Ok(CorrelationData { columns, matrix })
}

fn pearson(x: &[Option<f64>], y: &[Option<f64>]) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y)
        .filter_map(|(a, b)| (*a).zip(*b))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (a, b) in &pairs {
        let dx = a - mean_x;
        let dy = b - mean_y;
        sxx += dx * dx;
        syy += dy * dy;
        sxy += dx * dy;
    }

    let denominator = (sxx * syy).sqrt();
    if denominator == 0.0 {
        return None;
    }
    finite(sxy / denominator)
}

fn has_variance(x: &[Option<f64>]) -> bool {
    let values: Vec<f64> = x.iter().flatten().copied().collect();
    if values.len() < 2 {
        return false;
    }
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fewer_than_two_numeric_columns_is_empty() {
        let df = df!(
            "v" => &[1.0f64, 2.0, 3.0],
            "label" => &["a", "b", "c"],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        assert!(corr.columns.is_empty());
        assert!(corr.matrix.is_empty());
    }

    #[test]
    fn test_perfect_positive_correlation() {
        let df = df!(
            "x" => &[1.0f64, 2.0, 3.0, 4.0],
            "y" => &[2.0f64, 4.0, 6.0, 8.0],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        assert_eq!(corr.columns, vec!["x", "y"]);
        let r = corr.matrix[0][1].unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let df = df!(
            "x" => &[1.0f64, 2.0, 3.0],
            "y" => &[3.0f64, 2.0, 1.0],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        let r = corr.matrix[0][1].unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_matrix_symmetric_with_unit_diagonal() {
        let df = df!(
            "a" => &[1.0f64, 2.0, 4.0, 3.0],
            "b" => &[5.0f64, 1.0, 2.0, 8.0],
            "c" => &[2.0f64, 2.5, 9.0, 1.0],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        for i in 0..3 {
            assert_eq!(corr.matrix[i][i], Some(1.0));
            for j in 0..3 {
                assert_eq!(corr.matrix[i][j], corr.matrix[j][i]);
            }
        }
    }

    #[test]
    fn test_constant_column_is_undefined() {
        let df = df!(
            "x" => &[1.0f64, 2.0, 3.0],
            "flat" => &[5.0f64, 5.0, 5.0],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        assert_eq!(corr.matrix[0][0], Some(1.0));
        assert_eq!(corr.matrix[1][1], None);
        assert_eq!(corr.matrix[0][1], None);
        assert_eq!(corr.matrix[1][0], None);
    }

    #[test]
    fn test_pairwise_complete_observations() {
        // Row 3 is missing in y and must be excluded from the x/y pair only.
        let df = df!(
            "x" => &[Some(1.0f64), Some(2.0), Some(3.0), Some(100.0)],
            "y" => &[Some(2.0f64), Some(4.0), Some(6.0), None],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        let r = corr.matrix[0][1].unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mixed_dtype_columns_are_skipped() {
        let df = df!(
            "x" => &[1i64, 2, 3],
            "y" => &[1.5f64, 3.0, 4.5],
            "name" => &["a", "b", "c"],
        )
        .unwrap();
        let corr = correlation(&df).unwrap();

        assert_eq!(corr.columns, vec!["x", "y"]);
        assert_eq!(corr.matrix.len(), 2);
    }
}
