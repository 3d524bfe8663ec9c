//! Shared utilities for the analysis engine.
//!
//! Dtype classification, missing/distinct counting, cell rendering, and the
//! small formatting helpers used across the report builders.

use chrono::NaiveTime;
use polars::prelude::*;
use serde::Serialize;
use serde_json::Value;

// =============================================================================
// Dtype Classification
// =============================================================================

/// Closed classification of a column's declared type.
///
/// Determined once per column from the polars [`DataType`]; every report
/// builder dispatches on this variant rather than re-inspecting type names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DtypeClass {
    /// Integer or floating point numbers
    Numeric,
    /// Boolean type
    Boolean,
    /// Date or datetime types
    Datetime,
    /// Everything else: string/categorical/text data
    Categorical,
}

impl DtypeClass {
    /// The lowercase name used in `dtypes_summary` keys and `dtype` fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Boolean => "boolean",
            Self::Datetime => "datetime",
            Self::Categorical => "categorical",
        }
    }
}

impl std::fmt::Display for DtypeClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check if a DataType is numeric (integer or float).
#[inline]
pub fn is_numeric_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64
            | DataType::Float32
            | DataType::Float64
    )
}

/// Check if a DataType is a datetime type.
#[inline]
pub fn is_datetime_dtype(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Datetime(_, _) | DataType::Date | DataType::Time
    )
}

/// Classify a declared DataType.
pub fn classify_dtype(dtype: &DataType) -> DtypeClass {
    if is_numeric_dtype(dtype) {
        DtypeClass::Numeric
    } else if matches!(dtype, DataType::Boolean) {
        DtypeClass::Boolean
    } else if is_datetime_dtype(dtype) {
        DtypeClass::Datetime
    } else {
        DtypeClass::Categorical
    }
}

/// Classify a Series by its declared dtype.
pub fn series_class(series: &Series) -> DtypeClass {
    classify_dtype(series.dtype())
}

// =============================================================================
// Missing / Distinct Counting
// =============================================================================

/// Count missing entries: nulls, plus NaN for float columns.
pub fn missing_count(series: &Series) -> usize {
    let nulls = series.null_count();
    let nans = match series.dtype() {
        DataType::Float64 => series
            .f64()
            .map(|ca| ca.is_nan().sum().unwrap_or(0) as usize)
            .unwrap_or(0),
        DataType::Float32 => series
            .f32()
            .map(|ca| ca.is_nan().sum().unwrap_or(0) as usize)
            .unwrap_or(0),
        _ => 0,
    };
    nulls + nans
}

/// Count distinct non-missing values.
pub fn distinct_count(series: &Series) -> PolarsResult<usize> {
    let non_null = series.drop_nulls();
    match non_null.dtype() {
        DataType::Float64 => {
            let mask = non_null.f64()?.is_not_nan();
            non_null.filter(&mask)?.n_unique()
        }
        DataType::Float32 => {
            let mask = non_null.f32()?.is_not_nan();
            non_null.filter(&mask)?.n_unique()
        }
        _ => non_null.n_unique(),
    }
}

// =============================================================================
// Cell Rendering
// =============================================================================

/// Render a single cell as a JSON value.
///
/// Nulls map to JSON null, non-finite floats are dropped to null, and
/// date/time values render in their ISO-8601 textual form.
pub fn anyvalue_to_json(av: &AnyValue) -> Value {
    match av {
        AnyValue::Null => Value::Null,
        AnyValue::Boolean(b) => Value::Bool(*b),
        AnyValue::Int8(v) => Value::from(*v),
        AnyValue::Int16(v) => Value::from(*v),
        AnyValue::Int32(v) => Value::from(*v),
        AnyValue::Int64(v) => Value::from(*v),
        AnyValue::UInt8(v) => Value::from(*v),
        AnyValue::UInt16(v) => Value::from(*v),
        AnyValue::UInt32(v) => Value::from(*v),
        AnyValue::UInt64(v) => Value::from(*v),
        AnyValue::Float32(v) => float_to_json(f64::from(*v)),
        AnyValue::Float64(v) => float_to_json(*v),
        AnyValue::String(s) => Value::String((*s).to_string()),
        AnyValue::StringOwned(s) => Value::String(s.to_string()),
        AnyValue::Date(days) => date_to_iso(*days)
            .map(Value::String)
            .unwrap_or(Value::Null),
        AnyValue::Datetime(v, unit, _) => datetime_to_iso(*v, *unit)
            .map(Value::String)
            .unwrap_or(Value::Null),
        AnyValue::DatetimeOwned(v, unit, _) => datetime_to_iso(*v, *unit)
            .map(Value::String)
            .unwrap_or(Value::Null),
        AnyValue::Time(ns) => time_to_iso(*ns).map(Value::String).unwrap_or(Value::Null),
        other => Value::String(format!("{}", other)),
    }
}

/// Render a single cell as display text (for frequency tables).
pub fn anyvalue_to_display(av: &AnyValue) -> String {
    match anyvalue_to_json(av) {
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn float_to_json(v: f64) -> Value {
    serde_json::Number::from_f64(v)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}

fn date_to_iso(days: i32) -> Option<String> {
    chrono::DateTime::from_timestamp(i64::from(days) * 86_400, 0)
        .map(|dt| dt.date_naive().format("%Y-%m-%d").to_string())
}

fn datetime_to_iso(value: i64, unit: TimeUnit) -> Option<String> {
    let micros = match unit {
        TimeUnit::Nanoseconds => value / 1_000,
        TimeUnit::Microseconds => value,
        TimeUnit::Milliseconds => value.checked_mul(1_000)?,
    };
    chrono::DateTime::from_timestamp_micros(micros)
        .map(|dt| dt.naive_utc().format("%Y-%m-%dT%H:%M:%S%.3f").to_string())
}

fn time_to_iso(ns: i64) -> Option<String> {
    let secs = u32::try_from(ns / 1_000_000_000).ok()?;
    let frac = u32::try_from(ns % 1_000_000_000).ok()?;
    NaiveTime::from_num_seconds_from_midnight_opt(secs, frac)
        .map(|t| t.format("%H:%M:%S").to_string())
}

// =============================================================================
// Formatting
// =============================================================================

/// Round to one decimal place (percentages).
#[inline]
pub fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

/// Human-readable byte count: `"512 B"`, `"1.5 KB"`, `"2.0 MB"`.
pub fn format_memory(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
