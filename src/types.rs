//! Report types produced by the analysis engine.
//!
//! Every struct here serializes to the JSON schema the dashboard consumes.
//! Scalar statistics use `Option<f64>` where a value can be undefined (empty
//! column, too few observations); `None` serializes as JSON null.

use serde::Serialize;
use serde::ser::SerializeMap;

use crate::utils::DtypeClass;

/// One bin of a numeric column's histogram.
#[derive(Debug, Clone, Serialize)]
pub struct HistogramBin {
    /// The bin's edge values formatted as `"<lo>-<hi>"`.
    pub label: String,
    pub count: usize,
}

/// Distribution statistics for a numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct NumericStats {
    pub mean: Option<f64>,
    pub median: Option<f64>,
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub q1: Option<f64>,
    pub q3: Option<f64>,
    pub skewness: Option<f64>,
    pub kurtosis: Option<f64>,
    pub histogram: Vec<HistogramBin>,
}

impl NumericStats {
    /// The all-undefined profile reported for a column with no clean values.
    pub fn undefined() -> Self {
        Self {
            mean: None,
            median: None,
            std: None,
            min: None,
            max: None,
            q1: None,
            q3: None,
            skewness: None,
            kurtosis: None,
            histogram: Vec::new(),
        }
    }
}

/// One entry of a categorical column's frequency table.
#[derive(Debug, Clone, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
    pub percentage: f64,
}

/// Frequency statistics for a categorical column.
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalStats {
    pub top_value: String,
    pub top_frequency: usize,
    /// Up to 10 entries, most frequent first.
    pub value_counts: Vec<ValueCount>,
}

/// Per-column statistical profile.
///
/// Exactly one of `numeric`/`categorical` is present, chosen by `dtype`.
#[derive(Debug, Clone, Serialize)]
pub struct VariableInfo {
    pub name: String,
    pub dtype: DtypeClass,
    pub n_missing: usize,
    pub missing_percentage: f64,
    pub n_unique: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<NumericStats>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<CategoricalStats>,
}

/// Column profiles keyed by column name, in original column order.
///
/// Serializes as a JSON object; the `Vec` keeps insertion order explicit
/// where a map type would not.
#[derive(Debug, Clone, Default)]
pub struct VariableMap(pub Vec<VariableInfo>);

impl VariableMap {
    /// Look up a column profile by name.
    pub fn get(&self, name: &str) -> Option<&VariableInfo> {
        self.0.iter().find(|v| v.name == name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for VariableMap {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for info in &self.0 {
            map.serialize_entry(&info.name, info)?;
        }
        map.end()
    }
}

/// Count of columns per dtype class; zero counts are omitted from JSON.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DtypeSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boolean: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub datetime: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categorical: Option<usize>,
}

/// Dataset-level descriptive metrics.
#[derive(Debug, Clone, Serialize)]
pub struct DatasetOverview {
    pub n_rows: usize,
    pub n_columns: usize,
    pub memory_usage_display: String,
    pub n_duplicates: usize,
    pub duplicate_percentage: f64,
    pub total_missing_cells: usize,
    pub missing_percentage: f64,
    pub dtypes_summary: DtypeSummary,
    pub column_names: Vec<String>,
}

/// One column's missing-value tally, ranked in the report.
#[derive(Debug, Clone, Serialize)]
pub struct MissingValueInfo {
    pub column: String,
    pub count: usize,
    pub percentage: f64,
}

/// Pairwise Pearson correlations over the numeric columns.
///
/// `matrix` is square and aligned by index to `columns`; undefined
/// coefficients (constant columns, no complete observations) are `None`.
#[derive(Debug, Clone, Serialize)]
pub struct CorrelationData {
    pub columns: Vec<String>,
    pub matrix: Vec<Vec<Option<f64>>>,
}

impl CorrelationData {
    pub fn empty() -> Self {
        Self {
            columns: Vec::new(),
            matrix: Vec::new(),
        }
    }
}

/// The complete analysis report for one dataset.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub overview: DatasetOverview,
    pub variables: VariableMap,
    pub missing_values: Vec<MissingValueInfo>,
    pub correlations: CorrelationData,
    pub sample_rows: Vec<serde_json::Map<String, serde_json::Value>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str) -> VariableInfo {
        VariableInfo {
            name: name.to_string(),
            dtype: DtypeClass::Numeric,
            n_missing: 0,
            missing_percentage: 0.0,
            n_unique: 3,
            numeric: Some(NumericStats::undefined()),
            categorical: None,
        }
    }

    #[test]
    fn test_variable_map_serializes_as_ordered_object() {
        let map = VariableMap(vec![variable("zeta"), variable("alpha")]);
        let json = serde_json::to_string(&map).unwrap();
        let zeta = json.find("\"zeta\"").unwrap();
        let alpha = json.find("\"alpha\"").unwrap();
        assert!(zeta < alpha, "column order must be preserved: {}", json);
    }

    #[test]
    fn test_variable_map_get() {
        let map = VariableMap(vec![variable("a"), variable("b")]);
        assert!(map.get("b").is_some());
        assert!(map.get("c").is_none());
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_variable_info_omits_absent_branch() {
        let json = serde_json::to_string(&variable("a")).unwrap();
        assert!(json.contains("\"numeric\""));
        assert!(!json.contains("\"categorical\""));
    }

    #[test]
    fn test_undefined_numeric_stats_serialize_as_null() {
        let json = serde_json::to_value(NumericStats::undefined()).unwrap();
        assert!(json["mean"].is_null());
        assert!(json["kurtosis"].is_null());
        assert_eq!(json["histogram"], serde_json::json!([]));
    }

    #[test]
    fn test_dtype_summary_omits_zero_counts() {
        let summary = DtypeSummary {
            numeric: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(json, "{\"numeric\":2}");
    }

    #[test]
    fn test_correlation_none_serializes_as_null() {
        let corr = CorrelationData {
            columns: vec!["a".to_string()],
            matrix: vec![vec![None]],
        };
        let json = serde_json::to_string(&corr).unwrap();
        assert!(json.contains("[[null]]"));
    }
}
