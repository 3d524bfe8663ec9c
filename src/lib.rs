//! # csvsight
//!
//! Exploratory data analysis for CSV datasets, built on Polars.
//!
//! csvsight turns an uploaded CSV file into a structured, JSON-safe report:
//! a dataset overview, a statistical profile per column, a missing-value
//! ranking, a pairwise correlation matrix, and a row sample. The analysis is
//! a pure function of the parsed table; the bundled HTTP service is a thin
//! synchronous boundary around it.
//!
//! ## Modules
//!
//! - [`ingest`] — upload decoding (UTF-8 with Latin-1 fallback) and CSV parsing
//! - [`profiler`] — per-column profiles: numeric distributions, categorical frequencies
//! - [`overview`] — dataset-level metrics: shape, memory, duplicates, missing totals
//! - [`correlation`] — pairwise-complete Pearson matrix over numeric columns
//! - [`sample`] — bounded row preview in row-oriented JSON form
//! - [`sanitize`] — non-finite value scrubbing for strict JSON output
//! - [`report`] — orchestration into the final [`AnalysisReport`]
//! - [`server`] — synchronous HTTP upload endpoint
//! - [`multipart`] — multipart/form-data field extraction
//! - [`types`] — report data model
//! - [`error`] — error types
//!
//! ## Quick Start
//!
//! ```
//! let csv = "age,city\n31,Lisbon\n54,Oslo\n27,Lisbon\n";
//! let df = csvsight::ingest::parse_csv(csv).unwrap();
//! let report = csvsight::report::analyze(&df).unwrap();
//!
//! assert_eq!(report["overview"]["n_rows"], 3);
//! assert_eq!(report["variables"]["city"]["categorical"]["top_value"], "Lisbon");
//! ```

pub mod correlation;
pub mod error;
pub mod ingest;
pub mod multipart;
pub mod overview;
pub mod profiler;
pub mod report;
pub mod sample;
pub mod sanitize;
pub mod server;
pub mod types;
pub mod utils;

pub use error::{AnalysisError, Result};
pub use report::{analyze, build_report, missing_report};
pub use types::{
    AnalysisReport, CategoricalStats, CorrelationData, DatasetOverview, DtypeSummary,
    HistogramBin, MissingValueInfo, NumericStats, ValueCount, VariableInfo, VariableMap,
};
pub use utils::DtypeClass;
