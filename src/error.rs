//! Error types for CSV analysis.
//!
//! Errors split into two families mirroring the service boundary: input
//! validation failures (bad uploads, unparseable CSV) are client errors and
//! map to HTTP 400, everything else is internal and maps to HTTP 500.

use thiserror::Error;

/// The main error type for upload ingestion and analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// The multipart request carried no `file` field.
    #[error("No file uploaded")]
    MissingFile,

    /// The uploaded file had zero bytes.
    #[error("File is empty")]
    EmptyFile,

    /// The uploaded file exceeded the size ceiling.
    #[error("File too large (max 4MB)")]
    FileTooLarge,

    /// The request body was not valid multipart/form-data.
    #[error("{0}")]
    InvalidMultipart(String),

    /// The CSV text could not be parsed into a table.
    #[error("Could not parse CSV: {0}")]
    CsvParse(String),

    /// The parsed table has no rows or no columns.
    #[error("CSV has no data or no columns")]
    EmptyTable,

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),
}

impl AnalysisError {
    /// Get a stable error code for logging and response handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingFile => "MISSING_FILE",
            Self::EmptyFile => "EMPTY_FILE",
            Self::FileTooLarge => "FILE_TOO_LARGE",
            Self::InvalidMultipart(_) => "INVALID_MULTIPART",
            Self::CsvParse(_) => "CSV_PARSE",
            Self::EmptyTable => "EMPTY_TABLE",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::Io(_) => "IO_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether this error was caused by the client's input.
    ///
    /// Client errors are reported with their plain message; everything else
    /// is wrapped as an internal error by the service boundary.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::MissingFile
                | Self::EmptyFile
                | Self::FileTooLarge
                | Self::InvalidMultipart(_)
                | Self::CsvParse(_)
                | Self::EmptyTable
        )
    }
}

/// Result type alias for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;
