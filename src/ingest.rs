//! Upload ingestion: byte decoding, CSV parsing, table validation.

use std::io::Cursor;

use polars::io::csv::read::{CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use tracing::info;

use crate::error::{AnalysisError, Result};

/// Upload size ceiling enforced before parsing.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Decode upload bytes as UTF-8, falling back to Latin-1.
///
/// The Latin-1 fallback is total: every byte maps to its code point, so any
/// byte sequence decodes to some text.
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Parse CSV text into a DataFrame with schema inference over the whole
/// input, including date parsing.
pub fn parse_csv(text: &str) -> Result<DataFrame> {
    let cursor = Cursor::new(text.as_bytes().to_vec());
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(None)
        .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
        .into_reader_with_file_handle(cursor)
        .finish()
        .map_err(|e| AnalysisError::CsvParse(e.to_string()))?;

    if df.height() == 0 || df.width() == 0 {
        return Err(AnalysisError::EmptyTable);
    }
    Ok(df)
}

/// Validate and parse an uploaded file into a table.
///
/// Enforcement order: non-empty, size ceiling, decode, parse, non-empty
/// table. Any failure is a client error; nothing is retried.
pub fn ingest(bytes: &[u8]) -> Result<DataFrame> {
    if bytes.is_empty() {
        return Err(AnalysisError::EmptyFile);
    }
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AnalysisError::FileTooLarge);
    }

    let text = decode_text(bytes);
    let df = parse_csv(&text)?;
    info!(rows = df.height(), columns = df.width(), "parsed CSV upload");
    Ok(df)
}
