//! Minimal multipart/form-data extraction for the upload endpoint.
//!
//! The service accepts exactly one field, `file`; this module locates that
//! part in the request body and returns its raw bytes. Part bodies are
//! treated as opaque binary, headers as Latin-1 text.

use crate::error::{AnalysisError, Result};

/// Extract the `file` field's bytes from a multipart request body.
pub fn extract_file(content_type: &str, body: &[u8]) -> Result<Vec<u8>> {
    let boundary = parse_boundary(content_type)?;
    let delimiter = format!("--{}", boundary).into_bytes();

    let mut marks = Vec::new();
    let mut pos = 0;
    while let Some(offset) = find(&body[pos..], &delimiter) {
        marks.push(pos + offset);
        pos += offset + delimiter.len();
    }

    for window in marks.windows(2) {
        let segment = &body[window[0] + delimiter.len()..window[1]];
        let Some(part) = segment.strip_prefix(b"\r\n") else {
            continue;
        };
        let Some(split) = find(part, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&part[..split]);
        let content = &part[split + 4..];
        let content = content.strip_suffix(b"\r\n").unwrap_or(content);
        if is_file_field(&headers) {
            return Ok(content.to_vec());
        }
    }

    Err(AnalysisError::MissingFile)
}

/// Pull the boundary parameter out of a Content-Type header value.
fn parse_boundary(content_type: &str) -> Result<String> {
    if !content_type
        .to_ascii_lowercase()
        .contains("multipart/form-data")
    {
        return Err(AnalysisError::InvalidMultipart(
            "Expected multipart/form-data".to_string(),
        ));
    }
    content_type
        .split(';')
        .map(str::trim)
        .find_map(|param| param.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_string())
        .filter(|b| !b.is_empty())
        .ok_or_else(|| {
            AnalysisError::InvalidMultipart("Missing multipart boundary".to_string())
        })
}

fn is_file_field(headers: &str) -> bool {
    headers.lines().any(|line| {
        let lower = line.to_ascii_lowercase();
        lower.starts_with("content-disposition") && lower.contains("name=\"file\"")
    })
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || haystack.len() < needle.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}
