//! Synchronous HTTP service for the analysis engine.
//!
//! One endpoint: `POST /api/analyze` accepting a CSV upload as multipart
//! form data. Requests are handled one at a time on the accept loop; each
//! request parses its own table, produces its own report, and retains
//! nothing afterwards.

use std::io::Read;

use serde_json::{Value, json};
use tiny_http::{Header, Method, Request, Response, Server, StatusCode};
use tracing::{error, info, warn};

use crate::error::Result;
use crate::ingest::{self, MAX_UPLOAD_BYTES};
use crate::{multipart, report};

/// Request bodies above this are rejected outright; covers the upload
/// ceiling plus multipart envelope overhead.
const BODY_CEILING: usize = MAX_UPLOAD_BYTES + 64 * 1024;

/// Helper to create HTTP headers, returning None if the bytes are invalid
fn create_header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

/// Bind to `addr` and serve requests until the process exits.
pub fn serve(addr: &str) -> anyhow::Result<()> {
    let server =
        Server::http(addr).map_err(|e| anyhow::anyhow!("failed to bind {}: {}", addr, e))?;
    info!(%addr, "listening");

    for request in server.incoming_requests() {
        handle_request(request);
    }
    Ok(())
}

fn handle_request(mut request: Request) {
    let method = request.method().to_string();
    let url = request.url().to_string();

    let (status, body) = route(&mut request);
    info!(%method, %url, status, "handled request");

    let mut response =
        Response::from_string(body.to_string()).with_status_code(StatusCode(status));
    if let Some(header) = create_header(&b"Content-Type"[..], &b"application/json"[..]) {
        response = response.with_header(header);
    }
    if let Err(err) = request.respond(response) {
        error!(error = %err, "failed to send response");
    }
}

fn route(request: &mut Request) -> (u16, Value) {
    if *request.method() == Method::Post && request.url() == "/api/analyze" {
        match analyze_upload(request) {
            Ok(report) => (200, report),
            Err(err) => {
                let (status, message) = if err.is_client_error() {
                    (400, err.to_string())
                } else {
                    (500, format!("Internal error: {}", err))
                };
                warn!(code = err.error_code(), %message, "analysis request failed");
                (status, json!({ "error": message }))
            }
        }
    } else {
        (404, json!({ "error": "Not found" }))
    }
}

fn analyze_upload(request: &mut Request) -> Result<Value> {
    let content_type = request
        .headers()
        .iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_string())
        .unwrap_or_default();

    let mut body = Vec::new();
    request
        .as_reader()
        .take((BODY_CEILING + 1) as u64)
        .read_to_end(&mut body)?;
    if body.len() > BODY_CEILING {
        return Err(crate::error::AnalysisError::FileTooLarge);
    }

    let file = multipart::extract_file(&content_type, &body)?;
    let df = ingest::ingest(&file)?;
    report::analyze(&df)
}
