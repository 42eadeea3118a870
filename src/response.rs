use std::io;

use reqwest::StatusCode;
use reqwest::blocking::Response;
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::Report;

/// Only `200 OK` is a success; anything else carries the status line.
pub fn ensure_ok(status: StatusCode) -> Result<()> {
    if status == StatusCode::OK {
        return Ok(());
    }
    Err(Error::UnexpectedStatus {
        code: status.as_u16(),
        status_text: status.to_string(),
    })
}

/// Consume the response and return its body bytes.
///
/// On a non-200 status the body is drained before the response is dropped,
/// so the connection is released on every path.
pub fn check_status(mut response: Response) -> Result<Vec<u8>> {
    if let Err(err) = ensure_ok(response.status()) {
        // Drain errors are irrelevant here, the status is what gets reported.
        let _ = response.copy_to(&mut io::sink());
        return Err(err);
    }
    let body = response.bytes()?;
    Ok(body.to_vec())
}

/// Decode a response body into a [`Report`].
///
/// Missing and unknown fields are tolerated; a present series whose length
/// differs from `ts` is not.
pub fn decode(body: &[u8]) -> Result<Report> {
    let report: Report = serde_json::from_slice(body)?;
    report.check_alignment()?;
    debug!(steps = report.len(), "decoded forecast report");
    Ok(report)
}
