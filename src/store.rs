use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::error::{Error, Result};
use crate::report::Report;
use crate::response::decode;

/// `<unix seconds>-<tag>.json`, e.g. `1700000000-DCFG.json`.
pub fn report_file_name(at: DateTime<Utc>, tag: &str) -> String {
    format!("{}-{tag}.json", at.timestamp())
}

/// Write `report` as JSON into `dir`, replacing any file of the same name.
pub fn save_report(report: &Report, dir: impl AsRef<Path>, tag: &str, at: DateTime<Utc>) -> Result<PathBuf> {
    if tag.is_empty() || tag.contains(['/', '\\']) {
        return Err(Error::InvalidTag(tag.to_string()));
    }

    let path = dir.as_ref().join(report_file_name(at, tag));
    let payload = serde_json::to_vec(report).map_err(Error::Encode)?;

    let mut file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(&path)?;
    file.write_all(&payload)?;

    debug!(path = %path.display(), bytes = payload.len(), "saved forecast report");
    Ok(path)
}

/// Read a previously saved report back.
pub fn load_report(path: impl AsRef<Path>) -> Result<Report> {
    let bytes = fs::read(path)?;
    decode(&bytes)
}
