//! Stage-file persistence for the evaluation pipeline.
//!
//! Every stage reads its predecessor's JSONL file and writes its own as a
//! whole-file replacement (temp file, then rename), so a failed stage never
//! corrupts the input of the next one.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use time::OffsetDateTime;

use crate::error::AppError;

/// Serialize `items` one JSON object per line into `dir/file_name`.
///
/// The directory is created when absent; an existing file is replaced.
/// `serde_json::to_string` guarantees no embedded newlines per line.
pub fn write_jsonl<T: Serialize>(
    dir: &Path,
    file_name: &str,
    items: &[T],
) -> Result<PathBuf, AppError> {
    let mut body = String::new();
    for item in items {
        let line = serde_json::to_string(item).map_err(|e| {
            AppError::new("IO_WRITE_FAILED", "Failed to encode JSONL line")
                .with_details(e.to_string())
        })?;
        body.push_str(&line);
        body.push('\n');
    }
    write_text(dir, file_name, &body)
}

/// Read a JSONL file into typed records. A missing file is
/// `IO_MISSING_INPUT`; an undecodable line is `IO_READ_FAILED` with the
/// offending line number in the details.
pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, AppError> {
    if !path.exists() {
        return Err(AppError::new("IO_MISSING_INPUT", "Stage input file not found")
            .with_details(format!("path={}", path.display())));
    }
    let raw = fs::read_to_string(path).map_err(|e| {
        AppError::new("IO_READ_FAILED", "Failed to read JSONL file")
            .with_details(format!("path={}; err={}", path.display(), e))
    })?;
    let mut out = Vec::new();
    for (line_no, line) in raw.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let item: T = serde_json::from_str(line).map_err(|e| {
            AppError::new("IO_READ_FAILED", "Failed to decode JSONL line")
                .with_details(format!("path={}; line={}; err={}", path.display(), line_no + 1, e))
        })?;
        out.push(item);
    }
    Ok(out)
}

/// Write `content` to `dir/file_name` via a temp file and rename.
pub fn write_text(dir: &Path, file_name: &str, content: &str) -> Result<PathBuf, AppError> {
    fs::create_dir_all(dir).map_err(|e| {
        AppError::new("IO_WRITE_FAILED", "Failed to create output directory")
            .with_details(format!("path={}; err={}", dir.display(), e))
    })?;
    let path = dir.join(file_name);
    let tmp = path.with_extension("tmp");
    fs::write(&tmp, content.as_bytes()).map_err(|e| {
        AppError::new("IO_WRITE_FAILED", "Failed to write output file")
            .with_details(format!("path={}; err={}", tmp.display(), e))
    })?;
    fs::rename(&tmp, &path).map_err(|e| {
        AppError::new("IO_WRITE_FAILED", "Failed to finalize output file")
            .with_details(format!("tmp={}; dest={}; err={}", tmp.display(), path.display(), e))
    })?;
    Ok(path)
}

/// Prefix `file_name` with the current unix timestamp so repeated runs never
/// overwrite prior results.
pub fn unique_file_name(file_name: &str) -> String {
    format!("{}_{file_name}", OffsetDateTime::now_utc().unix_timestamp())
}

/// Newest file in `dir` (by modification time) whose name ends with
/// `suffix`, or `None` when no such file exists. A missing directory counts
/// as empty, not as an error.
pub fn newest_matching(dir: &Path, suffix: &str) -> Result<Option<PathBuf>, AppError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(_) => return Ok(None),
    };
    let mut newest: Option<(std::time::SystemTime, PathBuf)> = None;
    for entry in entries {
        let entry = entry.map_err(|e| {
            AppError::new("IO_READ_FAILED", "Failed to scan output directory")
                .with_details(format!("path={}; err={}", dir.display(), e))
        })?;
        let path = entry.path();
        let name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name.to_string(),
            None => continue,
        };
        if !name.ends_with(suffix) {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .map_err(|e| {
                AppError::new("IO_READ_FAILED", "Failed to read file metadata")
                    .with_details(format!("path={}; err={}", path.display(), e))
            })?;
        let newer = match &newest {
            Some((ts, _)) => modified > *ts,
            None => true,
        };
        if newer {
            newest = Some((modified, path));
        }
    }
    Ok(newest.map(|(_, path)| path))
}
