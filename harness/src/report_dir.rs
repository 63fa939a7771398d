//! Report directory persistence: write/read/verify a `SearchReport` on disk.
//!
//! # Directory layout
//!
//! ```text
//! <dir>/
//!   search_graph.json    canonical JSON of the search graph
//!   report.json          canonical JSON of the report (binds the graph digest)
//!   report_digest.txt    ASCII digest string of report.json ("sha256:...")
//! ```
//!
//! The directory path is never part of any hash surface.
//!
//! # Fail-closed reads
//!
//! - Missing file → error
//! - Extra file → error
//! - `report.json` not canonical, or with an unknown `schema_version` → error
//! - Graph or report digest mismatch → error

use std::collections::BTreeSet;
use std::path::Path;

use treesearch::canon::canonical_json_bytes;
use treesearch::hash::{canonical_hash, ContentHash, HashDomain};

use crate::runner::{SearchReport, REPORT_SCHEMA_VERSION};

pub const GRAPH_FILENAME: &str = "search_graph.json";
pub const REPORT_FILENAME: &str = "report.json";
pub const DIGEST_FILENAME: &str = "report_digest.txt";

const ALL_FILENAMES: [&str; 3] = [GRAPH_FILENAME, REPORT_FILENAME, DIGEST_FILENAME];

/// Error writing a report directory.
#[derive(Debug)]
pub enum ReportDirWriteError {
    Io { detail: String },
}

impl std::fmt::Display for ReportDirWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
        }
    }
}

impl std::error::Error for ReportDirWriteError {}

/// Error reading a report directory.
#[derive(Debug)]
pub enum ReportDirReadError {
    Io { detail: String },
    /// A required file is missing.
    MissingFile { filename: String },
    /// A file the layout does not declare exists in the directory.
    ExtraFile { name: String },
    /// `report.json` is not valid JSON, or a required field is missing.
    ReportParseError { detail: String },
    /// `report.json` parses but is not in canonical form.
    NonCanonicalReport,
    /// `schema_version` is not recognized.
    SchemaVersionMismatch { found: String },
    /// `search_graph.json` does not hash to the digest bound in `report.json`.
    GraphDigestMismatch { bound: String, recomputed: String },
    /// `report_digest.txt` does not match the recomputed report digest.
    ReportDigestMismatch { stored: String, recomputed: String },
}

impl std::fmt::Display for ReportDirReadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { detail } => write!(f, "I/O error: {detail}"),
            Self::MissingFile { filename } => write!(f, "missing file: {filename}"),
            Self::ExtraFile { name } => write!(f, "undeclared extra file: {name}"),
            Self::ReportParseError { detail } => write!(f, "report parse error: {detail}"),
            Self::NonCanonicalReport => write!(f, "report.json is not canonical JSON"),
            Self::SchemaVersionMismatch { found } => {
                write!(f, "report schema version mismatch: {found}")
            }
            Self::GraphDigestMismatch { bound, recomputed } => {
                write!(
                    f,
                    "search graph digest mismatch: bound={bound}, recomputed={recomputed}"
                )
            }
            Self::ReportDigestMismatch { stored, recomputed } => {
                write!(
                    f,
                    "report digest mismatch: stored={stored}, recomputed={recomputed}"
                )
            }
        }
    }
}

impl std::error::Error for ReportDirReadError {}

/// The verified contents of a report directory.
#[derive(Debug, Clone)]
pub struct StoredReport {
    pub graph_bytes: Vec<u8>,
    pub report_bytes: Vec<u8>,
    pub report: serde_json::Value,
    pub graph_digest: ContentHash,
    pub report_digest: ContentHash,
}

/// Write `report` to `dir`, creating the directory if needed.
///
/// # Errors
///
/// Returns [`ReportDirWriteError::Io`] on any filesystem failure.
pub fn write_report_dir(report: &SearchReport, dir: &Path) -> Result<(), ReportDirWriteError> {
    std::fs::create_dir_all(dir).map_err(|e| ReportDirWriteError::Io {
        detail: format!("create_dir_all: {e}"),
    })?;

    write_atomic(&dir.join(GRAPH_FILENAME), &report.graph_bytes)?;
    write_atomic(&dir.join(REPORT_FILENAME), &report.report_bytes)?;
    write_atomic(
        &dir.join(DIGEST_FILENAME),
        report.report_digest.as_str().as_bytes(),
    )?;

    tracing::debug!(dir = %dir.display(), digest = %report.report_digest, "report directory written");
    Ok(())
}

/// Read and verify a report directory.
///
/// Recomputes both digests from the bytes on disk; nothing stored is
/// trusted.
///
/// # Errors
///
/// Returns [`ReportDirReadError`] on the first failed check.
pub fn read_report_dir(dir: &Path) -> Result<StoredReport, ReportDirReadError> {
    let graph_bytes = read_required(dir, GRAPH_FILENAME)?;
    let report_bytes = read_required(dir, REPORT_FILENAME)?;
    let stored_digest = read_required(dir, DIGEST_FILENAME)?;

    for name in list_files(dir)? {
        if !ALL_FILENAMES.contains(&name.as_str()) {
            return Err(ReportDirReadError::ExtraFile { name });
        }
    }

    let report: serde_json::Value = serde_json::from_slice(&report_bytes).map_err(|e| {
        ReportDirReadError::ReportParseError {
            detail: format!("{e}"),
        }
    })?;
    match canonical_json_bytes(&report) {
        Ok(bytes) if bytes == report_bytes => {}
        _ => return Err(ReportDirReadError::NonCanonicalReport),
    }

    let schema_version = report["schema_version"].as_str().unwrap_or("");
    if schema_version != REPORT_SCHEMA_VERSION {
        return Err(ReportDirReadError::SchemaVersionMismatch {
            found: schema_version.to_string(),
        });
    }

    let bound = report["search_graph_digest"].as_str().ok_or_else(|| {
        ReportDirReadError::ReportParseError {
            detail: "missing \"search_graph_digest\"".into(),
        }
    })?;
    let graph_digest = canonical_hash(HashDomain::SearchGraph, &graph_bytes);
    if graph_digest.as_str() != bound {
        return Err(ReportDirReadError::GraphDigestMismatch {
            bound: bound.to_string(),
            recomputed: graph_digest.as_str().to_string(),
        });
    }

    let report_digest = canonical_hash(HashDomain::SearchReport, &report_bytes);
    let stored = String::from_utf8_lossy(&stored_digest).trim().to_string();
    if report_digest.as_str() != stored {
        return Err(ReportDirReadError::ReportDigestMismatch {
            stored,
            recomputed: report_digest.as_str().to_string(),
        });
    }

    Ok(StoredReport {
        graph_bytes,
        report_bytes,
        report,
        graph_digest,
        report_digest,
    })
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Write bytes via temp file + rename.
fn write_atomic(path: &Path, content: &[u8]) -> Result<(), ReportDirWriteError> {
    let dir = path.parent().ok_or_else(|| ReportDirWriteError::Io {
        detail: "no parent directory".into(),
    })?;
    let temp_name = format!(
        ".tmp_{}",
        path.file_name().unwrap_or_default().to_string_lossy()
    );
    let temp_path = dir.join(temp_name);

    std::fs::write(&temp_path, content).map_err(|e| ReportDirWriteError::Io {
        detail: format!("write {}: {e}", temp_path.display()),
    })?;
    std::fs::rename(&temp_path, path).map_err(|e| ReportDirWriteError::Io {
        detail: format!("rename {} to {}: {e}", temp_path.display(), path.display()),
    })
}

fn read_required(dir: &Path, filename: &str) -> Result<Vec<u8>, ReportDirReadError> {
    std::fs::read(dir.join(filename)).map_err(|_| ReportDirReadError::MissingFile {
        filename: filename.to_string(),
    })
}

/// Regular files in `dir`, skipping temp files left by `write_atomic`.
fn list_files(dir: &Path) -> Result<BTreeSet<String>, ReportDirReadError> {
    let io = |e: std::io::Error| ReportDirReadError::Io {
        detail: format!("read_dir: {e}"),
    };
    let mut files = BTreeSet::new();
    for entry in std::fs::read_dir(dir).map_err(io)? {
        let entry = entry.map_err(io)?;
        if !entry.file_type().map_err(io)?.is_file() {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            if !name.starts_with(".tmp_") {
                files.insert(name.to_string());
            }
        }
    }
    Ok(files)
}
