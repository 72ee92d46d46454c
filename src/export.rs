//! Analysis export to indented JSON files.

use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};

use crate::analysis::InsightRecord;
use crate::Result;

/// `demo_analysis_<YYYYMMDD_HHMM>.json` for the given moment.
pub fn export_file_name(at: DateTime<Local>) -> String {
    format!("demo_analysis_{}.json", at.format("%Y%m%d_%H%M"))
}

/// Serialize a record the way it is exported: two-space indent, field order.
pub fn to_export_json(record: &InsightRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

/// Write `record` into `dir` and return the file path.
pub fn write_export(record: &InsightRecord, dir: &Path, at: DateTime<Local>) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(export_file_name(at));
    std::fs::write(&path, to_export_json(record)?)?;
    tracing::info!(path = %path.display(), "Analysis exported");
    Ok(path)
}

/// Read a previously exported analysis back.
pub fn read_export(path: &Path) -> Result<InsightRecord> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
