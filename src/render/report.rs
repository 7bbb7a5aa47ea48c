//! Report JSON generation.

use crate::domain::{ScanResult, REPORT_SCHEMA_VERSION};
use crate::utils::{relative_path_string, sha256_hex};
use anyhow::{Context, Result};
use chrono::Utc;
use serde_json::{json, Map, Value};
use std::path::Path;

/// Write a machine-readable summary of `result` to `report_path`.
///
/// Skipped entries are only present when the scan ran in verbose mode.
pub fn write_report(
    report_path: &Path,
    result: &ScanResult,
    config: &Value,
    include_timestamp: bool,
) -> Result<()> {
    let file_manifest = result
        .files
        .iter()
        .map(|f| {
            json!({
                "path": f.relative_path,
                "size": f.size,
                "language": f.language,
                "sha256": sha256_hex(f.content.as_bytes()),
            })
        })
        .collect::<Vec<_>>();

    let skipped = result
        .ignored_files
        .iter()
        .map(|(path, reason)| {
            json!({
                "path": relative_path_string(path, &result.root),
                "reason": reason,
            })
        })
        .collect::<Vec<_>>();

    let mut report = Map::new();
    report.insert("schema_version".to_string(), Value::String(REPORT_SCHEMA_VERSION.to_string()));
    if include_timestamp {
        report.insert(
            "generated_at".to_string(),
            Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%S+00:00").to_string()),
        );
    }
    report.insert("repository".to_string(), Value::String(result.repo_name()));
    report.insert("root".to_string(), Value::String(result.root.display().to_string()));
    report.insert("total_size".to_string(), json!(result.total_size));
    report.insert("stats".to_string(), result.stats.to_report_value());
    report.insert("config".to_string(), config.clone());
    report.insert("files".to_string(), Value::Array(file_manifest));
    if !skipped.is_empty() {
        report.insert("skipped".to_string(), Value::Array(skipped));
    }

    if let Some(parent) = report_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    std::fs::write(report_path, serde_json::to_string_pretty(&Value::Object(report))?)
        .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
    tracing::debug!("Wrote scan report to {}", report_path.display());
    Ok(())
}
