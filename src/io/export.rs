//! Export rendered results to JSON files.
//!
//! An export snapshots what the result panel currently *displays* — not the
//! original response values — so the file always matches what the operator
//! saw. Exporting a never-rendered panel yields empty-string fields; that is
//! accepted rather than guarded.

use std::collections::BTreeMap;
use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::FormSpec;
use crate::error::AppError;
use crate::render::ResultPanel;

/// One exported document: the check's displayed fields as strings, plus a
/// `type` tag and capture timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRecord {
    #[serde(rename = "type")]
    pub check: &'static str,
    #[serde(flatten)]
    pub fields: BTreeMap<&'static str, String>,
    /// ISO-8601 UTC capture time.
    pub timestamp: String,
}

/// Snapshot the currently displayed fields of one check.
pub fn capture_record(spec: &FormSpec, panel: &ResultPanel) -> ResultRecord {
    let mut fields = BTreeMap::new();
    for rf in spec.results {
        fields.insert(rf.response_key, panel.get(rf.field_id).to_string());
    }
    if let Some(status_id) = spec.pass_fail {
        fields.insert("status", panel.get(status_id).to_string());
    }

    ResultRecord {
        check: spec.kind.id(),
        fields,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

/// Write the check's current results to `dir/<fixed filename>`.
pub fn export_results(spec: &FormSpec, panel: &ResultPanel, dir: &Path) -> Result<PathBuf, AppError> {
    let record = capture_record(spec, panel);

    create_dir_all(dir)
        .map_err(|e| AppError::new(2, format!("Failed to create export dir '{}': {e}", dir.display())))?;

    let path = dir.join(spec.export_file);
    let file = File::create(&path)
        .map_err(|e| AppError::new(2, format!("Failed to create export file '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &record)
        .map_err(|e| AppError::new(2, format!("Failed to write export file '{}': {e}", path.display())))?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::CheckKind;
    use crate::render::render;

    fn temp_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("linqa-export-{tag}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn export_after_render_matches_displayed_text() {
        let spec = CheckKind::FieldSize.spec();
        let mut panel = ResultPanel::new();
        render(spec, &json!({ "delta_x": 0.5, "delta_y": -0.3, "lulus": false }), &mut panel);

        let dir = temp_dir("rendered");
        let path = export_results(spec, &panel, &dir).unwrap();
        assert_eq!(path.file_name().unwrap(), "field-size-results.json");

        let body: Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(body["type"], "field_size");
        assert_eq!(body["delta_x"], "0.5");
        assert_eq!(body["delta_y"], "-0.3");
        assert_eq!(body["status"], "TIDAK LULUS");

        let ts = body["timestamp"].as_str().unwrap();
        DateTime::parse_from_rfc3339(ts).expect("timestamp must be ISO-8601");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_before_render_yields_empty_fields() {
        let spec = CheckKind::TablePosition.spec();
        let panel = ResultPanel::new();

        let dir = temp_dir("unrendered");
        let path = export_results(spec, &panel, &dir).unwrap();

        let body: Value = serde_json::from_reader(File::open(&path).unwrap()).unwrap();
        assert_eq!(body["type"], "table_position");
        assert_eq!(body["delta_s"], "");
        assert_eq!(body["status"], "");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn dosimetry_record_has_no_status_field() {
        let spec = CheckKind::Dosimetry.spec();
        let mut panel = ResultPanel::new();
        render(spec, &json!({ "dosis_absolute": 101.1, "deviasi": 1.1 }), &mut panel);

        let record = capture_record(spec, &panel);
        assert_eq!(record.check, "dosimetry");
        assert_eq!(record.fields.get("dosis_absolute").unwrap(), "101.1");
        assert!(!record.fields.contains_key("status"));
    }
}
