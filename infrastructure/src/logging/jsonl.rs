//! JSONL run trace logger.
//!
//! Appends one JSON record per stage outcome per run. Logging must never
//! interfere with a run, so write failures are reported through `tracing`
//! and otherwise swallowed.

use chrono::Utc;
use research_application::RunLogger;
use research_domain::RunStage;
use serde_json::json;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing::warn;
use uuid::Uuid;

/// Logger appending stage records to a JSONL file
pub struct JsonlRunLogger {
    path: PathBuf,
    // Serializes appends so concurrent stage records never interleave.
    write_lock: Mutex<()>,
}

impl JsonlRunLogger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    fn append(&self, line: &str) -> std::io::Result<()> {
        let _guard = self.write_lock.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }
}

impl RunLogger for JsonlRunLogger {
    fn log_stage(&self, run_id: Uuid, stage: RunStage, detail: &serde_json::Value) {
        let record = json!({
            "ts": Utc::now().to_rfc3339(),
            "run_id": run_id.to_string(),
            "stage": stage.as_str(),
            "detail": detail,
        });

        if let Err(e) = self.append(&record.to_string()) {
            warn!("Failed to append run trace record: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_one_record_per_stage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("runs.jsonl");
        let logger = JsonlRunLogger::new(&path);
        let run_id = Uuid::new_v4();

        logger.log_stage(run_id, RunStage::Analyze, &json!({"outcome": "proceed"}));
        logger.log_stage(run_id, RunStage::Retrieve, &json!({"agents": 2}));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["stage"], "analyze");
        assert_eq!(first["run_id"], run_id.to_string());
        assert_eq!(first["detail"]["outcome"], "proceed");
    }

    #[test]
    fn test_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/trace/runs.jsonl");
        let logger = JsonlRunLogger::new(&path);

        logger.log_stage(Uuid::new_v4(), RunStage::Plan, &json!({}));
        assert!(path.exists());
    }
}
