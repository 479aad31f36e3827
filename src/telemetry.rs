//! Append-only JSON request log.
//!
//! One JSON object per line, one line per downstream chat call (success
//! or failure). The log is for offline inspection of latency, token
//! spend, and error rates; nothing in the process reads it back.

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

/// A single logged request.
#[derive(Debug, Serialize)]
pub struct RequestRecord {
    /// UTC timestamp, RFC 3339.
    pub timestamp: String,
    /// Which retrieval pathway served the request: `"rag"` or `"none"`.
    pub pathway: String,
    /// `"qa"` or `"quiz"`.
    pub mode: String,
    pub latency_sec: f64,
    pub tokens: Option<u64>,
    /// Reserved for cost accounting; always null for now.
    pub cost: Option<f64>,
    pub error: Option<String>,
}

impl RequestRecord {
    pub fn new(pathway: &str, mode: &str, latency_sec: f64) -> Self {
        Self {
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            pathway: pathway.to_string(),
            mode: mode.to_string(),
            latency_sec,
            tokens: None,
            cost: None,
            error: None,
        }
    }
}

/// Append `record` as one JSON line to the log at `path`, creating parent
/// directories as needed.
pub fn log_request(path: &Path, record: &RequestRecord) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
    }

    let line = serde_json::to_string(record)?;
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;
    writeln!(file, "{}", line)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_appends_one_json_line_per_record() {
        let tmp = TempDir::new().unwrap();
        let log_path = tmp.path().join("logs").join("requests.log");

        let mut first = RequestRecord::new("rag", "qa", 1.25);
        first.tokens = Some(640);
        log_request(&log_path, &first).unwrap();

        let mut second = RequestRecord::new("rag", "quiz", 0.5);
        second.error = Some("connection reset".to_string());
        log_request(&log_path, &second).unwrap();

        let content = std::fs::read_to_string(&log_path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["pathway"], "rag");
        assert_eq!(parsed["mode"], "qa");
        assert_eq!(parsed["tokens"], 640);
        assert!(parsed["error"].is_null());

        let parsed: serde_json::Value = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(parsed["error"], "connection reset");
        assert!(parsed["tokens"].is_null());
    }

    #[test]
    fn test_timestamp_is_rfc3339_utc() {
        let record = RequestRecord::new("none", "qa", 0.0);
        assert!(record.timestamp.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&record.timestamp).is_ok());
    }
}
