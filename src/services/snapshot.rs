//! Snapshot loading - reads a captured thread dump file from disk

use crate::model::thread_dump::ThreadDump;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Wire format of a captured snapshot file
///
/// Mirrors the agent's light-dump response: the dump list plus optional
/// capture metadata.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Epoch millis when the snapshot was taken
    #[serde(default)]
    pub captured_at: Option<i64>,
    #[serde(default)]
    pub thread_dump_data: Vec<ThreadDump>,
}

/// Load and parse a snapshot file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, String> {
    let contents = fs::read_to_string(&path)
        .map_err(|e| format!("Failed to read snapshot file: {}", e))?;

    let snapshot: Snapshot = serde_json::from_str(&contents)
        .map_err(|e| format!("Failed to parse snapshot file: {}", e))?;

    Ok(snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::thread_dump::ThreadState;

    #[test]
    fn test_parse_snapshot_wire_format() {
        let json = r#"{
            "agentId": "agent-7",
            "capturedAt": 1754390123000,
            "threadDumpData": [
                {
                    "threadId": 21,
                    "threadName": "http-nio-8080-exec-1",
                    "threadState": "BLOCKED",
                    "startTime": 1754390000000,
                    "execTime": 12000,
                    "sampled": true,
                    "transactionId": "order-service^1^7",
                    "entryPoint": "/api/orders",
                    "detailMessage": "\tat com.acme.Repo.lock(Repo.java:31)"
                },
                {
                    "threadId": 22,
                    "threadName": "pool-2-thread-1"
                }
            ]
        }"#;

        let snapshot: Snapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snapshot.agent_id.as_deref(), Some("agent-7"));
        assert_eq!(snapshot.thread_dump_data.len(), 2);
        assert_eq!(snapshot.thread_dump_data[0].thread_state, ThreadState::Blocked);
        assert_eq!(snapshot.thread_dump_data[1].thread_state, ThreadState::Unknown);
    }

    #[test]
    fn test_parse_empty_dump_list() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"threadDumpData": []}"#).unwrap();
        assert!(snapshot.thread_dump_data.is_empty());
        assert!(snapshot.captured_at.is_none());
    }

    #[test]
    fn test_load_missing_file_reports_read_error() {
        let err = load_snapshot("/nonexistent/snapshot.json").unwrap_err();
        assert!(err.contains("Failed to read"));
    }

    #[test]
    fn test_load_sample_snapshot() {
        let sample_path = "demos/sample-snapshot.json";
        if !std::path::Path::new(sample_path).exists() {
            // Skip if the sample file isn't present
            return;
        }

        let snapshot = load_snapshot(sample_path).expect("Failed to load sample snapshot");
        assert_eq!(snapshot.agent_id.as_deref(), Some("agent-7"));
        assert!(!snapshot.thread_dump_data.is_empty());
        assert!(snapshot
            .thread_dump_data
            .iter()
            .any(|d| d.thread_state == ThreadState::Blocked));
    }
}
