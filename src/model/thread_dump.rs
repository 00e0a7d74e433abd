//! Data model for captured thread dumps

use chrono::{DateTime, Local, TimeZone};
use serde::{Deserialize, Serialize};

/// JVM thread state as reported by the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ThreadState {
    New,
    Runnable,
    Blocked,
    Waiting,
    TimedWaiting,
    Terminated,
    /// Anything the agent reports that we don't recognize
    #[serde(other)]
    #[default]
    Unknown,
}

impl ThreadState {
    /// Display label matching the agent's wire spelling
    pub fn label(&self) -> &'static str {
        match self {
            ThreadState::New => "NEW",
            ThreadState::Runnable => "RUNNABLE",
            ThreadState::Blocked => "BLOCKED",
            ThreadState::Waiting => "WAITING",
            ThreadState::TimedWaiting => "TIMED_WAITING",
            ThreadState::Terminated => "TERMINATED",
            ThreadState::Unknown => "UNKNOWN",
        }
    }
}

/// One captured thread dump from the agent's light-dump payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadDump {
    pub thread_id: i64,
    pub thread_name: String,
    #[serde(default)]
    pub thread_state: ThreadState,
    /// Epoch millis when the thread started working on the current request
    #[serde(default)]
    pub start_time: i64,
    /// Millis the thread has been executing so far
    #[serde(default)]
    pub exec_time: i64,
    #[serde(default)]
    pub local_trace_id: Option<i64>,
    #[serde(default)]
    pub sampled: bool,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub entry_point: Option<String>,
    /// Raw stack trace text as captured
    #[serde(default)]
    pub detail_message: String,
}

impl ThreadDump {
    /// Glyph for the thread state shown in the list
    pub fn icon(&self) -> &str {
        match self.thread_state {
            ThreadState::Runnable => "▶",
            ThreadState::Blocked => "⊘",
            ThreadState::Waiting | ThreadState::TimedWaiting => "⏸",
            ThreadState::New => "○",
            ThreadState::Terminated => "✕",
            ThreadState::Unknown => "?",
        }
    }

    /// Start time formatted in local time, or "-" when the agent sent none
    pub fn start_time_display(&self) -> String {
        if self.start_time <= 0 {
            return "-".to_string();
        }
        match Local.timestamp_millis_opt(self.start_time).single() {
            Some(dt) => dt.format("%H:%M:%S").to_string(),
            None => "-".to_string(),
        }
    }

    /// Full start timestamp for the detail pane
    pub fn start_time_full(&self) -> String {
        if self.start_time <= 0 {
            return "-".to_string();
        }
        match Local.timestamp_millis_opt(self.start_time).single() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => "-".to_string(),
        }
    }

    /// Execution time formatted for the list column
    pub fn exec_time_display(&self) -> String {
        format_millis(self.exec_time)
    }
}

/// Format a millisecond duration as ms/s/m for narrow columns
pub fn format_millis(ms: i64) -> String {
    if ms < 0 {
        return "-".to_string();
    }
    if ms < 1_000 {
        format!("{}ms", ms)
    } else if ms < 60_000 {
        format!("{:.1}s", ms as f64 / 1_000.0)
    } else {
        let minutes = ms / 60_000;
        let seconds = (ms % 60_000) / 1_000;
        format!("{}m {}s", minutes, seconds)
    }
}

/// Parse a local-time display from an epoch-millis capture timestamp
pub fn capture_time_display(epoch_millis: i64) -> Option<DateTime<Local>> {
    Local.timestamp_millis_opt(epoch_millis).single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_json() -> &'static str {
        r#"{
            "threadId": 137,
            "threadName": "http-nio-8080-exec-5",
            "threadState": "RUNNABLE",
            "startTime": 1754390000000,
            "execTime": 853,
            "localTraceId": 9,
            "sampled": true,
            "transactionId": "order-service^1754389000000^42",
            "entryPoint": "/api/orders/confirm",
            "detailMessage": "\"http-nio-8080-exec-5\" #137 daemon\n   java.lang.Thread.State: RUNNABLE\n\tat com.acme.OrderService.confirm(OrderService.java:88)"
        }"#
    }

    #[test]
    fn test_deserialize_light_dump() {
        let dump: ThreadDump = serde_json::from_str(sample_json()).unwrap();
        assert_eq!(dump.thread_id, 137);
        assert_eq!(dump.thread_name, "http-nio-8080-exec-5");
        assert_eq!(dump.thread_state, ThreadState::Runnable);
        assert!(dump.sampled);
        assert_eq!(dump.entry_point.as_deref(), Some("/api/orders/confirm"));
        assert_eq!(dump.detail_message.lines().count(), 3);
    }

    #[test]
    fn test_unknown_state_does_not_fail() {
        let json = r#"{"threadId": 1, "threadName": "t", "threadState": "PARKED"}"#;
        let dump: ThreadDump = serde_json::from_str(json).unwrap();
        assert_eq!(dump.thread_state, ThreadState::Unknown);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{"threadId": 2, "threadName": "idle"}"#;
        let dump: ThreadDump = serde_json::from_str(json).unwrap();
        assert_eq!(dump.thread_state, ThreadState::Unknown);
        assert_eq!(dump.exec_time, 0);
        assert!(dump.transaction_id.is_none());
        assert_eq!(dump.detail_message, "");
    }

    #[test]
    fn test_format_millis() {
        assert_eq!(format_millis(853), "853ms");
        assert_eq!(format_millis(1_200), "1.2s");
        assert_eq!(format_millis(61_000), "1m 1s");
        assert_eq!(format_millis(-1), "-");
    }

    #[test]
    fn test_state_labels() {
        assert_eq!(ThreadState::TimedWaiting.label(), "TIMED_WAITING");
        assert_eq!(ThreadState::Runnable.label(), "RUNNABLE");
    }

    #[test]
    fn test_start_time_display_handles_zero() {
        let json = r#"{"threadId": 3, "threadName": "t"}"#;
        let dump: ThreadDump = serde_json::from_str(json).unwrap();
        assert_eq!(dump.start_time_display(), "-");
    }
}
