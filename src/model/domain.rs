//! Domain state - snapshot data separate from UI concerns

use super::thread_dump::ThreadDump;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// Domain state containing the loaded snapshot
#[derive(Default)]
pub struct DomainState {
    /// Thread dumps in capture order
    pub dumps: Vec<ThreadDump>,

    /// Path the snapshot was loaded from
    pub snapshot_path: Option<PathBuf>,

    /// When the snapshot was captured, if the file recorded it
    pub captured_at: Option<DateTime<Local>>,
}

impl DomainState {
    pub fn new() -> Self {
        Self {
            dumps: Vec::new(),
            snapshot_path: None,
            captured_at: None,
        }
    }
}
