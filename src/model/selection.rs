//! Page-level selection state
//!
//! At most one thread dump is selected at a time. The only transition is
//! selecting a dump, which replaces whatever was selected before; the type
//! exposes no way back to the empty state. The selection owns its copy of
//! the record, so replacing the dump list leaves it intact.

use super::thread_dump::ThreadDump;

/// The currently selected thread dump, if any
#[derive(Debug, Default)]
pub struct DumpSelection {
    current: Option<ThreadDump>,
}

impl DumpSelection {
    pub fn new() -> Self {
        Self { current: None }
    }

    /// Replace the selection with the given dump
    pub fn select(&mut self, dump: ThreadDump) {
        self.current = Some(dump);
    }

    /// The selected dump, or None before the first selection
    pub fn get(&self) -> Option<&ThreadDump> {
        self.current.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::thread_dump::ThreadState;

    fn dump(id: i64, name: &str) -> ThreadDump {
        ThreadDump {
            thread_id: id,
            thread_name: name.to_string(),
            thread_state: ThreadState::Runnable,
            start_time: 0,
            exec_time: 0,
            local_trace_id: None,
            sampled: false,
            transaction_id: None,
            entry_point: None,
            detail_message: String::new(),
        }
    }

    #[test]
    fn test_starts_empty() {
        let selection = DumpSelection::new();
        assert!(selection.is_empty());
        assert!(selection.get().is_none());
    }

    #[test]
    fn test_select_replaces_empty() {
        let mut selection = DumpSelection::new();
        selection.select(dump(42, "worker-1"));
        assert_eq!(selection.get().unwrap().thread_id, 42);
    }

    #[test]
    fn test_select_overwrites_previous() {
        let mut selection = DumpSelection::new();
        selection.select(dump(1, "first"));
        selection.select(dump(2, "second"));

        let current = selection.get().unwrap();
        assert_eq!(current.thread_id, 2);
        assert_eq!(current.thread_name, "second");
    }
}
