//! Action enum - All possible application actions
//!
//! Actions are discrete operations that the application can perform.
//! Components emit Actions in response to events, and the App processes
//! them to update state.

use std::fmt;

/// All possible actions in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // ─────────────────────────────────────────────────────────────────────────
    // App Lifecycle
    // ─────────────────────────────────────────────────────────────────────────
    /// Regular tick for time-based updates
    Tick,
    /// Terminal was resized
    Resize(u16, u16),
    /// Force quit without confirmation
    ForceQuit,

    // ─────────────────────────────────────────────────────────────────────────
    // List Navigation
    // ─────────────────────────────────────────────────────────────────────────
    /// Focus next thread in the list
    NextItem,
    /// Focus previous thread in the list
    PrevItem,
    /// Jump to first thread
    FirstItem,
    /// Jump to last thread
    LastItem,

    // ─────────────────────────────────────────────────────────────────────────
    // Selection
    // ─────────────────────────────────────────────────────────────────────────
    /// Select the focused row for detail display
    ActivateRow,
    /// Select the clicked row (index into the filtered list)
    ClickRow(usize),

    // ─────────────────────────────────────────────────────────────────────────
    // Detail Scrolling
    // ─────────────────────────────────────────────────────────────────────────
    /// Scroll detail panel up one line
    ScrollUp,
    /// Scroll detail panel down one line
    ScrollDown,
    /// Scroll detail panel up one page
    PageUp,
    /// Scroll detail panel down one page
    PageDown,

    // ─────────────────────────────────────────────────────────────────────────
    // Panes
    // ─────────────────────────────────────────────────────────────────────────
    /// Switch focus between the list and detail panes
    FocusNextPane,
    /// Give the list pane a larger share of the split
    GrowListPane,
    /// Give the list pane a smaller share of the split
    ShrinkListPane,

    // ─────────────────────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────────────────────
    /// Open quit confirmation dialog
    OpenQuitDialog,
    /// Open help dialog showing all keyboard shortcuts
    OpenHelp,
    /// Close the current modal
    CloseModal,

    // ─────────────────────────────────────────────────────────────────────────
    // Filter
    // ─────────────────────────────────────────────────────────────────────────
    /// Enter filter input mode
    EnterSearchMode,
    /// Exit filter input mode
    ExitSearchMode,
    /// Add character to filter query
    SearchInput(char),
    /// Remove last character from filter query
    SearchBackspace,

    // ─────────────────────────────────────────────────────────────────────────
    // Snapshot
    // ─────────────────────────────────────────────────────────────────────────
    /// Re-read the snapshot file from disk
    ReloadSnapshot,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Tick => write!(f, "Tick"),
            Action::Resize(w, h) => write!(f, "Resize({}, {})", w, h),
            Action::ForceQuit => write!(f, "ForceQuit"),
            Action::NextItem => write!(f, "NextItem"),
            Action::PrevItem => write!(f, "PrevItem"),
            Action::FirstItem => write!(f, "FirstItem"),
            Action::LastItem => write!(f, "LastItem"),
            Action::ActivateRow => write!(f, "ActivateRow"),
            Action::ClickRow(idx) => write!(f, "ClickRow({})", idx),
            Action::ScrollUp => write!(f, "ScrollUp"),
            Action::ScrollDown => write!(f, "ScrollDown"),
            Action::PageUp => write!(f, "PageUp"),
            Action::PageDown => write!(f, "PageDown"),
            Action::FocusNextPane => write!(f, "FocusNextPane"),
            Action::GrowListPane => write!(f, "GrowListPane"),
            Action::ShrinkListPane => write!(f, "ShrinkListPane"),
            Action::OpenQuitDialog => write!(f, "OpenQuitDialog"),
            Action::OpenHelp => write!(f, "OpenHelp"),
            Action::CloseModal => write!(f, "CloseModal"),
            Action::EnterSearchMode => write!(f, "EnterSearchMode"),
            Action::ExitSearchMode => write!(f, "ExitSearchMode"),
            Action::SearchInput(c) => write!(f, "SearchInput('{}')", c),
            Action::SearchBackspace => write!(f, "SearchBackspace"),
            Action::ReloadSnapshot => write!(f, "ReloadSnapshot"),
        }
    }
}
