//! Model layer - centralized state management
//!
//! This module contains all state-related types:
//! - `DomainState` - Snapshot data (thread dumps, capture metadata)
//! - `NavigationContext` - Immutable application/agent identity
//! - `DumpSelection` - The page-level selection
//! - `ModalStack` - Modal overlay management

pub mod domain;
pub mod modal;
pub mod navigation;
pub mod selection;
pub mod thread_dump;
pub mod ui;

// Re-export commonly used types
pub use domain::DomainState;
pub use navigation::{Application, NavigationContext};
pub use selection::DumpSelection;
pub use thread_dump::{ThreadDump, ThreadState};
pub use ui::FocusPane;
