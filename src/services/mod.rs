//! External service interactions
//!
//! This module contains services for interacting with external systems:
//! - Snapshot file loading and parsing

pub mod snapshot;

pub use snapshot::{load_snapshot, Snapshot};
