//! Markup scanner module.
//!
//! A single-pass, character-driven state machine that builds the node forest
//! while it scans. See [`ScannerState`] for the states and their dispatch
//! order.

/// Scanner state machine implementation.
pub mod core;
/// Helper methods for state transitions, input access and tree building.
pub mod helpers;

pub use self::core::{HTMLScanner, ScannerState};
