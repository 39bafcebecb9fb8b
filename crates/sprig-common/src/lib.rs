//! Common utilities for the Sprig scanner.
//!
//! This crate provides shared infrastructure used by all scanner components:
//! - **Warning System** - colored, deduplicated diagnostics on stderr
//! - **Errors** - the internal bounds condition raised by checked input access

/// Internal error conditions.
pub mod error;
/// Deduplicated terminal warnings.
pub mod warning;

pub use error::BoundsError;
