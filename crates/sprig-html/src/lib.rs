//! Lenient markup scanner for Sprig.
//!
//! # Scope
//!
//! This crate implements:
//! - **Scanner** - a single-pass, character-driven state machine with 17
//!   states that turns markup into a forest of [`Node`]s
//!   - Elements with lowercase ASCII tag names and attributes
//!   - Quoted and unquoted attribute values, quote tracking inside text
//!   - Two self-closing policies: an explicit `/` and the fixed
//!     [`SELF_CLOSING_TAGS`] set
//!   - Comments and a doctype declaration kept as raw slices
//!
//! - **Tree building** - nodes are linked into their parent as they are
//!   produced, see [`sprig_dom::NodeArena`]
//!
//! # Not Implemented
//!
//! - Character entity decoding
//! - Uppercase tag or attribute names
//! - Well-formedness validation; malformed input never fails
//! - Full `-->` matching; a comment ends at the first `->`

/// Scan configuration.
pub mod options;
/// Debug printing of node forests.
pub mod printer;
/// The scanner state machine.
pub mod tokenizer;

pub use options::ScanOptions;
pub use printer::{TreeDisplay, print_tree, render_tree};
pub use sprig_dom::{AttributesMap, Node, NodeKind, SELF_CLOSING_TAGS};
pub use tokenizer::{HTMLScanner, ScannerState};

/// Scan `text` and return its root nodes in document order.
///
/// Never fails: malformed markup yields a best-effort forest.
#[must_use]
pub fn parse(text: &str) -> Vec<Node> {
    parse_with_options(text, ScanOptions::default())
}

/// Scan `text` with explicit [`ScanOptions`].
#[must_use]
pub fn parse_with_options(text: &str, options: ScanOptions) -> Vec<Node> {
    let mut scanner = HTMLScanner::with_options(text, options);
    scanner.run();
    scanner.into_nodes()
}
