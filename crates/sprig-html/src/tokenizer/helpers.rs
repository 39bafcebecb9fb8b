//! Helper functions for the scanner.
//!
//! This module contains utility functions used throughout the state handlers:
//! - State transitions ("switch to", "rewind")
//! - Bounds-checked input access and one-character look-around
//! - Character classification
//! - Node creation and linking into the tree

use sprig_common::BoundsError;
use sprig_common::warning::warn_once;
use sprig_dom::{Node, NodeId, NodeKind};

use super::core::{HTMLScanner, ScannerState};

// =============================================================================
// State Transition Helpers
// =============================================================================

impl HTMLScanner {
    /// Move to `new_state`. Whether the new state still sees the current
    /// character depends on dispatch order, see [`ScannerState`].
    pub(super) const fn switch_to(&mut self, new_state: ScannerState) {
        self.state = new_state;
    }

    /// Scan the current character again on the next step instead of
    /// advancing. Never goes back more than one position.
    pub(super) const fn rewind_one(&mut self) {
        self.rewind = true;
    }

    /// Whether the configured `max_chars` stops the scan at the current
    /// offset.
    pub(super) fn limit_reached(&self) -> bool {
        let Some(max) = self.options.max_chars else {
            return false;
        };
        if self.offset < max {
            return false;
        }
        warn_once(
            "Tokenizer",
            &format!("scan stopped at offset {max} of {}", self.input.len()),
        );
        true
    }
}

// =============================================================================
// Input/Character Helpers
// =============================================================================

impl HTMLScanner {
    /// The character at `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`BoundsError::PastEnd`] if `offset` is not inside the input.
    pub fn char_at(&self, offset: usize) -> Result<char, BoundsError> {
        self.input
            .get(offset)
            .copied()
            .ok_or(BoundsError::PastEnd {
                offset,
                len: self.input.len(),
            })
    }

    /// One character of look-ahead. `None` at the end of the input.
    pub(super) fn peek_next(&self) -> Option<char> {
        Self::ok_or_report(self.char_at(self.offset + 1))
    }

    /// One character of look-behind. `None` at the start of the input.
    pub(super) fn peek_previous(&self) -> Option<char> {
        let previous = match self.offset.checked_sub(1) {
            Some(offset) => self.char_at(offset),
            None => Err(BoundsError::BeforeStart),
        };
        Self::ok_or_report(previous)
    }

    // Edge reads are not parse errors; they are logged and read as "no
    // character".
    fn ok_or_report(result: Result<char, BoundsError>) -> Option<char> {
        result
            .inspect_err(|err| warn_once("Tokenizer", &err.to_string()))
            .ok()
    }

    /// `a` through `z`. Tag and attribute names use nothing else.
    pub(super) const fn is_lowercase_ascii(c: char) -> bool {
        c.is_ascii_lowercase()
    }

    /// Space, line feed or tab.
    ///
    /// NOTE: carriage return and form feed are not whitespace here.
    pub(super) const fn is_space(c: char) -> bool {
        matches!(c, ' ' | '\n' | '\t')
    }

    pub(super) const fn is_quote(c: char) -> bool {
        matches!(c, '"' | '\'')
    }

    /// Take the accumulated text, leaving the accumulator empty.
    pub(super) fn take_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }
}

// =============================================================================
// Tree Building Helpers
// =============================================================================

impl HTMLScanner {
    /// Link `id` under the innermost open element, or make it a root.
    pub(super) fn link_to_parent(&mut self, id: NodeId) {
        if let Some(&parent) = self.open_elements.last() {
            self.arena.append_child(parent, id);
        } else {
            self.roots.push(id);
        }
    }

    /// Set an attribute on the current element. Last write wins.
    pub(super) fn set_attribute(&mut self, name: String, value: String) {
        let Some(id) = self.current_element else {
            return;
        };
        if let Some(element) = self.arena.get_mut(id) {
            let _ = element.attributes.insert(name, value);
        }
    }

    /// Turn the accumulated text run into a `Text` node ending just before
    /// the current offset.
    ///
    /// An empty run produces no node.
    pub(super) fn emit_text_node(&mut self) {
        if self.text.is_empty() {
            return;
        }
        let start = self.offset.saturating_sub(self.text.chars().count());
        let end = self.offset.saturating_sub(1);
        let mut node = Node::new(NodeKind::Text, start, self.take_text());
        node.end = Some(end);
        let id = self.arena.alloc(node);
        self.link_to_parent(id);
    }

    /// Create a comment or doctype node from the raw slice between the last
    /// `<` and the current `>`, both included.
    pub(super) fn emit_raw_node(&mut self, kind: NodeKind) {
        let raw: String = self
            .input
            .get(self.tag_start..=self.offset)
            .unwrap_or_default()
            .iter()
            .collect();
        let mut node = Node::new(kind, self.tag_start, raw);
        node.end = Some(self.offset);
        let id = self.arena.alloc(node);
        self.link_to_parent(id);
    }
}
