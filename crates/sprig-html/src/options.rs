//! Scan configuration.

/// Options that tune a scan.
///
/// The defaults scan the whole input and turn a trailing text run into a
/// node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanOptions {
    /// Stop before scanning the character at this offset.
    ///
    /// Nodes produced up to that point are still returned; anything left
    /// open stays open. This is the cancellation point for very large
    /// inputs.
    pub max_chars: Option<usize>,

    /// Emit the text accumulated at end of input as a final `Text` node.
    ///
    /// Without it a text run is only terminated by a `<`, so `plain text`
    /// produces nothing.
    pub flush_trailing_text: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ScanOptions {
    /// The default options.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_chars: None,
            flush_trailing_text: true,
        }
    }

    /// Stop the scan at `max_chars` characters.
    #[must_use]
    pub const fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = Some(max_chars);
        self
    }

    /// Choose whether a trailing text run becomes a node.
    #[must_use]
    pub const fn with_trailing_text(mut self, flush: bool) -> Self {
        self.flush_trailing_text = flush;
        self
    }
}
