use sprig_dom::{Node, NodeArena, NodeId, NodeKind};
use strum_macros::{Display, EnumCount, EnumIter};

use crate::options::ScanOptions;

/// The scanner state machine.
///
/// Variants are declared in dispatch order. For every input character the
/// handler of the current state runs; if it moves to a state declared later,
/// that state's handler runs against the same character, and so on. A move
/// to an earlier state waits for the next character. The derived `Ord`
/// encodes this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumCount, EnumIter)]
pub enum ScannerState {
    /// Between a `<` and the first character that says what follows it.
    OpenTag,
    /// After `<!-`, waiting for `->`.
    OpenCommentTag,
    /// After `<!D`, waiting for `>`.
    OpenDoctype,
    /// The first tag-name letter has been seen.
    OpenTagName,
    /// Accumulating the tag name.
    OpeningTagName,
    /// Pass-through: creates the element node.
    ClosedTagName,
    /// Inside a start tag, between attributes.
    BeforeOpenAttributeName,
    /// Accumulating an attribute name.
    OpeningAttributeName,
    /// Records the attribute name with an empty value.
    ClosedAttributeName,
    /// After `=`, waiting for the value to begin.
    BeforeOpenAttributeValue,
    /// Accumulating an attribute value.
    OpeningAttributeValue,
    /// Pass-through: stores the accumulated value.
    ClosingAttributeValue,
    /// Right after an attribute value.
    ClosedAttributeValue,
    /// Pass-through: always continues with [`ScannerState::ClosingTag`].
    BeforeCloseTag,
    /// Handles the `/` of `</tag>` or `<tag/>` and waits for `>`.
    ClosingTag,
    /// Right after a `>`.
    ClosedTag,
    /// Accumulating a text run.
    Text,
}

impl ScannerState {
    /// Returns true for states that act on entry and move on without
    /// looking at the character.
    #[must_use]
    pub const fn is_pass_through(self) -> bool {
        matches!(
            self,
            Self::ClosedTagName | Self::ClosingAttributeValue | Self::BeforeCloseTag
        )
    }
}

/// Lenient single-pass markup scanner.
///
/// Consumes the input one character at a time and builds the node forest as
/// it goes. The scanner never fails: malformed markup is tolerated and
/// unterminated constructs leave open nodes behind.
///
/// ```ignore
/// let mut scanner = HTMLScanner::new("<p>hi</p>");
/// scanner.run();
/// let nodes = scanner.into_nodes();
/// ```
pub struct HTMLScanner {
    pub(super) state: ScannerState,
    pub(super) options: ScanOptions,
    pub(super) input: Vec<char>,
    pub(super) offset: usize,
    // Set by a handler that wants the current character scanned again.
    pub(super) rewind: bool,
    /// Pending tag name, attribute name, attribute value, or text run.
    pub(super) text: String,
    /// The quote character we are currently inside of, shared between
    /// attribute values and text runs.
    pub(super) quote: Option<char>,
    /// Offset of the `<` that started the current tag, comment or doctype.
    pub(super) tag_start: usize,
    pub(super) arena: NodeArena,
    pub(super) open_elements: Vec<NodeId>,
    /// The element whose start tag is being scanned (or was just scanned).
    pub(super) current_element: Option<NodeId>,
    /// Name of the attribute the next value belongs to.
    pub(super) current_attribute: Option<String>,
    /// Element popped by an explicit `/`, waiting for its `>`.
    pub(super) closing_element: Option<NodeId>,
    pub(super) roots: Vec<NodeId>,
    pub(super) finished: bool,
}

impl HTMLScanner {
    /// Create a scanner for `input` with default options.
    #[must_use]
    pub fn new(input: &str) -> Self {
        Self::with_options(input, ScanOptions::default())
    }

    /// Create a scanner for `input` with the given options.
    ///
    /// The scan starts in [`ScannerState::OpenTag`] when the input begins
    /// with `<` and in [`ScannerState::Text`] otherwise.
    #[must_use]
    pub fn with_options(input: &str, options: ScanOptions) -> Self {
        let state = if input.starts_with('<') {
            ScannerState::OpenTag
        } else {
            ScannerState::Text
        };
        Self {
            state,
            options,
            input: input.chars().collect(),
            offset: 0,
            rewind: false,
            text: String::new(),
            quote: None,
            tag_start: 0,
            arena: NodeArena::new(),
            open_elements: Vec::new(),
            current_element: None,
            current_attribute: None,
            closing_element: None,
            roots: Vec::new(),
            finished: false,
        }
    }

    /// The state the scanner is in.
    #[must_use]
    pub const fn state(&self) -> ScannerState {
        self.state
    }

    /// The offset of the next character to scan.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of elements currently open.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.open_elements.len()
    }

    /// Scan the whole input.
    ///
    /// Calling `run` again after it returned does nothing.
    pub fn run(&mut self) {
        if self.finished {
            return;
        }
        while self.offset < self.input.len() {
            if self.limit_reached() {
                break;
            }
            let c = self.input[self.offset];
            self.dispatch(c);
            if self.rewind {
                self.rewind = false;
            } else {
                self.offset += 1;
            }
        }
        self.finish();
    }

    /// Consume the scanner and return the root nodes in document order.
    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.arena.into_forest(&self.roots)
    }

    /// Run the state handlers for one character, cascading into states that
    /// come later in dispatch order.
    fn dispatch(&mut self, c: char) {
        let mut state = self.state;
        loop {
            self.handle(state, c);
            let next = self.state;
            #[cfg(feature = "scan-trace")]
            self.trace(state, next, c);
            if self.rewind || next <= state {
                break;
            }
            state = next;
        }
    }

    #[cfg(feature = "scan-trace")]
    fn trace(&self, from: ScannerState, to: ScannerState, c: char) {
        if from != to {
            eprintln!("[scan-trace] {:>6} {c:?} {from} -> {to}", self.offset);
        }
    }

    fn handle(&mut self, state: ScannerState, c: char) {
        match state {
            ScannerState::OpenTag => self.handle_open_tag(c),
            ScannerState::OpenCommentTag => self.handle_open_comment_tag(c),
            ScannerState::OpenDoctype => self.handle_open_doctype(c),
            ScannerState::OpenTagName => self.handle_open_tag_name(c),
            ScannerState::OpeningTagName => self.handle_opening_tag_name(c),
            ScannerState::ClosedTagName => self.handle_closed_tag_name(),
            ScannerState::BeforeOpenAttributeName => self.handle_before_open_attribute_name(c),
            ScannerState::OpeningAttributeName => self.handle_opening_attribute_name(c),
            ScannerState::ClosedAttributeName => self.handle_closed_attribute_name(c),
            ScannerState::BeforeOpenAttributeValue => self.handle_before_open_attribute_value(c),
            ScannerState::OpeningAttributeValue => self.handle_opening_attribute_value(c),
            ScannerState::ClosingAttributeValue => self.handle_closing_attribute_value(),
            ScannerState::ClosedAttributeValue => self.handle_closed_attribute_value(c),
            ScannerState::BeforeCloseTag => self.handle_before_close_tag(),
            ScannerState::ClosingTag => self.handle_closing_tag(c),
            ScannerState::ClosedTag => self.handle_closed_tag(c),
            ScannerState::Text => self.handle_text(c),
        }
    }

    fn handle_open_tag(&mut self, c: char) {
        match c {
            '<' => {
                self.tag_start = self.offset;
            }
            // `<!DOCTYPE ...>` or `<!-- ... ->`, decided by one character of
            // look-ahead.
            '!' => match self.peek_next() {
                Some('D') => self.switch_to(ScannerState::OpenDoctype),
                Some('-') => self.switch_to(ScannerState::OpenCommentTag),
                _ => {}
            },
            // </div>
            '/' => self.switch_to(ScannerState::BeforeCloseTag),
            c if Self::is_lowercase_ascii(c) => self.switch_to(ScannerState::OpenTagName),
            // Whitespace and stray characters are ignored.
            _ => {}
        }
    }

    fn handle_open_tag_name(&mut self, c: char) {
        if Self::is_lowercase_ascii(c) {
            self.switch_to(ScannerState::OpeningTagName);
        }
    }

    fn handle_opening_tag_name(&mut self, c: char) {
        match c {
            c if Self::is_lowercase_ascii(c) => self.text.push(c),
            // <div ...>, <div>, <div/>
            c if Self::is_space(c) || c == '>' || c == '/' => {
                self.switch_to(ScannerState::ClosedTagName);
            }
            _ => {}
        }
    }

    fn handle_closed_tag_name(&mut self) {
        let name = self.take_text();
        let id = self.arena.alloc(Node::new(NodeKind::Element, self.tag_start, name));
        // Root elements are added to the result when they close.
        if let Some(&parent) = self.open_elements.last() {
            self.arena.append_child(parent, id);
        }
        self.open_elements.push(id);
        self.current_element = Some(id);
        self.current_attribute = None;
        self.switch_to(ScannerState::BeforeOpenAttributeName);
    }

    fn handle_before_open_attribute_name(&mut self, c: char) {
        match c {
            // class="...", @click="..."
            c if Self::is_lowercase_ascii(c) || c == '@' => {
                self.switch_to(ScannerState::OpeningAttributeName);
            }
            // <div/>
            '/' => self.switch_to(ScannerState::BeforeCloseTag),
            '>' => self.switch_to(ScannerState::ClosingTag),
            _ => {}
        }
    }

    fn handle_opening_attribute_name(&mut self, c: char) {
        match c {
            // v-model, @click
            c if Self::is_lowercase_ascii(c) || c == '-' || c == '@' => self.text.push(c),
            c if Self::is_space(c) || c == '=' => {
                self.switch_to(ScannerState::ClosedAttributeName);
            }
            _ => {}
        }
    }

    fn handle_closed_attribute_name(&mut self, c: char) {
        let name = self.take_text();
        self.set_attribute(name.clone(), String::new());
        self.current_attribute = Some(name);
        match c {
            // <input disabled class="...">
            c if Self::is_space(c) => self.switch_to(ScannerState::BeforeOpenAttributeName),
            '=' => self.switch_to(ScannerState::BeforeOpenAttributeValue),
            _ => {}
        }
    }

    fn handle_before_open_attribute_value(&mut self, c: char) {
        if self.quote.is_some() {
            self.switch_to(ScannerState::OpeningAttributeValue);
            return;
        }
        match c {
            c if Self::is_space(c) || c == '=' => {}
            c if Self::is_quote(c) => self.quote = Some(c),
            // Unquoted value; the character is picked up by the next state.
            _ => self.switch_to(ScannerState::OpeningAttributeValue),
        }
    }

    fn handle_opening_attribute_value(&mut self, c: char) {
        match self.quote {
            Some(quote) if c == quote => {
                self.quote = None;
                self.switch_to(ScannerState::ClosingAttributeValue);
            }
            Some(_) => self.text.push(c),
            // class=xxxx
            None if Self::is_space(c) || c == '/' || c == '>' => {
                self.switch_to(ScannerState::ClosingAttributeValue);
            }
            None => self.text.push(c),
        }
    }

    fn handle_closing_attribute_value(&mut self) {
        let value = self.take_text();
        if let Some(name) = self.current_attribute.clone().filter(|name| !name.is_empty()) {
            self.set_attribute(name, value);
        }
        self.switch_to(ScannerState::ClosedAttributeValue);
    }

    fn handle_closed_attribute_value(&mut self, c: char) {
        match c {
            c if Self::is_space(c) => self.switch_to(ScannerState::BeforeOpenAttributeName),
            '/' => self.switch_to(ScannerState::BeforeCloseTag),
            '>' => self.switch_to(ScannerState::ClosingTag),
            _ => {}
        }
    }

    fn handle_before_close_tag(&mut self) {
        self.switch_to(ScannerState::ClosingTag);
    }

    fn handle_closing_tag(&mut self, c: char) {
        match c {
            '/' => {
                self.closing_element = self.open_elements.pop();
                if let Some(id) = self.closing_element
                    && self.open_elements.is_empty()
                {
                    self.roots.push(id);
                }
            }
            '>' => self.switch_to(ScannerState::ClosedTag),
            _ => {}
        }
    }

    fn handle_closed_tag(&mut self, c: char) {
        match c {
            '>' => {
                if let Some(id) = self.closing_element.take() {
                    // <div/> or the `>` of </div>
                    self.arena.set_end(id, self.offset);
                    self.current_element = None;
                } else if let Some(id) = self.current_element
                    && self.arena.get(id).is_some_and(Node::is_self_closing_tag)
                {
                    // <meta>, <br>, ...
                    if self.open_elements.last() == Some(&id) {
                        let _ = self.open_elements.pop();
                    }
                    self.arena.set_end(id, self.offset);
                    if self.open_elements.is_empty() {
                        self.roots.push(id);
                    }
                    self.current_element = None;
                }
            }
            '<' => {
                self.switch_to(ScannerState::OpenTag);
                self.rewind_one();
            }
            _ => self.switch_to(ScannerState::Text),
        }
    }

    fn handle_text(&mut self, c: char) {
        if self.quote == Some(c) {
            self.quote = None;
        } else if self.quote.is_none() && Self::is_quote(c) {
            self.quote = Some(c);
        }
        if self.quote.is_none() && c == '<' {
            self.emit_text_node();
            self.switch_to(ScannerState::OpenTag);
            self.rewind_one();
        } else {
            self.text.push(c);
        }
    }

    fn handle_open_doctype(&mut self, c: char) {
        if c == '>' {
            self.emit_raw_node(NodeKind::Doctype);
            self.switch_to(ScannerState::ClosedTag);
        }
    }

    fn handle_open_comment_tag(&mut self, c: char) {
        // Only the character before `>` is checked, so `->` is enough.
        if c == '>' && self.peek_previous() == Some('-') {
            self.emit_raw_node(NodeKind::Comment);
            self.switch_to(ScannerState::ClosedTag);
        }
    }

    /// End-of-input handling.
    ///
    /// Flushes the pending text run if configured. A root-level element that
    /// never closed is still returned, after everything scanned before it;
    /// it is always the bottom of the stack since anything that followed it
    /// was nested inside.
    fn finish(&mut self) {
        if self.options.flush_trailing_text && self.state == ScannerState::Text {
            self.emit_text_node();
        }
        if let Some(&bottom) = self.open_elements.first() {
            self.roots.push(bottom);
        }
        self.finished = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::{EnumCount, IntoEnumIterator};

    fn scan(input: &str) -> HTMLScanner {
        let mut scanner = HTMLScanner::new(input);
        scanner.run();
        scanner
    }

    #[test]
    fn test_state_count() {
        assert_eq!(ScannerState::COUNT, 17);
    }

    #[test]
    fn test_pass_through_states() {
        let pass_through: Vec<ScannerState> = ScannerState::iter()
            .filter(|state| state.is_pass_through())
            .collect();
        assert_eq!(
            pass_through,
            vec![
                ScannerState::ClosedTagName,
                ScannerState::ClosingAttributeValue,
                ScannerState::BeforeCloseTag,
            ]
        );
    }

    #[test]
    fn test_dispatch_order() {
        assert!(ScannerState::OpenTag < ScannerState::OpenCommentTag);
        assert!(ScannerState::OpenDoctype < ScannerState::OpenTagName);
        assert!(ScannerState::OpenDoctype < ScannerState::ClosedTag);
        assert!(ScannerState::ClosedTag < ScannerState::Text);
    }

    #[test]
    fn test_initial_state() {
        assert_eq!(HTMLScanner::new("<p>").state(), ScannerState::OpenTag);
        assert_eq!(HTMLScanner::new("p").state(), ScannerState::Text);
        assert_eq!(HTMLScanner::new("").state(), ScannerState::Text);
    }

    #[test]
    fn test_first_letter_cascades_into_name() {
        let scanner = scan("<div");
        assert_eq!(scanner.state(), ScannerState::OpeningTagName);
        assert_eq!(scanner.text, "div");
    }

    #[test]
    fn test_closed_tag_name_cascades_on_same_character() {
        // The space that ends the name is also seen by BeforeOpenAttributeName.
        let scanner = scan("<div ");
        assert_eq!(scanner.state(), ScannerState::BeforeOpenAttributeName);
        assert_eq!(scanner.depth(), 1);
        assert!(scanner.text.is_empty());
    }

    #[test]
    fn test_open_element_left_on_stack() {
        let scanner = scan("<div><span>");
        assert_eq!(scanner.depth(), 2);
        assert_eq!(scanner.state(), ScannerState::ClosedTag);
        assert_eq!(scanner.roots.len(), 1);

        let nodes = scanner.into_nodes();
        assert_eq!(nodes[0].name, "div");
        assert_eq!(nodes[0].end, None);
        assert_eq!(nodes[0].children[0].name, "span");
        assert_eq!(nodes[0].children[0].end, None);
    }

    #[test]
    fn test_quote_marker_survives_unterminated_value() {
        let scanner = scan("<a href=\"x>");
        assert_eq!(scanner.quote, Some('"'));
        assert_eq!(scanner.state(), ScannerState::OpeningAttributeValue);
        assert_eq!(scanner.text, "x>");
    }

    #[test]
    fn test_stray_close_tag_with_empty_stack() {
        let scanner = scan("</p>");
        assert_eq!(scanner.depth(), 0);
        assert!(scanner.roots.is_empty());
        assert!(scanner.into_nodes().is_empty());
    }

    #[test]
    fn test_run_twice_is_noop() {
        let mut scanner = scan("text");
        let offset = scanner.offset();
        scanner.run();
        assert_eq!(scanner.offset(), offset);
        assert_eq!(scanner.into_nodes().len(), 1);
    }
}
