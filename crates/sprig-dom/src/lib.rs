//! Node forest for the Sprig scanner.
//!
//! The scanner produces an ordered forest of [`Node`] values. Each node owns
//! its children outright; there is no parent pointer and no sharing.
//!
//! # Design
//!
//! While a scan is running, elements must be linked into their parent as soon
//! as they open and still be mutated afterwards (attributes, end offset). That
//! is done in a [`NodeArena`] using [`NodeId`] indices; once the scan is over
//! the arena is folded into owned [`Node`] trees by [`NodeArena::into_forest`].

use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::Serialize;
use strum_macros::{Display, IntoStaticStr};

/// Map of attribute names to values for an element.
///
/// Keys are unique and the last write wins. Ordered by key so that printed
/// and serialized trees are stable.
pub type AttributesMap = BTreeMap<String, String>;

/// Tag names that close themselves on `>` even without a `/`.
pub const SELF_CLOSING_TAGS: [&str; 6] = ["meta", "link", "br", "hr", "img", "input"];

/// Whether `name` is one of the [`SELF_CLOSING_TAGS`].
#[must_use]
pub fn is_self_closing_tag_name(name: &str) -> bool {
    SELF_CLOSING_TAGS.contains(&name)
}

/// The syntactic category of a [`Node`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    /// `<tag ...>`; `name` holds the tag name.
    Element,
    /// A run of character data; `name` holds the literal text.
    Text,
    /// `<!-- ... ->`; `name` holds the raw slice including delimiters.
    Comment,
    /// `<!D...>`; `name` holds the raw slice including delimiters.
    Doctype,
}

/// One parsed unit of markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Node {
    /// What kind of unit this is.
    pub kind: NodeKind,
    /// Character offset of the first character of the node.
    pub start: usize,
    /// Inclusive character offset of the last character, once known.
    ///
    /// `None` means the node was never terminated.
    pub end: Option<usize>,
    /// Tag name, text content, or raw slice depending on [`Node::kind`].
    pub name: String,
    /// Attributes of an element. Always empty for other kinds.
    pub attributes: AttributesMap,
    /// Child nodes in document order.
    pub children: Vec<Node>,
}

impl Node {
    /// Create a node with no end, no attributes and no children.
    #[must_use]
    pub const fn new(kind: NodeKind, start: usize, name: String) -> Self {
        Self {
            kind,
            start,
            end: None,
            name,
            attributes: AttributesMap::new(),
            children: Vec::new(),
        }
    }

    /// Returns true once the node's end offset has been determined.
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        self.end.is_some()
    }

    /// The inclusive source range of the node, if it was closed.
    #[must_use]
    pub fn span(&self) -> Option<RangeInclusive<usize>> {
        self.end.map(|end| self.start..=end)
    }

    /// The raw text this node was scanned from.
    ///
    /// `source` must be the same input the forest was built from. Returns
    /// `None` for unterminated nodes or if the span lies outside `source`.
    #[must_use]
    pub fn source_text(&self, source: &str) -> Option<String> {
        let span = self.span()?;
        let len = span.end() - span.start() + 1;
        let text: String = source.chars().skip(*span.start()).take(len).collect();
        (text.chars().count() == len).then_some(text)
    }

    /// Returns true for elements whose tag name is in [`SELF_CLOSING_TAGS`].
    #[must_use]
    pub fn is_self_closing_tag(&self) -> bool {
        self.kind == NodeKind::Element && is_self_closing_tag_name(&self.name)
    }

    /// Look up an attribute value by name.
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Iterate over this node and all of its descendants, depth-first, in
    /// document order.
    pub fn descendants(&self) -> impl Iterator<Item = &Self> {
        let mut pending = vec![self];
        std::iter::from_fn(move || {
            let node = pending.pop()?;
            pending.extend(node.children.iter().rev());
            Some(node)
        })
    }
}

/// A type-safe index into a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

/// Arena slot: the node itself (with an empty `children` list) plus the ids
/// of its children.
#[derive(Debug)]
struct Slot {
    node: Node,
    children: Vec<NodeId>,
}

/// Index arena used while a forest is being built.
///
/// Nodes are allocated unlinked and attached with [`NodeArena::append_child`].
/// Each node should be attached to at most one parent; the arena does not
/// police this, but [`NodeArena::into_forest`] moves every node out exactly
/// once, so a node listed twice shows up only at its first position.
#[derive(Debug, Default)]
pub struct NodeArena {
    slots: Vec<Slot>,
}

impl NodeArena {
    /// Create an empty arena.
    #[must_use]
    pub const fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Number of nodes allocated so far.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.slots.len()
    }

    /// Returns true if no node has been allocated.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Allocate a new unlinked node and return its id.
    pub fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.slots.len());
        self.slots.push(Slot {
            node,
            children: Vec::new(),
        });
        id
    }

    /// Get a node by id.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0).map(|slot| &slot.node)
    }

    /// Get a mutable reference to a node by id.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0).map(|slot| &mut slot.node)
    }

    /// Ids of the children linked under `id`, in insertion order.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match self.slots.get(id.0) {
            Some(slot) => &slot.children,
            None => &[],
        }
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Does nothing if `parent` is not in the arena.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(slot) = self.slots.get_mut(parent.0) {
            slot.children.push(child);
        }
    }

    /// Set the end offset of a node.
    pub fn set_end(&mut self, id: NodeId, end: usize) {
        if let Some(node) = self.get_mut(id) {
            node.end = Some(end);
        }
    }

    /// Fold the arena into owned trees, one per entry of `roots`.
    ///
    /// Nodes not reachable from `roots` are dropped.
    #[must_use]
    pub fn into_forest(self, roots: &[NodeId]) -> Vec<Node> {
        let mut slots: Vec<Option<Slot>> = self.slots.into_iter().map(Some).collect();
        roots
            .iter()
            .filter_map(|&id| Self::take_tree(&mut slots, id))
            .collect()
    }

    fn take_tree(slots: &mut [Option<Slot>], id: NodeId) -> Option<Node> {
        let Slot { mut node, children } = slots.get_mut(id.0)?.take()?;
        node.children = children
            .into_iter()
            .filter_map(|child| Self::take_tree(slots, child))
            .collect();
        Some(node)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_tree_skips_missing_ids() {
        let mut arena = NodeArena::new();
        let root = arena.alloc(Node::new(NodeKind::Element, 0, "div".to_string()));
        arena.append_child(root, NodeId(42));
        let forest = arena.into_forest(&[root, NodeId(7)]);
        assert_eq!(forest.len(), 1);
        assert!(forest[0].children.is_empty());
    }
}
