//! Tests for the node forest and the build arena.

use sprig_dom::{AttributesMap, Node, NodeArena, NodeId, NodeKind, is_self_closing_tag_name};

/// Helper to allocate an element and return its `NodeId`.
fn alloc_element(arena: &mut NodeArena, tag: &str, start: usize) -> NodeId {
    arena.alloc(Node::new(NodeKind::Element, start, tag.to_string()))
}

// ========== arena ==========

#[test]
fn test_alloc_and_link() {
    let mut arena = NodeArena::new();
    assert!(arena.is_empty());

    let div = alloc_element(&mut arena, "div", 0);
    let p = alloc_element(&mut arena, "p", 5);
    arena.append_child(div, p);

    assert_eq!(arena.len(), 2);
    assert_eq!(arena.children(div), &[p]);
    assert!(arena.children(p).is_empty());
    assert_eq!(arena.get(p).map(|n| n.name.as_str()), Some("p"));
}

#[test]
fn test_children_of_unknown_id_is_empty() {
    let arena = NodeArena::new();
    assert!(arena.children(NodeId(3)).is_empty());
    assert!(arena.get(NodeId(3)).is_none());
}

#[test]
fn test_mutation_after_linking_is_visible() {
    let mut arena = NodeArena::new();
    let div = alloc_element(&mut arena, "div", 0);
    let img = alloc_element(&mut arena, "img", 5);
    arena.append_child(div, img);

    // Attributes and end offsets arrive after the node has been linked.
    if let Some(node) = arena.get_mut(img) {
        let _ = node.attributes.insert("src".to_string(), "a.png".to_string());
    }
    arena.set_end(img, 19);
    arena.set_end(div, 25);

    let forest = arena.into_forest(&[div]);
    let img = &forest[0].children[0];
    assert_eq!(img.attribute("src"), Some("a.png"));
    assert_eq!(img.span(), Some(5..=19));
    assert_eq!(forest[0].span(), Some(0..=25));
}

#[test]
fn test_into_forest_keeps_root_and_child_order() {
    let mut arena = NodeArena::new();
    let first = alloc_element(&mut arena, "ul", 0);
    let a = alloc_element(&mut arena, "li", 4);
    let b = alloc_element(&mut arena, "li", 14);
    let second = arena.alloc(Node::new(NodeKind::Text, 30, "tail".to_string()));
    arena.append_child(first, a);
    arena.append_child(first, b);

    let forest = arena.into_forest(&[first, second]);
    assert_eq!(forest.len(), 2);
    assert_eq!(forest[0].children.len(), 2);
    assert_eq!(forest[0].children[0].start, 4);
    assert_eq!(forest[0].children[1].start, 14);
    assert_eq!(forest[1].kind, NodeKind::Text);
}

#[test]
fn test_into_forest_drops_unreachable_nodes() {
    let mut arena = NodeArena::new();
    let root = alloc_element(&mut arena, "div", 0);
    let _orphan = alloc_element(&mut arena, "span", 9);
    let forest = arena.into_forest(&[root]);
    assert_eq!(forest.len(), 1);
    assert!(forest[0].children.is_empty());
}

// ========== node ==========

#[test]
fn test_new_node_is_open() {
    let node = Node::new(NodeKind::Comment, 4, "<!--x-->".to_string());
    assert!(!node.is_closed());
    assert_eq!(node.span(), None);
    assert_eq!(node.source_text("....<!--x-->"), None);
    assert_eq!(node.attributes, AttributesMap::new());
}

#[test]
fn test_source_text() {
    let source = "ab<p>ü</p>";
    let mut node = Node::new(NodeKind::Element, 2, "p".to_string());
    node.end = Some(9);
    assert_eq!(node.source_text(source).as_deref(), Some("<p>ü</p>"));

    node.end = Some(10);
    assert_eq!(node.source_text(source), None);
}

#[test]
fn test_self_closing_names() {
    for name in ["meta", "link", "br", "hr", "img", "input"] {
        assert!(is_self_closing_tag_name(name));
    }
    assert!(!is_self_closing_tag_name("div"));
    assert!(!is_self_closing_tag_name("BR"));

    let text = Node::new(NodeKind::Text, 0, "br".to_string());
    assert!(!text.is_self_closing_tag());
}

#[test]
fn test_descendants_are_depth_first() {
    let mut arena = NodeArena::new();
    let div = alloc_element(&mut arena, "div", 0);
    let p = alloc_element(&mut arena, "p", 5);
    let em = alloc_element(&mut arena, "em", 8);
    let span = alloc_element(&mut arena, "span", 20);
    arena.append_child(div, p);
    arena.append_child(p, em);
    arena.append_child(div, span);

    let forest = arena.into_forest(&[div]);
    let names: Vec<&str> = forest[0]
        .descendants()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(names, vec!["div", "p", "em", "span"]);
}

#[test]
fn test_kind_names() {
    assert_eq!(NodeKind::Doctype.to_string(), "doctype");
    let name: &'static str = NodeKind::Element.into();
    assert_eq!(name, "element");
    assert_eq!(
        serde_json::to_string(&NodeKind::Comment).expect("serializable"),
        "\"comment\""
    );
}
