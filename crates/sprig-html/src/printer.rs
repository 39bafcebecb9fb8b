//! Indented debug dump of a node forest.

use std::fmt;

use sprig_dom::{Node, NodeKind};

/// Display adapter that renders a forest one node per line, children
/// indented by two spaces, each line followed by the node's span.
///
/// ```text
/// <div class="a"> [0..=22]
///   "hi" [15..=16]
/// ```
pub struct TreeDisplay<'a>(pub &'a [Node]);

impl fmt::Display for TreeDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in self.0 {
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, indent: usize) -> fmt::Result {
    let prefix = "  ".repeat(indent);
    match node.kind {
        NodeKind::Element => {
            if node.attributes.is_empty() {
                write!(f, "{prefix}<{}>", node.name)?;
            } else {
                let attrs: Vec<String> = node
                    .attributes
                    .iter()
                    .map(|(k, v)| {
                        if v.is_empty() {
                            k.clone()
                        } else {
                            format!("{k}=\"{v}\"")
                        }
                    })
                    .collect();
                write!(f, "{prefix}<{} {}>", node.name, attrs.join(" "))?;
            }
        }
        NodeKind::Text => {
            let display = escape_line_breaks(&node.name).replace(' ', "\u{00B7}");
            write!(f, "{prefix}\"{display}\"")?;
        }
        NodeKind::Comment | NodeKind::Doctype => {
            write!(f, "{prefix}{}", escape_line_breaks(&node.name))?;
        }
    }
    match node.end {
        Some(end) => writeln!(f, " [{}..={end}]", node.start)?,
        None => writeln!(f, " [{}..]", node.start)?,
    }
    for child in &node.children {
        write_node(f, child, indent + 1)?;
    }
    Ok(())
}

fn escape_line_breaks(text: &str) -> String {
    text.replace('\r', "\\r").replace('\n', "\\n")
}

/// Render a forest with [`TreeDisplay`].
#[must_use]
pub fn render_tree(nodes: &[Node]) -> String {
    TreeDisplay(nodes).to_string()
}

/// Print a forest to stdout for debugging.
pub fn print_tree(nodes: &[Node]) {
    print!("{}", TreeDisplay(nodes));
}
