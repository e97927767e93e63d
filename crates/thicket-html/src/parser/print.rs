//! Human-readable tree output.
//!
//! One line per node, indented two spaces per level.

use thicket_dom::{DomTree, ElementData, NodeId, NodeKind};

/// Render the subtree at `id` as an indented outline, two spaces per level.
///
/// Whitespace-only text nodes are skipped. Text and comment payloads are
/// trimmed for display and newlines shown as `\n`; attributes are listed in
/// name order so the output is stable.
#[must_use]
pub fn render_tree(tree: &DomTree, id: NodeId) -> String {
    let mut out = String::new();
    render_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to stdout, starting at `indent` levels deep.
pub fn print_tree(tree: &DomTree, id: NodeId, indent: usize) {
    let mut out = String::new();
    render_node(tree, id, indent, &mut out);
    print!("{out}");
}

/// Depth-first walk with an explicit worklist, so trees as deep as the
/// parser can build are rendered without recursion.
fn render_node(tree: &DomTree, id: NodeId, indent: usize, out: &mut String) {
    let mut pending = vec![(id, indent)];
    while let Some((id, depth)) = pending.pop() {
        let Some(node) = tree.get(id) else {
            continue;
        };
        let label = match &node.kind {
            NodeKind::Fragment => "Fragment (root)".to_string(),
            NodeKind::Element(data) => element_label(data),
            NodeKind::Text(data) => {
                if data.trim().is_empty() {
                    continue;
                }
                format!("Text: \"{}\"", display_payload(data))
            }
            NodeKind::Comment(data) => format!("Comment: \"{}\"", display_payload(data)),
            NodeKind::Doctype(data) => format!("Doctype: {data}"),
        };
        out.push_str(&"  ".repeat(depth));
        out.push_str(&label);
        out.push('\n');

        pending.extend(node.children.iter().rev().map(|&child| (child, depth + 1)));
    }
}

fn element_label(data: &ElementData) -> String {
    if data.attrs.is_empty() {
        return format!("<{}>", data.tag_name);
    }
    let mut attrs: Vec<(&String, &String)> = data.attrs.iter().collect();
    attrs.sort_unstable();
    let attrs: Vec<String> = attrs
        .into_iter()
        .map(|(k, v)| {
            if v.is_empty() {
                k.clone()
            } else {
                format!("{k}=\"{v}\"")
            }
        })
        .collect();
    format!("<{} {}>", data.tag_name, attrs.join(" "))
}

fn display_payload(data: &str) -> String {
    data.trim().replace('\n', "\\n")
}
