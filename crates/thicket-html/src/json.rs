//! JSON rendering of a parse result.
//!
//! Shape:
//!
//! ```json
//! {
//!   "root": { "type": "element", "tagName": "div", "attributes": {}, "children": [] },
//!   "diagnostics": [
//!     { "code": "implicit-close", "message": "...", "fatal": false,
//!       "position": 10, "line": 1, "column": 11 }
//!   ]
//! }
//! ```
//!
//! `root` is `null` after a fatal error. Attributes are emitted in name
//! order.

use std::collections::BTreeMap;

use serde::Serialize;
use thicket_dom::{Document, DomTree, NodeId, NodeKind};

use crate::error::{ParseIssue, line_and_column};

/// A node waiting to be written, or the closing brackets of one whose
/// children have all been written.
enum Step {
    Open { id: NodeId, depth: usize, comma: bool },
    Close { depth: usize, comma: bool },
}

fn indent(out: &mut String, depth: usize) {
    out.push_str(&"  ".repeat(depth));
}

/// Re-indent a pretty-printed value so it nests `depth` levels deep.
fn nest(value: &str, depth: usize) -> String {
    value.replace('\n', &format!("\n{}", "  ".repeat(depth)))
}

fn end_object(out: &mut String, depth: usize, comma: bool) {
    indent(out, depth);
    out.push('}');
    if comma {
        out.push(',');
    }
    out.push('\n');
}

/// Write the subtree at `id` as pretty-printed JSON.
///
/// Nesting is driven by an explicit worklist; `serde_json` encodes the
/// leaves, so any depth the parser can build is written without recursion.
fn write_node(tree: &DomTree, id: NodeId) -> serde_json::Result<String> {
    let mut out = String::new();
    let mut pending = vec![Step::Open {
        id,
        depth: 0,
        comma: false,
    }];
    while let Some(step) = pending.pop() {
        let (id, depth, comma) = match step {
            Step::Open { id, depth, comma } => (id, depth, comma),
            Step::Close { depth, comma } => {
                indent(&mut out, depth + 1);
                out.push_str("]\n");
                end_object(&mut out, depth, comma);
                continue;
            }
        };
        let Some(node) = tree.get(id) else {
            continue;
        };

        let mut fields = vec![format!(
            "\"type\": {}",
            serde_json::to_string(node.kind.name())?
        )];
        match &node.kind {
            NodeKind::Fragment => {}
            NodeKind::Element(data) => {
                let attributes: BTreeMap<&str, &str> = data
                    .attrs
                    .iter()
                    .map(|(k, v)| (k.as_str(), v.as_str()))
                    .collect();
                fields.push(format!(
                    "\"tagName\": {}",
                    serde_json::to_string(&data.tag_name)?
                ));
                fields.push(format!(
                    "\"attributes\": {}",
                    nest(&serde_json::to_string_pretty(&attributes)?, depth + 1)
                ));
            }
            NodeKind::Text(s) | NodeKind::Comment(s) | NodeKind::Doctype(s) => {
                fields.push(format!("\"content\": {}", serde_json::to_string(s)?));
            }
        }
        if !node.children.is_empty() {
            fields.push("\"children\": [".to_string());
        }

        indent(&mut out, depth);
        out.push_str("{\n");
        let last = fields.len() - 1;
        for (i, field) in fields.iter().enumerate() {
            indent(&mut out, depth + 1);
            out.push_str(field);
            if i < last {
                out.push(',');
            }
            out.push('\n');
        }

        if node.children.is_empty() {
            end_object(&mut out, depth, comma);
        } else {
            pending.push(Step::Close { depth, comma });
            let count = node.children.len();
            pending.extend(
                node.children
                    .iter()
                    .enumerate()
                    .rev()
                    .map(|(i, &child)| Step::Open {
                        id: child,
                        depth: depth + 2,
                        comma: i + 1 < count,
                    }),
            );
        }
    }
    let trimmed = out.trim_end().len();
    out.truncate(trimmed);
    Ok(out)
}

/// Serializable view of one diagnostic.
#[derive(Debug, Serialize)]
pub struct JsonDiagnostic {
    /// Stable identifier, see [`ParseIssue::code`].
    pub code: &'static str,
    /// Human-readable message.
    pub message: String,
    /// Whether this diagnostic aborted the parse.
    pub fatal: bool,
    /// Byte offset, when the diagnostic has one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// 1-based line of `position`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-based column of `position`, in characters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl JsonDiagnostic {
    /// Build the view for `issue`, resolving its position against `source`.
    #[must_use]
    pub fn new(source: &str, issue: &ParseIssue) -> Self {
        let position = issue.position();
        let line_col = position.map(|offset| line_and_column(source, offset));
        Self {
            code: issue.code(),
            message: issue.to_string(),
            fatal: issue.is_fatal(),
            position,
            line: line_col.map(|(line, _)| line),
            column: line_col.map(|(_, column)| column),
        }
    }
}

/// Render a parse result as pretty-printed JSON.
///
/// # Errors
///
/// Returns the serializer's error; with plain string-keyed values it does
/// not fail in practice.
pub fn to_json(
    source: &str,
    document: Option<&Document>,
    issues: &[ParseIssue],
) -> serde_json::Result<String> {
    let root = match document {
        Some(doc) => nest(&write_node(doc.tree(), doc.root())?, 1),
        None => "null".to_string(),
    };
    let diagnostics: Vec<JsonDiagnostic> = issues
        .iter()
        .map(|issue| JsonDiagnostic::new(source, issue))
        .collect();
    let diagnostics = nest(&serde_json::to_string_pretty(&diagnostics)?, 1);
    Ok(format!(
        "{{\n  \"root\": {root},\n  \"diagnostics\": {diagnostics}\n}}"
    ))
}
