use thicket_common::warning::warn_once;
use thicket_dom::{Document, DomTree, ElementData, NodeId, NodeKind};

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseIssue};
use crate::scanner::{TagAttributes, scan_attributes, scan_closing_tag, scan_tag_name};

/// Elements that never have children or a closing tag. Matched exactly,
/// without case folding.
pub const VOID_ELEMENTS: [&str; 14] = [
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Whether `tag_name` is one of [`VOID_ELEMENTS`].
#[must_use]
pub fn is_void_element(tag_name: &str) -> bool {
    VOID_ELEMENTS.contains(&tag_name)
}

const COMMENT_OPEN: &str = "<!--";
const COMMENT_CLOSE: &str = "-->";
const DOCTYPE_OPEN: &str = "<!DOCTYPE";

/// Single-pass tree builder.
///
/// Scans the input once, front to back, attaching every node to whatever
/// element is on top of the stack of open elements. Structural defects are
/// repaired by unwinding that stack and recorded as [`ParseIssue`]s; only
/// the three [`ParseError`] conditions stop the scan.
///
/// Each parser owns its cursor, tree and issue list, so independent parses
/// can run on different threads without coordination.
pub struct HTMLParser<'a> {
    cursor: Cursor<'a>,

    /// Open elements, innermost last. Index 0 is always the fragment root
    /// and is never popped, so the top of the stack is always a valid
    /// insertion parent.
    stack_of_open_elements: Vec<NodeId>,

    /// Arena the nodes are built into. `NodeId::ROOT` is the fragment.
    tree: DomTree,

    /// Diagnostics in discovery order.
    issues: Vec<ParseIssue>,

    /// Echo diagnostics through the shared warning sink when the run ends.
    warnings: bool,
}

impl<'a> HTMLParser<'a> {
    /// Create a parser over `input`.
    #[must_use]
    pub fn new(input: &'a str) -> Self {
        Self {
            cursor: Cursor::new(input),
            stack_of_open_elements: vec![NodeId::ROOT],
            tree: DomTree::new(),
            issues: Vec::new(),
            warnings: false,
        }
    }

    /// Report every diagnostic on stderr (deduplicated) once parsing ends.
    #[must_use]
    pub const fn with_warnings(mut self) -> Self {
        self.warnings = true;
        self
    }

    /// Run the parser.
    ///
    /// Returns the document, or `None` if a fatal condition stopped the
    /// scan, together with every diagnostic in the order it was found.
    /// Elements still open at the end of a successful scan are closed
    /// implicitly, innermost first, and reported last.
    #[must_use]
    pub fn run(mut self) -> (Option<Document>, Vec<ParseIssue>) {
        let document = match self.parse() {
            Ok(()) => Some(Document::from_tree(std::mem::take(&mut self.tree))),
            Err(err) => {
                self.issues.push(err.into());
                None
            }
        };
        if self.warnings {
            self.report_warnings();
        }
        (document, self.issues)
    }

    fn parse(&mut self) -> Result<(), ParseError> {
        if self.cursor.input().trim().is_empty() {
            return Err(ParseError::EmptyInput);
        }
        self.parse_nodes()?;
        self.close_remaining_elements();
        Ok(())
    }

    /// Main loop: skip whitespace, classify the next construct by its
    /// prefix, dispatch. Every handler consumes at least one character.
    fn parse_nodes(&mut self) -> Result<(), ParseError> {
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.at_end() {
                return Ok(());
            }

            if self.cursor.has_prefix("</") {
                self.parse_closing_tag();
            } else if self.cursor.has_prefix(COMMENT_OPEN) {
                self.parse_comment()?;
            } else if self.cursor.has_prefix(DOCTYPE_OPEN) {
                self.parse_doctype();
            } else if self.cursor.has_prefix("<") {
                self.parse_element()?;
            } else {
                self.parse_text();
            }
        }
    }

    /// The current insertion parent.
    fn current_node(&self) -> NodeId {
        self.stack_of_open_elements
            .last()
            .copied()
            .unwrap_or(NodeId::ROOT)
    }

    fn get_tag_name(&self, id: NodeId) -> Option<&str> {
        self.tree.as_element(id).map(|e| e.tag_name.as_str())
    }

    fn insert_node(&mut self, kind: NodeKind) -> NodeId {
        let id = self.tree.alloc(kind);
        self.tree.append_child(self.current_node(), id);
        id
    }

    fn parse_element(&mut self) -> Result<(), ParseError> {
        self.cursor.advance(1);
        let tag_name = scan_tag_name(&mut self.cursor);
        if tag_name.is_empty() {
            self.issues.push(ParseIssue::MissingTagName {
                position: self.cursor.position(),
            });
            return Ok(());
        }

        let TagAttributes {
            attrs,
            self_closing,
        } = scan_attributes(&mut self.cursor, &mut self.issues)?;

        let id = self.insert_node(NodeKind::Element(ElementData::new(tag_name, attrs)));
        if !self_closing && !is_void_element(tag_name) {
            self.stack_of_open_elements.push(id);
        }
        Ok(())
    }

    /// Close the nearest open element with a matching name, implicitly
    /// closing everything opened after it. A name with no match anywhere on
    /// the stack is reported and otherwise ignored.
    fn parse_closing_tag(&mut self) {
        let position = self.cursor.position();
        self.cursor.advance(2);
        let tag_name = scan_closing_tag(&mut self.cursor);
        if tag_name.is_empty() {
            return;
        }

        let matched = self
            .stack_of_open_elements
            .iter()
            .rposition(|&id| self.get_tag_name(id) == Some(tag_name));

        let Some(index) = matched else {
            self.issues.push(ParseIssue::UnexpectedClosingTag {
                tag: tag_name.to_string(),
                position,
            });
            return;
        };

        let implicit: Vec<ParseIssue> = self.stack_of_open_elements[index + 1..]
            .iter()
            .rev()
            .filter_map(|&id| self.get_tag_name(id))
            .map(|tag| ParseIssue::ImplicitClose {
                tag: tag.to_string(),
                closed_by: tag_name.to_string(),
                position,
            })
            .collect();
        self.issues.extend(implicit);
        self.stack_of_open_elements.truncate(index);
    }

    /// Text runs to the next `<`. Leading whitespace was already skipped by
    /// the main loop; a run that is whitespace all the way through produces
    /// no node.
    fn parse_text(&mut self) {
        let text = self.cursor.consume_until(|c| c == '<');
        if !text.trim().is_empty() {
            let _ = self.insert_node(NodeKind::Text(text.to_string()));
        }
    }

    fn parse_comment(&mut self) -> Result<(), ParseError> {
        self.cursor.advance(COMMENT_OPEN.len());
        let Some(len) = self.cursor.find(COMMENT_CLOSE) else {
            self.cursor.advance(self.cursor.remaining().len());
            return Err(ParseError::UnterminatedComment);
        };
        let start = self.cursor.position();
        let data = self.cursor.slice(start, start + len);
        self.cursor.advance(len + COMMENT_CLOSE.len());
        let _ = self.insert_node(NodeKind::Comment(data.to_string()));
        Ok(())
    }

    /// The declaration is kept as one trimmed string; a missing `>` just
    /// runs the doctype to the end of input.
    fn parse_doctype(&mut self) {
        self.cursor.advance(DOCTYPE_OPEN.len());
        self.cursor.skip_whitespace();
        let content = self.cursor.consume_until(|c| c == '>');
        let _ = self.insert_node(NodeKind::Doctype(content.trim().to_string()));
        if self.cursor.peek() == Some('>') {
            self.cursor.advance(1);
        }
    }

    fn close_remaining_elements(&mut self) {
        let unclosed: Vec<ParseIssue> = self.stack_of_open_elements[1..]
            .iter()
            .rev()
            .filter_map(|&id| self.get_tag_name(id))
            .map(|tag| ParseIssue::UnclosedAtEndOfDocument {
                tag: tag.to_string(),
            })
            .collect();
        self.issues.extend(unclosed);
        self.stack_of_open_elements.truncate(1);
    }

    fn report_warnings(&self) {
        for issue in &self.issues {
            warn_once("HTML Parser", &issue.to_string());
        }
    }
}

/// Parse `input` with default settings.
///
/// Shorthand for `HTMLParser::new(input).run()`.
#[must_use]
pub fn parse_html(input: &str) -> (Option<Document>, Vec<ParseIssue>) {
    HTMLParser::new(input).run()
}
