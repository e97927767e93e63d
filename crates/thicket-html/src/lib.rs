//! Error-tolerant markup parser for the Thicket toolkit.
//!
//! # Scope
//!
//! This crate turns raw markup into a node tree in one forward pass:
//! - **Cursor** - byte offset over the in-memory input, whitespace skipping,
//!   prefix tests
//! - **Scanner** - tag names, quoted/unquoted/boolean attributes, closing tags
//! - **Tree builder** - stack of open elements rooted at a synthetic
//!   fragment, void and self-closing handling, stack unwinding on mismatched
//!   closes
//! - **Diagnostics** - three fatal conditions that abort the parse and a set
//!   of recoverable ones that are recorded while parsing continues
//!
//! ```
//! let (document, issues) = thicket_html::parse_html("<div><p>Text</div>");
//! let document = document.expect("recoverable input still yields a tree");
//! assert_eq!(document.tree().as_element(document.root()).unwrap().tag_name, "div");
//! assert_eq!(issues.len(), 1);
//! ```
//!
//! # Not Implemented
//!
//! - Character reference decoding
//! - Encoding detection
//! - Insertion modes, foster parenting, foreign content
//! - Tag name case folding

/// Forward-only character cursor.
pub mod cursor;
/// Fatal errors and recoverable diagnostics.
pub mod error;
/// JSON rendering of a parse result.
pub mod json;
/// Tree construction and printing.
pub mod parser;
/// Tag and attribute scanning.
pub mod scanner;

pub use error::{ParseError, ParseIssue, line_and_column};
pub use json::to_json;
pub use parser::{HTMLParser, is_void_element, parse_html, print_tree, render_tree};
