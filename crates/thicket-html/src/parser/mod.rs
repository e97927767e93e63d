//! Tree construction and tree printing.

/// Indented, human-readable tree view.
pub mod print;
/// Single-pass tree builder and the `parse_html` entry point.
pub mod tree_builder;

pub use print::{print_tree, render_tree};
pub use tree_builder::{HTMLParser, VOID_ELEMENTS, is_void_element, parse_html};
