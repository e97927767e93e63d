//! Parse diagnostics.
//!
//! Two layers:
//! - [`ParseError`] is the fatal subset. A handler that hits one returns it
//!   as `Err`, the main loop stops, and no tree is produced.
//! - [`ParseIssue`] is everything the caller gets back: recoverable defects
//!   in discovery order, plus the fatal condition (if any) wrapped as
//!   [`ParseIssue::Fatal`].

use strum_macros::IntoStaticStr;
use thiserror::Error;

/// Conditions that make the input too malformed to build any structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseError {
    /// The input was empty or held only whitespace.
    #[error("input is empty or contains only whitespace")]
    EmptyInput,
    /// End of input while still expecting `>` or a closing quote inside an
    /// open tag.
    #[error("unterminated tag: reached end of input without finding '>'")]
    UnterminatedTag,
    /// End of input inside `<!-- ... -->`.
    #[error("unterminated comment: reached end of input without finding '-->'")]
    UnterminatedComment,
}

/// One diagnostic produced during a parse.
///
/// Positions are byte offsets into the original input; see
/// [`line_and_column`] to turn them into something a person can find.
#[derive(Debug, Clone, PartialEq, Eq, Error, IntoStaticStr)]
#[strum(serialize_all = "kebab-case")]
pub enum ParseIssue {
    /// The parse was aborted.
    #[error(transparent)]
    Fatal(#[from] ParseError),

    /// `<` followed by no tag name; the tag produced no node.
    #[error("invalid tag without a name at position {position}")]
    MissingTagName {
        /// Offset just past the (empty) name scan.
        position: usize,
    },

    /// A character that cannot start an attribute name was skipped.
    #[error("invalid character '{character}' found while parsing attributes at position {position}")]
    InvalidAttributeCharacter {
        /// The skipped character.
        character: char,
        /// Offset of the skipped character.
        position: usize,
    },

    /// A closing tag matched nothing on the open-element stack and was
    /// ignored.
    #[error("unexpected closing tag '</{tag}>' with no matching opening tag")]
    UnexpectedClosingTag {
        /// Name from the closing tag.
        tag: String,
        /// Offset of the `</`.
        position: usize,
    },

    /// An element was closed because a closing tag for one of its ancestors
    /// appeared first.
    #[error("implicit closing tag for '<{tag}>' due to explicit closing tag '</{closed_by}>'")]
    ImplicitClose {
        /// The element that was closed implicitly.
        tag: String,
        /// The ancestor whose closing tag forced it.
        closed_by: String,
        /// Offset of the forcing `</`.
        position: usize,
    },

    /// An element was still open when the input ran out.
    #[error("tag '<{tag}>' was not closed; closed implicitly at end of document")]
    UnclosedAtEndOfDocument {
        /// The element left open.
        tag: String,
    },
}

impl ParseIssue {
    /// Whether this diagnostic aborted the parse.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// The fatal condition, if this is one.
    #[must_use]
    pub const fn as_fatal(&self) -> Option<ParseError> {
        match self {
            Self::Fatal(err) => Some(*err),
            _ => None,
        }
    }

    /// Byte offset the diagnostic points at, when it has one.
    #[must_use]
    pub const fn position(&self) -> Option<usize> {
        match self {
            Self::MissingTagName { position }
            | Self::InvalidAttributeCharacter { position, .. }
            | Self::UnexpectedClosingTag { position, .. }
            | Self::ImplicitClose { position, .. } => Some(*position),
            Self::Fatal(_) | Self::UnclosedAtEndOfDocument { .. } => None,
        }
    }

    /// Stable kebab-case identifier, e.g. `implicit-close` or
    /// `unterminated-tag` for a fatal issue.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Fatal(err) => err.into(),
            other => other.into(),
        }
    }
}

/// Convert a byte offset into a 1-based `(line, column)` pair.
///
/// Columns count characters, not bytes. Offsets past the end are clamped.
#[must_use]
pub fn line_and_column(source: &str, offset: usize) -> (usize, usize) {
    let mut end = offset.min(source.len());
    while !source.is_char_boundary(end) {
        end -= 1;
    }
    let before = &source[..end];
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let column = before[line_start..].chars().count() + 1;
    (line, column)
}
