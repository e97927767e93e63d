//! Tag and attribute scanning on top of [`Cursor`].
//!
//! These routines read the inside of a tag. Lexical defects that can be
//! stepped over (a stray `/` or `=` where an attribute name should start)
//! are recorded in the caller's issue list; running out of input before the
//! tag closes is returned as [`ParseError::UnterminatedTag`].

use thicket_dom::AttributesMap;

use crate::cursor::Cursor;
use crate::error::{ParseError, ParseIssue};

/// Result of scanning the attribute section of an opening tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagAttributes {
    /// Attributes in the tag; a repeated name keeps its last value.
    pub attrs: AttributesMap,
    /// Whether the tag ended with `/>`.
    pub self_closing: bool,
}

fn is_name_delimiter(c: char) -> bool {
    c.is_whitespace() || matches!(c, '>' | '/')
}

fn is_attribute_name_delimiter(c: char) -> bool {
    is_name_delimiter(c) || c == '='
}

/// Scan a tag name. The cursor must already be past `<` or `</`.
///
/// Leading whitespace is skipped, then characters are taken up to
/// whitespace, `>` or `/`. An empty result means the tag has no name.
pub fn scan_tag_name<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    cursor.skip_whitespace();
    cursor.consume_until(is_name_delimiter)
}

/// Scan attributes up to and including the closing `>` or `/>`.
///
/// # Errors
///
/// Returns [`ParseError::UnterminatedTag`] if the input ends before the tag
/// is closed, directly after an `=`, or inside a quoted value.
pub fn scan_attributes(
    cursor: &mut Cursor<'_>,
    issues: &mut Vec<ParseIssue>,
) -> Result<TagAttributes, ParseError> {
    let mut attrs = AttributesMap::new();
    loop {
        cursor.skip_whitespace();

        let Some(next) = cursor.peek() else {
            return Err(ParseError::UnterminatedTag);
        };
        if next == '>' {
            cursor.advance(1);
            return Ok(TagAttributes {
                attrs,
                self_closing: false,
            });
        }
        if cursor.has_prefix("/>") {
            cursor.advance(2);
            return Ok(TagAttributes {
                attrs,
                self_closing: true,
            });
        }

        let name = cursor.consume_until(is_attribute_name_delimiter);
        if name.is_empty() {
            // `next` is a delimiter that cannot start a name (`/` or `=`).
            issues.push(ParseIssue::InvalidAttributeCharacter {
                character: next,
                position: cursor.position(),
            });
            let _ = cursor.bump();
            continue;
        }

        cursor.skip_whitespace();
        if cursor.peek() != Some('=') {
            let _ = attrs.insert(name.to_string(), String::new());
            continue;
        }

        cursor.advance(1);
        cursor.skip_whitespace();
        let value = scan_attribute_value(cursor)?;
        let _ = attrs.insert(name.to_string(), value.to_string());
    }
}

/// Scan a value after `=`: quoted with `"` or `'`, or an unquoted run up to
/// whitespace or `>`.
fn scan_attribute_value<'a>(cursor: &mut Cursor<'a>) -> Result<&'a str, ParseError> {
    match cursor.peek() {
        None => Err(ParseError::UnterminatedTag),
        Some(quote @ ('"' | '\'')) => {
            cursor.advance(1);
            let start = cursor.position();
            let len = cursor
                .remaining()
                .find(quote)
                .ok_or(ParseError::UnterminatedTag)?;
            cursor.advance(len + 1);
            Ok(cursor.slice(start, start + len))
        }
        Some(_) => Ok(cursor.consume_until(|c| c.is_whitespace() || c == '>')),
    }
}

/// Scan the rest of a closing tag. The cursor must already be past `</`.
///
/// Returns the tag name, which may be empty. Whitespace after the name is
/// skipped and a `>` consumed if present; a missing `>` is not an error
/// for closing tags, and anything else before it is left for the main loop.
pub fn scan_closing_tag<'a>(cursor: &mut Cursor<'a>) -> &'a str {
    let name = scan_tag_name(cursor);
    cursor.skip_whitespace();
    if cursor.peek() == Some('>') {
        cursor.advance(1);
    }
    name
}
