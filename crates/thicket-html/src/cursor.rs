//! Forward-only character cursor over the input text.
//!
//! The cursor owns nothing but a borrowed input and a byte offset. Every
//! operation moves the offset forward or leaves it alone; nothing rewinds.
//! Offsets are kept on UTF-8 character boundaries: multi-byte characters
//! are always stepped over whole.

/// A scan position within one input string.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    /// Create a cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    /// The full input, independent of the current offset.
    #[must_use]
    pub const fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.pos
    }

    /// Whether every byte of the input has been consumed.
    #[must_use]
    pub const fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// The input from the current offset to the end.
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Whether the remaining input starts with `prefix`.
    #[must_use]
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.remaining().starts_with(prefix)
    }

    /// The next character, without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consume and return the next character.
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Move forward by `n` bytes, clamped to the end of input.
    ///
    /// Callers pass the byte length of something they just matched, so the
    /// new offset stays on a character boundary.
    pub fn advance(&mut self, n: usize) {
        self.pos = (self.pos + n).min(self.input.len());
    }

    /// Skip any run of Unicode whitespace.
    pub fn skip_whitespace(&mut self) {
        let _ = self.consume_while(char::is_whitespace);
    }

    /// Consume characters while `pred` holds and return the consumed slice.
    pub fn consume_while(&mut self, mut pred: impl FnMut(char) -> bool) -> &'a str {
        let start = self.pos;
        let rest = self.remaining();
        let len = rest.find(|c: char| !pred(c)).unwrap_or(rest.len());
        self.pos += len;
        &self.input[start..self.pos]
    }

    /// Consume characters up to (not including) the first one matching
    /// `stop`, or to the end of input.
    pub fn consume_until(&mut self, mut stop: impl FnMut(char) -> bool) -> &'a str {
        self.consume_while(|c| !stop(c))
    }

    /// Byte distance from the current offset to the next occurrence of
    /// `needle`, without moving.
    #[must_use]
    pub fn find(&self, needle: &str) -> Option<usize> {
        self.remaining().find(needle)
    }

    /// A slice of the input between two byte offsets previously reported by
    /// [`Cursor::position`].
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &'a str {
        &self.input[start..end]
    }
}
