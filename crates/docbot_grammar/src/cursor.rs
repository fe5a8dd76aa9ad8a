//! Input cursor over the text being parsed.
//!
//! A [`Cursor`] is a borrowed view of the unconsumed suffix of the input
//! together with its byte offset from the start. Cursors are `Copy`, so
//! backtracking is just reusing an older cursor.

use docbot_foundation::ParseFailure;

/// Position within an input string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cursor<'a> {
    buffer: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a cursor at the start of `input`.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self {
            buffer: input,
            offset: 0,
        }
    }

    /// Creates a cursor over `rest` that reports positions starting at `offset`.
    #[must_use]
    pub const fn at(rest: &'a str, offset: usize) -> Self {
        Self {
            buffer: rest,
            offset,
        }
    }

    /// Returns the unconsumed input.
    #[must_use]
    pub const fn remaining(&self) -> &'a str {
        self.buffer
    }

    /// Byte offset of this cursor from the start of the original input.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Number of unconsumed bytes.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Returns true if all input has been consumed.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the next character without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<char> {
        self.buffer.chars().next()
    }

    /// Splits off the first `n` bytes.
    ///
    /// Returns `(consumed, rest)`. The consumed half keeps this cursor's
    /// offset and the rest starts at `offset + n`.
    ///
    /// # Panics
    ///
    /// Panics if `n` is past the end of the input or not on a character
    /// boundary.
    #[must_use]
    pub fn split(self, n: usize) -> (Self, Self) {
        let (head, tail) = self.buffer.split_at(n);
        (
            Self::at(head, self.offset),
            Self::at(tail, self.offset + n),
        )
    }

    /// Consumes the first `n` bytes and returns the rest.
    ///
    /// # Panics
    ///
    /// Same conditions as [`Cursor::split`].
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        self.split(n).1
    }

    /// Builds a failure at this position.
    #[must_use]
    pub fn fail(&self, expected: impl Into<String>) -> ParseFailure {
        ParseFailure::new(self.offset, expected, self.peek())
    }
}
