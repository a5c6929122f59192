//! Low-level byte-by-byte parser for line-oriented ASCII text.
//!
//! This module provides [ByteParser] for parsing text-based matrix files with
//! support for peeking, consuming, token extraction and line tracking.

use crate::parser::byte_source::{ByteSource, InMemoryByteSource};
use std::io;
use std::path::Path;

/// Bytes separating the entries of a row.
pub const FIELD_SEPARATORS: &[u8] = b" \t,";

/// Byte starting a comment that runs to the end of the line.
pub const COMMENT_START: u8 = b'#';

// =#========================================================================#=
// BYTE PARSER
// =#========================================================================#=
/// A byte-by-byte parser for ASCII text with support for peeking, consuming
/// and token extraction.
///
/// Keeps track of the current (1-based) line for error reporting.
///
/// # Example
/// ```
/// use perfphylo::parser::byte_parser::ByteParser;
///
/// let mut parser = ByteParser::from_str("1 0, 2 # comment\n0 1 1");
///
/// assert_eq!(parser.next_token(), Some("1".to_string()));
/// assert_eq!(parser.next_token(), Some("0".to_string()));
/// assert_eq!(parser.next_token(), Some("2".to_string()));
/// assert_eq!(parser.next_token(), None); // rest of line is a comment
/// assert!(parser.consume_line_end());
/// assert_eq!(parser.line(), 2);
/// ```
pub struct ByteParser<S: ByteSource> {
    source: S,
    line: usize,
}

impl ByteParser<InMemoryByteSource> {
    /// Creates a new `ByteParser` from a string by copying it.
    pub fn from_str(input: &str) -> Self {
        Self::new(InMemoryByteSource::from_vec(input.as_bytes().to_vec()))
    }

    /// Creates a new `ByteParser` reading the whole file at `path`.
    ///
    /// # Errors
    /// Returns an I/O error if the file cannot be read
    pub fn from_file<P: AsRef<Path>>(path: P) -> io::Result<Self> {
        Ok(Self::new(InMemoryByteSource::from_file(path)?))
    }
}

impl<S: ByteSource> ByteParser<S> {
    /// Creates a new `ByteParser` from a byte source.
    pub fn new(source: S) -> Self {
        Self { source, line: 1 }
    }

    /// Peeks at the current byte without consuming it.
    #[inline(always)]
    pub fn peek(&self) -> Option<u8> {
        self.source.peek()
    }

    /// Gets the current byte and advances the position (consumes it).
    #[inline(always)]
    pub fn next(&mut self) -> Option<u8> {
        let byte = self.source.next_byte()?;
        if byte == b'\n' {
            self.line += 1;
        }
        Some(byte)
    }

    /// Skips (consumes) field separators, but not line ends.
    pub fn skip_separators(&mut self) {
        while self.peek().is_some_and(|b| FIELD_SEPARATORS.contains(&b)) {
            self.next();
        }
    }

    /// Skips (consumes) a comment up to, but not including, the line end.
    ///
    /// # Returns
    /// `true` if a comment was found and consumed
    pub fn skip_comment(&mut self) -> bool {
        if self.peek() != Some(COMMENT_START) {
            return false;
        }
        while self.peek().is_some_and(|b| b != b'\n') {
            self.next();
        }
        true
    }

    /// Returns `true` if only separators or a comment remain on this line.
    pub fn at_line_end(&mut self) -> bool {
        self.skip_separators();
        self.skip_comment();
        self.peek().is_none() || self.at_line_break()
    }

    /// Returns `true` if the next bytes are a line break (`\n` or `\r\n`).
    ///
    /// A lone `\r` only ends the last line of the input.
    fn at_line_break(&self) -> bool {
        matches!(self.source.peek_slice(2), [b'\n', ..] | [b'\r', b'\n'] | [b'\r'])
    }

    /// Consumes the rest of the current line including its line end.
    ///
    /// # Returns
    /// `true` if a line end was consumed, `false` at EOF
    pub fn consume_line_end(&mut self) -> bool {
        while let Some(b) = self.next() {
            if b == b'\n' {
                return true;
            }
        }
        false
    }

    /// Parses the next token on the current line.
    ///
    /// Skips leading separators; a token ends at a separator, a comment, or
    /// the line end.
    ///
    /// # Returns
    /// `None` if no token remains on the current line
    pub fn next_token(&mut self) -> Option<String> {
        if self.at_line_end() {
            return None;
        }

        let start = self.position();
        while self.peek().is_some_and(|b| !FIELD_SEPARATORS.contains(&b) && b != COMMENT_START)
            && !self.at_line_break()
        {
            self.next();
        }
        Some(String::from_utf8_lossy(self.slice_from(start)).into_owned())
    }

    /// Returns whether the end of data (EOF) has been reached.
    pub fn is_eof(&self) -> bool {
        self.source.is_eof()
    }

    /// Returns the current byte offset in the input.
    pub fn position(&self) -> usize {
        self.source.position()
    }

    /// Returns the current 1-based line number.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Returns a slice of the input from a start position to the current position.
    pub fn slice_from(&self, start: usize) -> &[u8] {
        self.source.slice_from(start).unwrap_or(&[])
    }

    /// Returns a string from up to `k` bytes from the current position for
    /// error context, stopping at the line end.
    ///
    /// Invalid UTF-8 sequences are replaced with the Unicode replacement character.
    pub fn get_context_as_string(&self, k: usize) -> String {
        let context = self.source.peek_slice(k);
        let line_end = context.iter().position(|&b| b == b'\n').unwrap_or(context.len());
        String::from_utf8_lossy(&context[..line_end]).trim_end().to_string()
    }
}
