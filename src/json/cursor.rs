//! Position-tracking cursor over the input text.
//!
//! The cursor is the only place that knows the current offset. It never
//! mutates the text; every operation moves the offset forward or reports
//! what lies at it.

use crate::error::{DecodeError, DecodeResult, ErrorCode};

/// Cursor over a fully resident JSON document.
///
/// Offsets count Unicode scalar values, not bytes.
#[derive(Debug, Clone)]
pub struct Cursor {
    input: Vec<char>,
    pos: usize,
}

impl Cursor {
    /// Create a cursor positioned at the start of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            input: text.chars().collect(),
            pos: 0,
        }
    }

    /// Total length of the input in characters.
    pub fn len(&self) -> usize {
        self.input.len()
    }

    /// True if the input is empty.
    pub fn is_empty(&self) -> bool {
        self.input.is_empty()
    }

    /// Get the current position in the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// True once every character has been consumed.
    pub fn at_end(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Peek at the current character without consuming it.
    pub fn peek(&self) -> Option<char> {
        self.input.get(self.pos).copied()
    }

    /// Consume and return the current character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek();
        if c.is_some() {
            self.pos += 1;
        }
        c
    }

    /// Consume the current character, failing with E104 at end of input.
    pub fn next_char(&mut self) -> DecodeResult<char> {
        match self.advance() {
            Some(c) => Ok(c),
            None => Err(self.error(ErrorCode::E104_UnexpectedEof)),
        }
    }

    /// Skip space, tab, carriage return and line feed.
    pub fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if !is_whitespace(c) {
                break;
            }
            self.pos += 1;
        }
    }

    /// Skip whitespace, then peek at the next significant character.
    ///
    /// Fails with E104 if only whitespace remains.
    pub fn peek_significant(&mut self) -> DecodeResult<char> {
        self.skip_whitespace();
        match self.peek() {
            Some(c) => Ok(c),
            None => Err(self.error(ErrorCode::E104_UnexpectedEof)),
        }
    }

    /// Skip whitespace, then consume the next significant character.
    pub fn scan(&mut self) -> DecodeResult<char> {
        self.skip_whitespace();
        self.next_char()
    }

    /// Skip whitespace, then consume `expected` or fail with E100.
    pub fn expect(&mut self, expected: char) -> DecodeResult<char> {
        let actual = self.scan()?;
        if actual != expected {
            let code = ErrorCode::E100_ExpectedCharacter { expected, actual };
            return Err(self.error_behind(code));
        }
        Ok(actual)
    }

    /// Like [`Cursor::expect`] for the `,` separator, failing with E101.
    pub fn expect_comma(&mut self) -> DecodeResult<()> {
        let actual = self.scan()?;
        if actual != ',' {
            return Err(self.error_behind(ErrorCode::E101_ExpectedComma(actual)));
        }
        Ok(())
    }

    /// Build an error located at the current position.
    pub fn error(&self, code: ErrorCode) -> DecodeError {
        code.at(self.pos)
    }

    /// Build an error located at the character just consumed.
    pub fn error_behind(&self, code: ErrorCode) -> DecodeError {
        code.at(self.pos.saturating_sub(1))
    }
}

/// JSON insignificant whitespace. Other Unicode spaces are not recognised.
pub fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}
