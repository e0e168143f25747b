//! Error handling for the decoder.
//!
//! Every malformed-input condition maps to exactly one [`ErrorCode`] whose
//! `Display` output is the stable diagnostic callers compare against. The
//! failing offset travels alongside in [`DecodeError`] and never leaks into
//! the message text.

use std::fmt;

use thiserror::Error;

/// All error codes the decoder can produce.
///
/// The message of each variant is part of the public contract and must stay
/// byte-identical across releases.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Error)]
#[allow(non_camel_case_types)]
pub enum ErrorCode {
    /// A specific punctuation character was required (code 100)
    #[error("Expected '{expected}' but got '{actual}'")]
    E100_ExpectedCharacter {
        /// Character the grammar required
        expected: char,
        /// Character actually found
        actual: char,
    },

    /// A `,` was required between elements or members (code 101)
    #[error("Expected ',' but got '{0}'")]
    E101_ExpectedComma(char),

    /// Unknown character after `\` (code 102)
    #[error("Unsupported escape:{0}")]
    E102_UnsupportedEscape(char),

    /// Non-hex digit inside a `\uXXXX` escape (code 103)
    #[error("Bad hex in \\u escape: {0}")]
    E103_BadHexEscape(char),

    /// Input ended before the current construct closed (code 104)
    #[error("Unexpected EOF reached")]
    E104_UnexpectedEof,

    /// Raw control character inside a string (code 105)
    #[error("Unterminated string literal")]
    E105_UnterminatedString,

    /// Text matches no value grammar (code 106)
    #[error("Unrecognized or malformed JSON token: {0}")]
    E106_MalformedToken(String),

    /// A value was required but the token was empty (code 107)
    #[error("Missing argument")]
    E107_MissingArgument,

    /// Non-whitespace content after the root value (code 108)
    #[error("Improperly terminated JSON object")]
    E108_TrailingContent,

    /// Input exceeds the configured size limit (code 110)
    #[error("Input too large: {0} characters exceeds limit of {1}")]
    E110_InputTooLarge(u64, u64),

    /// Container nesting exceeds the configured depth limit (code 111)
    #[error("Nesting too deep: depth {0} exceeds limit of {1}")]
    E111_NestingTooDeep(u64, u64),
}

/// Coarse classification of decode failures.
///
/// None of these are recoverable: any of them means the document is not
/// valid input for canonicalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An expected delimiter or punctuation character was absent
    Structural,
    /// An expected `,` between elements was absent
    Separator,
    /// A malformed escape sequence inside a string
    Escape,
    /// The document ended before a construct closed
    PrematureEof,
    /// A control character appeared raw inside a string
    StringTermination,
    /// The text at the current position matches no value grammar
    Token,
    /// Content follows the root value
    TrailingContent,
    /// A configured resource limit was exceeded
    Limit,
}

impl ErrorCode {
    /// Get the numeric error code.
    pub fn code(&self) -> u32 {
        match self {
            ErrorCode::E100_ExpectedCharacter { .. } => 100,
            ErrorCode::E101_ExpectedComma(_) => 101,
            ErrorCode::E102_UnsupportedEscape(_) => 102,
            ErrorCode::E103_BadHexEscape(_) => 103,
            ErrorCode::E104_UnexpectedEof => 104,
            ErrorCode::E105_UnterminatedString => 105,
            ErrorCode::E106_MalformedToken(_) => 106,
            ErrorCode::E107_MissingArgument => 107,
            ErrorCode::E108_TrailingContent => 108,
            ErrorCode::E110_InputTooLarge(_, _) => 110,
            ErrorCode::E111_NestingTooDeep(_, _) => 111,
        }
    }

    /// Get the error name as a string.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E100_ExpectedCharacter { .. } => "E100_ExpectedCharacter",
            ErrorCode::E101_ExpectedComma(_) => "E101_ExpectedComma",
            ErrorCode::E102_UnsupportedEscape(_) => "E102_UnsupportedEscape",
            ErrorCode::E103_BadHexEscape(_) => "E103_BadHexEscape",
            ErrorCode::E104_UnexpectedEof => "E104_UnexpectedEof",
            ErrorCode::E105_UnterminatedString => "E105_UnterminatedString",
            ErrorCode::E106_MalformedToken(_) => "E106_MalformedToken",
            ErrorCode::E107_MissingArgument => "E107_MissingArgument",
            ErrorCode::E108_TrailingContent => "E108_TrailingContent",
            ErrorCode::E110_InputTooLarge(_, _) => "E110_InputTooLarge",
            ErrorCode::E111_NestingTooDeep(_, _) => "E111_NestingTooDeep",
        }
    }

    /// Map this code onto the failure taxonomy.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ErrorCode::E100_ExpectedCharacter { .. } => ErrorKind::Structural,
            ErrorCode::E101_ExpectedComma(_) => ErrorKind::Separator,
            ErrorCode::E102_UnsupportedEscape(_) | ErrorCode::E103_BadHexEscape(_) => {
                ErrorKind::Escape
            }
            ErrorCode::E104_UnexpectedEof => ErrorKind::PrematureEof,
            ErrorCode::E105_UnterminatedString => ErrorKind::StringTermination,
            ErrorCode::E106_MalformedToken(_) | ErrorCode::E107_MissingArgument => {
                ErrorKind::Token
            }
            ErrorCode::E108_TrailingContent => ErrorKind::TrailingContent,
            ErrorCode::E110_InputTooLarge(_, _) | ErrorCode::E111_NestingTooDeep(_, _) => {
                ErrorKind::Limit
            }
        }
    }

    /// Attach the offset at which this error was detected.
    pub fn at(self, offset: usize) -> DecodeError {
        DecodeError { code: self, offset }
    }
}

/// A decode failure: an [`ErrorCode`] plus the character offset where the
/// cursor stood when it was detected.
///
/// `Display` prints the bare message so that diagnostics stay stable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeError {
    code: ErrorCode,
    offset: usize,
}

impl DecodeError {
    /// The underlying error code.
    pub fn error_code(&self) -> &ErrorCode {
        &self.code
    }

    /// Shorthand for `error_code().code()`.
    pub fn code(&self) -> u32 {
        self.code.code()
    }

    /// Shorthand for `error_code().kind()`.
    pub fn kind(&self) -> ErrorKind {
        self.code.kind()
    }

    /// Character offset into the input (0-based).
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Consume the error, keeping only its code.
    pub fn into_code(self) -> ErrorCode {
        self.code
    }
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.code, f)
    }
}

impl std::error::Error for DecodeError {}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
