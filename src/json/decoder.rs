//! Recursive descent decoder.
//!
//! Dispatches on the next significant character and recurses for nested
//! containers. The whole document is decoded when a [`JsonDecoder`] is
//! constructed; there is no partial result on failure.
//!
//! # Grammar notes
//!
//! - The root must be an object or an array.
//! - Scalars (numbers and the `true`/`false`/`null` keywords) are collected
//!   as a token running up to the next whitespace, `,`, `]` or `}`, then
//!   classified. Unclassifiable tokens are reported verbatim.
//! - Duplicate object keys are accepted; the last occurrence wins.

use super::cursor::{is_whitespace, Cursor};
use super::limits::Limits;
use super::types::{JsonValue, Map};
use crate::error::{DecodeResult, ErrorCode};

/// A fully decoded JSON document.
///
/// Construction parses the entire input. The root is immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct JsonDecoder {
    root: JsonValue,
}

impl JsonDecoder {
    /// Decode `text` with no resource limits.
    pub fn new(text: &str) -> DecodeResult<Self> {
        Self::with_limits(text, Limits::unbounded())
    }

    /// Decode `text` under the given limits.
    pub fn with_limits(text: &str, limits: Limits) -> DecodeResult<Self> {
        let parser = Parser::new(text, limits);
        tracing::debug!(chars = parser.cursor.len(), "decoding JSON document");

        match parser.parse() {
            Ok(root) => {
                tracing::debug!(root = root.type_name(), "decoded JSON document");
                Ok(Self { root })
            }
            Err(e) => {
                tracing::debug!(
                    code = e.error_code().name(),
                    offset = e.offset(),
                    error = %e,
                    "failed to decode JSON document"
                );
                Err(e)
            }
        }
    }

    /// The decoded root value (always an Object or an Array).
    pub fn root(&self) -> &JsonValue {
        &self.root
    }

    /// Take ownership of the decoded tree.
    pub fn into_root(self) -> JsonValue {
        self.root
    }
}

/// Decoder state: the cursor plus the current container depth.
struct Parser {
    cursor: Cursor,
    limits: Limits,
    depth: u64,
}

impl Parser {
    fn new(text: &str, limits: Limits) -> Self {
        Self {
            cursor: Cursor::new(text),
            limits,
            depth: 0,
        }
    }

    /// Parse the root container and reject trailing content.
    fn parse(mut self) -> DecodeResult<JsonValue> {
        self.limits
            .check_size(self.cursor.len() as u64)
            .map_err(|code| code.at(0))?;

        let root = if self.cursor.peek_significant()? == '[' {
            self.cursor.advance();
            self.parse_array()?
        } else {
            self.cursor.expect('{')?;
            self.parse_object()?
        };

        self.cursor.skip_whitespace();
        if !self.cursor.at_end() {
            return Err(self.cursor.error(ErrorCode::E108_TrailingContent));
        }

        Ok(root)
    }

    /// Parse a single JSON value.
    fn parse_value(&mut self) -> DecodeResult<JsonValue> {
        match self.cursor.peek_significant()? {
            '{' => {
                self.cursor.advance();
                self.parse_object()
            }
            '[' => {
                self.cursor.advance();
                self.parse_array()
            }
            '"' => {
                self.cursor.advance();
                Ok(JsonValue::String(self.parse_string()?))
            }
            _ => self.parse_scalar(),
        }
    }

    fn enter(&mut self) -> DecodeResult<()> {
        self.depth += 1;
        self.limits
            .check_depth(self.depth)
            .map_err(|code| self.cursor.error_behind(code))
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Parse a JSON object. The opening brace has been consumed.
    fn parse_object(&mut self) -> DecodeResult<JsonValue> {
        self.enter()?;

        let mut map = Map::new();
        let mut first = true;
        while self.cursor.peek_significant()? != '}' {
            if !first {
                self.cursor.expect_comma()?;
            }
            first = false;

            self.cursor.expect('"')?;
            let key = self.parse_string()?;
            self.cursor.expect(':')?;
            let value = self.parse_value()?;

            // Last write wins
            map.insert(key, value);
        }
        self.cursor.advance();

        self.leave();
        Ok(JsonValue::Object(map))
    }

    /// Parse a JSON array. The opening bracket has been consumed.
    fn parse_array(&mut self) -> DecodeResult<JsonValue> {
        self.enter()?;

        let mut arr = Vec::new();
        let mut first = true;
        while self.cursor.peek_significant()? != ']' {
            if !first {
                self.cursor.expect_comma()?;
            }
            first = false;

            arr.push(self.parse_value()?);
        }
        self.cursor.advance();

        self.leave();
        Ok(JsonValue::Array(arr))
    }

    /// Parse a string body. The opening quote has been consumed.
    ///
    /// Content is gathered as UTF-16 code units so that `\uXXXX` escapes can
    /// form surrogate pairs; an unpaired surrogate decodes to U+FFFD.
    fn parse_string(&mut self) -> DecodeResult<String> {
        let mut units: Vec<u16> = Vec::new();
        let mut buf = [0u16; 2];

        loop {
            let c = self.cursor.next_char()?;
            if c < ' ' {
                return Err(self.cursor.error_behind(ErrorCode::E105_UnterminatedString));
            }
            match c {
                '"' => break,
                '\\' => {
                    let unit = self.parse_escape()?;
                    units.push(unit);
                }
                c => units.extend_from_slice(c.encode_utf16(&mut buf)),
            }
        }

        Ok(String::from_utf16_lossy(&units))
    }

    /// Resolve the escape following a backslash to one UTF-16 code unit.
    fn parse_escape(&mut self) -> DecodeResult<u16> {
        let unit = match self.cursor.next_char()? {
            '"' => 0x22,
            '\\' => 0x5C,
            '/' => 0x2F,
            'b' => 0x08,
            'f' => 0x0C,
            'n' => 0x0A,
            'r' => 0x0D,
            't' => 0x09,
            'u' => return self.parse_hex4(),
            other => {
                return Err(self
                    .cursor
                    .error_behind(ErrorCode::E102_UnsupportedEscape(other)))
            }
        };
        Ok(unit)
    }

    /// Read the four hex digits of a `\uXXXX` escape.
    fn parse_hex4(&mut self) -> DecodeResult<u16> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let c = self.cursor.next_char()?;
            let digit = c
                .to_digit(16)
                .ok_or_else(|| self.cursor.error_behind(ErrorCode::E103_BadHexEscape(c)))?;
            value = (value << 4) | digit as u16;
        }
        Ok(value)
    }

    /// Parse a number or keyword token.
    fn parse_scalar(&mut self) -> DecodeResult<JsonValue> {
        let start = self.cursor.position();
        let token = self.scan_token()?;

        if token.is_empty() {
            return Err(ErrorCode::E107_MissingArgument.at(start));
        }

        if is_number_literal(&token) {
            return match token.parse::<f64>() {
                Ok(n) => Ok(JsonValue::Number(n)),
                Err(_) => Err(ErrorCode::E106_MalformedToken(token).at(start)),
            };
        }

        match token.as_str() {
            "true" => Ok(JsonValue::Bool(true)),
            "false" => Ok(JsonValue::Bool(false)),
            "null" => Ok(JsonValue::Null),
            _ => Err(ErrorCode::E106_MalformedToken(token).at(start)),
        }
    }

    /// Collect characters up to the next delimiter or whitespace.
    ///
    /// A token can never end the document, so running out of input here is
    /// reported as E104.
    fn scan_token(&mut self) -> DecodeResult<String> {
        let mut token = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(self.cursor.error(ErrorCode::E104_UnexpectedEof)),
                Some(',' | ']' | '}') => break,
                Some(c) if is_whitespace(c) => break,
                Some(c) => {
                    token.push(c);
                    self.cursor.advance();
                }
            }
        }
        Ok(token)
    }
}

/// Match `-?[0-9]+(\.[0-9]+)?([eE][-+]?[0-9]+)?` against the whole token.
fn is_number_literal(token: &str) -> bool {
    let bytes = token.as_bytes();
    let mut pos = 0;

    let skip_digits = |pos: &mut usize| {
        let start = *pos;
        while bytes.get(*pos).is_some_and(u8::is_ascii_digit) {
            *pos += 1;
        }
        *pos > start
    };

    // Optional minus sign
    if bytes.first() == Some(&b'-') {
        pos += 1;
    }

    // Integer part
    if !skip_digits(&mut pos) {
        return false;
    }

    // Fractional part
    if bytes.get(pos) == Some(&b'.') {
        pos += 1;
        if !skip_digits(&mut pos) {
            return false;
        }
    }

    // Exponent
    if let Some(b'e' | b'E') = bytes.get(pos) {
        pos += 1;
        if let Some(b'+' | b'-') = bytes.get(pos) {
            pos += 1;
        }
        if !skip_digits(&mut pos) {
            return false;
        }
    }

    pos == bytes.len()
}

/// Decode a JSON document with no resource limits.
pub fn decode(text: &str) -> DecodeResult<JsonValue> {
    JsonDecoder::new(text).map(JsonDecoder::into_root)
}

/// Decode a JSON document under the given limits.
pub fn decode_with_limits(text: &str, limits: Limits) -> DecodeResult<JsonValue> {
    JsonDecoder::with_limits(text, limits).map(JsonDecoder::into_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn decode_err(input: &str) -> String {
        decode(input).unwrap_err().to_string()
    }

    #[test]
    fn test_decode_object() {
        let result = decode(r#"{"a": 1, "b": 2}"#).unwrap();
        let mut expected = Map::new();
        expected.insert("a".to_string(), JsonValue::Number(1.0));
        expected.insert("b".to_string(), JsonValue::Number(2.0));
        assert_eq!(result, JsonValue::Object(expected));
    }

    #[test]
    fn test_decode_array() {
        let result = decode("[1, 2, 3]").unwrap();
        assert_eq!(
            result,
            JsonValue::Array(vec![
                JsonValue::Number(1.0),
                JsonValue::Number(2.0),
                JsonValue::Number(3.0),
            ])
        );
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(decode("{}").unwrap(), JsonValue::Object(Map::new()));
        assert_eq!(decode(" [ ] ").unwrap(), JsonValue::Array(vec![]));
        assert_eq!(
            decode(r#"{"a":{},"b":[]}"#).unwrap().get("b"),
            Some(&JsonValue::Array(vec![]))
        );
    }

    #[test]
    fn test_keywords() {
        let result = decode("[true, false, null]").unwrap();
        assert_eq!(
            result,
            JsonValue::Array(vec![
                JsonValue::Bool(true),
                JsonValue::Bool(false),
                JsonValue::Null,
            ])
        );
    }

    #[test]
    fn test_keywords_are_case_sensitive() {
        assert_eq!(
            decode_err("[True]"),
            "Unrecognized or malformed JSON token: True"
        );
        assert_eq!(
            decode_err("[nulls]"),
            "Unrecognized or malformed JSON token: nulls"
        );
    }

    #[test]
    fn test_numbers() {
        let result = decode("[0, -1, 42.42, 1e3, 2.5E-2, -0.5e+1, 007]").unwrap();
        let numbers: Vec<f64> = result
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_f64().unwrap())
            .collect();
        assert_eq!(numbers, vec![0.0, -1.0, 42.42, 1000.0, 0.025, -5.0, 7.0]);
    }

    #[test]
    fn test_integer_and_fraction_are_equal() {
        assert_eq!(decode("[42]").unwrap(), decode("[42.0]").unwrap());
    }

    #[test]
    fn test_malformed_numbers() {
        assert_eq!(decode_err("[1.]"), "Unrecognized or malformed JSON token: 1.");
        assert_eq!(decode_err("[-]"), "Unrecognized or malformed JSON token: -");
        assert_eq!(decode_err("[.5]"), "Unrecognized or malformed JSON token: .5");
        assert_eq!(decode_err("[1e]"), "Unrecognized or malformed JSON token: 1e");
        assert_eq!(decode_err("[+1]"), "Unrecognized or malformed JSON token: +1");
        assert_eq!(
            decode_err("[NaN]"),
            "Unrecognized or malformed JSON token: NaN"
        );
    }

    #[test]
    fn test_string_escapes() {
        let result = decode(r#"["\"\\\/\b\f\n\r\t"]"#).unwrap();
        assert_eq!(
            result.get_index(0).unwrap().as_str(),
            Some("\"\\/\u{8}\u{c}\n\r\t")
        );
    }

    #[test]
    fn test_unicode_escape() {
        let result = decode(r#"["\u0041\u00e9"]"#).unwrap();
        assert_eq!(result.get_index(0).unwrap().as_str(), Some("Aé"));
    }

    #[test]
    fn test_surrogate_pair_escape() {
        let result = decode(r#"["\uD83D\uDE00"]"#).unwrap();
        assert_eq!(result.get_index(0).unwrap().as_str(), Some("\u{1f600}"));
    }

    #[test]
    fn test_unpaired_surrogate_replaced() {
        let result = decode(r#"["a\uD800b"]"#).unwrap();
        assert_eq!(result.get_index(0).unwrap().as_str(), Some("a\u{fffd}b"));
    }

    #[test]
    fn test_raw_non_ascii_passes_through() {
        let result = decode("[\"h\u{e9}llo \u{1f600}\"]").unwrap();
        assert_eq!(
            result.get_index(0).unwrap().as_str(),
            Some("h\u{e9}llo \u{1f600}")
        );
    }

    #[test]
    fn test_bad_hex_escape() {
        let err = decode(r#"["\u12G4"]"#).unwrap_err();
        assert_eq!(err.to_string(), "Bad hex in \\u escape: G");
        assert_eq!(err.kind(), ErrorKind::Escape);
    }

    #[test]
    fn test_control_characters_rejected() {
        assert_eq!(decode_err("[\"a\tb\"]"), "Unterminated string literal");
        assert_eq!(decode_err("[\"a\u{1}b\"]"), "Unterminated string literal");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let result = decode(r#"{"a": 1, "b": 2, "a": 3}"#).unwrap();
        let obj = result.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(result.get("a"), Some(&JsonValue::Number(3.0)));
    }

    #[test]
    fn test_duplicate_key_after_unescape() {
        let result = decode(r#"{"A": 1, "\u0041": 2}"#).unwrap();
        assert_eq!(result.as_object().unwrap().len(), 1);
        assert_eq!(result.get("A"), Some(&JsonValue::Number(2.0)));
    }

    #[test]
    fn test_root_must_be_container() {
        assert_eq!(decode_err("42"), "Expected '{' but got '4'");
        assert_eq!(decode_err(r#""hello""#), "Expected '{' but got '\"'");
        assert_eq!(decode_err("null"), "Expected '{' but got 'n'");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(decode_err(""), "Unexpected EOF reached");
        assert_eq!(decode_err(" \n\t "), "Unexpected EOF reached");
    }

    #[test]
    fn test_trailing_content_rejected() {
        let err = decode("{} x").unwrap_err();
        assert_eq!(err.to_string(), "Improperly terminated JSON object");
        assert_eq!(err.offset(), 3);
        assert!(decode("[1]  \r\n").is_ok());
    }

    #[test]
    fn test_trailing_comma_rejected() {
        assert_eq!(decode_err("[1, 2,]"), "Missing argument");
        assert_eq!(decode_err(r#"{"a":1,}"#), "Expected '\"' but got '}'");
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(decode_err(r#"{"a":}"#), "Missing argument");
        assert_eq!(decode_err("[,1]"), "Missing argument");
    }

    #[test]
    fn test_missing_separator() {
        assert_eq!(decode_err("[1 2]"), "Expected ',' but got '2'");
        assert_eq!(
            decode_err(r#"{"a":1 "b":2}"#),
            "Expected ',' but got '\"'"
        );
    }

    #[test]
    fn test_missing_colon() {
        assert_eq!(decode_err(r#"{"a" 1}"#), "Expected ':' but got '1'");
    }

    #[test]
    fn test_eof_inside_containers() {
        assert_eq!(decode_err("[1"), "Unexpected EOF reached");
        assert_eq!(decode_err("[1,"), "Unexpected EOF reached");
        assert_eq!(decode_err("[tru"), "Unexpected EOF reached");
        assert_eq!(decode_err(r#"{"a":1"#), "Unexpected EOF reached");
        assert_eq!(decode_err(r#"{"a""#), "Unexpected EOF reached");
        assert_eq!(decode_err(r#"["ab\"#), "Unexpected EOF reached");
        assert_eq!(decode_err(r#"["\u00"#), "Unexpected EOF reached");
    }

    #[test]
    fn test_error_offsets() {
        let err = decode(r#"{"key":"value\x"}"#).unwrap_err();
        assert_eq!(err.offset(), 14);

        let err = decode("[1, oops]").unwrap_err();
        assert_eq!(err.offset(), 4);
    }

    #[test]
    fn test_nesting_depth_limit() {
        let limits = Limits::unbounded().with_max_nesting_depth(2);

        // Depth 2 is allowed
        assert!(decode_with_limits("[[1]]", limits).is_ok());
        assert!(decode_with_limits(r#"{"a":[1]}"#, limits).is_ok());

        // Depth 3 exceeds limit
        let err = decode_with_limits("[[[1]]]", limits).unwrap_err();
        assert_eq!(err.error_code(), &ErrorCode::E111_NestingTooDeep(3, 2));
        assert_eq!(err.offset(), 2);
    }

    #[test]
    fn test_depth_resets_between_siblings() {
        let limits = Limits::unbounded().with_max_nesting_depth(2);
        assert!(decode_with_limits("[[1], [2], {}]", limits).is_ok());
    }

    #[test]
    fn test_input_size_limit() {
        let limits = Limits::unbounded().with_max_input_size(4);
        assert!(decode_with_limits("[1 ]", limits).is_ok());
        let err = decode_with_limits("[1, 2]", limits).unwrap_err();
        assert_eq!(err.code(), 110);
        assert_eq!(err.offset(), 0);
    }

    #[test]
    fn test_deep_nesting_unbounded_by_default() {
        let input = format!("{}{}", "[".repeat(200), "]".repeat(200));
        assert!(decode(&input).is_ok());
    }

    #[test]
    fn test_decoder_root_accessors() {
        let decoder = JsonDecoder::new(r#"{"k":"v"}"#).unwrap();
        assert!(decoder.root().is_object());
        let root = decoder.into_root();
        assert_eq!(root.get("k").and_then(JsonValue::as_str), Some("v"));
    }

    #[test]
    fn test_is_number_literal() {
        for ok in ["0", "-0", "12", "1.5", "1e9", "1E+9", "-3.25e-7", "00"] {
            assert!(is_number_literal(ok), "{ok} should be a number");
        }
        for bad in ["", "-", "1.", ".1", "1e", "1e+", "--1", "1.2.3", "0x10", "1_000"] {
            assert!(!is_number_literal(bad), "{bad} should not be a number");
        }
    }
}
