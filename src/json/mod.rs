//! Strict JSON decoding into a canonical value tree.
//!
//! The decoder is the front half of a JSON Canonicalization Scheme (RFC 8785)
//! pipeline: two documents that differ only in whitespace or member order
//! decode to equal trees, and every malformed input is rejected with a
//! stable diagnostic.
//!
//! # Architecture
//!
//! - [`cursor`] - Position-tracking view over the input text
//! - [`decoder`] - Recursive descent decoder producing the value tree
//! - [`types`] - The closed [`JsonValue`] variant
//! - [`ordering`] - UTF-16 key comparator for canonical member order
//! - [`limits`] - Optional resource bounds
//!
//! # Example
//!
//! ```
//! use jcs_decoder::json::{decode, JsonValue};
//!
//! let value = decode(r#"{ "b": [1, 2.0], "a": null }"#).unwrap();
//!
//! assert_eq!(value.get("a"), Some(&JsonValue::Null));
//! assert_eq!(value.get("b").and_then(|b| b.get_index(1)), Some(&JsonValue::Number(2.0)));
//!
//! let keys: Vec<&str> = value
//!     .canonical_members()
//!     .unwrap()
//!     .into_iter()
//!     .map(|(k, _)| k)
//!     .collect();
//! assert_eq!(keys, ["a", "b"]);
//! ```

pub mod cursor;
pub mod decoder;
pub mod limits;
pub mod ordering;
pub mod types;

// Re-export commonly used items
pub use decoder::{decode, decode_with_limits, JsonDecoder};
pub use limits::Limits;
pub use ordering::compare_keys_utf16;
pub use types::{JsonValue, Map};
