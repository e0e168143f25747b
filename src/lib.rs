//! JCS Decoder - strict JSON decoding for canonicalization.
//!
//! This crate turns one in-memory JSON document into a canonical value
//! tree, the input to a JSON Canonicalization Scheme (RFC 8785) encoder used
//! for hashing and signing. Decoding is all-or-nothing: either the whole
//! document parses, or the caller gets a typed error whose message is a
//! stable compatibility contract.
//!
//! # Architecture
//!
//! - [`json`] - Cursor, recursive descent decoder and value types
//! - [`error`] - Error codes and their message forms
//!
//! # Concurrency
//!
//! Each decode owns its cursor and produces its own tree. Independent
//! documents can be decoded in parallel without any synchronization.

// Diagnostics must never turn into panics in library code.
// Tests are checked separately with `cargo test`.
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![warn(missing_docs)]

pub mod error;
pub mod json;

// Re-export commonly used types
pub use error::{DecodeError, DecodeResult, ErrorCode, ErrorKind};
pub use json::{decode, decode_with_limits, JsonDecoder, JsonValue, Limits};
