//! Canonical key ordering (RFC 8785 section 3.2.3).
//!
//! Canonical encoders sort object members by the UTF-16 code units of their
//! keys, compared as unsigned integers. Rust strings order by UTF-8 bytes,
//! i.e. by code point, which disagrees for keys that mix supplementary-plane
//! characters (surrogate pairs, 0xD800..0xDFFF) with U+E000..U+FFFF.

use std::cmp::Ordering;

use super::types::{JsonValue, Map};

/// Compare two strings using UTF-16 code unit ordering.
///
/// This matches ECMAScript string comparison and is not locale-aware.
pub fn compare_keys_utf16(a: &str, b: &str) -> Ordering {
    a.encode_utf16().cmp(b.encode_utf16())
}

/// Members of `map` sorted into canonical key order.
pub fn canonical_entries(map: &Map) -> Vec<(&str, &JsonValue)> {
    let mut entries: Vec<(&str, &JsonValue)> =
        map.iter().map(|(k, v)| (k.as_str(), v)).collect();
    entries.sort_by(|(a, _), (b, _)| compare_keys_utf16(a, b));
    entries
}

/// Keys of `map` in canonical order.
pub fn canonical_keys(map: &Map) -> Vec<&str> {
    canonical_entries(map).into_iter().map(|(k, _)| k).collect()
}
