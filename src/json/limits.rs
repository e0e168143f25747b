//! Resource limits for decoding.
//!
//! By default nothing is bounded: nesting depth is limited only by the call
//! stack, and input size only by memory. Callers handling untrusted input can
//! opt into explicit bounds, which fail with E110/E111 instead of exhausting
//! the stack.

use crate::error::ErrorCode;

/// Optional resource bounds applied while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Limits {
    /// Maximum input length in characters (E110)
    pub max_input_size: Option<u64>,
    /// Maximum number of objects/arrays open at once (E111)
    pub max_nesting_depth: Option<u64>,
}

impl Limits {
    /// No limits at all.
    pub const fn unbounded() -> Self {
        Self {
            max_input_size: None,
            max_nesting_depth: None,
        }
    }

    /// Bounds suitable for documents from untrusted sources.
    pub const fn strict() -> Self {
        Self {
            max_input_size: Some(16 * 1024 * 1024), // 16 Mi characters
            max_nesting_depth: Some(128),
        }
    }

    /// Return a copy with the given depth bound.
    pub const fn with_max_nesting_depth(mut self, depth: u64) -> Self {
        self.max_nesting_depth = Some(depth);
        self
    }

    /// Return a copy with the given size bound.
    pub const fn with_max_input_size(mut self, size: u64) -> Self {
        self.max_input_size = Some(size);
        self
    }

    /// Check that `depth` open containers is within bounds (E111).
    pub fn check_depth(&self, depth: u64) -> Result<(), ErrorCode> {
        match self.max_nesting_depth {
            Some(max) if depth > max => Err(ErrorCode::E111_NestingTooDeep(depth, max)),
            _ => Ok(()),
        }
    }

    /// Check that an input of `size` characters is within bounds (E110).
    pub fn check_size(&self, size: u64) -> Result<(), ErrorCode> {
        match self.max_input_size {
            Some(max) if size > max => Err(ErrorCode::E110_InputTooLarge(size, max)),
            _ => Ok(()),
        }
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::unbounded()
    }
}
