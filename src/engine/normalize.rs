//! Input normalization.
//!
//! Raw messages are canonicalized before any rule sees them:
//!
//! ```text
//! raw ── trim ── empty? ──▶ EmptyInput
//!                  │
//!                  └─ too long? ──▶ InputTooLong
//!                        │
//!                        └─ lowercase ──▶ normalized
//! ```
//!
//! Lowercasing uses Unicode's default (locale-independent) case mapping.
//! Length is counted in `char`s of the trimmed text, before case folding,
//! since folding can change the length of some scripts.

use crate::{Error, Result};

/// Canonicalizes raw input and enforces an optional length cap.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Normalizer {
    max_len: Option<usize>,
}

impl Normalizer {
    /// `None` means unbounded.
    pub fn new(max_len: Option<usize>) -> Self {
        Normalizer { max_len }
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    pub fn apply(&self, raw: &str) -> Result<String> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        if let Some(max) = self.max_len {
            let len = trimmed.chars().count();
            if len > max {
                return Err(Error::InputTooLong { len, max });
            }
        }

        Ok(trimmed.to_lowercase())
    }
}
