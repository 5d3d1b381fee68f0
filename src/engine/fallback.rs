//! Round-robin fallback selection.
//!
//! When no rule matches, the resolver answers with the next entry of a fixed
//! list of fallback responses. The cursor into that list is the only mutable
//! state in the engine:
//!
//! ```text
//! index: 0 ──▶ 1 ──▶ ... ──▶ len-1 ──┐
//!        ▲                           │
//!        └───────────────────────────┘   (no terminal state)
//! ```
//!
//! Each `FallbackCycle` owns its own cursor. Two resolvers built with two
//! cycles never influence each other; sharing a rotation means sharing the
//! same `FallbackCycle` (usually behind the resolver's `Arc`).

use crate::{Error, Result};
use std::sync::atomic::{AtomicUsize, Ordering};

/// A fixed, non-empty list of responses plus a rotating cursor.
#[derive(Debug)]
pub struct FallbackCycle {
    responses: Vec<String>,
    index: AtomicUsize,
}

impl FallbackCycle {
    /// Create a cycle starting at index 0. Fails when `responses` is empty.
    pub fn new<I, S>(responses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let responses: Vec<String> = responses.into_iter().map(Into::into).collect();
        if responses.is_empty() {
            return Err(Error::NoFallbacks);
        }
        Ok(FallbackCycle { responses, index: AtomicUsize::new(0) })
    }

    pub fn len(&self) -> usize {
        self.responses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }

    pub fn responses(&self) -> &[String] {
        &self.responses
    }

    /// Index the next call to [`FallbackCycle::advance`] will use.
    pub fn position(&self) -> usize {
        self.index.load(Ordering::Acquire)
    }

    /// Read the current response and move the cursor one step, atomically.
    ///
    /// Returns the index that was read together with its response. Concurrent
    /// callers each get a distinct, consecutive index.
    pub fn advance(&self) -> (usize, &str) {
        let len = self.responses.len();
        let previous = match self.index.fetch_update(Ordering::AcqRel, Ordering::Acquire, |i| Some((i + 1) % len)) {
            Ok(i) | Err(i) => i,
        };
        (previous, &self.responses[previous])
    }
}
