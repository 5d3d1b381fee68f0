//! Resolution timings.
//!
//! Collected only by [`ResponseResolver::resolve_verbose`](super::ResponseResolver::resolve_verbose);
//! the normal `resolve` path does not read the clock.

use std::time::Duration;

#[derive(Debug, Default, Clone, Copy)]
pub struct ResolutionMetrics {
    /// Total elapsed time for the call.
    pub total: Duration,
    /// Time spent trimming, validating and case folding.
    pub normalize: Duration,
    /// Time spent scanning rules (and advancing the fallback, if reached).
    pub matching: Duration,
}
