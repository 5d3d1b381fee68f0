//! Response resolution.
//!
//! `ResponseResolver` owns one `RuleTable`, one `FallbackCycle` and one
//! `Normalizer`, and turns a raw message into exactly one response:
//!
//! ```text
//! raw ──▶ Normalizer::apply ──▶ RuleTable::find ──┬─ Some(rule) ─▶ rule response
//!            │                                    └─ None ───────▶ FallbackCycle::advance
//!            └─ Err(EmptyInput | InputTooLong)   (fallback untouched)
//! ```
//!
//! The resolver itself holds no per-call state. Share one instance (behind an
//! `Arc`) to share its fallback rotation; build separate instances for
//! separate rotations.

use super::metrics::ResolutionMetrics;
use super::{FallbackCycle, Normalizer, RuleTable};
use crate::{Options, Resolution, ResolutionDetails, Result};
use std::time::Instant;
use tracing::debug;

#[derive(Debug)]
pub struct ResponseResolver {
    table: RuleTable,
    fallback: FallbackCycle,
    normalizer: Normalizer,
}

impl ResponseResolver {
    /// Assemble a resolver. Only `options.max_input_len` is read here; the
    /// pattern flags were already applied when `table` was compiled.
    pub fn new(table: RuleTable, fallback: FallbackCycle, options: &Options) -> Self {
        ResponseResolver { table, fallback, normalizer: Normalizer::new(options.max_input_len) }
    }

    /// Resolve `raw` to a response string.
    pub fn resolve(&self, raw: &str) -> Result<String> {
        self.resolve_detailed(raw).map(|resolution| resolution.text)
    }

    /// Resolve `raw` and report which rule (or fallback slot) answered.
    pub fn resolve_detailed(&self, raw: &str) -> Result<Resolution> {
        let normalized = self.normalizer.apply(raw)?;
        Ok(self.resolve_normalized(&normalized))
    }

    /// Like [`ResponseResolver::resolve_detailed`], plus timings and the full
    /// list of rules that matched (including shadowed ones).
    ///
    /// The candidate scan runs after the response has been chosen and does not
    /// affect it.
    pub fn resolve_verbose(&self, raw: &str) -> Result<(Resolution, ResolutionDetails)> {
        let start = Instant::now();
        let normalized = self.normalizer.apply(raw)?;
        let normalize = start.elapsed();

        let matching_start = Instant::now();
        let resolution = self.resolve_normalized(&normalized);
        let matching = matching_start.elapsed();

        let metrics = ResolutionMetrics { total: start.elapsed(), normalize, matching };
        let candidates = self.table.matching(&normalized);

        Ok((resolution, ResolutionDetails { normalized, candidates, metrics }))
    }

    /// Number of rules in the table.
    pub fn rule_count(&self) -> usize {
        self.table.len()
    }

    pub fn table(&self) -> &RuleTable {
        &self.table
    }

    pub fn fallback(&self) -> &FallbackCycle {
        &self.fallback
    }

    pub fn max_input_len(&self) -> Option<usize> {
        self.normalizer.max_len()
    }

    fn resolve_normalized(&self, normalized: &str) -> Resolution {
        if let Some(found) = self.table.find(normalized) {
            debug!(rule = found.name, index = found.index, "rule matched");
            return Resolution {
                text: found.response,
                matched: true,
                rule_index: Some(found.index),
                rule_name: Some(found.name.to_string()),
                fallback_index: None,
            };
        }

        let (index, text) = self.fallback.advance();
        debug!(index, "no rule matched, using fallback");
        Resolution { text: text.to_string(), matched: false, rule_index: None, rule_name: None, fallback_index: Some(index) }
    }
}
