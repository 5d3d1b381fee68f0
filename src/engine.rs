//! Response-resolution engine.
//!
//! This module is the entry point for turning one free-text message into one
//! canned response. The work is split into focused submodules under
//! `src/engine/` and re-exported here so public paths stay flat
//! (`crate::engine::RuleTable`, `crate::engine::ResponseResolver`, ...).
//!
//! ## How the parts work together
//!
//! ```text
//! rules (ordered)  ──┐
//!                    │  RuleTable::new                (compiled_rules.rs)
//!                    └──────────────┬────────────
//!                                   │
//! raw input ── Normalizer::apply ───┤  trim, validate, lowercase
//!             (normalize.rs)        │
//!                                   v
//!                         RuleTable::find             first match wins
//!                                   │
//!                   ┌── Some ───────┴────── None ──┐
//!                   v                              v
//!            rule production          FallbackCycle::advance (fallback.rs)
//!                   │                              │
//!                   └──────────┬───────────────────┘
//!                              v
//!                  Resolution (resolve.rs)
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: compiles pattern sources once (`Pattern`,
//!   `PatternFlags`) and holds the read-only, ordered `RuleTable`.
//! - `normalize.rs`: canonicalizes raw input and enforces the optional
//!   length cap.
//! - `fallback.rs`: the round-robin `FallbackCycle`, the only mutable state in
//!   the engine.
//! - `resolve.rs`: `ResponseResolver`, which owns one of each of the above.
//! - `metrics.rs`: optional timing data for verbose runs.
//!
//! ## Concurrency
//!
//! `RuleTable` is immutable after construction and is shared freely.
//! `FallbackCycle` advances with a compare-and-swap loop on a single atomic,
//! so concurrent fallbacks observe consecutive indices and no update is lost.
//! Nothing in the engine blocks or performs I/O.
//!
//! ## Debugging
//!
//! Matches and fallback selections are logged at `debug` level through
//! `tracing`; run the binary with `RULECHAT_LOG=rulechat=debug` to see them.

#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/fallback.rs"]
mod fallback;
#[path = "engine/metrics.rs"]
mod metrics;
#[path = "engine/normalize.rs"]
mod normalize;
#[path = "engine/resolve.rs"]
mod resolve;

#[cfg(test)]
#[path = "engine/proptests.rs"]
mod proptests;

pub use compiled_rules::{PatternFlags, RuleMatch, RuleTable, frozen_clock};
pub use fallback::FallbackCycle;
pub use metrics::ResolutionMetrics;
pub use normalize::Normalizer;
pub use resolve::ResponseResolver;
