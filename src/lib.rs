extern crate self as rulechat;

use regex::Regex;

#[macro_use]
mod macros;
mod api;
pub mod config;
mod engine;
mod error;
pub mod rules;
pub mod server;

pub use api::{Context, Options, Resolution, ResolutionDetails, default_resolver};
pub use engine::{
    FallbackCycle, Normalizer, PatternFlags, ResolutionMetrics, ResponseResolver, RuleMatch, RuleTable, frozen_clock,
};
pub use error::{Error, Result};

// --- Rule types -------------------------------------------------------------

/// A compiled text-search expression.
///
/// The source is kept next to the compiled matcher so that diagnostics can
/// show what a rule was written as. Construction lives in
/// `engine/compiled_rules.rs` (see [`Pattern::new`]).
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

/// A response producer: called every time its rule wins.
///
/// Most producers just hand back a fixed string. The indirection lets a rule
/// bake a value in at construction time (see [`frozen_clock`]) or lets tests
/// plug in a deterministic source.
pub type Production = Box<dyn Fn() -> String + Send + Sync>;

/// A single (pattern, response) pair.
///
/// A rule's priority is its position in the [`RuleTable`]; rules carry no
/// priority field of their own.
pub struct Rule {
    pub name: String,
    pub pattern: Pattern,
    pub production: Production,
}

impl Rule {
    /// Rule answering with a fixed response.
    pub fn new(name: impl Into<String>, pattern: Pattern, response: impl Into<String>) -> Self {
        let response = response.into();
        Rule { name: name.into(), pattern, production: Box::new(move || response.clone()) }
    }

    /// Rule answering with whatever `production` returns.
    pub fn with_producer<F>(name: impl Into<String>, pattern: Pattern, production: F) -> Self
    where
        F: Fn() -> String + Send + Sync + 'static,
    {
        Rule { name: name.into(), pattern, production: Box::new(production) }
    }

    /// Produce this rule's response.
    pub fn respond(&self) -> String {
        (self.production)()
    }
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.source())
            .field("production", &"<function>")
            .finish()
    }
}
