//! Pattern compilation and the ordered rule table.
//!
//! This module holds the *static* side of the engine: everything here is
//! built once, before the first message arrives, and never mutated again.
//!
//! 1. **Compile patterns**: every rule's source text is compiled to a `Regex`
//!    exactly once, with the flags chosen by `PatternFlags`. Nothing is
//!    recompiled per request.
//! 2. **Order rules**: `RuleTable` keeps rules in construction order; that
//!    order *is* the priority. The lowest index that matches wins, and later
//!    rules that also match are simply never consulted.
//!
//! ## Matching semantics
//!
//! Patterns are searched, not anchored: `hello|hi` matches anywhere inside
//! the input, and `what.*your.*name` matches when the three fragments appear
//! in that relative order with anything in between.
//!
//! ## Invariants
//!
//! - No rule has an empty pattern (rejected by [`Pattern::new`]).
//! - Duplicate patterns are allowed; the later copy is unreachable.

use crate::{Error, Pattern, Production, Result, Rule};
use chrono::NaiveDateTime;
use chrono::format::{Item, StrftimeItems};
use regex::RegexBuilder;

bitflags::bitflags! {
    /// Compilation flags applied to every pattern in a table.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct PatternFlags: u8 {
        /// Match letters regardless of case, including mixed-case sources.
        const CASE_INSENSITIVE     = 1 << 0;
        /// Let `.` cross line breaks so wildcards span multi-line input.
        const DOT_MATCHES_NEW_LINE = 1 << 1;
    }
}

impl Default for PatternFlags {
    fn default() -> Self {
        PatternFlags::CASE_INSENSITIVE | PatternFlags::DOT_MATCHES_NEW_LINE
    }
}

impl Pattern {
    /// Compile `source` for the rule called `rule`.
    pub fn new(rule: &str, source: &str, flags: PatternFlags) -> Result<Self> {
        if source.is_empty() {
            return Err(Error::EmptyPattern { rule: rule.to_string() });
        }

        let regex = RegexBuilder::new(source)
            .case_insensitive(flags.contains(PatternFlags::CASE_INSENSITIVE))
            .dot_matches_new_line(flags.contains(PatternFlags::DOT_MATCHES_NEW_LINE))
            .build()
            .map_err(|source_err| Error::InvalidPattern { pattern: source.to_string(), source: source_err })?;

        Ok(Pattern { source: source.to_string(), regex })
    }

    /// The text the pattern was written as.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// True when the pattern occurs anywhere in `input`.
    pub fn is_match(&self, input: &str) -> bool {
        self.regex.is_match(input)
    }
}

/// The winning rule for an input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleMatch<'a> {
    /// Position of the rule in its table (its priority).
    pub index: usize,
    pub name: &'a str,
    pub response: String,
}

/// Ordered, read-only set of rules.
#[derive(Debug, Default)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    /// Create a table; `rules[0]` has the highest priority.
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Scan rules in order and return the first one whose pattern occurs in
    /// `input`. `None` is an ordinary outcome, not a failure.
    pub fn find(&self, input: &str) -> Option<RuleMatch<'_>> {
        self.rules.iter().enumerate().find(|(_, rule)| rule.pattern.is_match(input)).map(|(index, rule)| RuleMatch {
            index,
            name: &rule.name,
            response: rule.respond(),
        })
    }

    /// Indices of every rule that matches `input`, highest priority first.
    ///
    /// Only the first entry would ever be used; the rest are shadowed. This is
    /// meant for diagnostics and is not consulted by [`RuleTable::find`].
    pub fn matching(&self, input: &str) -> Vec<usize> {
        self.rules.iter().enumerate().filter(|(_, rule)| rule.pattern.is_match(input)).map(|(idx, _)| idx).collect()
    }
}

/// Producer whose text embeds `reference_time`, formatted once, right now.
///
/// Every `{time}` placeholder in `template` is replaced with the formatted
/// timestamp at construction. The returned producer hands out that same text
/// forever: the time does not advance per call.
pub fn frozen_clock(template: &str, reference_time: NaiveDateTime, format: &str) -> Result<Production> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(Error::InvalidTimeFormat { format: format.to_string() });
    }

    let stamp = reference_time.format_with_items(items.iter()).to_string();
    let text = template.replace("{time}", &stamp);
    Ok(Box::new(move || text.clone()))
}
