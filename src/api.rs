use crate::engine::{FallbackCycle, PatternFlags, ResolutionMetrics, ResponseResolver, RuleTable};
use crate::{Result, rules};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// Construction context.
///
/// Holds the clock reading used by responses that are computed once while
/// the rule table is built (the "current time" rule).
#[derive(Debug, Clone)]
pub struct Context {
    /// Instant baked into frozen responses.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    fn default() -> Self {
        if cfg!(test) {
            let date = NaiveDate::from_ymd_opt(2013, 2, 12).unwrap_or_default();
            let time = NaiveTime::from_hms_opt(4, 30, 0).unwrap_or_default();
            Self { reference_time: NaiveDateTime::new(date, time) }
        } else {
            Self { reference_time: Local::now().naive_local() }
        }
    }
}

/// Options that affect how rules are compiled and input is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum trimmed input length in characters. `None` is unbounded.
    pub max_input_len: Option<usize>,
    /// Flags used when compiling every pattern.
    pub flags: PatternFlags,
}

impl Default for Options {
    fn default() -> Self {
        Options { max_input_len: None, flags: PatternFlags::default() }
    }
}

/// Outcome of one resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// The response to send back.
    pub text: String,
    /// Whether a rule answered (as opposed to the fallback).
    pub matched: bool,
    /// Index of the winning rule, if any.
    pub rule_index: Option<usize>,
    /// Name of the winning rule, if any.
    pub rule_name: Option<String>,
    /// Fallback slot that answered, if no rule did.
    pub fallback_index: Option<usize>,
}

/// Extra information returned by [`ResponseResolver::resolve_verbose`].
#[derive(Debug, Clone)]
pub struct ResolutionDetails {
    /// Input after trimming and case folding.
    pub normalized: String,
    /// Every rule that matched, in priority order. Only the first one answered.
    pub candidates: Vec<usize>,
    /// Timing measurements for the call.
    pub metrics: ResolutionMetrics,
}

/// Build a resolver over the built-in rule table and fallback list.
///
/// # Example
/// ```
/// use rulechat::{Context, Options, default_resolver};
///
/// let bot = default_resolver(&Context::default(), &Options::default()).unwrap();
/// assert!(bot.resolve("Tell me a joke").unwrap().contains("AI"));
/// assert!(bot.resolve("").is_err());
/// ```
pub fn default_resolver(context: &Context, options: &Options) -> Result<ResponseResolver> {
    let table = RuleTable::new(rules::default_rules(context, options.flags)?);
    let fallback = FallbackCycle::new(rules::DEFAULT_FALLBACKS.iter().copied())?;
    Ok(ResponseResolver::new(table, fallback, options))
}
