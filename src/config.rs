//! Rule-set configuration.
//!
//! A resolver can be described as JSON instead of being assembled in code:
//!
//! ```json
//! {
//!   "rules": [
//!     { "name": "greeting", "pattern": "hello|hi", "response": "Hi there!" },
//!     { "pattern": "what time", "response": "It is {time}." }
//!   ],
//!   "fallbacks": ["A", "B"],
//!   "max_input_len": 1000,
//!   "case_insensitive": true,
//!   "time_format": "%H:%M"
//! }
//! ```
//!
//! `{time}` in a response is replaced once, when the resolver is built, with
//! the context's reference time. Rules keep the order they are listed in.

use crate::{
    Context, Error, FallbackCycle, Options, Pattern, PatternFlags, ResponseResolver, Result, Rule, RuleTable,
    frozen_clock,
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

const TIME_PLACEHOLDER: &str = "{time}";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleConfig {
    /// Defaults to `rule_<index>`.
    #[serde(default)]
    pub name: Option<String>,
    pub pattern: String,
    pub response: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RuleSetConfig {
    pub rules: Vec<RuleConfig>,
    pub fallbacks: Vec<String>,
    #[serde(default)]
    pub max_input_len: Option<usize>,
    #[serde(default = "default_case_insensitive")]
    pub case_insensitive: bool,
    #[serde(default = "default_time_format")]
    pub time_format: String,
}

fn default_case_insensitive() -> bool {
    true
}

fn default_time_format() -> String {
    crate::rules::chat::TIME_FORMAT.to_string()
}

impl RuleSetConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        debug!(path = %path.as_ref().display(), "loaded rule configuration");
        Self::from_json_str(&text)
    }

    /// Options implied by this configuration.
    pub fn options(&self) -> Options {
        let mut flags = PatternFlags::default();
        flags.set(PatternFlags::CASE_INSENSITIVE, self.case_insensitive);
        Options { max_input_len: self.max_input_len, flags }
    }

    /// Compile every rule and build a resolver.
    pub fn build(&self, context: &Context) -> Result<ResponseResolver> {
        let options = self.options();

        let rules = self
            .rules
            .iter()
            .enumerate()
            .map(|(idx, cfg)| self.build_rule(idx, cfg, context, options.flags))
            .collect::<Result<Vec<Rule>>>()?;

        let fallback = FallbackCycle::new(self.fallbacks.iter().cloned())?;
        Ok(ResponseResolver::new(RuleTable::new(rules), fallback, &options))
    }

    fn build_rule(&self, idx: usize, cfg: &RuleConfig, context: &Context, flags: PatternFlags) -> Result<Rule> {
        let name = cfg.name.clone().unwrap_or_else(|| format!("rule_{idx}"));
        let pattern = Pattern::new(&name, &cfg.pattern, flags)?;

        if cfg.response.contains(TIME_PLACEHOLDER) {
            let clock = frozen_clock(&cfg.response, context.reference_time, &self.time_format)?;
            Ok(Rule::with_producer(name, pattern, clock))
        } else {
            Ok(Rule::new(name, pattern, cfg.response.clone()))
        }
    }
}

impl std::str::FromStr for RuleSetConfig {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "rules": [
            { "name": "greeting", "pattern": "hello|hi", "response": "Hi there!" },
            { "pattern": "what time", "response": "It is {time}." }
        ],
        "fallbacks": ["A", "B"],
        "time_format": "%H:%M"
    }"#;

    #[test]
    fn parses_with_defaults() {
        let cfg = RuleSetConfig::from_json_str(SAMPLE).unwrap();
        assert_eq!(cfg.rules.len(), 2);
        assert_eq!(cfg.max_input_len, None);
        assert!(cfg.case_insensitive);
        assert_eq!(cfg.rules[1].name, None);
    }

    #[test]
    fn builds_a_working_resolver() {
        let bot = SAMPLE.parse::<RuleSetConfig>().unwrap().build(&Context::default()).unwrap();
        assert_eq!(bot.rule_count(), 2);
        assert_eq!(bot.resolve("Hello!").unwrap(), "Hi there!");
        assert_eq!(bot.resolve("xyz").unwrap(), "A");
        assert_eq!(bot.resolve("xyz").unwrap(), "B");
        assert_eq!(bot.resolve("xyz").unwrap(), "A");
    }

    #[test]
    fn time_placeholder_is_frozen() {
        let bot = RuleSetConfig::from_json_str(SAMPLE).unwrap().build(&Context::default()).unwrap();
        let res = bot.resolve_detailed("WHAT TIME is it").unwrap();
        assert_eq!(res.text, "It is 04:30.");
        assert_eq!(res.rule_name.as_deref(), Some("rule_1"));
    }

    #[test]
    fn case_sensitive_when_disabled() {
        let json = r#"{
            "rules": [{ "pattern": "Hello", "response": "hi" }],
            "fallbacks": ["F"],
            "case_insensitive": false
        }"#;
        let bot = RuleSetConfig::from_json_str(json).unwrap().build(&Context::default()).unwrap();
        // Input is lowercased before matching, so an uppercase literal can never match.
        assert_eq!(bot.resolve("Hello").unwrap(), "F");
    }

    #[test]
    fn length_cap_is_applied() {
        let json = r#"{ "rules": [], "fallbacks": ["F"], "max_input_len": 3 }"#;
        let bot = RuleSetConfig::from_json_str(json).unwrap().build(&Context::default()).unwrap();
        assert!(matches!(bot.resolve("abcd"), Err(Error::InputTooLong { len: 4, max: 3 })));
        assert_eq!(bot.max_input_len(), Some(3));
    }

    #[test]
    fn construction_errors_surface() {
        let no_fallbacks = r#"{ "rules": [], "fallbacks": [] }"#;
        let err = RuleSetConfig::from_json_str(no_fallbacks).unwrap().build(&Context::default()).unwrap_err();
        assert!(matches!(err, Error::NoFallbacks));

        let empty = r#"{ "rules": [{ "name": "blank", "pattern": "", "response": "x" }], "fallbacks": ["F"] }"#;
        let err = RuleSetConfig::from_json_str(empty).unwrap().build(&Context::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyPattern { ref rule } if rule == "blank"));

        assert!(matches!(RuleSetConfig::from_json_str("{"), Err(Error::Config(_))));
        assert!(matches!(RuleSetConfig::from_path("/nonexistent/rules.json"), Err(Error::Io(_))));
    }
}
