//! Property-based tests for resolution.
//!
//! These check the resolver's guarantees across generated inputs rather than
//! a handful of hand-picked messages.

use super::*;
use crate::{Context, Error, Options, Pattern, Rule, default_resolver};
use proptest::prelude::*;

// ============================================================================
// Test Helpers
// ============================================================================

fn default_bot() -> ResponseResolver {
    default_resolver(&Context::default(), &Options::default()).unwrap()
}

/// One rule per word, each matching its word literally, in the given order.
fn literal_resolver(words: &[String], fallbacks: &[String]) -> ResponseResolver {
    let rules = words
        .iter()
        .enumerate()
        .map(|(k, word)| {
            let pattern = Pattern::new(word, &regex::escape(word), PatternFlags::default()).unwrap();
            Rule::new(word.clone(), pattern, format!("r{k}"))
        })
        .collect();
    ResponseResolver::new(
        RuleTable::new(rules),
        FallbackCycle::new(fallbacks.iter().cloned()).unwrap(),
        &Options::default(),
    )
}

// ============================================================================
// Arbitrary Generators
// ============================================================================

/// Words that trigger at least one built-in rule.
fn arb_trigger() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![
        "hello", "how are you", "who are you", "what can you do", "what is ai", "define ml", "define dl",
        "tell me a joke", "thank you", "goodbye", "define chatbot", "who made you", "why do you exist",
        "what time is it",
    ])
}

/// ASCII chat text, optionally wrapped around a trigger.
fn arb_message() -> impl Strategy<Value = String> {
    let filler = "[a-zA-Z0-9 ?!',.]{0,20}";
    prop_oneof![
        (filler, arb_trigger(), filler).prop_map(|(pre, trigger, post)| format!("{pre} {trigger} {post}")),
        "[a-zA-Z0-9 ?!',.]{1,40}",
    ]
}

fn arb_whitespace() -> impl Strategy<Value = String> {
    prop::collection::vec(prop::sample::select(vec![' ', '\t', '\n', '\r', '\u{a0}', '\u{2003}', '\u{3000}']), 0..20)
        .prop_map(|chars| chars.into_iter().collect())
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    // Case never changes the answer: two fresh resolvers fed the same text in
    // different case agree, whether a rule or the first fallback answers.
    #[test]
    fn prop_case_insensitive(message in arb_message()) {
        prop_assume!(!message.trim().is_empty());
        let upper = default_bot().resolve_detailed(&message.to_uppercase()).unwrap();
        let lower = default_bot().resolve_detailed(&message.to_lowercase()).unwrap();
        prop_assert_eq!(upper, lower);
    }

    // A matched message gets the same response every time.
    #[test]
    fn prop_matched_path_is_deterministic(message in arb_message(), repeats in 2usize..6) {
        prop_assume!(!message.trim().is_empty());
        let bot = default_bot();
        let first = bot.resolve_detailed(&message).unwrap();
        prop_assume!(first.matched);

        for _ in 0..repeats {
            prop_assert_eq!(&bot.resolve_detailed(&message).unwrap(), &first);
        }
        prop_assert_eq!(bot.fallback().position(), 0);
    }

    // When rules i < j both match, rule j never answers; the earliest matching
    // rule always does.
    #[test]
    fn prop_first_matching_rule_wins(
        words in prop::collection::hash_set("[a-z]{3,6}", 2..8),
        picks in (any::<prop::sample::Index>(), any::<prop::sample::Index>()),
        filler in "[a-z ]{0,8}",
    ) {
        let words: Vec<String> = words.into_iter().collect();
        let (a, b) = (picks.0.index(words.len()), picks.1.index(words.len()));
        prop_assume!(a != b);
        let (i, j) = (a.min(b), a.max(b));

        let bot = literal_resolver(&words, &["F".to_string()]);
        let input = format!("{filler} {} {filler} {}", words[j], words[i]);
        let res = bot.resolve_detailed(&input).unwrap();

        let normalized = input.trim().to_lowercase();
        let expected = words.iter().position(|w| normalized.contains(w.as_str()));
        prop_assert!(res.matched);
        prop_assert_eq!(res.rule_index, expected);
        prop_assert!(res.rule_index.is_some_and(|k| k <= i));
        prop_assert_eq!(res.text, format!("r{}", expected.unwrap_or_default()));
    }

    // Call m that reaches the fallback returns responses[m mod N].
    #[test]
    fn prop_fallback_is_round_robin(
        fallbacks in prop::collection::vec("[a-zA-Z ]{1,10}", 1..8),
        calls in 1usize..40,
    ) {
        let bot = literal_resolver(&[], &fallbacks);
        for m in 0..calls {
            let res = bot.resolve_detailed("unmatched").unwrap();
            prop_assert!(!res.matched);
            prop_assert_eq!(res.fallback_index, Some(m % fallbacks.len()));
            prop_assert_eq!(&res.text, &fallbacks[m % fallbacks.len()]);
        }
    }

    // Whitespace-only input is always EmptyInput, even under a tight length
    // cap, and never moves the fallback cursor.
    #[test]
    fn prop_whitespace_only_is_empty_input(blank in arb_whitespace(), warmup in 0usize..5) {
        let opts = Options { max_input_len: Some(1), ..Options::default() };
        let bot = ResponseResolver::new(
            RuleTable::default(),
            FallbackCycle::new(["A", "B", "C"]).unwrap(),
            &opts,
        );
        for _ in 0..warmup {
            bot.resolve("x").unwrap();
        }
        let before = bot.fallback().position();

        prop_assert!(matches!(bot.resolve(&blank), Err(Error::EmptyInput)));
        prop_assert_eq!(bot.fallback().position(), before);
    }
}
