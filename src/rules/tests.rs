use crate::rules::chat::{DEFAULT_FALLBACKS, default_rules};
use crate::{Context, Options, RuleTable, default_resolver};
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

fn table() -> RuleTable {
    RuleTable::new(default_rules(&Context::default(), Options::default().flags).unwrap())
}

#[test]
fn default_rule_examples_matching() {
    // Array of (expected rule name, input string)
    let cases: Vec<(&str, &str)> = vec![
        ("greeting", "hello"),
        ("greeting", "Hi!"),
        ("greeting", "hey there"),
        ("greeting", "GREETINGS, bot"),
        ("greeting", "what is machine learning"),
        ("greeting", "is this thing on"),
        ("wellbeing", "how are you"),
        ("wellbeing", "How's it going?"),
        ("wellbeing", "hows it going"),
        ("wellbeing", "how do you do"),
        ("name", "what is your name"),
        ("name", "What's your full name?"),
        ("name", "who are you"),
        ("capabilities", "what can you do"),
        ("capabilities", "list your capabilities"),
        ("capabilities", "I need help"),
        ("ai", "what is ai"),
        ("ai", "define AI"),
        ("ai", "ai meaning"),
        ("machine_learning", "define ml"),
        ("machine_learning", "ml meaning"),
        ("deep_learning", "what is deep learning"),
        ("deep_learning", "define dl"),
        ("joke", "tell me a joke"),
        ("joke", "make me laugh"),
        ("joke", "that was funny"),
        ("current_time", "what time is it"),
        ("current_time", "current time please"),
        ("current_time", "tell me the time"),
        ("thanks", "thank you"),
        ("thanks", "thanks a lot"),
        ("thanks", "I appreciate it"),
        ("farewell", "bye"),
        ("farewell", "goodbye"),
        ("farewell", "see you later"),
        ("farewell", "quit"),
        ("chatbot", "what is chatbot"),
        ("chatbot", "define chatbot"),
        ("creator", "who created you"),
        ("creator", "who made you"),
        ("purpose", "what is your purpose"),
        ("purpose", "why do you exist"),
    ];

    let table = table();
    for (expected, input) in cases {
        let normalized = input.trim().to_lowercase();
        let found = table.find(&normalized).unwrap_or_else(|| panic!("no rule matched {input:?}"));
        assert_eq!(found.name, expected, "input {input:?}");
    }
}

#[test]
fn default_rule_examples_not_matching() {
    let cases = ["xyz", "qwerty", "the weather today", "random words only", "42"];

    let table = table();
    for input in cases {
        assert!(table.find(input).is_none(), "unexpected match for {input:?}");
    }
}

#[test]
fn rule_order_is_stable() {
    let names: Vec<String> = table().rules().iter().map(|r| r.name.clone()).collect();
    assert_eq!(
        names,
        vec![
            "greeting",
            "wellbeing",
            "name",
            "capabilities",
            "ai",
            "machine_learning",
            "deep_learning",
            "joke",
            "current_time",
            "thanks",
            "farewell",
            "chatbot",
            "creator",
            "purpose",
        ]
    );
}

#[test]
fn current_time_is_frozen_at_construction() {
    let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
    let time = NaiveTime::from_hms_opt(23, 5, 9).unwrap();
    let ctx = Context { reference_time: NaiveDateTime::new(date, time) };

    let bot = default_resolver(&ctx, &Options::default()).unwrap();
    let first = bot.resolve("What time is it?").unwrap();
    let second = bot.resolve("tell me the time").unwrap();

    assert_eq!(first, "The current time is 23:05:09");
    assert_eq!(first, second);
}

#[test]
fn default_fallbacks_rotate() {
    let bot = default_resolver(&Context::default(), &Options::default()).unwrap();
    for m in 0..(DEFAULT_FALLBACKS.len() * 2 + 1) {
        assert_eq!(bot.resolve("xyz").unwrap(), DEFAULT_FALLBACKS[m % DEFAULT_FALLBACKS.len()]);
    }
}
