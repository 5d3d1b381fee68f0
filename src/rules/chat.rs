use crate::{Context, PatternFlags, Result, Rule, frozen_clock};

/// Format used for the frozen "current time" response.
pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Responses rotated through when nothing matches.
pub const DEFAULT_FALLBACKS: &[&str] = &[
    "I'm not sure how to respond to that. Could you rephrase your question?",
    "That's an interesting question! Can you provide more details?",
    "I don't have information about that. Try asking me something else!",
    "I'm still learning. Can you ask something I might know better?",
];

/// The default rules, highest priority first.
///
/// Patterns are searched as substrings, so earlier rules shadow later ones
/// aggressively: anything containing "hi" (including "machine" or "this") is
/// answered as a greeting.
pub fn default_rules(context: &Context, flags: PatternFlags) -> Result<Vec<Rule>> {
    Ok(vec![
        canned(
            "greeting",
            r"hello|hi|hey|greetings",
            "Hello! Welcome to our AI assistant. How can I help you today?",
            flags,
        )?,
        canned(
            "wellbeing",
            r"how are you|how'?s it going|how do you do",
            "I'm doing great, thank you for asking! I'm here to assist you. How can I help?",
            flags,
        )?,
        canned(
            "name",
            r"what.*your.*name|who are you",
            "I'm a rule-based chatbot. You can call me ChatBot!",
            flags,
        )?,
        canned(
            "capabilities",
            r"what can you do|capabilities|help",
            "I can answer questions about AI, help with greetings, answer trivia, and provide general information.",
            flags,
        )?,
        canned(
            "ai",
            r"what is ai|define ai|ai meaning",
            "AI (Artificial Intelligence) is the simulation of human intelligence by machines, especially computer \
             systems. It includes learning, reasoning, and problem-solving.",
            flags,
        )?,
        canned(
            "machine_learning",
            r"what is machine learning|define ml|ml meaning",
            "Machine Learning is a subset of AI that enables systems to learn and improve from experience without \
             being explicitly programmed.",
            flags,
        )?,
        canned(
            "deep_learning",
            r"what is deep learning|define dl",
            "Deep Learning is a subset of Machine Learning using neural networks with multiple layers to process data.",
            flags,
        )?,
        canned(
            "joke",
            r"tell me a joke|make me laugh|funny",
            "Why did the AI go to school? To improve its learning model! 😄",
            flags,
        )?,
        rule_current_time(context, flags)?,
        canned(
            "thanks",
            r"thank you|thanks|appreciate|thank",
            "You're welcome! Happy to help. Is there anything else you'd like to know?",
            flags,
        )?,
        canned(
            "farewell",
            r"bye|goodbye|see you|exit|quit",
            "Goodbye! Have a great day. Feel free to come back anytime!",
            flags,
        )?,
        canned(
            "chatbot",
            r"what is chatbot|define chatbot",
            "A chatbot is a software application that simulates conversation with users through text or voice \
             interactions.",
            flags,
        )?,
        canned(
            "creator",
            r"who created you|who made you|your creator",
            "I was built as a small rule-based chatbot demo.",
            flags,
        )?,
        canned(
            "purpose",
            r"what is your purpose|why do you exist",
            "My purpose is to demonstrate rule-based chatbot design and to assist users with their queries.",
            flags,
        )?,
    ])
}

/// "What time is it": answers with `context.reference_time`, formatted once
/// while the table is built. The reported time never advances.
pub fn rule_current_time(context: &Context, flags: PatternFlags) -> Result<Rule> {
    let clock = frozen_clock("The current time is {time}", context.reference_time, TIME_FORMAT)?;
    rule! {
        name: "current_time",
        pattern: r"current time|what time is it|tell me the time",
        flags: flags,
        prod: || -> String { clock() },
    }
}

fn canned(name: &str, pattern: &str, response: &str, flags: PatternFlags) -> Result<Rule> {
    rule! {
        name: name,
        pattern: pattern,
        flags: flags,
        respond: response,
    }
}
