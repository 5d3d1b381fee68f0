//! Built-in rule set.
//!
//! `chat` holds the default conversation rules and fallback responses used
//! when no rule table is configured.

pub mod chat;

#[cfg(test)]
mod tests;

pub use chat::{DEFAULT_FALLBACKS, default_rules};
