/// Build a [`Rule`](crate::Rule) from a pattern source and a producer body.
///
/// The pattern is compiled with the given [`PatternFlags`](crate::PatternFlags)
/// and the whole expression evaluates to `Result<Rule>`, so rule lists can be
/// assembled with `?`.
///
/// ```ignore
/// rule! {
///     name: "greeting",
///     pattern: r"hello|hi",
///     flags: flags,
///     prod: || -> String { "Hi there!".to_string() },
/// }
/// ```
#[macro_export]
macro_rules! rule {
    (
        name: $name:expr,
        pattern: $pat:expr,
        flags: $flags:expr,
        prod: || -> String $body:block
        $(,)?
    ) => {{
        $crate::Pattern::new($name, $pat, $flags)
            .map(|pattern| $crate::Rule::with_producer($name, pattern, move || -> String { $body }))
    }};
    (
        name: $name:expr,
        pattern: $pat:expr,
        flags: $flags:expr,
        respond: $text:expr
        $(,)?
    ) => {{ $crate::Pattern::new($name, $pat, $flags).map(|pattern| $crate::Rule::new($name, pattern, $text)) }};
}
