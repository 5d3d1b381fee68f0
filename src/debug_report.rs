use rulechat::{Resolution, ResolutionDetails, RuleTable};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_run(input: &str, resolution: &Resolution, details: &ResolutionDetails, table: &RuleTable, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Resolving: \"{}\"", input.trim()), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Normalized ━━━", ansi::GRAY));
    println!("  {}", palette.paint(format!("\"{}\"", details.normalized), ansi::YELLOW));

    println!("\n{}", palette.paint("━━━ Rules ━━━", ansi::GRAY));
    if details.candidates.is_empty() {
        println!("{}", palette.dim(format!("  No rule matched ({} rules checked)", table.len())));
    } else {
        print_candidates(details, table, &palette);
    }

    println!("\n{}", palette.paint("━━━ Response ━━━", ansi::GRAY));
    print_response(resolution, &palette);

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!(
        "  Total: {}  │  Normalize: {}  │  Matching: {}",
        palette.paint(format!("{:?}", details.metrics.total), ansi::GREEN),
        palette.paint(format!("{:?}", details.metrics.normalize), ansi::CYAN),
        palette.dim(format!("{:?}", details.metrics.matching)),
    );
    println!();
}

fn print_candidates(details: &ResolutionDetails, table: &RuleTable, palette: &ansi::Palette) {
    for (pos, &idx) in details.candidates.iter().enumerate() {
        let Some(rule) = table.rules().get(idx) else {
            continue;
        };

        let verdict = if pos == 0 { palette.paint("✓ wins", ansi::GREEN) } else { palette.dim("✗ shadowed") };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{}]", idx), ansi::GRAY),
            palette.paint(&rule.name, ansi::BLUE),
            palette.dim(format!("/{}/", rule.pattern.source())),
            verdict,
        );
    }
}

fn print_response(resolution: &Resolution, palette: &ansi::Palette) {
    println!("  {}", palette.bold(palette.paint(&resolution.text, ansi::GREEN)));

    let source = match (&resolution.rule_name, resolution.rule_index, resolution.fallback_index) {
        (Some(name), Some(idx), _) => format!("rule [{}] {}", idx, name),
        (_, _, Some(slot)) => format!("fallback #{}", slot),
        _ => "unknown".to_string(),
    };
    println!("      {} {}", palette.dim("source:"), palette.paint(source, ansi::CYAN));
}
