mod debug_report;

use rulechat::config::RuleSetConfig;
use rulechat::server::{self, DEFAULT_ADDR, DEFAULT_MAX_MESSAGE_LEN, ServerConfig};
use rulechat::{Context, Options, ResponseResolver, default_resolver};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "RULECHAT_LOG";

fn main() {
    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    init_logging(&config.mode);

    let resolver = match build_resolver(&config) {
        Ok(resolver) => resolver,
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    };

    match &config.mode {
        Mode::Serve { addr } => {
            let server_config = ServerConfig {
                addr: addr.clone(),
                max_message_len: Some(config.max_len.unwrap_or(DEFAULT_MAX_MESSAGE_LEN)),
            };
            if let Err(err) = run_server(resolver, server_config) {
                eprintln!("error: {err}");
                std::process::exit(1);
            }
        }
        Mode::Resolve { input } => match resolver.resolve_verbose(input) {
            Ok((resolution, details)) => {
                debug_report::print_run(input, &resolution, &details, resolver.table(), config.color);
            }
            Err(err) => {
                eprintln!("error: {err}");
                std::process::exit(if err.is_validation() { 2 } else { 1 });
            }
        },
    }
}

enum Mode {
    Resolve { input: String },
    Serve { addr: String },
}

struct CliConfig {
    mode: Mode,
    rules: Option<PathBuf>,
    max_len: Option<usize>,
    color: bool,
}

fn init_logging(mode: &Mode) {
    let default_level = match mode {
        Mode::Serve { .. } => "info",
        Mode::Resolve { .. } => "warn",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(io::stderr).init();
}

fn build_resolver(config: &CliConfig) -> rulechat::Result<ResponseResolver> {
    let context = Context::default();
    match &config.rules {
        Some(path) => {
            let mut rule_set = RuleSetConfig::from_path(path)?;
            if config.max_len.is_some() {
                rule_set.max_input_len = config.max_len;
            }
            rule_set.build(&context)
        }
        None => default_resolver(&context, &Options { max_input_len: config.max_len, ..Options::default() }),
    }
}

fn run_server(resolver: ResponseResolver, config: ServerConfig) -> rulechat::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread().enable_all().build()?;
    runtime.block_on(server::serve(Arc::new(resolver), config))
}

fn parse_args() -> Result<CliConfig, String> {
    let mut input: Option<String> = None;
    let mut serve = false;
    let mut addr = DEFAULT_ADDR.to_string();
    let mut rules: Option<PathBuf> = None;
    let mut max_len: Option<usize> = None;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("rulechat {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--serve" => serve = true,
            "--addr" => {
                addr = args.next().ok_or_else(|| "error: --addr expects a value".to_string())?;
            }
            "--rules" => {
                let value = args.next().ok_or_else(|| "error: --rules expects a value".to_string())?;
                rules = Some(PathBuf::from(value));
            }
            "--max-len" => {
                let value = args.next().ok_or_else(|| "error: --max-len expects a value".to_string())?;
                max_len = Some(parse_max_len(&value)?);
            }
            "--input" | "-i" => {
                let value = args.next().ok_or_else(|| "error: --input expects a value".to_string())?;
                set_input(&mut input, value)?;
            }
            "--" => {
                let rest = args.collect::<Vec<_>>().join(" ");
                if !rest.trim().is_empty() {
                    set_input(&mut input, rest)?;
                }
                break;
            }
            _ if arg.starts_with("--addr=") => addr = arg.trim_start_matches("--addr=").to_string(),
            _ if arg.starts_with("--rules=") => rules = Some(PathBuf::from(arg.trim_start_matches("--rules="))),
            _ if arg.starts_with("--max-len=") => max_len = Some(parse_max_len(arg.trim_start_matches("--max-len="))?),
            _ if arg.starts_with("--input=") => set_input(&mut input, arg.trim_start_matches("--input=").to_string())?,
            _ if arg.starts_with('-') => {
                return Err(format!("error: unknown option '{arg}'"));
            }
            _ => {
                let rest = std::iter::once(arg).chain(args).collect::<Vec<_>>().join(" ");
                set_input(&mut input, rest)?;
                break;
            }
        }
    }

    let mode = if serve {
        if input.is_some() {
            return Err("error: --serve does not take an input message".to_string());
        }
        Mode::Serve { addr }
    } else {
        let input = match input {
            Some(value) => value,
            None => read_stdin_input()?,
        };
        if input.trim().is_empty() {
            return Err(format!("error: no input provided\n\n{}", help_text()));
        }
        Mode::Resolve { input }
    };

    Ok(CliConfig { mode, rules, max_len, color })
}

fn set_input(slot: &mut Option<String>, value: String) -> Result<(), String> {
    if slot.is_some() {
        return Err("error: input provided multiple times".to_string());
    }
    *slot = Some(value);
    Ok(())
}

fn parse_max_len(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!("error: invalid --max-len '{value}' (expected a positive integer)")),
    }
}

fn read_stdin_input() -> Result<String, String> {
    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
    Ok(buffer)
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "rulechat {version}

Rule-based chatbot: resolve one message, or serve the JSON API.

Usage:
  rulechat [OPTIONS] [--] <message...>
  rulechat [OPTIONS] --input <text>
  rulechat [OPTIONS] --serve [--addr <host:port>]

Options:
  -i, --input <text>         Message to resolve. If omitted, reads remaining args
                             or stdin when no args are provided.
  --rules <file>             Load rules and fallbacks from a JSON file instead
                             of the built-in set.
  --max-len <n>              Reject messages longer than n characters.
                             Default: unbounded (HTTP: {max_len}).
  --serve                    Run the HTTP API instead of resolving one message.
  --addr <host:port>         Listen address for --serve. Default: {addr}
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {log_env}                Log filter (e.g. 'debug', 'rulechat=debug').

Exit codes:
  0  Success.
  1  Internal or configuration error.
  2  Invalid arguments, missing input, or rejected message.
",
        version = env!("CARGO_PKG_VERSION"),
        max_len = DEFAULT_MAX_MESSAGE_LEN,
        addr = DEFAULT_ADDR,
        log_env = LOG_ENV,
    )
}
