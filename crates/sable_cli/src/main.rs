//! sable: Parse JavaScript files into ESTree JSON.
//!
//! Usage:
//!   sable [options] <file>...
//!
//! Files are parsed in parallel, each into its own arena. Output follows
//! the order of the arguments.

use clap::Parser as ClapParser;
use miette::{Diagnostic, NamedSource, SourceSpan};
use rayon::prelude::*;
use sable_ast::Program;
use sable_core::Allocator;
use sable_diagnostics::ParseError;
use sable_options::{load_options_file, OptionsError, ParseOptions};
use sable_parser::{parse_with_observer, Collector};
use std::path::{Path, PathBuf};
use std::process;
use thiserror::Error;
use tracing::{debug, debug_span};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Recursion in the parser is bounded, but deep inputs still need more
/// than the default thread stack.
const WORKER_STACK_SIZE: usize = 16 * 1024 * 1024;

/// Read when present and no `--config` is given.
const DEFAULT_CONFIG: &str = "sable.json";

#[derive(ClapParser, Debug)]
#[command(name = "sable", version, about = "sable - A fast JavaScript parser producing ESTree JSON")]
struct Cli {
    /// JavaScript files to parse.
    #[arg(value_name = "FILE", required = true)]
    files: Vec<PathBuf>,

    /// Read parse options from a JSON file.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Parse as a module instead of a script.
    #[arg(long)]
    module: bool,

    /// Enable syntax that is not yet standard.
    #[arg(long)]
    next: bool,

    /// Emit `start`, `end` and `range` on every node.
    #[arg(long)]
    ranges: bool,

    /// Emit `loc` line/column information on every node.
    #[arg(long)]
    loc: bool,

    /// Emit `raw` source text on literals.
    #[arg(long)]
    raw: bool,

    /// Keep parenthesized expressions as nodes.
    #[arg(long)]
    preserve_parens: bool,

    /// Accept legacy web syntax (HTML comments, block functions in sloppy mode).
    #[arg(long)]
    web_compat: bool,

    /// Parse JSX markup.
    #[arg(long)]
    jsx: bool,

    /// Reject duplicate keys in destructuring patterns.
    #[arg(long)]
    unique_keys_in_patterns: bool,

    /// Allow `return` at the top level of a script.
    #[arg(long)]
    global_return: bool,

    /// Start scripts in strict mode.
    #[arg(long)]
    implied_strict: bool,

    /// Print regenerated source instead of JSON.
    #[arg(long)]
    print: bool,

    /// Print JSON on a single line.
    #[arg(long)]
    compact: bool,

    /// Include collected comments in the JSON output.
    #[arg(long)]
    comments: bool,

    /// Include consumed tokens in the JSON output.
    #[arg(long)]
    tokens: bool,
}

impl Cli {
    fn flag_options(&self) -> ParseOptions {
        ParseOptions {
            module: self.module,
            next: self.next,
            ranges: self.ranges,
            loc: self.loc,
            raw: self.raw,
            preserve_parens: self.preserve_parens,
            web_compat: self.web_compat,
            jsx: self.jsx,
            unique_keys_in_patterns: self.unique_keys_in_patterns,
            global_return: self.global_return,
            implied_strict: self.implied_strict,
        }
    }
}

/// A syntax error rendered against its source file.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
#[diagnostic(code(sable::syntax))]
struct SyntaxReport {
    message: String,
    #[source_code]
    source_code: NamedSource<String>,
    #[label("here")]
    at: SourceSpan,
}

/// What to do with each program once it parses.
#[derive(Debug, Clone, Copy)]
struct OutputMode {
    print: bool,
    compact: bool,
    comments: bool,
    tokens: bool,
}

enum Outcome {
    Output(String),
    Syntax(miette::Report),
    Failed(String),
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let exit_code = run(&cli);
    process::exit(exit_code);
}

fn run(cli: &Cli) -> i32 {
    let options = match resolve_options(cli) {
        Ok(options) => options,
        Err(err) => {
            print_error(&err.to_string());
            return 2;
        }
    };
    let mode = OutputMode {
        print: cli.print,
        compact: cli.compact,
        comments: cli.comments,
        tokens: cli.tokens,
    };

    let pool = match rayon::ThreadPoolBuilder::new().stack_size(WORKER_STACK_SIZE).build() {
        Ok(pool) => pool,
        Err(err) => {
            print_error(&format!("cannot start worker threads: {err}"));
            return 2;
        }
    };
    debug!(files = cli.files.len(), module = options.module, "parsing");
    let outcomes: Vec<Outcome> =
        pool.install(|| cli.files.par_iter().map(|path| process_file(path, options, mode)).collect());

    let mut exit_code = 0;
    for outcome in outcomes {
        match outcome {
            Outcome::Output(text) => print!("{text}"),
            Outcome::Syntax(report) => {
                eprintln!("{report:?}");
                exit_code = exit_code.max(1);
            }
            Outcome::Failed(message) => {
                print_error(&message);
                exit_code = 2;
            }
        }
    }
    exit_code
}

/// Options from the config file, with command-line flags set on top.
fn resolve_options(cli: &Cli) -> Result<ParseOptions, OptionsError> {
    let mut options = match &cli.config {
        Some(path) => load_options_file(path)?,
        None if Path::new(DEFAULT_CONFIG).is_file() => load_options_file(DEFAULT_CONFIG)?,
        None => ParseOptions::default(),
    };
    options.merge(&cli.flag_options());
    Ok(options)
}

fn process_file(path: &Path, options: ParseOptions, mode: OutputMode) -> Outcome {
    let _span = debug_span!("file", path = %path.display()).entered();
    let source = match std::fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => return Outcome::Failed(format!("cannot read {}: {err}", path.display())),
    };

    let arena = Allocator::new();
    let mut collector = Collector::new();
    let program = match parse_with_observer(&arena, &source, options, &mut collector) {
        Ok(program) => program,
        Err(err) => {
            debug!(code = err.code, offset = err.offset, "parse failed");
            return Outcome::Syntax(syntax_report(path, &source, &err));
        }
    };

    if mode.print {
        return Outcome::Output(sable_printer::print(&program));
    }

    match to_json(&program, &collector, mode) {
        Ok(text) => Outcome::Output(text),
        Err(err) => Outcome::Failed(format!("cannot serialize {}: {err}", path.display())),
    }
}

fn to_json(program: &Program<'_>, collector: &Collector<'_>, mode: OutputMode) -> serde_json::Result<String> {
    let mut value = serde_json::to_value(program)?;
    if let Some(map) = value.as_object_mut() {
        if mode.comments {
            map.insert("comments".to_string(), serde_json::to_value(&collector.comments)?);
        }
        if mode.tokens {
            map.insert("tokens".to_string(), serde_json::to_value(&collector.tokens)?);
        }
    }
    let mut text = if mode.compact {
        serde_json::to_string(&value)?
    } else {
        serde_json::to_string_pretty(&value)?
    };
    text.push('\n');
    Ok(text)
}

fn syntax_report(path: &Path, source: &str, err: &ParseError) -> miette::Report {
    let offset = err.offset as usize;
    let width = source
        .get(offset..)
        .and_then(|rest| rest.chars().next())
        .map_or(0, char::len_utf8);
    miette::Report::new(SyntaxReport {
        message: err.to_string(),
        source_code: NamedSource::new(path.display().to_string(), source.to_string()),
        at: (offset.min(source.len()), width).into(),
    })
}

fn print_error(msg: &str) {
    eprintln!("error: {msg}");
}
