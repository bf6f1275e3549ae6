//! Purpose: `linesort` CLI entry point.
//! Role: Binary crate root; parses args, runs the sort pipeline, reports metrics on stdout.
//! Invariants: Informational progress goes to stdout; diagnostics and logs go to stderr.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
#![allow(clippy::result_large_err)]
use std::ffi::OsString;
use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, ValueEnum, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use std::error::Error as StdError;
use tracing_subscriber::EnvFilter;

mod progress;

use linesort::core::error::{Error, ErrorKind, to_exit_code};
use linesort::core::line_reader::LineLimit;
use linesort::core::pipeline::{SortJob, run_observed};
use progress::{JsonProgress, TextProgress};

fn main() {
    init_tracing();
    let exit_code = match run(std::env::args_os()) {
        Ok(()) => 0,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run<I>(args: I) -> Result<(), (Error, ColorMode)>
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                return Ok(());
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage)
                        .with_message(clap_error_summary(&err))
                        .with_hint(clap_error_hint(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    let job = cli.job();
    let result = if cli.json {
        let mut progress = JsonProgress;
        run_observed(&job, &mut progress).and_then(|report| progress.finish(&report))
    } else {
        let mut progress = TextProgress::new(cli.print);
        run_observed(&job, &mut progress).map(|_| ())
    };

    result
        .map_err(add_io_hint)
        .map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "linesort",
    version,
    about = "Sort the records of a count-prefixed text file",
    long_about = None,
    after_help = r#"FILE FORMAT
  The first line holds the number of records; each following line is one record.
  Lines past the declared count are ignored.

EXAMPLES
  $ printf '3\nbanana\napple\ncherry\n' > fruit.txt
  $ linesort fruit.txt sorted.txt
  $ linesort --json fruit.txt sorted.txt

EXIT CODES
  0 ok, 1 bad arguments or unopenable file, 2 empty input, 3 malformed count,
  4 allocation failure, 5 fewer records than declared, 6 read/write failure"#
)]
struct Cli {
    #[arg(value_name = "INPUT", help = "Count-prefixed file to sort", value_hint = ValueHint::FilePath)]
    input: PathBuf,
    #[arg(value_name = "OUTPUT", help = "Destination for the sorted file", value_hint = ValueHint::FilePath)]
    output: PathBuf,
    #[arg(long, help = "Emit the run report as one JSON line instead of text")]
    json: bool,
    #[arg(
        long,
        value_name = "BYTES",
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "128",
        value_parser = clap::value_parser!(u64).range(2..),
        help = "Read with a fixed line buffer (terminator included); longer lines split into several records"
    )]
    legacy_line_buffer: Option<u64>,
    #[arg(
        long,
        conflicts_with = "json",
        help = "Print the sorted records to stdout before writing"
    )]
    print: bool,
    #[arg(
        long,
        default_value = "auto",
        help = "Colorize error labels (auto|always|never)"
    )]
    color: ColorMode,
}

impl Cli {
    fn job(&self) -> SortJob {
        let line_limit = match self.legacy_line_buffer {
            Some(bytes) => LineLimit::Legacy {
                buffer_len: usize::try_from(bytes).unwrap_or(usize::MAX),
            },
            None => LineLimit::Unbounded,
        };
        SortJob::new(&self.input, &self.output).with_line_limit(line_limit)
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn add_io_hint(err: Error) -> Error {
    if err.hint().is_some() {
        return err;
    }
    match err.kind() {
        ErrorKind::Io => err.with_hint("I/O error. Check the path, filesystem, and disk space."),
        ErrorKind::Allocation => {
            err.with_hint("Not enough memory for the declared record count. Check the first line.")
        }
        _ => err,
    }
}

#[derive(Copy, Clone)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Usage => "expected an input file and an output file".to_string(),
        ErrorKind::FileOpen => "cannot open file".to_string(),
        ErrorKind::EmptyInput => "input file seems to be empty".to_string(),
        ErrorKind::MalformedHeader => "input file does not start with an item count".to_string(),
        ErrorKind::Allocation => "not enough memory for the declared records".to_string(),
        ErrorKind::MissingLines => "input file has fewer records than its count".to_string(),
        ErrorKind::Io => "failed to read or write records".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    std::iter::successors(err.source(), |&source| source.source())
        .map(ToString::to_string)
        .collect()
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(line) = err.line() {
        inner.insert("line".to_string(), json!(line));
    }
    if let Some((declared, read)) = err.counts() {
        inner.insert("declared".to_string(), json!(declared));
        inner.insert("read".to_string(), json!(read));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    if let Some(line) = err.line() {
        lines.push(format!(
            "{} {line}",
            colorize_label("line:", use_color, AnsiColor::Yellow)
        ));
    }

    let causes = error_causes(err);
    if let Some(cause) = causes.first() {
        lines.push(format!(
            "{} {cause}",
            colorize_label("caused by:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    rendered
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| line.strip_prefix("error:").unwrap_or(line).trim().to_string())
        .unwrap_or_else(|| "invalid arguments".to_string())
}

fn clap_error_hint(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let usage = rendered
        .lines()
        .find_map(|line| line.trim().strip_prefix("Usage: "))
        .map(str::trim);
    match usage {
        Some(usage) => format!("Usage: {usage}. Try `linesort --help`."),
        None => "Usage: linesort <INPUT> <OUTPUT>. Try `linesort --help`.".to_string(),
    }
}
