//! Trace-driven cache simulator CLI.
//!
//! This binary wires the three external collaborators around the engine:
//! 1. **Configuration:** Reads the parameter file (`parameters.txt` by default, JSON if `.json`).
//! 2. **Trace:** Replays the access trace (`accesses.txt` by default).
//! 3. **Output:** Writes the statistics (`statistics.txt` by default).

use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use cachesim_core::common::SimError;
use cachesim_core::config::defaults;
use cachesim_core::sim::{self, OutputFormat, TraceMode, output};

#[derive(Parser, Debug)]
#[command(
    name = "cachesim",
    author,
    version,
    about = "Trace-driven set-associative cache simulator",
    long_about = "Replay a read/write trace against a configured cache and report hit/miss and write-traffic statistics.\n\nThe parameter file holds five lines: associativity, offset bits, index bits, allocation policy (write-allocate|wa, write-no-allocate|wna) and write policy (write-through|wt, write-back|wb).\n\nExamples:\n  cachesim\n  cachesim -c l1.json -t gcc.trace -o gcc.stats\n  cachesim --strict --format json --print"
)]
struct Cli {
    /// Cache parameter file (five-line form, or JSON with a .json extension).
    #[arg(short, long, default_value = defaults::CONFIG_FILE)]
    config: PathBuf,

    /// Access trace: one `<r|w> <hex address>` record per line.
    #[arg(short, long, default_value = defaults::TRACE_FILE)]
    trace: PathBuf,

    /// Statistics destination; replaced if it exists.
    #[arg(short, long, default_value = defaults::OUTPUT_FILE)]
    output: PathBuf,

    /// Decimal places for the hit rate (trailing zeros are trimmed).
    #[arg(long, default_value_t = defaults::HIT_RATE_PRECISION)]
    precision: usize,

    /// Statistics format: text or json.
    #[arg(long, default_value = "text")]
    format: OutputFormat,

    /// Abort on the first malformed trace record instead of skipping it.
    #[arg(long)]
    strict: bool,

    /// Also print the statistics to stdout.
    #[arg(long)]
    print: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv per-access trace).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only log errors.
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("[!] FATAL: {e}");
        process::exit(1);
    }
}

/// Installs a stderr subscriber at the level chosen by the flags.
fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(level))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Loads the configuration, replays the trace, and writes the statistics.
///
/// Nothing is written unless every earlier stage succeeded.
fn run(cli: &Cli) -> Result<(), SimError> {
    let mode = if cli.strict {
        TraceMode::Strict
    } else {
        TraceMode::Skip
    };

    let report = sim::run_files(&cli.config, &cli.trace, mode)?;
    output::write_report(&cli.output, &report, cli.format, cli.precision)?;
    info!(path = %cli.output.display(), "statistics written");

    if cli.print {
        print!("{}", output::render(&report, cli.format, cli.precision)?);
    }
    Ok(())
}
