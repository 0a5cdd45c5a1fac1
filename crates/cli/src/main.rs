//! Cache simulator CLI.
//!
//! Replays a valgrind memory trace against an `(s, E, b)` set-associative LRU
//! cache and prints `hits:H misses:M evictions:E`. The flags follow the
//! cache-lab reference tool:
//! 1. **Geometry:** `-s`, `-E`, `-b`, optionally seeded from a JSON `--config` file.
//! 2. **Input:** `-t <file>`, the trace to replay.
//! 3. **Output:** `-v` echoes every data record with its outcome; `--json` and
//!    `--results` change how the final counters are reported.
//!
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG=info` (or `debug`
//! to see skipped trace lines).

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{CommandFactory, Parser};
use tracing::info;
use tracing_subscriber::EnvFilter;

use csim_core::config::GeometryConfig;
use csim_core::{ConfigError, SimError, Simulator, TraceReader};

#[derive(Parser, Debug)]
#[command(
    name = "csim",
    author,
    version,
    about = "Trace-driven set-associative LRU cache simulator",
    long_about = "Replay a valgrind memory trace against an (s, E, b) cache and count hits, misses and evictions.\n\nExamples:\n  csim -s 4 -E 1 -b 4 -t traces/yi.trace\n  csim -v -s 8 -E 2 -b 4 -t traces/yi.trace\n  csim --config l1.json -t traces/trans.trace --json"
)]
struct Cli {
    /// Echo each data record followed by its hit/miss/eviction outcome.
    #[arg(short, long)]
    verbose: bool,

    /// Number of set index bits (2^s sets).
    #[arg(short = 's', value_name = "num")]
    set_index_bits: Option<u32>,

    /// Number of lines per set (associativity).
    #[arg(short = 'E', value_name = "num")]
    lines_per_set: Option<usize>,

    /// Number of block offset bits (2^b bytes per block).
    #[arg(short = 'b', value_name = "num")]
    block_offset_bits: Option<u32>,

    /// Trace file to replay.
    #[arg(short = 't', value_name = "file")]
    trace: Option<PathBuf>,

    /// JSON file supplying any of set_index_bits, lines_per_set, block_offset_bits; flags override it.
    #[arg(long, value_name = "file")]
    config: Option<PathBuf>,

    /// Print the final counters as JSON instead of the summary line.
    #[arg(long)]
    json: bool,

    /// Also write "hits misses evictions" to this file.
    #[arg(long, value_name = "file")]
    results: Option<PathBuf>,
}

impl Cli {
    /// Geometry values given on the command line.
    const fn geometry_overrides(&self) -> GeometryConfig {
        GeometryConfig {
            set_index_bits: self.set_index_bits,
            lines_per_set: self.lines_per_set,
            block_offset_bits: self.block_offset_bits,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("csim: {e}");
            if matches!(e, SimError::Config(_)) {
                eprintln!("{}", Cli::command().render_usage());
            }
            ExitCode::FAILURE
        }
    }
}

/// Installs a stderr `fmt` subscriber filtered by `RUST_LOG` (default `warn`).
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Validates the configuration, replays the trace and reports the counters.
///
/// Nothing is printed to stdout unless the whole trace was consumed.
fn run(cli: &Cli) -> Result<(), SimError> {
    let file_config = cli
        .config
        .as_deref()
        .map(GeometryConfig::from_file)
        .transpose()?
        .unwrap_or_default();
    let geometry = file_config.merge(cli.geometry_overrides()).resolve()?;
    let trace_path = cli.trace.as_deref().ok_or(ConfigError::MissingTrace)?;

    let mut reader = TraceReader::open(trace_path)?;
    let mut sim = Simulator::new(geometry)?;
    info!(
        sets = geometry.set_count(),
        block_bytes = geometry.block_bytes(),
        "cache initialized"
    );

    let verbose = cli.verbose;
    let _ = sim.replay(&mut reader, |record, outcome| {
        if verbose {
            println!("{record} {outcome}");
        }
    })?;
    let stats = sim.finish();

    if let Some(path) = &cli.results {
        stats
            .write_results(path)
            .map_err(|source| SimError::OutputFailed {
                path: path.clone(),
                source,
            })?;
    }

    if cli.json {
        let report = serde_json::json!({
            "geometry": geometry,
            "stats": stats.report(),
        });
        println!("{report:#}");
    } else {
        stats.print_summary();
    }
    Ok(())
}
