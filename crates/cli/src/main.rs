//! Pipeline simulator CLI.
//!
//! This binary provides the entry points for running a trace through the
//! pipeline model. It performs:
//! 1. **Run:** Load the latency configuration and a trace, simulate until the
//!    pipeline drains, and print the report as text or JSON.
//! 2. **Check:** Load and validate both inputs and print them without simulating.

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use pipesim_core::config::Config;
use pipesim_core::isa::Instruction;
use pipesim_core::sim::{Simulator, loader, report};
use pipesim_core::SimError;

/// Configuration file read when `--config` is not given.
const DEFAULT_CONFIG: &str = "config.txt";

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Cycle-accurate in-order pipeline simulator",
    long_about = "Simulate an instruction trace through an IF/ID/EX/MEM/WB pipeline with \
                  FADD/FMUL/FDIV units and report the cycle diagram and hazard statistics.\n\n\
                  Examples:\n  pipesim run -c config.txt trace.dat\n  \
                  pipesim run --format json < trace.dat\n  pipesim check -c latencies.json trace.dat"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). Overrides RUST_LOG.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Simulate a trace and print the report.
    Run {
        /// Latency configuration (`.json` or the three-line text format).
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Instruction trace; read from stdin when omitted.
        trace: Option<PathBuf>,

        /// Output format.
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Validate the configuration and trace without simulating.
    Check {
        /// Latency configuration (`.json` or the three-line text format).
        #[arg(short, long, default_value = DEFAULT_CONFIG)]
        config: PathBuf,

        /// Instruction trace; read from stdin when omitted.
        trace: Option<PathBuf>,
    },
}

/// Report format for `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Configuration, listing, cycle diagram and hazard table.
    Text,
    /// The run results as JSON.
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Run {
            config,
            trace,
            format,
        } => cmd_run(&config, trace.as_deref(), format),
        Commands::Check { config, trace } => cmd_check(&config, trace.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("ERROR: {e}");
        process::exit(1);
    }
}

/// Installs the stderr log subscriber. `-v` flags take precedence over `RUST_LOG`.
fn init_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Loads the configuration and the trace (a file, or stdin when absent).
fn load_inputs(
    config_path: &Path,
    trace: Option<&Path>,
) -> Result<(Config, Vec<Instruction>), SimError> {
    let config = loader::load_config(config_path)?;
    let program = match trace {
        Some(path) => loader::load_trace(path)?,
        None => loader::read_trace(io::stdin().lock())?,
    };
    debug!(
        config = %config_path.display(),
        instructions = program.len(),
        "inputs loaded"
    );
    Ok((config, program))
}

/// Simulates the trace until the pipeline drains and prints the report.
fn cmd_run(config: &Path, trace: Option<&Path>, format: OutputFormat) -> Result<(), SimError> {
    let (config, program) = load_inputs(config, trace)?;
    let result = Simulator::new(&config, program.clone())?.run();

    let text = match format {
        OutputFormat::Text => report::render_report(&config.latency, &program, &result),
        OutputFormat::Json => report::render_json(&result)?,
    };
    emit(&text);
    Ok(())
}

/// Validates both inputs and prints the configuration block and listing.
fn cmd_check(config: &Path, trace: Option<&Path>) -> Result<(), SimError> {
    let (config, program) = load_inputs(config, trace)?;
    // Construction performs the same validation and capacity check as `run`.
    let _ = Simulator::new(&config, program.clone())?;

    let mut text = String::new();
    let _ = report::write_configuration(&mut text, &config.latency);
    let _ = report::write_listing(&mut text, &program);
    text.push_str(&format!("{} instructions OK\n", program.len()));
    emit(&text);
    Ok(())
}

fn emit(text: &str) {
    let mut stdout = io::stdout().lock();
    let _ = stdout.write_all(text.as_bytes());
    let _ = stdout.flush();
}
