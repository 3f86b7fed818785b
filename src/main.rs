
use dimsolve::runner::{Session, SessionOptions};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

/// Answer dimensional-analysis queries from known measurements.
///
/// Each input line is either a measurement such as `3 m/s`, which
/// becomes known, or a unit such as `s`, whose value is printed if it
/// can be derived from what is known so far.
#[derive(Parser)]
#[command(name = "dimsolve", version)]
struct Args {
  /// Input files, processed in order as a single problem. Reads
  /// standard input if none are given, or for `-`.
  inputs: Vec<PathBuf>,

  /// Print the unit after each value.
  #[arg(long)]
  echo: bool,

  /// Increase log verbosity (repeatable). Overrides `RUST_LOG`.
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn init_logging(verbose: u8) {
  let filter = match verbose {
    0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    1 => EnvFilter::new("info"),
    2 => EnvFilter::new("debug"),
    _ => EnvFilter::new("trace"),
  };
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(io::stderr)
    .with_target(false)
    .init();
}

fn main() -> Result<()> {
  let args = Args::parse();
  init_logging(args.verbose);

  let mut session = Session::new(SessionOptions { echo_units: args.echo });
  let stdout = io::stdout();
  if args.inputs.is_empty() {
    session.run(io::stdin().lock(), stdout.lock())?;
  }
  for path in &args.inputs {
    if path.as_os_str() == "-" {
      session.run(io::stdin().lock(), stdout.lock())?;
    } else {
      let file = File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
      session.run(BufReader::new(file), stdout.lock())
        .with_context(|| format!("Failed to read {}", path.display()))?;
    }
  }
  Ok(())
}
