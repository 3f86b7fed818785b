
//! Line-oriented driver: each input line either teaches the problem
//! a new measurement or asks it for one.

use crate::error::Error;
use crate::measurement::Measurement;
use crate::problem::Problem;
use crate::units::parsing::parse_unit;
use crate::units::vector::DimensionVector;

use tracing::{info, warn};

use std::io::{self, BufRead, Write};

/// Output options for a [`Session`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionOptions {
  /// Print the unit after each answered value, rather than the bare
  /// value.
  pub echo_units: bool,
}

/// A single problem, fed one line at a time.
#[derive(Debug, Clone, Default)]
pub struct Session {
  problem: Problem,
  options: SessionOptions,
}

/// What happened to a single input line.
#[derive(Debug, Clone, PartialEq)]
pub enum LineOutcome {
  /// The line was blank.
  Blank,
  /// The line was a measurement and is now known.
  Added,
  /// The line was a unit, and a measurement for it is known.
  Answered(Measurement),
  /// The line was a unit, but nothing is known for it.
  Unanswered(DimensionVector),
  /// The line could not be used. The line as a whole has no effect.
  Skipped(Error),
}

impl Session {
  pub fn new(options: SessionOptions) -> Self {
    Self { problem: Problem::new(), options }
  }

  pub fn problem(&self) -> &Problem {
    &self.problem
  }

  /// Processes one line. The line is first read as a measurement; if
  /// that fails, it is read as a unit to look up. A line which is
  /// neither is skipped, and a measurement which duplicates a known
  /// unit is skipped as well.
  pub fn process_line(&mut self, line: &str) -> LineOutcome {
    let line = line.trim();
    if line.is_empty() {
      return LineOutcome::Blank;
    }
    match Measurement::parse(line) {
      Ok(measurement) => {
        match self.problem.add(measurement) {
          Ok(()) => LineOutcome::Added,
          Err(err) => LineOutcome::Skipped(err),
        }
      }
      Err(measurement_err) => {
        match parse_unit(line) {
          Ok(unit) => {
            match self.problem.query(&unit) {
              Some(m) => LineOutcome::Answered(m.clone()),
              None => LineOutcome::Unanswered(unit),
            }
          }
          Err(_) => LineOutcome::Skipped(measurement_err),
        }
      }
    }
  }

  /// Processes every line of `input`, writing one line to `output`
  /// for each answered query. Only I/O failures end the run early.
  pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
    for (index, line) in input.lines().enumerate() {
      let line = line?;
      let line_number = index + 1;
      match self.process_line(&line) {
        LineOutcome::Blank | LineOutcome::Added => {}
        LineOutcome::Answered(m) => {
          if self.options.echo_units {
            writeln!(output, "{}", m)?;
          } else {
            writeln!(output, "{}", m.value)?;
          }
        }
        LineOutcome::Unanswered(unit) => {
          info!("Line {}: no measurement known for {}", line_number, unit);
        }
        LineOutcome::Skipped(err) => {
          warn!("Line {}: skipped: {}", line_number, err);
        }
      }
    }
    output.flush()
  }
}
