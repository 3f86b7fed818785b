
use thiserror::Error;

use std::num::ParseFloatError;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum MeasurementParsingError {
  #[error("'{input}' cannot be parsed as a measurement")]
  Malformed {
    input: String,
  },
  #[error("'{input}' is not a valid measurement value: {source}")]
  InvalidValue {
    input: String,
    source: ParseFloatError,
  },
}

impl MeasurementParsingError {
  pub fn malformed(input: impl Into<String>) -> Self {
    Self::Malformed { input: input.into() }
  }
}
