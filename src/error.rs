
use crate::units::parsing::UnitParsingError;
use crate::units::vector::ExponentOverflowError;
use crate::measurement::MeasurementParsingError;
use crate::problem::DuplicateUnitError;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  UnitParsing(#[from] UnitParsingError),
  #[error("{0}")]
  MeasurementParsing(#[from] MeasurementParsingError),
  #[error("{0}")]
  DuplicateUnit(#[from] DuplicateUnitError),
  #[error("{0}")]
  ExponentOverflow(#[from] ExponentOverflowError),
}
