
use super::grammar::{ALTERNATIVES, Alternative};
use crate::units::vector::DimensionVector;

use thiserror::Error;
use tracing::trace;

use std::collections::HashMap;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("'{input}' cannot be parsed as a unit")]
pub struct UnitParsingError {
  pub input: String,
}

impl UnitParsingError {
  pub fn new(input: impl Into<String>) -> Self {
    Self { input: input.into() }
  }
}

/// Results of parsing each substring seen so far, successful or not.
type Memo<'a> = HashMap<&'a str, Option<DimensionVector>>;

/// Parses the string as a unit expression, such as `m/s` or
/// `Pa*m^3/(mol*K)`.
///
/// Grammar alternatives are tried in priority order, and each
/// alternative enumerates its candidate operand splits in a fixed
/// order. The first candidate whose operands all parse is accepted.
/// A candidate whose operands fail to parse is discarded and the
/// search continues, so the parser backtracks over every split point
/// before giving up on the string. Every substring is parsed at most
/// once, which keeps failing inputs polynomial.
pub fn parse_unit(input: &str) -> Result<DimensionVector, UnitParsingError> {
  let mut memo = Memo::new();
  resolve(input, &mut memo).ok_or_else(|| UnitParsingError::new(input))
}

fn resolve<'a>(input: &'a str, memo: &mut Memo<'a>) -> Option<DimensionVector> {
  if let Some(known) = memo.get(input) {
    return known.clone();
  }
  let result = ALTERNATIVES.iter()
    .find_map(|alternative| try_alternative(alternative, input, memo));
  memo.insert(input, result.clone());
  result
}

fn try_alternative<'a>(
  alternative: &Alternative,
  input: &'a str,
  memo: &mut Memo<'a>,
) -> Option<DimensionVector> {
  'candidates: for candidate in (alternative.matcher)(input) {
    let mut operands = Vec::with_capacity(candidate.operands.len());
    for &operand in &candidate.operands {
      match resolve(operand, memo) {
        Some(unit) => operands.push(unit),
        None => continue 'candidates,
      }
    }
    if let Some(unit) = (alternative.builder)(&candidate, operands) {
      trace!("=> {} matches {}", input, alternative.rule);
      trace!("<= {} returns {}", input, unit);
      return Some(unit);
    }
  }
  None
}
