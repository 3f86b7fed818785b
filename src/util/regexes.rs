
//! Module containing generally useful regular expressions.

use regex::Regex;
use once_cell::sync::Lazy;

/// A terminal dimension name: one or more word characters, spanning
/// the whole input.
pub static WORD_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^\w+$").unwrap());

/// An integer exponent with an optional leading minus sign, spanning
/// the whole input.
pub static EXPONENT_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^-?[0-9]+$").unwrap());

/// A measurement line: a value, a run of whitespace, and a unit
/// expression.
pub static MEASUREMENT_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^(?P<value>\S+)\s+(?P<unit>.+)$").unwrap());
