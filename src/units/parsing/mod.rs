
//! Facilities for parsing unit expressions.

mod base;
mod grammar;

pub use base::{parse_unit, UnitParsingError};
pub use grammar::{Alternative, Candidate, OperandStyle, Rule, ALTERNATIVES};
