
//! Symbolic units: named dimensions, the vectors of exponents built
//! out of them, and the parser for unit expressions.

pub mod dimension;
pub mod parsing;
pub mod vector;

pub use dimension::{Dimension, DimensionPower};
pub use parsing::{parse_unit, UnitParsingError};
pub use vector::{DimensionVector, ExponentOverflowError};
