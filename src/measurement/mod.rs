
//! Scalar values tagged with a dimension vector.

mod error;

pub use error::MeasurementParsingError;

use crate::error::Error;
use crate::units::parsing::parse_unit;
use crate::units::vector::DimensionVector;
use crate::util::regexes::MEASUREMENT_RE;

use approx::{AbsDiffEq, RelativeEq};
use num::pow::Pow;

use std::fmt::{self, Formatter, Display};
use std::ops::Mul;
use std::str::FromStr;

/// A scalar quantity, tagged with a dimension vector.
///
/// Equality is exact on both components. Values derived through
/// several multiplications accumulate rounding error, so consumers
/// comparing those should go through [`RelativeEq`] instead, which
/// applies a tolerance to the value and still requires the units to
/// match exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct Measurement {
  pub value: f64,
  pub unit: DimensionVector,
}

impl Measurement {
  pub fn new(value: f64, unit: DimensionVector) -> Self {
    Self { value, unit }
  }

  /// The dimensionless measurement with value one.
  pub fn identity() -> Self {
    Self::new(1.0, DimensionVector::unitless())
  }

  /// Parses a measurement of the form `<value> <unit expression>`,
  /// splitting on the first run of whitespace.
  pub fn parse(input: &str) -> Result<Self, Error> {
    let captures = MEASUREMENT_RE.captures(input)
      .ok_or_else(|| MeasurementParsingError::malformed(input))?;
    let value = captures["value"].parse::<f64>()
      .map_err(|source| MeasurementParsingError::InvalidValue { input: input.to_owned(), source })?;
    let unit = parse_unit(&captures["unit"])?;
    Ok(Self { value, unit })
  }

  /// Multiplies the values and adds the exponents of the units.
  /// Returns `None` if an exponent overflows.
  pub fn checked_multiply(&self, other: &Measurement) -> Option<Measurement> {
    Some(Measurement {
      value: self.value * other.value,
      unit: self.unit.checked_multiply(&other.unit)?,
    })
  }

  /// The reciprocal of the value, with every exponent negated. A zero
  /// value inverts to infinity rather than failing. Returns `None` if
  /// an exponent overflows.
  pub fn checked_invert(&self) -> Option<Measurement> {
    Some(Measurement {
      value: 1.0 / self.value,
      unit: self.unit.checked_invert()?,
    })
  }

  /// The value raised to an integer power, with every exponent
  /// multiplied by `n`. Returns `None` if an exponent overflows.
  pub fn checked_power_of(&self, n: i64) -> Option<Measurement> {
    let value = match i32::try_from(n) {
      Ok(n) => self.value.powi(n),
      Err(_) => self.value.powf(n as f64),
    };
    Some(Measurement {
      value,
      unit: self.unit.checked_power_of(n)?,
    })
  }

  /// As [`Measurement::checked_multiply`], but panics on exponent
  /// overflow.
  pub fn multiply(&self, other: &Measurement) -> Measurement {
    Measurement {
      value: self.value * other.value,
      unit: self.unit.multiply(&other.unit),
    }
  }

  pub fn invert(&self) -> Measurement {
    Measurement {
      value: 1.0 / self.value,
      unit: self.unit.invert(),
    }
  }

  pub fn power_of(&self, n: i64) -> Measurement {
    self.checked_power_of(n)
      .unwrap_or_else(|| panic!("Exponent overflow raising {} to the power {}", self.unit, n))
  }
}

impl FromStr for Measurement {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Measurement::parse(s)
  }
}

impl Display for Measurement {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{} {}", self.value, self.unit)
  }
}

impl Mul for Measurement {
  type Output = Measurement;

  fn mul(self, rhs: Measurement) -> Measurement {
    self.multiply(&rhs)
  }
}

impl Pow<i64> for Measurement {
  type Output = Measurement;

  fn pow(self, rhs: i64) -> Measurement {
    self.power_of(rhs)
  }
}

impl AbsDiffEq for Measurement {
  type Epsilon = f64;

  fn default_epsilon() -> f64 {
    <f64 as AbsDiffEq>::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Measurement, epsilon: f64) -> bool {
    self.unit == other.unit && self.value.abs_diff_eq(&other.value, epsilon)
  }
}

impl RelativeEq for Measurement {
  fn default_max_relative() -> f64 {
    <f64 as RelativeEq>::default_max_relative()
  }

  fn relative_eq(&self, other: &Measurement, epsilon: f64, max_relative: f64) -> bool {
    self.unit == other.unit && self.value.relative_eq(&other.value, epsilon, max_relative)
  }
}
