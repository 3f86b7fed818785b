
use std::fmt::{self, Formatter, Display};

/// A named, symbolic physical axis, such as `m`, `s`, or `Pa`.
///
/// Dimensions are opaque. No two distinct names are ever considered
/// convertible, so `m` and `km` are simply unrelated dimensions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dimension(String);

/// A named dimension raised to an integer power.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionPower {
  pub dimension: Dimension,
  pub exponent: i64,
}

impl Dimension {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn name(&self) -> &str {
    &self.0
  }
}

impl DimensionPower {
  pub fn new(dimension: Dimension, exponent: i64) -> Self {
    Self { dimension, exponent }
  }

  /// The reciprocal of `self`, as a dimension with the opposite
  /// exponent. Returns `None` if the exponent cannot be negated.
  pub fn checked_recip(self) -> Option<Self> {
    let exponent = self.exponent.checked_neg()?;
    Some(Self { dimension: self.dimension, exponent })
  }

  /// `self` raised to the power `n`, or `None` on exponent overflow.
  pub fn checked_pow(self, n: i64) -> Option<Self> {
    let exponent = self.exponent.checked_mul(n)?;
    Some(Self { dimension: self.dimension, exponent })
  }
}

impl From<&str> for Dimension {
  fn from(name: &str) -> Self {
    Dimension::new(name)
  }
}

impl From<Dimension> for DimensionPower {
  fn from(dimension: Dimension) -> Self {
    DimensionPower { dimension, exponent: 1 }
  }
}

impl Display for Dimension {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl Display for DimensionPower {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.exponent == 1 {
      write!(f, "{}", self.dimension)
    } else {
      write!(f, "{}^{}", self.dimension, self.exponent)
    }
  }
}
