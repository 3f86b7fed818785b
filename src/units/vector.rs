
use super::dimension::{Dimension, DimensionPower};
use super::parsing::{parse_unit, UnitParsingError};

use itertools::Itertools;
use num::One;
use num::pow::Pow;
use thiserror::Error;

use std::fmt::{self, Formatter, Display};
use std::ops::{Mul, Div};
use std::str::FromStr;

/// A dimension vector is a formal product and quotient of named
/// dimensions, such as `m/s` or `Pa*m^3/(mol*K)`.
///
/// Dimension vectors form a free abelian group: multiplication adds
/// exponents, inversion negates them, and the empty vector is the
/// dimensionless unit `1`.
///
/// Exponents are `i64`. The `checked_*` methods report overflow with
/// `None`; the plain methods and the operator impls panic on
/// overflow, just as integer arithmetic does.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DimensionVector {
  // Internally, we store a dimension vector as a vector, sorted
  // alphabetically by dimension name. A given name shall only appear
  // at most once in this vector, and any dimension which appears in
  // this vector shall have a nonzero exponent. Under those
  // conditions, the derived `Eq` and `Hash` are canonical.
  elements: Vec<DimensionPower>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("Exponent overflow while combining '{unit}'")]
pub struct ExponentOverflowError {
  pub unit: DimensionVector,
}

impl DimensionVector {
  /// Constructs a new dimension vector as the product of all of the
  /// inputs, or `None` if the exponents of some dimension overflow
  /// when summed.
  pub fn checked_new(inputs: impl IntoIterator<Item = DimensionPower>) -> Option<Self> {
    let mut elements = inputs.into_iter()
      .map(|p| (p.dimension, p.exponent))
      .into_grouping_map()
      .fold(Some(0i64), |acc, _, exponent| acc?.checked_add(exponent))
      .into_iter()
      .map(|(dimension, exponent)| Some(DimensionPower { dimension, exponent: exponent? }))
      .collect::<Option<Vec<_>>>()?;
    elements.retain(|p| p.exponent != 0);
    elements.sort_by(|a, b| a.dimension.cmp(&b.dimension));
    Some(Self { elements })
  }

  /// Constructs a new dimension vector as the product of all of the
  /// inputs.
  ///
  /// Panics if the exponents of some dimension overflow when summed.
  pub fn new(inputs: impl IntoIterator<Item = DimensionPower>) -> Self {
    Self::checked_new(inputs).unwrap_or_else(|| panic!("Exponent overflow in DimensionVector::new"))
  }

  /// The dimensionless vector. This serves as the "one" value for
  /// multiplication and division of dimension vectors.
  pub fn unitless() -> Self {
    Self { elements: Vec::new() }
  }

  /// A vector consisting of the single dimension `name` to the first
  /// power.
  pub fn singleton(name: impl Into<Dimension>) -> Self {
    Self { elements: vec![DimensionPower::from(name.into())] }
  }

  pub fn is_dimensionless(&self) -> bool {
    self.elements.is_empty()
  }

  /// The exponent of the named dimension, or zero if it does not
  /// appear.
  pub fn get(&self, name: &str) -> i64 {
    self.elements
      .binary_search_by(|p| p.dimension.name().cmp(name))
      .map_or(0, |index| self.elements[index].exponent)
  }

  /// An iterator over the distinct dimensions in this vector, sorted
  /// by name and tagged with their exponents. All returned exponents
  /// shall be non-zero.
  pub fn iter(&self) -> impl Iterator<Item = &DimensionPower> {
    self.elements.iter()
  }

  /// The product of `self` and `other`, adding exponents per
  /// dimension.
  pub fn checked_multiply(&self, other: &Self) -> Option<Self> {
    Self::checked_new(self.elements.iter().chain(&other.elements).cloned())
  }

  /// The reciprocal of `self`.
  pub fn checked_invert(&self) -> Option<Self> {
    // Negation preserves both the ordering and the non-zero
    // invariant, so there is no need to renormalize.
    let elements = self.elements.iter()
      .cloned()
      .map(DimensionPower::checked_recip)
      .collect::<Option<Vec<_>>>()?;
    Some(Self { elements })
  }

  /// `self` raised to an integer power. Raising to the zeroth power
  /// always produces the dimensionless vector.
  pub fn checked_power_of(&self, n: i64) -> Option<Self> {
    let elements = self.elements.iter()
      .cloned()
      .map(|p| p.checked_pow(n))
      .collect::<Option<Vec<_>>>()?;
    Self::checked_new(elements)
  }

  pub fn multiply(&self, other: &Self) -> Self {
    self.checked_multiply(other)
      .unwrap_or_else(|| panic!("Exponent overflow multiplying {} by {}", self, other))
  }

  pub fn invert(&self) -> Self {
    self.checked_invert()
      .unwrap_or_else(|| panic!("Exponent overflow inverting {}", self))
  }

  pub fn power_of(&self, n: i64) -> Self {
    self.checked_power_of(n)
      .unwrap_or_else(|| panic!("Exponent overflow raising {} to the power {}", self, n))
  }
}

impl FromStr for DimensionVector {
  type Err = UnitParsingError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    parse_unit(s)
  }
}

/// Renders the vector in a form accepted by the unit parser: `1` for
/// the dimensionless vector, otherwise the factors joined with `*`.
/// Negative exponents are written inline, as in `Pa*m^3*mol^-1`.
impl Display for DimensionVector {
  fn fmt(&self, f: &mut Formatter) -> fmt::Result {
    if self.elements.is_empty() {
      write!(f, "1")
    } else {
      write!(f, "{}", self.elements.iter().join("*"))
    }
  }
}

impl Mul for DimensionVector {
  type Output = DimensionVector;

  fn mul(self, rhs: DimensionVector) -> Self::Output {
    self.multiply(&rhs)
  }
}

impl Div for DimensionVector {
  type Output = DimensionVector;

  #[allow(clippy::suspicious_arithmetic_impl)] // Multiply by reciprocal is correct
  fn div(self, rhs: DimensionVector) -> Self::Output {
    self.multiply(&rhs.invert())
  }
}

impl Pow<i64> for DimensionVector {
  type Output = DimensionVector;

  fn pow(self, rhs: i64) -> Self::Output {
    self.power_of(rhs)
  }
}

impl One for DimensionVector {
  fn one() -> Self {
    DimensionVector::unitless()
  }

  fn is_one(&self) -> bool {
    self.elements.is_empty()
  }
}

impl Default for DimensionVector {
  fn default() -> Self {
    DimensionVector::unitless()
  }
}
