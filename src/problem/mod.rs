
//! The closure of known measurements under multiplication and
//! inversion.

use crate::error::Error;
use crate::measurement::Measurement;
use crate::units::vector::{DimensionVector, ExponentOverflowError};

use thiserror::Error;
use tracing::debug;

use std::collections::HashMap;

/// A growable set of known measurements, at most one per unit.
///
/// Every [`Problem::add`] derives the product and quotient of the new
/// measurement against everything known at that moment, so that later
/// queries can be answered by a single lookup. Derivation happens
/// once per `add`: the entries derived during a call are not combined
/// with each other in that same call.
#[derive(Debug, Clone)]
pub struct Problem {
  // Insertion order is kept so that derivation is deterministic.
  measurements: Vec<Measurement>,
  index: HashMap<DimensionVector, usize>,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("A measurement with unit '{unit}' is already known")]
pub struct DuplicateUnitError {
  pub unit: DimensionVector,
}

impl Problem {
  /// A new problem, knowing only the dimensionless identity.
  pub fn new() -> Self {
    let mut problem = Self { measurements: Vec::new(), index: HashMap::new() };
    problem.insert_or_replace(Measurement::identity());
    problem
  }

  /// Adds a measurement, together with its product and quotient
  /// against every measurement already known. Derived entries never
  /// displace existing ones, but the added measurement is always
  /// stored under its own unit.
  ///
  /// Fails if a measurement with the same unit is already known,
  /// whether it was added directly or derived. Also fails, leaving
  /// the problem unchanged, if any derived exponent overflows.
  pub fn add(&mut self, measurement: Measurement) -> Result<(), Error> {
    if self.contains(&measurement.unit) {
      return Err(DuplicateUnitError { unit: measurement.unit }.into());
    }
    let overflow = || ExponentOverflowError { unit: measurement.unit.clone() };
    let inverse = measurement.checked_invert().ok_or_else(overflow)?;
    let derived = self.measurements.iter()
      .flat_map(|known| [known.checked_multiply(&measurement), known.checked_multiply(&inverse)])
      .collect::<Option<Vec<_>>>()
      .ok_or_else(overflow)?;
    let previous_len = self.len();
    for m in derived {
      self.insert_if_absent(m);
    }
    debug!("Added {}, closure grew from {} to {} entries", measurement, previous_len, self.len());
    self.insert_or_replace(measurement);
    Ok(())
  }

  /// The measurement known for exactly this unit, if any.
  pub fn query(&self, unit: &DimensionVector) -> Option<&Measurement> {
    let result = self.index.get(unit).map(|&i| &self.measurements[i]);
    match result {
      Some(m) => debug!("Query for {} found {}", unit, m.value),
      None => debug!("Query for {} found nothing", unit),
    }
    result
  }

  pub fn contains(&self, unit: &DimensionVector) -> bool {
    self.index.contains_key(unit)
  }

  pub fn len(&self) -> usize {
    self.measurements.len()
  }

  /// Always false in practice, since the identity is known from the
  /// start.
  pub fn is_empty(&self) -> bool {
    self.measurements.is_empty()
  }

  /// All known measurements, in the order they became known.
  pub fn iter(&self) -> impl Iterator<Item = &Measurement> {
    self.measurements.iter()
  }

  fn insert_if_absent(&mut self, measurement: Measurement) {
    if !self.contains(&measurement.unit) {
      self.index.insert(measurement.unit.clone(), self.measurements.len());
      self.measurements.push(measurement);
    }
  }

  fn insert_or_replace(&mut self, measurement: Measurement) {
    match self.index.get(&measurement.unit) {
      Some(&i) => {
        self.measurements[i] = measurement;
      }
      None => {
        self.index.insert(measurement.unit.clone(), self.measurements.len());
        self.measurements.push(measurement);
      }
    }
  }
}

impl Default for Problem {
  fn default() -> Self {
    Problem::new()
  }
}

impl<'a> IntoIterator for &'a Problem {
  type Item = &'a Measurement;
  type IntoIter = std::slice::Iter<'a, Measurement>;

  fn into_iter(self) -> Self::IntoIter {
    self.measurements.iter()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::units::parsing::parse_unit;

  use approx::assert_relative_eq;

  fn measurement(s: &str) -> Measurement {
    Measurement::parse(s).unwrap()
  }

  fn unit(s: &str) -> DimensionVector {
    parse_unit(s).unwrap()
  }

  #[test]
  fn test_new_problem_knows_identity() {
    let problem = Problem::new();
    assert_eq!(problem.len(), 1);
    assert!(!problem.is_empty());
    assert_eq!(problem.query(&unit("1")), Some(&Measurement::identity()));
  }

  #[test]
  fn test_add_stores_measurement_and_inverse() {
    let mut problem = Problem::new();
    problem.add(measurement("4 m/s")).unwrap();
    assert_eq!(problem.len(), 3);
    assert_eq!(problem.query(&unit("m/s")), Some(&measurement("4 m/s")));
    assert_eq!(problem.query(&unit("s/m")), Some(&measurement("0.25 s/m")));
  }

  #[test]
  fn test_derive_time_from_speed_and_distance() {
    let mut problem = Problem::new();
    problem.add(measurement("3 m/s")).unwrap();
    problem.add(measurement("2 m")).unwrap();
    let time = problem.query(&unit("s")).unwrap();
    assert_relative_eq!(*time, Measurement::new(0.6666667, unit("s")), max_relative = 1e-5);
  }

  #[test]
  fn test_derive_temperature_from_ideal_gas_law() {
    let pressure = measurement("1001 Pa");
    let volume = measurement("2.3 m^3");
    let amount = measurement("304 mol");
    let gas_constant = measurement("8.3145 Pa*m^3/(mol*K)");
    let expected = pressure.value * volume.value / (amount.value * gas_constant.value);

    let mut problem = Problem::new();
    problem.add(pressure).unwrap();
    problem.add(volume).unwrap();
    problem.add(amount).unwrap();
    problem.add(gas_constant).unwrap();
    let temperature = problem.query(&unit("K")).unwrap();
    assert_eq!(temperature.unit, unit("K"));
    assert_relative_eq!(temperature.value, expected, max_relative = 1e-5);
  }

  #[test]
  fn test_add_duplicate_unit() {
    let mut problem = Problem::new();
    problem.add(measurement("2 m")).unwrap();
    assert_eq!(
      problem.add(measurement("3 m")),
      Err(Error::DuplicateUnit(DuplicateUnitError { unit: unit("m") })),
    );
    assert_eq!(problem.query(&unit("m")), Some(&measurement("2 m")));
  }

  #[test]
  fn test_add_derived_unit_is_duplicate() {
    let mut problem = Problem::new();
    problem.add(measurement("2 m")).unwrap();
    problem.add(measurement("4 s")).unwrap();
    problem.add(measurement("8 m*s")).unwrap_err();
    problem.add(measurement("1 m^-1")).unwrap_err();
  }

  #[test]
  fn test_add_dimensionless_is_duplicate() {
    let mut problem = Problem::new();
    problem.add(measurement("5 1")).unwrap_err();
  }

  #[test]
  fn test_add_exponent_overflow_leaves_problem_unchanged() {
    let mut problem = Problem::new();
    problem.add(measurement("2 m^9223372036854775807")).unwrap();
    let len = problem.len();
    assert_eq!(
      problem.add(measurement("3 m")),
      Err(Error::ExponentOverflow(ExponentOverflowError { unit: unit("m") })),
    );
    assert!(matches!(
      problem.add(measurement("3 s^-9223372036854775808")),
      Err(Error::ExponentOverflow(_)),
    ));
    assert_eq!(problem.len(), len);
    assert_eq!(problem.query(&unit("m")), None);
    problem.add(measurement("4 s")).unwrap();
  }

  #[test]
  fn test_query_miss() {
    let mut problem = Problem::new();
    problem.add(measurement("3 m/s")).unwrap();
    assert_eq!(problem.query(&unit("kg")), None);
  }

  #[test]
  fn test_derivation_is_single_generation() {
    let mut problem = Problem::new();
    problem.add(measurement("2 m")).unwrap();
    problem.add(measurement("3 s")).unwrap();
    // Products against known entries are derived...
    assert_relative_eq!(problem.query(&unit("m*s")).unwrap().value, 6.0);
    assert_relative_eq!(problem.query(&unit("s/m")).unwrap().value, 1.5);
    // ...but no entry is ever combined with itself.
    assert_eq!(problem.query(&unit("m^2")), None);
    assert_eq!(problem.query(&unit("s^2")), None);
  }

  #[test]
  fn test_iteration_order() {
    let mut problem = Problem::new();
    problem.add(measurement("2 m")).unwrap();
    let units: Vec<_> = problem.iter().map(|m| m.unit.clone()).collect();
    assert_eq!(units, vec![unit("1"), unit("m"), unit("1/m")]);
  }
}
