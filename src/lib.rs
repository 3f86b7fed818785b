
//! Dimensional analysis over symbolic unit expressions.
//!
//! Unit expressions such as `Pa*m^3/(mol*K)` are parsed into
//! [`DimensionVector`]s, paired with values as [`Measurement`]s, and
//! collected into a [`Problem`], which derives every product and
//! quotient of the known measurements so that a query for a unit is a
//! single lookup.

pub mod error;
pub mod measurement;
pub mod problem;
pub mod runner;
pub mod units;
pub mod util;

pub use error::Error;
pub use measurement::Measurement;
pub use problem::Problem;
pub use units::vector::DimensionVector;
