
use crate::util::remove_whitespace;

use thiserror::Error;

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Unit suffix required on every distance literal. Kilometers are the
/// only recognized distance unit.
const KILOMETERS_SUFFIX: &str = "km";

/// A distance in kilometers.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Distance {
  km: f64,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("failed to parse {input:?} as a distance")]
pub struct ParseDistanceError {
  pub input: String,
}

impl Distance {
  pub fn from_km(km: f64) -> Self {
    Self { km }
  }

  pub fn km(self) -> f64 {
    self.km
  }
}

impl ParseDistanceError {
  pub fn new(input: impl Into<String>) -> Self {
    Self { input: input.into() }
  }
}

/// Parses a distance literal: an optionally signed decimal number
/// immediately followed by the `km` suffix. Whitespace anywhere in the
/// literal is ignored.
impl FromStr for Distance {
  type Err = ParseDistanceError;

  fn from_str(input: &str) -> Result<Self, Self::Err> {
    let stripped = remove_whitespace(input);
    let number = stripped.strip_suffix(KILOMETERS_SUFFIX)
      .ok_or_else(|| ParseDistanceError::new(input))?;
    let km = number.parse()
      .map_err(|_| ParseDistanceError::new(input))?;
    Ok(Distance { km })
  }
}

impl Display for Distance {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{}{}", self.km, KILOMETERS_SUFFIX)
  }
}
