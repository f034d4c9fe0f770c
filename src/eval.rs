
use crate::error::Error;
use crate::parsing::operator::{split_expression, Operator};
use crate::units::{Distance, Span};

use thiserror::Error;

use std::fmt::{self, Display, Formatter};

/// A fully determined workout: the distance covered, the pace held, and
/// the total elapsed time. Produced exactly once per evaluation, and
/// the fields satisfy distance × pace == time up to tick rounding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Workout {
  pub distance: Distance,
  pub pace: Span,
  pub time: Span,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvalError {
  #[error("unable to parse time {0:?}")]
  UnparseableTime(String),
  #[error("unable to parse distance {0:?}")]
  UnparseableDistance(String),
  #[error("unable to parse pace {0:?}")]
  UnparseablePace(String),
  #[error("unable to parse distance/pace {0:?}")]
  UnparseableDivisor(String),
  #[error("unknown operator")]
  UnknownOperator,
}

/// The two quantities the divisor of a division expression can denote.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Divisor {
  Distance(Distance),
  Pace(Span),
}

/// Candidate readings of the divisor operand, tried in order; the first
/// that parses wins. A string valid as both is therefore a distance.
const DIVISOR_INTERPRETATIONS: [fn(&str) -> Option<Divisor>; 2] =
  [read_distance, read_pace];

fn read_distance(operand: &str) -> Option<Divisor> {
  operand.parse().ok().map(Divisor::Distance)
}

fn read_pace(operand: &str) -> Option<Divisor> {
  operand.parse().ok().map(Divisor::Pace)
}

/// Evaluates a pace expression: two of {distance, pace, time} joined by
/// `*` or `/`, producing the full triple. Any failure is terminal; no
/// partial result is returned.
pub fn evaluate(input: &str) -> Result<Workout, Error> {
  let split = split_expression(input)?;
  match split.operator {
    Operator::Division => Ok(divide(split.lhs, split.rhs)?),
    Operator::Multiplication => Ok(multiply(split.lhs, split.rhs)?),
    Operator::Unknown => Err(EvalError::UnknownOperator.into()),
  }
}

/// distance * pace = time. The tick product is computed in floating
/// point and truncated toward zero, never rounded — the counterpart of
/// the rounding in [`divide`].
fn multiply(lhs: &str, rhs: &str) -> Result<Workout, EvalError> {
  let distance: Distance = lhs.parse()
    .map_err(|_| EvalError::UnparseableDistance(lhs.to_owned()))?;
  let pace: Span = rhs.parse()
    .map_err(|_| EvalError::UnparseablePace(rhs.to_owned()))?;
  let time = Span::from_ticks((distance.km() * pace.ticks() as f64) as i64);
  Ok(Workout { distance, pace, time })
}

/// time / distance = pace, or time / pace = distance, depending on how
/// the divisor reads.
fn divide(lhs: &str, rhs: &str) -> Result<Workout, EvalError> {
  let time: Span = lhs.parse()
    .map_err(|_| EvalError::UnparseableTime(lhs.to_owned()))?;
  let divisor = DIVISOR_INTERPRETATIONS.iter()
    .find_map(|interpret| interpret(rhs))
    .ok_or_else(|| EvalError::UnparseableDivisor(rhs.to_owned()))?;
  match divisor {
    Divisor::Distance(distance) => {
      // Pace rounds to the nearest tick, half away from zero, in
      // contrast to the truncating multiplication path.
      let pace = Span::from_ticks((time.ticks() as f64 / distance.km()).round() as i64);
      Ok(Workout { distance, pace, time })
    }
    Divisor::Pace(pace) => {
      // Distance stays in floating point, unrounded.
      let distance = Distance::from_km(time.ticks() as f64 / pace.ticks() as f64);
      Ok(Workout { distance, pace, time })
    }
  }
}

impl Display for Workout {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    write!(f, "{:.2} * {} = {}", self.distance.km(), self.pace, self.time)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::parsing::operator::SplitError;

  use approx::assert_relative_eq;

  #[test]
  fn test_multiplication_infers_time() {
    let workout = evaluate("10km*4m30s").unwrap();
    assert_eq!(workout, Workout {
      distance: Distance::from_km(10.0),
      pace: Span::minutes(4) + Span::seconds(30),
      time: Span::minutes(45),
    });
  }

  #[test]
  fn test_division_by_pace_infers_distance() {
    let workout = evaluate("45m/4m30s").unwrap();
    assert_relative_eq!(workout.distance.km(), 10.0);
    assert_eq!(workout.pace, Span::minutes(4) + Span::seconds(30));
    assert_eq!(workout.time, Span::minutes(45));
  }

  #[test]
  fn test_division_by_distance_infers_pace() {
    let workout = evaluate("45m/10km").unwrap();
    assert_eq!(workout, Workout {
      distance: Distance::from_km(10.0),
      pace: Span::minutes(4) + Span::seconds(30),
      time: Span::minutes(45),
    });
  }

  #[test]
  fn test_division_by_fractional_distance() {
    let workout = evaluate("3m30s/0.6km").unwrap();
    assert_relative_eq!(workout.distance.km(), 0.6);
    assert_eq!(workout.pace, Span::minutes(5) + Span::seconds(50));
    assert_eq!(workout.time, Span::minutes(3) + Span::seconds(30));
  }

  #[test]
  fn test_multiplication_truncates_fractional_ticks() {
    // 0.5 × 7 ticks = 3.5: the product truncates toward zero.
    let workout = evaluate("0.5km*7ns").unwrap();
    assert_eq!(workout.time, Span::from_ticks(3));
  }

  #[test]
  fn test_division_by_distance_rounds_to_nearest_tick() {
    // 7 ticks ÷ 2 = 3.5: the quotient rounds half away from zero,
    // unlike the truncating multiplication path.
    let workout = evaluate("7ns/2km").unwrap();
    assert_eq!(workout.pace, Span::from_ticks(4));
  }

  #[test]
  fn test_division_by_pace_keeps_fractional_distance() {
    let workout = evaluate("10ns/4ns").unwrap();
    assert_relative_eq!(workout.distance.km(), 2.5);
  }

  #[test]
  fn test_unparseable_distance_operand() {
    let err = evaluate("10mi*4m30s").unwrap_err();
    assert_eq!(err, EvalError::UnparseableDistance("10mi".to_owned()).into());
    let err = evaluate("4m30s*10km").unwrap_err();
    assert_eq!(err, EvalError::UnparseableDistance("4m30s".to_owned()).into());
  }

  #[test]
  fn test_unparseable_pace_operand() {
    let err = evaluate("10km*xyz").unwrap_err();
    assert_eq!(err, EvalError::UnparseablePace("xyz".to_owned()).into());
  }

  #[test]
  fn test_unparseable_time_operand() {
    let err = evaluate("xyz/10km").unwrap_err();
    assert_eq!(err, EvalError::UnparseableTime("xyz".to_owned()).into());
  }

  #[test]
  fn test_unparseable_divisor_operand() {
    let err = evaluate("45m/xyz").unwrap_err();
    assert_eq!(err, EvalError::UnparseableDivisor("xyz".to_owned()).into());
  }

  #[test]
  fn test_expression_without_operator() {
    let err = evaluate("10km45m").unwrap_err();
    assert_eq!(err, EvalError::UnknownOperator.into());
    assert_eq!(err.to_string(), "unknown operator");
  }

  #[test]
  fn test_expression_with_repeated_operator() {
    let err = evaluate("45m/10km/2").unwrap_err();
    assert_eq!(err, SplitError { count: 3 }.into());
    assert_eq!(err.to_string(), "illegal number of operands: 3");
  }

  #[test]
  fn test_workout_display() {
    assert_eq!(evaluate("10km*4m30s").unwrap().to_string(), "10.00 * 4m30s = 45m0s");
    assert_eq!(evaluate("45m/10km").unwrap().to_string(), "10.00 * 4m30s = 45m0s");
    assert_eq!(evaluate("3m30s/0.6km").unwrap().to_string(), "0.60 * 5m50s = 3m30s");
  }

  #[test]
  fn test_whitespace_in_operands() {
    let workout = evaluate("10 km * 4m 30s").unwrap();
    assert_eq!(workout.time, Span::minutes(45));
  }
}
