
use crate::util::remove_whitespace;

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use time::Duration;

use std::fmt::{self, Display, Formatter};
use std::ops;
use std::str::FromStr;

/// The tick is the nanosecond.
pub const TICKS_PER_MICROSECOND: i64 = 1_000;
pub const TICKS_PER_MILLISECOND: i64 = 1_000_000;
pub const TICKS_PER_SECOND: i64 = 1_000_000_000;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;

/// One number-with-unit component of a span literal, anchored at the
/// start of the input.
static COMPONENT_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"^([+-]?)(\d+(?:\.\d*)?|\.\d+)([a-zA-Zµμ]+)").unwrap());

/// A time span, wrapping a [`time::Duration`].
///
/// Spans are written and rendered in the composed-unit literal grammar:
/// a concatenation of signed-or-unsigned decimal numbers with unit
/// suffixes (`4m30s`, `1h2m3s`, `1.5ms`), summed. Spans built through
/// this crate always fit an `i64` tick count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Span {
  duration: Duration,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseSpanError {
  #[error("empty duration literal")]
  Empty,
  #[error("invalid duration literal {0:?}")]
  InvalidLiteral(String),
  #[error("unknown unit {unit:?} in duration literal {input:?}")]
  UnknownUnit { input: String, unit: String },
  #[error("duration literal {0:?} out of range")]
  OutOfRange(String),
}

impl Span {
  pub const ZERO: Span = Span { duration: Duration::ZERO };

  pub fn new(duration: Duration) -> Span {
    Span { duration }
  }

  pub fn from_ticks(ticks: i64) -> Span {
    Span::new(Duration::nanoseconds(ticks))
  }

  pub fn seconds(seconds: i64) -> Span {
    Span::new(Duration::seconds(seconds))
  }

  pub fn minutes(minutes: i64) -> Span {
    Span::new(Duration::minutes(minutes))
  }

  pub fn hours(hours: i64) -> Span {
    Span::new(Duration::hours(hours))
  }

  pub fn duration(self) -> Duration {
    self.duration
  }

  /// The span as a tick count. Spans parsed or constructed by this
  /// crate always fit; a foreign duration outside the tick range is
  /// clamped.
  pub fn ticks(self) -> i64 {
    self.duration.whole_nanoseconds()
      .clamp(i64::MIN as i128, i64::MAX as i128) as i64
  }
}

impl From<Duration> for Span {
  fn from(duration: Duration) -> Span {
    Span::new(duration)
  }
}

impl ops::Add for Span {
  type Output = Span;

  fn add(self, other: Span) -> Span {
    Span::new(self.duration + other.duration)
  }
}

impl ops::Sub for Span {
  type Output = Span;

  fn sub(self, other: Span) -> Span {
    Span::new(self.duration - other.duration)
  }
}

impl ops::Neg for Span {
  type Output = Span;

  fn neg(self) -> Span {
    Span::new(- self.duration)
  }
}

/// Parses a span literal. Whitespace anywhere in the literal is
/// ignored. The bare literal `0` (optionally signed) denotes the zero
/// span; every other literal is one or more number-with-unit
/// components.
impl FromStr for Span {
  type Err = ParseSpanError;

  fn from_str(input: &str) -> Result<Span, ParseSpanError> {
    let stripped = remove_whitespace(input);
    if stripped.is_empty() {
      return Err(ParseSpanError::Empty);
    }
    parse_components(&stripped).map(Span::from_ticks)
  }
}

fn parse_components(input: &str) -> Result<i64, ParseSpanError> {
  if matches!(input, "0" | "+0" | "-0") {
    return Ok(0);
  }
  let mut rest = input;
  let mut total: i64 = 0;
  while !rest.is_empty() {
    let captures = COMPONENT_RE.captures(rest)
      .ok_or_else(|| ParseSpanError::InvalidLiteral(input.to_owned()))?;
    // unwrap: capture group 0 always exists
    let matched = captures.get(0).unwrap();
    let negative = &captures[1] == "-";
    let scale = tick_scale(&captures[3])
      .ok_or_else(|| ParseSpanError::UnknownUnit {
        input: input.to_owned(),
        unit: captures[3].to_owned(),
      })?;
    let ticks = component_ticks(&captures[2], scale)
      .ok_or_else(|| ParseSpanError::OutOfRange(input.to_owned()))?;
    total = if negative { total.checked_sub(ticks) } else { total.checked_add(ticks) }
      .ok_or_else(|| ParseSpanError::OutOfRange(input.to_owned()))?;
    rest = &rest[matched.end()..];
  }
  Ok(total)
}

fn tick_scale(unit: &str) -> Option<i64> {
  match unit {
    "ns" => Some(1),
    "us" | "µs" | "μs" => Some(TICKS_PER_MICROSECOND),
    "ms" => Some(TICKS_PER_MILLISECOND),
    "s" => Some(TICKS_PER_SECOND),
    "m" => Some(TICKS_PER_MINUTE),
    "h" => Some(TICKS_PER_HOUR),
    _ => None,
  }
}

/// Tick count of one unsigned number-with-unit component. The
/// fractional contribution is truncated toward zero. Returns `None`
/// when the component overflows the tick range.
fn component_ticks(number: &str, scale: i64) -> Option<i64> {
  let (whole, fraction) = match number.split_once('.') {
    Some((whole, fraction)) => (whole, fraction),
    None => (number, ""),
  };
  let whole: i64 = if whole.is_empty() { 0 } else { whole.parse().ok()? };
  let mut ticks = whole.checked_mul(scale)?;
  if !fraction.is_empty() {
    // The regex guarantees only digits here, so the parse cannot fail,
    // and a fraction is strictly less than one unit.
    let fraction: f64 = format!("0.{fraction}").parse().ok()?;
    ticks = ticks.checked_add((fraction * scale as f64) as i64)?;
  }
  Some(ticks)
}

/// Renders the span in the same composed-unit grammar the parser
/// accepts, so output round-trips. Zero is `0s`. Sub-second magnitudes
/// use the largest fitting sub-second unit; one second and above render
/// as hours, minutes and (possibly fractional) seconds, with minutes
/// and hours included once the magnitude reaches them.
impl Display for Span {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    let ticks = self.ticks();
    if ticks == 0 {
      return write!(f, "0s");
    }
    if ticks < 0 {
      write!(f, "-")?;
    }
    let magnitude = ticks.unsigned_abs();
    if magnitude < TICKS_PER_SECOND as u64 {
      if magnitude < TICKS_PER_MICROSECOND as u64 {
        write!(f, "{magnitude}ns")
      } else if magnitude < TICKS_PER_MILLISECOND as u64 {
        write_with_fraction(f, magnitude, TICKS_PER_MICROSECOND as u64)?;
        write!(f, "µs")
      } else {
        write_with_fraction(f, magnitude, TICKS_PER_MILLISECOND as u64)?;
        write!(f, "ms")
      }
    } else {
      let minutes = magnitude / TICKS_PER_MINUTE as u64;
      if minutes >= 60 {
        write!(f, "{}h", minutes / 60)?;
      }
      if minutes > 0 {
        write!(f, "{}m", minutes % 60)?;
      }
      write_with_fraction(f, magnitude % TICKS_PER_MINUTE as u64, TICKS_PER_SECOND as u64)?;
      write!(f, "s")
    }
  }
}

/// Writes `magnitude / scale` with the fractional part trimmed of
/// trailing zeros, omitting the decimal point entirely for whole
/// values.
fn write_with_fraction(f: &mut Formatter<'_>, magnitude: u64, scale: u64) -> fmt::Result {
  write!(f, "{}", magnitude / scale)?;
  let remainder = magnitude % scale;
  if remainder > 0 {
    let digits = scale.ilog10() as usize;
    let padded = format!("{:0width$}", remainder, width = digits);
    write!(f, ".{}", padded.trim_end_matches('0'))?;
  }
  Ok(())
}
