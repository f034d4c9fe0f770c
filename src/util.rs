
//! Shared regular expressions and small string helpers.

use once_cell::sync::Lazy;
use regex::Regex;

use std::borrow::Cow;

pub static WHITESPACE_RE: Lazy<Regex> =
  Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Removes every whitespace character from `input`. The operand
/// grammars in this crate are whitespace-insensitive; parsers strip
/// before matching.
pub fn remove_whitespace(input: &str) -> Cow<'_, str> {
  WHITESPACE_RE.replace_all(input, "")
}
