
use thiserror::Error;

/// The operator of a pace expression. `Unknown` is an explicit
/// sentinel, not an error: the splitter reports it when no recognized
/// symbol is present, and callers must treat such an expression as
/// unevaluable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Operator {
  #[default]
  Unknown,
  Division,
  Multiplication,
}

/// An expression split into an operator and the two operand substrings
/// around it. Operands borrow from the original expression and are not
/// trimmed or validated here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitExpr<'a> {
  pub operator: Operator,
  pub lhs: &'a str,
  pub rhs: &'a str,
}

/// The expression contains a recognized operator symbol more than once,
/// so it does not split into exactly two operands.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("illegal number of operands: {count}")]
pub struct SplitError {
  pub count: usize,
}

/// Symbols are tried in order; division wins when both appear.
const RECOGNIZED_OPERATORS: [(Operator, char); 2] = [
  (Operator::Division, '/'),
  (Operator::Multiplication, '*'),
];

impl Operator {
  /// The symbol this operator is written as, or `None` for the
  /// `Unknown` sentinel.
  pub const fn symbol(self) -> Option<char> {
    match self {
      Operator::Unknown => None,
      Operator::Division => Some('/'),
      Operator::Multiplication => Some('*'),
    }
  }
}

/// Locates the operator symbol in `input` and splits the expression
/// around it. An expression with no recognized symbol splits to the
/// `Unknown` operator with empty operands.
pub fn split_expression(input: &str) -> Result<SplitExpr<'_>, SplitError> {
  for (operator, symbol) in RECOGNIZED_OPERATORS {
    if !input.contains(symbol) {
      continue;
    }
    let operands: Vec<&str> = input.split(symbol).collect();
    if operands.len() > 2 {
      return Err(SplitError { count: operands.len() });
    }
    // A split on a contained symbol always yields exactly two parts
    // here, since three or more returned above.
    return Ok(SplitExpr { operator, lhs: operands[0], rhs: operands[1] });
  }
  Ok(SplitExpr { operator: Operator::Unknown, lhs: "", rhs: "" })
}
