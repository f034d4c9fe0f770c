
use crate::eval::EvalError;
use crate::parsing::operator::SplitError;

use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
  #[error("{0}")]
  SplitError(#[from] SplitError),
  #[error("{0}")]
  EvalError(#[from] EvalError),
}
