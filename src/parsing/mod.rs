
//! Splitting of raw pace expressions into an operator and its operands.

pub mod operator;
