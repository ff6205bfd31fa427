//! Mathematical utilities: normal distribution functions and least squares.

pub mod normal;
pub mod ols;

pub use ols::*;
