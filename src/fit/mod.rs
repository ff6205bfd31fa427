//! Response recovery.
//!
//! Responsibilities:
//!
//! - build the regression design from a generated panel
//! - fit region fixed effects plus the covariate terms by OLS
//! - pair each estimate with the coefficient that produced the data

pub mod recovery;

pub use recovery::*;
