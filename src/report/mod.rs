//! Reporting: aligned terminal tables for the generator, the inspector and
//! the recovery check.

pub mod format;

pub use format::*;
