//! Response model used by the panel generator.
//!
//! Kept as small, pure functions so the generator and the recovery check can
//! share the exact same arithmetic.

pub mod response;

pub use response::*;
