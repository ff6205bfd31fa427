//! Input/output helpers.
//!
//! - panel and normality-result exports (`export`)
//! - panel CSV read-back (`panel`)
//! - generic CSV tables for inspection (`table`)

pub mod export;
pub mod panel;
pub mod table;

pub use export::*;
pub use panel::*;
pub use table::*;
