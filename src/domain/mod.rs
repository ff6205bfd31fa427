//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - the region table and its climate offsets (`Region`)
//! - generator and response constants (`GeneratorConfig`, `ResponseParams`)
//! - persisted panel rows (`PanelRow`) and inspector results (`NormalityResult`)

pub mod types;

pub use types::*;
