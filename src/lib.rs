//! `mmm-synth` library crate.
//!
//! The binary (`mmm`) is a thin wrapper around this library so that:
//!
//! - the generator and the statistics are testable without spawning processes
//! - the panel generator can be reused from other tools with its own config

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod inspect;
pub mod io;
pub mod math;
pub mod models;
pub mod plot;
pub mod report;
pub mod stats;
pub mod tui;
