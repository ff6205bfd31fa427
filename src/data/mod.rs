//! Synthetic panel data: calendar, storage, covariate draws, and the generator.

pub mod calendar;
pub mod covariates;
pub mod generator;
pub mod panel;

pub use generator::{DEFAULT_SEED, generate_panel, generate_panel_seeded};
pub use panel::{PanelFrame, PanelIndex};
