//! Rendering surfaces for column distributions.
//!
//! The inspector hands every distribution to a list of [`DistributionSink`]s;
//! each sink decides where the chart goes (stdout, SVG files, or a buffer for
//! the TUI).

use std::io::Write;

use crate::error::AppError;
use crate::stats::ColumnDistribution;

pub mod ascii;
pub mod svg;

pub use ascii::render_ascii_distribution;
pub use svg::{SvgWriter, write_distribution_svg};

/// Receives one rendered-or-collected distribution per inspected column.
pub trait DistributionSink {
    fn render(&mut self, dist: &ColumnDistribution) -> Result<(), AppError>;
}

/// Prints ASCII charts to a writer (stdout in the CLI).
pub struct AsciiSink<W: Write> {
    out: W,
    width: usize,
    height: usize,
}

impl<W: Write> AsciiSink<W> {
    pub fn new(out: W, width: usize, height: usize) -> Self {
        Self { out, width, height }
    }
}

impl<W: Write> DistributionSink for AsciiSink<W> {
    fn render(&mut self, dist: &ColumnDistribution) -> Result<(), AppError> {
        let chart = render_ascii_distribution(dist, self.width, self.height);
        writeln!(self.out, "{chart}").map_err(|e| AppError::input(format!("Failed to write chart: {e}")))
    }
}

impl DistributionSink for SvgWriter {
    fn render(&mut self, dist: &ColumnDistribution) -> Result<(), AppError> {
        self.write(dist).map(|_| ())
    }
}

/// Keeps every distribution in memory (for the TUI and for tests).
#[derive(Debug, Clone, Default)]
pub struct CollectSink {
    pub distributions: Vec<ColumnDistribution>,
}

impl DistributionSink for CollectSink {
    fn render(&mut self, dist: &ColumnDistribution) -> Result<(), AppError> {
        self.distributions.push(dist.clone());
        Ok(())
    }
}
