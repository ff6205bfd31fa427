//! Shared workflows behind the CLI subcommands.
//!
//! Keeping them here lets the CLI focus on printing while tests drive the same
//! code with in-memory writers:
//! generate -> write CSV, read CSV -> charts -> normality -> export,
//! panel -> response regression.

use std::io::Write;
use std::path::Path;

use crate::data::{DEFAULT_SEED, PanelFrame, generate_panel_seeded};
use crate::domain::{GeneratorConfig, InspectConfig, NormalityResult};
use crate::error::AppError;
use crate::fit::{Recovery, recover_response};
use crate::inspect::inspect_distributions;
use crate::io::{read_panel_csv, read_table_csv, write_normality_results, write_panel_csv};
use crate::plot::{AsciiSink, CollectSink, DistributionSink, SvgWriter};
use crate::stats::ColumnDistribution;

/// Outputs of one inspector run.
#[derive(Debug, Clone, Default)]
pub struct InspectOutput {
    pub results: Option<Vec<NormalityResult>>,
    /// Kept only when the TUI was requested.
    pub distributions: Vec<ColumnDistribution>,
}

/// Generate the canonical panel for `seed` and write it to `output`.
pub fn run_generate(seed: u64, output: &Path) -> Result<PanelFrame, AppError> {
    log::info!("generating panel with seed {seed}");
    let frame = generate_panel_seeded(&GeneratorConfig::default(), seed)?;
    write_panel_csv(output, &frame)?;
    Ok(frame)
}

/// Read `config.input`, render every requested surface and test normality.
///
/// ASCII charts go to `out`; the normality table is left to the caller.
pub fn run_inspect<W: Write>(config: &InspectConfig, out: W) -> Result<InspectOutput, AppError> {
    let table = read_table_csv(&config.input)?;

    let mut ascii = AsciiSink::new(out, config.plot_width, config.plot_height);
    let mut svg = config.svg_dir.clone().map(SvgWriter::new).transpose()?;
    let mut collect = CollectSink::default();

    let mut sinks: Vec<&mut dyn DistributionSink> = Vec::new();
    if config.plot {
        sinks.push(&mut ascii);
    }
    if let Some(svg) = svg.as_mut() {
        sinks.push(svg);
    }
    if config.tui {
        sinks.push(&mut collect);
    }

    let results = inspect_distributions(
        &table,
        config.columns.as_deref(),
        config.shapiro,
        config.bins,
        &mut sinks,
    )?;

    if let (Some(path), Some(results)) = (&config.export, &results) {
        write_normality_results(path, results)?;
    }

    Ok(InspectOutput {
        results,
        distributions: collect.distributions,
    })
}

/// Fit the response regression on a panel read from `input`, or regenerated
/// from `seed` when no input is given.
pub fn run_recover(input: Option<&Path>, seed: Option<u64>) -> Result<Recovery, AppError> {
    let config = GeneratorConfig::default();
    let frame = match input {
        Some(path) => read_panel_csv(path)?,
        None => generate_panel_seeded(&config, seed.unwrap_or(DEFAULT_SEED))?,
    };
    recover_response(&frame, &config.response)
}
