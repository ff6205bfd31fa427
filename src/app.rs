//! Top-level application orchestration.
//!
//! `src/main.rs` only sets up logging; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - runs the requested workflow from [`pipeline`]
//! - prints reports and launches the TUI

use std::io;

use clap::Parser;

use crate::cli::{Cli, Command, GenerateArgs, InspectArgs, RecoverArgs};
use crate::error::AppError;
use crate::report::{format_normality_table, format_panel_preview, format_recovery, format_shape};

pub mod pipeline;

/// Entry point for the `mmm` binary.
pub fn run() -> Result<(), AppError> {
    // A missing .env is fine; a malformed one is worth a warning.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            log::warn!("ignoring .env: {e}");
        }
    }

    let cli = Cli::parse();
    match cli.command {
        Command::Generate(args) => handle_generate(args),
        Command::Inspect(args) => handle_inspect(args),
        Command::Recover(args) => handle_recover(args),
    }
}

fn handle_generate(args: GenerateArgs) -> Result<(), AppError> {
    let frame = pipeline::run_generate(args.seed, &args.output)?;

    if args.preview > 0 {
        println!("{}", format_panel_preview(&frame, args.preview));
    }
    println!("{}", format_shape(&frame));
    println!("Saved to {}", args.output.display());
    Ok(())
}

fn handle_inspect(args: InspectArgs) -> Result<(), AppError> {
    let config = args.to_config();
    let output = pipeline::run_inspect(&config, io::stdout().lock())?;

    if let Some(results) = &output.results {
        println!("{}", format_normality_table(results));
    }
    if config.tui {
        crate::tui::run(output.distributions, output.results)?;
    }
    Ok(())
}

fn handle_recover(args: RecoverArgs) -> Result<(), AppError> {
    let recovery = pipeline::run_recover(args.input.as_deref(), args.seed)?;
    println!("{}", format_recovery(&recovery));
    Ok(())
}
