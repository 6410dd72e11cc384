// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Sweepcat CLI
//!
//! Descriptor-level tooling for the recording access layer.
//!
//! ## Usage
//!
//! ```sh
//! # List declared catalogs
//! sweepcat catalogs catalogs.toml
//!
//! # Show one catalog's resolved file scope
//! sweepcat files catalogs.toml line4
//!
//! # Validate a descriptor file
//! sweepcat check catalogs.toml
//!
//! # Compute tick window and buffer geometry for a read
//! sweepcat window "2021-02-01T00:00:00Z,2021-02-01T01:00:00Z" --period 2e-5
//! ```

mod cmd;
mod common;

use std::process;

use clap::{Parser, Subcommand};
use cmd::{CatalogsCmd, CheckCmd, FilesCmd, WindowCmd};
use common::Result;

/// Sweepcat - segmented recording catalog toolkit
///
/// Inspect and validate catalog descriptors for time-indexed recording sets.
#[derive(Parser, Clone)]
#[command(name = "sweepcat")]
#[command(about = "Catalog tooling for segmented waveform recordings", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Available commands
#[derive(Subcommand, Clone)]
enum Commands {
    /// List the catalogs a descriptor file declares
    Catalogs(CatalogsCmd),

    /// Show the resolved file scope of one catalog
    Files(FilesCmd),

    /// Validate a descriptor file and its file scopes
    Check(CheckCmd),

    /// Compute tick window and buffer geometry for a read call
    Window(WindowCmd),
}

fn run() -> Result<()> {
    common::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Commands::Catalogs(cmd) => cmd.run(),
        Commands::Files(cmd) => cmd.run(),
        Commands::Check(cmd) => cmd.run(),
        Commands::Window(cmd) => cmd.run(),
    }
}

fn main() {
    let result = run();

    if let Err(e) = result {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
