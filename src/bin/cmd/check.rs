// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Check command - validate a descriptor file and its file scopes.

use std::path::PathBuf;

use clap::Args;

use crate::common::Result;
use sweepcat::load_descriptors;

/// Validate a descriptor file.
#[derive(Args, Clone, Debug)]
pub struct CheckCmd {
    /// Descriptor file (TOML)
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: PathBuf,
}

impl CheckCmd {
    pub fn run(self) -> Result<()> {
        let descriptors = load_descriptors(&self.descriptor)?;
        println!("{}: {} catalogs", self.descriptor.display(), descriptors.len());

        let mut problems = 0usize;
        for desc in &descriptors {
            match desc.resolve_files() {
                Ok(files) if files.is_empty() => {
                    println!("  [{}] WARN: file scope is empty", desc.id);
                    problems += 1;
                }
                Ok(files) => {
                    println!("  [{}] ok, {} files", desc.id, files.len());
                }
                Err(e) => {
                    println!("  [{}] ERROR: {e}", desc.id);
                    problems += 1;
                }
            }
        }

        if problems > 0 {
            return Err(anyhow::anyhow!("{problems} catalog(s) with problems"));
        }
        Ok(())
    }
}
