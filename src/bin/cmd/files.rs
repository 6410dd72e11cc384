// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Files command - show the resolved file scope of one catalog.

use std::path::PathBuf;

use clap::Args;

use crate::common::Result;
use sweepcat::load_descriptors;

/// List the files a catalog's scope resolves to.
#[derive(Args, Clone, Debug)]
pub struct FilesCmd {
    /// Descriptor file (TOML)
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: PathBuf,

    /// Catalog id to resolve
    #[arg(value_name = "ID")]
    id: String,
}

impl FilesCmd {
    pub fn run(self) -> Result<()> {
        let descriptors = load_descriptors(&self.descriptor)?;
        let desc = descriptors
            .iter()
            .find(|d| d.id == self.id)
            .ok_or_else(|| anyhow::anyhow!("unknown catalog id '{}'", self.id))?;

        let files = desc.resolve_files()?;
        println!("=== {} ({} files) ===", desc.id, files.len());
        for file in &files {
            println!("  {}", file.display());
        }

        Ok(())
    }
}
