// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Catalogs command - list the catalogs a descriptor file declares.

use std::path::PathBuf;

use clap::Args;

use crate::common::Result;
use sweepcat::load_descriptors;

/// List declared catalogs.
#[derive(Args, Clone, Debug)]
pub struct CatalogsCmd {
    /// Descriptor file (TOML)
    #[arg(value_name = "DESCRIPTOR")]
    descriptor: PathBuf,

    /// Emit the parsed descriptors as JSON
    #[arg(long)]
    json: bool,
}

impl CatalogsCmd {
    pub fn run(self) -> Result<()> {
        let descriptors = load_descriptors(&self.descriptor)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&descriptors)?);
            return Ok(());
        }

        println!("=== {} ===", self.descriptor.display());
        for desc in &descriptors {
            let scope = if desc.files.is_empty() {
                format!(
                    "{} / {}",
                    desc.data_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "<no data_dir>".to_string()),
                    desc.pattern.as_deref().unwrap_or("*")
                )
            } else {
                format!("{} explicit files", desc.files.len())
            };
            println!("  [{}] {} | {}", desc.id, desc.title, scope);
        }

        Ok(())
    }
}
