// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Persisted catalog descriptors.
//!
//! A descriptor file (TOML) declares one or more catalogs, each naming a
//! recording set: either an explicit file list or a data directory plus a
//! glob pattern over file names. Descriptors are the only configuration this
//! crate reads; anything missing or unparseable is a
//! [`AccessError::Configuration`](crate::core::AccessError) at load time.
//!
//! ```toml
//! [[catalog]]
//! id = "line4"
//! title = "Line 4 transient recorder"
//! data_dir = "/data/line4"
//! pattern = "*.rec"
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use crate::core::{AccessError, Result};

fn default_min_confidence() -> u8 {
    1
}

/// A parsed descriptor file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescriptorFile {
    /// Declared catalogs
    #[serde(default, rename = "catalog")]
    pub catalogs: Vec<CatalogDescriptor>,
}

/// One catalog declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDescriptor {
    /// Catalog id, unique within the descriptor file
    pub id: String,
    /// Human-readable title
    pub title: String,
    /// Directory to search for recording files
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Glob pattern over file names within `data_dir` (default `*`)
    #[serde(default)]
    pub pattern: Option<String>,
    /// Explicit file list; when non-empty it replaces the directory search
    #[serde(default)]
    pub files: Vec<PathBuf>,
    /// Minimum decoder load confidence (0-100) a file needs to stay in the
    /// read scope; default 1 drops only definitely-unreadable files
    #[serde(default = "default_min_confidence")]
    pub min_confidence: u8,
}

impl CatalogDescriptor {
    /// Resolve the full file scope for this catalog, sorted by path.
    ///
    /// Explicit `files` win; otherwise `data_dir` is scanned one level deep
    /// and file names are matched against `pattern`.
    pub fn resolve_files(&self) -> Result<Vec<PathBuf>> {
        if !self.files.is_empty() {
            let mut files = self.files.clone();
            files.sort();
            return Ok(files);
        }

        let dir = self.data_dir.as_ref().ok_or_else(|| {
            AccessError::configuration(format!(
                "catalog '{}' declares neither files nor data_dir",
                self.id
            ))
        })?;
        let matcher = glob_to_regex(self.pattern.as_deref().unwrap_or("*"))?;

        let mut files = Vec::new();
        for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
            let entry = entry.map_err(|e| {
                AccessError::configuration(format!(
                    "catalog '{}': cannot scan {}: {e}",
                    self.id,
                    dir.display()
                ))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy();
            if matcher.is_match(&name) {
                files.push(entry.into_path());
            }
        }
        files.sort();
        Ok(files)
    }

    /// Files to open when building this catalog's channel list.
    ///
    /// An explicit list catalogs every named file; a directory search uses
    /// the first file as the representative one.
    pub fn representative_files(&self) -> Result<Vec<PathBuf>> {
        if !self.files.is_empty() {
            return self.resolve_files();
        }
        let scope = self.resolve_files()?;
        Ok(scope.into_iter().take(1).collect())
    }
}

/// Load and validate a descriptor file.
pub fn load_descriptors(path: &Path) -> Result<Vec<CatalogDescriptor>> {
    let text = fs::read_to_string(path).map_err(|e| {
        AccessError::configuration(format!("cannot read descriptor {}: {e}", path.display()))
    })?;
    let parsed: DescriptorFile = toml::from_str(&text).map_err(|e| {
        AccessError::configuration(format!("cannot parse descriptor {}: {e}", path.display()))
    })?;

    if parsed.catalogs.is_empty() {
        return Err(AccessError::configuration(format!(
            "descriptor {} declares no catalogs",
            path.display()
        )));
    }
    for (i, desc) in parsed.catalogs.iter().enumerate() {
        if desc.id.is_empty() {
            return Err(AccessError::configuration(format!(
                "catalog #{} has an empty id",
                i + 1
            )));
        }
        if parsed.catalogs[..i].iter().any(|d| d.id == desc.id) {
            return Err(AccessError::configuration(format!(
                "duplicate catalog id '{}'",
                desc.id
            )));
        }
    }
    Ok(parsed.catalogs)
}

/// Compile a file-name glob into an anchored regex.
///
/// Supports `*` (any run of characters) and `?` (any single character);
/// everything else matches literally.
fn glob_to_regex(pattern: &str) -> Result<Regex> {
    let mut re = String::with_capacity(pattern.len() + 8);
    re.push('^');
    for ch in pattern.chars() {
        match ch {
            '*' => re.push_str(".*"),
            '?' => re.push('.'),
            other => re.push_str(&regex::escape(&other.to_string())),
        }
    }
    re.push('$');
    Regex::new(&re)
        .map_err(|e| AccessError::configuration(format!("bad glob pattern '{pattern}': {e}")))
}
