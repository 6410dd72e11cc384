// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Catalog builder: normalize recording files into a stable resource catalog.
//!
//! A catalog lists the logical channels one or more representative files
//! offer, each with a sanitized identifier, its physical unit, the original
//! (group, recorder, name) triple needed to re-locate the channel during
//! reads, and one representation per distinct rounded sample period found
//! across the channel's segments.
//!
//! Channels that cannot be cataloged (wrong type, no waveform data, no
//! segments, unsanitizable name) are logged and skipped; a skip never aborts
//! the build.

pub mod sanitize;

use std::collections::{BTreeSet, HashMap};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::{Result, Ticks};
use crate::source::{ChannelKey, ChannelKind, DataKind, RecordingSource};

pub use sanitize::{compose_display_name, sanitize_identifier};

/// One sample-period variant offered by a catalog channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Representation {
    /// Rounded sample period
    pub period: Ticks,
}

/// A logical channel in the catalog.
#[derive(Debug, Clone)]
pub struct CatalogChannel {
    /// Sanitized, catalog-legal identifier
    pub identifier: String,
    /// Physical unit, if the channel declares one
    pub unit: Option<String>,
    /// Original (group, recorder, name) triple; the lossless identity used
    /// to re-locate this channel inside any file during reads
    pub key: ChannelKey,
    /// Distinct rounded sample periods, ascending
    pub representations: Vec<Representation>,
}

/// A built catalog: the resource list for one configured recording set.
#[derive(Debug, Clone)]
pub struct Catalog {
    /// Catalog id from the descriptor
    pub id: String,
    /// Human-readable title from the descriptor
    pub title: String,
    /// Channels in discovery order
    pub channels: Vec<CatalogChannel>,
}

impl Catalog {
    /// Look up a channel by its sanitized identifier.
    pub fn channel(&self, identifier: &str) -> Option<&CatalogChannel> {
        self.channels.iter().find(|c| c.identifier == identifier)
    }
}

/// Build a catalog from one or more representative recording files.
///
/// Each file is opened once; for every analog channel with waveform data and
/// at least one segment, an entry is added under its sanitized identifier.
/// Merging across files is a union over identifiers; when two files define
/// the same identifier with different metadata the later file wins and a
/// warning names the identifier.
pub fn build_catalog(
    source: &dyn RecordingSource,
    id: impl Into<String>,
    title: impl Into<String>,
    paths: &[PathBuf],
) -> Result<Catalog> {
    let mut channels: Vec<CatalogChannel> = Vec::new();
    let mut by_identifier: HashMap<String, usize> = HashMap::new();

    for path in paths {
        let recording = source.open(path)?;
        for channel in recording.channels() {
            if channel.kind() != ChannelKind::Analog {
                debug!(
                    context = "catalog",
                    channel = %channel.name(),
                    kind = ?channel.kind(),
                    "skipping non-analog channel"
                );
                continue;
            }

            let Some(data_source) = channel.mixed_source() else {
                debug!(
                    context = "catalog",
                    channel = %channel.name(),
                    "skipping channel without mixed data source"
                );
                continue;
            };

            match data_source.data_kind() {
                DataKind::AnalogWaveform | DataKind::DigitalWaveform => {}
                DataKind::Other => {
                    debug!(
                        context = "catalog",
                        channel = %channel.name(),
                        "skipping channel without waveform data"
                    );
                    continue;
                }
            }

            let sweep = data_source.sweep_range();
            let segments = match data_source.segments(sweep.start, sweep.end) {
                Some(segments) if !segments.is_empty() => segments,
                _ => {
                    // No segment to infer a sample period from.
                    debug!(
                        context = "catalog",
                        channel = %channel.name(),
                        "skipping channel without segments"
                    );
                    continue;
                }
            };

            let display_name =
                compose_display_name(channel.group(), channel.recorder(), channel.name());
            let Some(identifier) = sanitize_identifier(&display_name) else {
                debug!(
                    context = "catalog",
                    channel = %channel.name(),
                    display = %display_name,
                    "skipping channel with unsanitizable name"
                );
                continue;
            };

            let periods: BTreeSet<Ticks> = segments
                .iter()
                .map(|s| Ticks::from_secs_f64(s.sample_interval()))
                .collect();

            let entry = CatalogChannel {
                identifier: identifier.clone(),
                unit: channel.unit().map(str::to_string),
                key: ChannelKey::new(channel.group(), channel.recorder(), channel.name()),
                representations: periods
                    .into_iter()
                    .map(|period| Representation { period })
                    .collect(),
            };

            match by_identifier.get(&identifier) {
                Some(&idx) => {
                    let previous = &channels[idx];
                    if previous.unit != entry.unit || previous.key != entry.key {
                        warn!(
                            context = "catalog",
                            identifier = %identifier,
                            file = %path.display(),
                            "conflicting metadata for identifier, keeping later definition"
                        );
                    }
                    channels[idx] = entry;
                }
                None => {
                    by_identifier.insert(identifier, channels.len());
                    channels.push(entry);
                }
            }
        }
    }

    Ok(Catalog {
        id: id.into(),
        title: title.into(),
        channels,
    })
}
