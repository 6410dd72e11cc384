// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! File time-index: begin-timestamp resolution and floor search.
//!
//! Recording files are expensive to open, and both the binary search and the
//! read loop may touch the same file several times within one call. All
//! access therefore goes through a [`FileCache`], a call-scoped memo of
//! opened recordings and resolved begin timestamps. The cache is created at
//! the start of a catalog build or read call and dropped when the call ends;
//! nothing is retained across calls.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tracing::debug;

use crate::core::{timestamp_from_utc_header, AccessError, Result, Ticks};
use crate::source::{Recording, RecordingSource};

/// Call-scoped cache of opened recordings and resolved begin timestamps.
///
/// Append-only during a call: entries are inserted on first access and never
/// mutated afterwards. `Rc` handles keep the single-threaded ownership model
/// explicit; the decoder is not safe for concurrent use.
pub struct FileCache<'a> {
    source: &'a dyn RecordingSource,
    recordings: HashMap<PathBuf, Rc<dyn Recording>>,
    begins: HashMap<PathBuf, Ticks>,
}

impl<'a> FileCache<'a> {
    /// Create an empty cache over the given source.
    pub fn new(source: &'a dyn RecordingSource) -> Self {
        Self {
            source,
            recordings: HashMap::new(),
            begins: HashMap::new(),
        }
    }

    /// Open a recording, or return the handle opened earlier in this call.
    pub fn recording(&mut self, path: &Path) -> Result<Rc<dyn Recording>> {
        if let Some(recording) = self.recordings.get(path) {
            return Ok(Rc::clone(recording));
        }
        let recording = self.source.open(path)?;
        self.recordings
            .insert(path.to_path_buf(), Rc::clone(&recording));
        Ok(recording)
    }

    /// Resolve a file's absolute begin timestamp, memoized per path.
    pub fn begin(&mut self, path: &Path) -> Result<Ticks> {
        if let Some(&begin) = self.begins.get(path) {
            return Ok(begin);
        }
        let recording = self.recording(path)?;
        let begin = resolve_file_begin(path, recording.as_ref())?;
        self.begins.insert(path.to_path_buf(), begin);
        Ok(begin)
    }
}

/// Resolve a recording's absolute begin timestamp from its UTC header.
///
/// Inspects the first channel in document order and reads the UTC header of
/// its mixed data source. Fails with [`AccessError::NoChannels`] when the
/// file exposes no channels and [`AccessError::InvalidTime`] when the header
/// is missing, flagged invalid, or does not form a calendar date.
pub fn resolve_file_begin(path: &Path, recording: &dyn Recording) -> Result<Ticks> {
    let channels = recording.channels();
    let first = channels
        .first()
        .ok_or_else(|| AccessError::no_channels(path))?;
    let data_source = first
        .mixed_source()
        .ok_or_else(|| AccessError::invalid_time(path, "first channel has no mixed data source"))?;
    let header = data_source.utc_time();
    if !header.valid {
        return Err(AccessError::invalid_time(path, "validity flag is false"));
    }
    timestamp_from_utc_header(header.year, header.day_of_year, header.seconds_of_day).ok_or_else(
        || {
            AccessError::invalid_time(
                path,
                format!(
                    "year {} day-of-year {} is not a date",
                    header.year, header.day_of_year
                ),
            )
        },
    )
}

/// Floor search over a filename-sorted file list, keyed by begin timestamp.
///
/// Returns the index of the file whose begin equals `target` if one exists,
/// otherwise the index of the greatest begin strictly less than `target`;
/// clamps to 0 when every file begins after `target`. The list is assumed to
/// sort chronologically by filename; files probed here are opened through the
/// cache, so repeated probes of one path cost a single open.
///
/// Key-resolution errors propagate: when a probe's begin timestamp cannot be
/// determined, the whole search result would be meaningless.
pub fn find_nearest_file_index(
    files: &[PathBuf],
    target: Ticks,
    cache: &mut FileCache<'_>,
) -> Result<usize> {
    let mut lo = 0usize;
    let mut hi = files.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cache.begin(&files[mid])? <= target {
            lo = mid + 1;
        } else {
            hi = mid;
        }
    }
    if lo == 0 {
        // Every file begins after the target; the caller starts at the front.
        debug!(
            context = "file_index",
            target = target.raw(),
            "no file begins at or before target, clamping to first file"
        );
        return Ok(0);
    }
    Ok(lo - 1)
}
