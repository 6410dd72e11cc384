// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.
//!
//! Provides an in-memory [`RecordingSource`] so the access layer can be
//! exercised without the proprietary decoder: recordings, channels, and
//! segments are built with small builder helpers, and the source counts
//! `open` calls per path so caching behavior is observable.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sweepcat::core::{AccessError, Result};
use sweepcat::source::{
    Channel, ChannelKind, DataKind, DataSource, Recording, RecordingSource, Segment, SweepRange,
    UtcHeader,
};

// ============================================================================
// Source
// ============================================================================

/// In-memory recording source with per-path open counting.
#[derive(Default)]
pub struct MemorySource {
    recordings: HashMap<PathBuf, Rc<MemoryRecording>>,
    confidences: HashMap<PathBuf, u8>,
    fail_open: HashSet<PathBuf>,
    open_counts: RefCell<HashMap<PathBuf, usize>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a recording under a path.
    pub fn with_file(mut self, path: impl Into<PathBuf>, recording: MemoryRecording) -> Self {
        self.recordings.insert(path.into(), Rc::new(recording));
        self
    }

    /// Override the load confidence for a path (default 100).
    pub fn with_confidence(mut self, path: impl Into<PathBuf>, confidence: u8) -> Self {
        self.confidences.insert(path.into(), confidence);
        self
    }

    /// Make `open` fail for a path.
    pub fn with_open_failure(mut self, path: impl Into<PathBuf>) -> Self {
        self.fail_open.insert(path.into());
        self
    }

    /// How many times `open` was called for a path.
    pub fn open_count(&self, path: impl AsRef<Path>) -> usize {
        self.open_counts
            .borrow()
            .get(path.as_ref())
            .copied()
            .unwrap_or(0)
    }
}

impl RecordingSource for MemorySource {
    fn confidence(&self, path: &Path) -> u8 {
        self.confidences.get(path).copied().unwrap_or(100)
    }

    fn open(&self, path: &Path) -> Result<Rc<dyn Recording>> {
        *self
            .open_counts
            .borrow_mut()
            .entry(path.to_path_buf())
            .or_insert(0) += 1;

        if self.fail_open.contains(path) {
            return Err(AccessError::open(path, "simulated decoder failure"));
        }
        self.recordings
            .get(path)
            .map(|r| Rc::clone(r) as Rc<dyn Recording>)
            .ok_or_else(|| AccessError::open(path, "no such recording"))
    }
}

// ============================================================================
// Recording / channel
// ============================================================================

/// In-memory recording: a channel list in document order.
#[derive(Default)]
pub struct MemoryRecording {
    channels: Vec<Rc<MemoryChannel>>,
}

impl MemoryRecording {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: MemoryChannel) -> Self {
        self.channels.push(Rc::new(channel));
        self
    }
}

impl Recording for MemoryRecording {
    fn channels(&self) -> Vec<Rc<dyn Channel>> {
        self.channels
            .iter()
            .map(|c| Rc::clone(c) as Rc<dyn Channel>)
            .collect()
    }
}

/// In-memory channel.
pub struct MemoryChannel {
    group: String,
    recorder: String,
    name: String,
    unit: Option<String>,
    kind: ChannelKind,
    source: Option<Rc<MemoryDataSource>>,
}

impl MemoryChannel {
    /// An analog channel without a data source.
    pub fn analog(
        group: impl Into<String>,
        recorder: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            recorder: recorder.into(),
            name: name.into(),
            unit: None,
            kind: ChannelKind::Analog,
            source: None,
        }
    }

    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    pub fn with_kind(mut self, kind: ChannelKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_source(mut self, source: MemoryDataSource) -> Self {
        self.source = Some(Rc::new(source));
        self
    }
}

impl Channel for MemoryChannel {
    fn group(&self) -> &str {
        &self.group
    }

    fn recorder(&self) -> &str {
        &self.recorder
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn unit(&self) -> Option<&str> {
        self.unit.as_deref()
    }

    fn kind(&self) -> ChannelKind {
        self.kind
    }

    fn mixed_source(&self) -> Option<Rc<dyn DataSource>> {
        self.source
            .as_ref()
            .map(|s| Rc::clone(s) as Rc<dyn DataSource>)
    }
}

// ============================================================================
// Data source / segments
// ============================================================================

/// In-memory mixed data source.
pub struct MemoryDataSource {
    data_kind: DataKind,
    utc: UtcHeader,
    segments: Vec<Rc<MemorySegment>>,
    no_segment_index: bool,
}

impl MemoryDataSource {
    /// An analog-waveform source with the given UTC header.
    pub fn waveform(utc: UtcHeader) -> Self {
        Self {
            data_kind: DataKind::AnalogWaveform,
            utc,
            segments: Vec::new(),
            no_segment_index: false,
        }
    }

    pub fn with_data_kind(mut self, kind: DataKind) -> Self {
        self.data_kind = kind;
        self
    }

    pub fn with_segment(mut self, segment: MemorySegment) -> Self {
        self.segments.push(Rc::new(segment));
        self
    }

    /// Simulate a decoder that has no segment index for the sweep range.
    pub fn without_segment_index(mut self) -> Self {
        self.no_segment_index = true;
        self
    }
}

impl DataSource for MemoryDataSource {
    fn data_kind(&self) -> DataKind {
        self.data_kind
    }

    fn sweep_range(&self) -> SweepRange {
        let start = self
            .segments
            .iter()
            .map(|s| s.start_offset)
            .fold(f64::INFINITY, f64::min);
        let end = self
            .segments
            .iter()
            .map(|s| s.end_offset)
            .fold(f64::NEG_INFINITY, f64::max);
        if self.segments.is_empty() {
            SweepRange {
                start: 0.0,
                end: 0.0,
            }
        } else {
            SweepRange { start, end }
        }
    }

    fn segments(&self, _start: f64, _end: f64) -> Option<Vec<Rc<dyn Segment>>> {
        if self.no_segment_index {
            return None;
        }
        Some(
            self.segments
                .iter()
                .map(|s| Rc::clone(s) as Rc<dyn Segment>)
                .collect(),
        )
    }

    fn utc_time(&self) -> UtcHeader {
        self.utc
    }
}

/// In-memory segment of uniformly-spaced samples.
pub struct MemorySegment {
    start_offset: f64,
    end_offset: f64,
    interval: f64,
    samples: Vec<f64>,
    empty_waveform: bool,
}

impl MemorySegment {
    pub fn new(start_offset: f64, interval: f64, samples: Vec<f64>) -> Self {
        let end_offset = start_offset + interval * samples.len() as f64;
        Self {
            start_offset,
            end_offset,
            interval,
            samples,
            empty_waveform: false,
        }
    }

    /// Simulate a decoder that returns no data for waveform fetches.
    pub fn with_empty_waveform(mut self) -> Self {
        self.empty_waveform = true;
        self
    }
}

impl Segment for MemorySegment {
    fn start_offset(&self) -> f64 {
        self.start_offset
    }

    fn end_offset(&self) -> f64 {
        self.end_offset
    }

    fn sample_interval(&self) -> f64 {
        self.interval
    }

    fn sample_count(&self) -> u64 {
        self.samples.len() as u64
    }

    fn waveform(&self, first_index: u64, count: u64) -> Option<Vec<f64>> {
        if self.empty_waveform || first_index == 0 {
            return None;
        }
        let start = (first_index - 1) as usize;
        if start >= self.samples.len() {
            return None;
        }
        let end = (start + count as usize).min(self.samples.len());
        Some(self.samples[start..end].to_vec())
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// A valid UTC header.
pub fn utc(year: i32, day_of_year: u32, seconds_of_day: f64) -> UtcHeader {
    UtcHeader {
        year,
        day_of_year,
        seconds_of_day,
        valid: true,
    }
}

/// A UTC header with the validity flag cleared.
pub fn invalid_utc() -> UtcHeader {
    UtcHeader {
        year: 2021,
        day_of_year: 1,
        seconds_of_day: 0.0,
        valid: false,
    }
}

/// An analog waveform channel with the given header and segments.
pub fn analog_channel(
    group: &str,
    recorder: &str,
    name: &str,
    header: UtcHeader,
    segments: Vec<MemorySegment>,
) -> MemoryChannel {
    let mut source = MemoryDataSource::waveform(header);
    for segment in segments {
        source = source.with_segment(segment);
    }
    MemoryChannel::analog(group, recorder, name).with_source(source)
}
