// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Narrow trait boundary over the proprietary recording decoder.
//!
//! The decoder exposes each file as a loosely-typed object graph of groups,
//! recorders, channels, data sources, and sweep segments. The traits in this
//! module wrap that graph behind the handful of operations the access layer
//! actually needs, so the catalog builder and the read engine never depend on
//! the decoder's concrete representation.
//!
//! Implementations are handed in explicitly (constructor injection); nothing
//! in this crate holds a process-wide decoder instance. The decoder is not
//! safe for concurrent use, so all handles are `Rc`-shared within one logical
//! call and never cross threads.

use std::fmt;
use std::path::Path;
use std::rc::Rc;

use crate::core::Result;

/// Factory boundary: opens recording files and scores their readability.
pub trait RecordingSource {
    /// Confidence that `open` will succeed for this file, 0-100.
    ///
    /// 0 means definitely unreadable; such files are dropped from read scopes
    /// without being opened.
    fn confidence(&self, path: &Path) -> u8;

    /// Open a recording file and decode its object graph.
    fn open(&self, path: &Path) -> Result<Rc<dyn Recording>>;
}

/// One opened file's decoded object graph.
pub trait Recording {
    /// All channels in document order, flattened across groups and recorders.
    ///
    /// Document order matters: begin-timestamp resolution reads the UTC
    /// header of the first channel returned here.
    fn channels(&self) -> Vec<Rc<dyn Channel>>;
}

/// A physical measurement source within a recording.
pub trait Channel {
    /// Group name (top level of the hierarchy).
    fn group(&self) -> &str;

    /// Recorder name (middle level).
    fn recorder(&self) -> &str;

    /// Original channel name as stored in the file.
    fn name(&self) -> &str;

    /// Physical unit, if declared.
    fn unit(&self) -> Option<&str>;

    /// Channel type as declared by the decoder.
    fn kind(&self) -> ChannelKind;

    /// The channel's "mixed" data source, the unified view across all sweeps.
    ///
    /// The format's own documentation recommends this as the safe default
    /// access path. `None` when the channel exposes no mixed view.
    fn mixed_source(&self) -> Option<Rc<dyn DataSource>>;
}

/// A channel's unified data view combining all sweeps.
pub trait DataSource {
    /// Declared data type of the stored samples.
    fn data_kind(&self) -> DataKind;

    /// Start/end of the full sweep range, seconds relative to file begin.
    fn sweep_range(&self) -> SweepRange;

    /// Segments overlapping `[start, end]` seconds, in time order.
    ///
    /// `None` when the source has no segment index for that range.
    fn segments(&self, start: f64, end: f64) -> Option<Vec<Rc<dyn Segment>>>;

    /// The embedded UTC-time header for this source's file.
    fn utc_time(&self) -> UtcHeader;
}

/// A contiguous run of uniformly-spaced samples within a sweep.
pub trait Segment {
    /// Start offset in seconds, relative to the file's begin timestamp.
    fn start_offset(&self) -> f64;

    /// End offset in seconds, relative to the file's begin timestamp.
    fn end_offset(&self) -> f64;

    /// Nominal sample interval in seconds. May carry representation noise;
    /// always round to ticks before comparing.
    fn sample_interval(&self) -> f64;

    /// Number of samples stored in this segment.
    fn sample_count(&self) -> u64;

    /// Fetch `count` consecutive samples starting at `first_index`.
    ///
    /// The decoder boundary is 1-based: the segment's first sample is index 1.
    /// Returns `None` when the decoder has no data for the request.
    fn waveform(&self, first_index: u64, count: u64) -> Option<Vec<f64>>;
}

/// Channel type as declared by the decoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelKind {
    /// Analog measurement channel; the only kind the catalog admits
    Analog,
    /// Digital (logic) channel
    Digital,
    /// Event/marker channel
    Event,
    /// Anything else the decoder may report
    Other,
}

/// Declared data type of a mixed data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataKind {
    /// Analog waveform samples
    AnalogWaveform,
    /// Digital waveform samples
    DigitalWaveform,
    /// Non-waveform payloads (events, video, ...)
    Other,
}

/// Start/end of a sweep range, seconds relative to file begin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepRange {
    /// Range start in seconds
    pub start: f64,
    /// Range end in seconds
    pub end: f64,
}

/// Embedded UTC-time header of a recording file.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcHeader {
    /// Calendar year
    pub year: i32,
    /// 1-based day of year
    pub day_of_year: u32,
    /// Seconds elapsed within that day
    pub seconds_of_day: f64,
    /// Validity flag; a false flag invalidates the whole header
    pub valid: bool,
}

/// Composite channel identity: (group, recorder, original name).
///
/// Short channel names recur across groups and recorders, so a single name is
/// not an identity. The catalog keeps this triple as metadata precisely so
/// reads can re-locate the exact channel inside any file, independent of the
/// lossy sanitized identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ChannelKey {
    /// Group name
    pub group: String,
    /// Recorder name
    pub recorder: String,
    /// Original channel name
    pub name: String,
}

impl ChannelKey {
    /// Create a new channel key.
    pub fn new(
        group: impl Into<String>,
        recorder: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            recorder: recorder.into(),
            name: name.into(),
        }
    }

    /// Check whether a decoded channel carries this identity.
    pub fn matches(&self, channel: &dyn Channel) -> bool {
        channel.group() == self.group
            && channel.recorder() == self.recorder
            && channel.name() == self.name
    }
}

impl fmt::Display for ChannelKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.group, self.recorder, self.name)
    }
}
