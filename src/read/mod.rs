// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Windowed read engine.
//!
//! A read call takes a `[begin, end)` window and a set of per-channel
//! requests, walks the candidate files in time order, intersects every
//! matching segment against the window, and copies the overlapping samples
//! into each request's caller-owned buffer. A parallel presence mask marks
//! which output slots were actually filled; slots no segment covers keep
//! their initial state, and sparse results are not an error.
//!
//! Conditions that only affect one file or segment (missing channel, period
//! mismatch, empty segment list, empty waveform fetch, unopenable file) are
//! soft skips: logged, then the loop continues. Begin-resolution failures
//! inside the entry binary search are the one hard failure, because a
//! missing ordering key invalidates the search result.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, trace, warn};

use crate::core::{AccessError, Result, Ticks};
use crate::index::{find_nearest_file_index, FileCache};
use crate::source::{ChannelKey, RecordingSource};

/// One channel read within a windowed read call.
///
/// Both buffers are owned by the caller and must be sized for the whole
/// window at the requested period: `(end - begin) / period` slots. The
/// engine only writes into them.
pub struct ReadRequest<'a> {
    /// Channel identity to locate in each file
    pub channel: ChannelKey,
    /// Requested sample period; segments with any other rounded period are
    /// skipped, never resampled
    pub period: Ticks,
    /// Destination sample buffer
    pub samples: &'a mut [f64],
    /// Presence mask, parallel to `samples`
    pub present: &'a mut [bool],
}

/// Cooperative cancellation signal for long read calls.
///
/// Checked between file iterations only; a cancelled call returns cleanly
/// with whatever it copied so far, and no copy into an output buffer is ever
/// torn.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signal cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Check whether cancellation was signalled.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Execute a windowed read over a set of candidate files.
///
/// Files are sorted by path, filtered by the source's load confidence
/// (anything below `min_confidence` is dropped), and scanned forward from
/// the floor-search entry point until a file begins at or after `end`. An
/// empty candidate list after filtering is a no-op.
pub fn read_window(
    source: &dyn RecordingSource,
    files: &[PathBuf],
    begin: Ticks,
    end: Ticks,
    requests: &mut [ReadRequest<'_>],
    min_confidence: u8,
    cancel: &CancelToken,
) -> Result<()> {
    if end <= begin || requests.is_empty() {
        return Ok(());
    }
    validate_buffers(begin, end, requests)?;

    let mut candidates: Vec<PathBuf> = files.to_vec();
    candidates.sort();
    candidates.retain(|path| {
        let confidence = source.confidence(path);
        if confidence < min_confidence {
            debug!(
                context = "read",
                file = %path.display(),
                confidence,
                min_confidence,
                "dropping low-confidence file"
            );
            return false;
        }
        true
    });
    if candidates.is_empty() {
        return Ok(());
    }

    let mut cache = FileCache::new(source);
    let start_idx = find_nearest_file_index(&candidates, begin, &mut cache)?;

    let mut previous_begin: Option<Ticks> = None;
    for path in &candidates[start_idx..] {
        if cancel.is_cancelled() {
            debug!(context = "read", "read cancelled between files");
            return Ok(());
        }

        let file_begin = match cache.begin(path) {
            Ok(t) => t,
            Err(e) => {
                warn!(
                    context = "read",
                    file = %path.display(),
                    error = %e,
                    "skipping file, cannot resolve begin timestamp"
                );
                continue;
            }
        };

        // Filenames are assumed to sort chronologically; the assumption is
        // never guaranteed by the format, so flag violations.
        if let Some(prev) = previous_begin {
            if file_begin < prev {
                warn!(
                    context = "read",
                    file = %path.display(),
                    "file begins before its filename predecessor, results may be incomplete"
                );
            }
        }
        previous_begin = Some(file_begin);

        if file_begin >= end {
            // Later files (in filename order) start even later; nothing more
            // can overlap the window.
            break;
        }

        let recording = match cache.recording(path) {
            Ok(r) => r,
            Err(e) => {
                warn!(
                    context = "read",
                    file = %path.display(),
                    error = %e,
                    "skipping unopenable file"
                );
                continue;
            }
        };

        let channels = recording.channels();
        for request in requests.iter_mut() {
            let Some(channel) = channels.iter().find(|c| request.channel.matches(c.as_ref()))
            else {
                // A channel need not exist in every file of a set.
                trace!(
                    context = "read",
                    channel = %request.channel,
                    file = %path.display(),
                    "channel not present in file"
                );
                continue;
            };

            let Some(data_source) = channel.mixed_source() else {
                trace!(
                    context = "read",
                    channel = %request.channel,
                    "channel has no mixed data source"
                );
                continue;
            };

            let sweep = data_source.sweep_range();
            let Some(segments) = data_source.segments(sweep.start, sweep.end) else {
                trace!(
                    context = "read",
                    channel = %request.channel,
                    "no segment index for sweep range"
                );
                continue;
            };

            for segment in &segments {
                let period = Ticks::from_secs_f64(segment.sample_interval());
                if period != request.period {
                    trace!(
                        context = "read",
                        channel = %request.channel,
                        segment_period = period.raw(),
                        requested_period = request.period.raw(),
                        "sample period mismatch"
                    );
                    continue;
                }

                let segment_begin = file_begin + Ticks::from_secs_f64(segment.start_offset());
                let segment_end = file_begin + Ticks::from_secs_f64(segment.end_offset());

                if segment_begin >= end {
                    // Segments are time-ordered within a channel; the rest
                    // cannot intersect either.
                    break;
                }
                if segment_end < begin {
                    continue;
                }

                copy_segment_overlap(
                    segment.as_ref(),
                    segment_begin,
                    begin,
                    end,
                    period,
                    request,
                    path,
                );
            }
        }
    }

    Ok(())
}

/// Intersect one segment with the window and copy the overlap.
fn copy_segment_overlap(
    segment: &dyn crate::source::Segment,
    segment_begin: Ticks,
    window_begin: Ticks,
    window_end: Ticks,
    period: Ticks,
    request: &mut ReadRequest<'_>,
    path: &Path,
) {
    let segment_end = segment_begin + (Ticks::from_secs_f64(segment.end_offset())
        - Ticks::from_secs_f64(segment.start_offset()));

    let read_begin = window_begin.max(segment_begin);
    let read_end = window_end.min(segment_end);
    if read_end <= read_begin {
        return;
    }

    // Integer tick arithmetic throughout: both operands are whole multiples
    // of the tick resolution, so the divisions are exact by construction.
    let sample_offset = (read_begin - segment_begin).periods(period);
    let count = (read_end - read_begin).periods(period);
    if count <= 0 {
        return;
    }

    // Decoder waveform indices are 1-based.
    let Some(samples) = segment.waveform(sample_offset as u64 + 1, count as u64) else {
        trace!(
            context = "read",
            channel = %request.channel,
            file = %path.display(),
            "decoder returned no waveform data"
        );
        return;
    };
    if samples.is_empty() {
        trace!(
            context = "read",
            channel = %request.channel,
            file = %path.display(),
            "decoder returned empty waveform"
        );
        return;
    }

    let dest = (read_begin - window_begin).periods(period) as usize;
    let available = request.samples.len().saturating_sub(dest);
    let n = samples.len().min(count as usize).min(available);
    request.samples[dest..dest + n].copy_from_slice(&samples[..n]);
    for slot in &mut request.present[dest..dest + n] {
        *slot = true;
    }
}

/// Check every request's buffer geometry against the window and period.
fn validate_buffers(begin: Ticks, end: Ticks, requests: &[ReadRequest<'_>]) -> Result<()> {
    for request in requests {
        if request.period.raw() <= 0 {
            return Err(AccessError::configuration(format!(
                "request for {} has non-positive sample period",
                request.channel
            )));
        }
        let expected = (end - begin).periods(request.period) as usize;
        if request.samples.len() != expected {
            return Err(AccessError::buffer_mismatch(expected, request.samples.len()));
        }
        if request.present.len() != request.samples.len() {
            return Err(AccessError::buffer_mismatch(
                request.samples.len(),
                request.present.len(),
            ));
        }
    }
    Ok(())
}
