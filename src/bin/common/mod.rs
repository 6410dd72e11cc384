// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for CLI commands.

use sweepcat::{Ticks, TICKS_PER_SECOND};

pub use anyhow::Result as CliResult;
pub type Result<T = ()> = CliResult<T>;

/// Install the tracing subscriber, honoring `RUST_LOG`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

/// Format an epoch tick instant for display.
pub fn format_timestamp(t: Ticks) -> String {
    match t.to_datetime() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.3f UTC").to_string(),
        None => format!("{} ticks", t.raw()),
    }
}

/// Format a sample period for display.
pub fn format_period(period: Ticks) -> String {
    let secs = period.as_secs_f64();
    if secs >= 1.0 {
        format!("{secs} s")
    } else if secs >= 1e-3 {
        format!("{} ms", secs * 1e3)
    } else {
        format!("{} us", secs * 1e6)
    }
}

/// Parse a timestamp string into epoch ticks.
///
/// Accepts:
/// - Unix timestamp in seconds: "1234567890" or "1234567890.25"
/// - ISO 8601: "2023-01-01T00:00:00Z"
pub fn parse_timestamp(s: &str) -> CliResult<Ticks> {
    if let Ok(secs) = s.parse::<f64>() {
        return Ok(Ticks::from_secs_f64(secs));
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        let nanos = dt.timestamp_nanos_opt().unwrap_or(0);
        return Ok(Ticks::new(nanos / 10));
    }
    Err(anyhow::anyhow!("Invalid timestamp: {s}"))
}

/// Parse a "start,end" time range into a half-open tick window.
pub fn parse_time_range(s: &str) -> CliResult<(Ticks, Ticks)> {
    let Some((start, end)) = s.split_once(',') else {
        return Err(anyhow::anyhow!("Time range must be in format: start,end"));
    };
    let begin = parse_timestamp(start.trim())?;
    let end = parse_timestamp(end.trim())?;
    if end <= begin {
        return Err(anyhow::anyhow!("End time must be after start time"));
    }
    Ok((begin, end))
}

/// Parse a sample period given in seconds.
pub fn parse_period(s: &str) -> CliResult<Ticks> {
    let secs: f64 = s
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid period: {s}"))?;
    let period = Ticks::from_secs_f64(secs);
    if period.raw() <= 0 {
        return Err(anyhow::anyhow!(
            "Period must be at least one tick (1/{TICKS_PER_SECOND} s)"
        ));
    }
    Ok(period)
}
