// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Window command - tick calculator for read windows.
//!
//! Converts a human-readable time range and sample period into the tick
//! values and buffer size a host read call needs.

use clap::Args;

use crate::common::{format_period, format_timestamp, parse_period, parse_time_range, Result};

/// Compute tick window and buffer geometry for a read call.
#[derive(Args, Clone, Debug)]
pub struct WindowCmd {
    /// Time range as "start,end" (Unix seconds or ISO 8601)
    #[arg(value_name = "RANGE")]
    range: String,

    /// Sample period in seconds (e.g. 2e-5)
    #[arg(short, long, value_name = "SECONDS")]
    period: String,
}

impl WindowCmd {
    pub fn run(self) -> Result<()> {
        let (begin, end) = parse_time_range(&self.range)?;
        let period = parse_period(&self.period)?;
        let slots = (end - begin).periods(period);

        println!("Begin:  {} ({} ticks)", format_timestamp(begin), begin.raw());
        println!("End:    {} ({} ticks)", format_timestamp(end), end.raw());
        println!("Period: {} ({} ticks)", format_period(period), period.raw());
        println!("Buffer: {slots} samples");

        Ok(())
    }
}
