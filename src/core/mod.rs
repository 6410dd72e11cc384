// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types: error taxonomy and tick-exact time arithmetic.

pub mod error;
pub mod time;

pub use error::{AccessError, Result};
pub use time::{timestamp_from_utc_header, Ticks, TICKS_PER_SECOND};
