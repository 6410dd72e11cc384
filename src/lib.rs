// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # Sweepcat
//!
//! Time-indexed access layer for segmented waveform recordings.
//!
//! Hierarchical recording files (groups → recorders → channels → sweep
//! segments) are exposed as a uniform resource catalog, and arbitrary
//! `[begin, end)` time windows can be read into caller-provided sample
//! buffers with a presence mask marking which slots real data reached.
//!
//! ## Architecture
//!
//! The library is organized by responsibility:
//! - `source/` - narrow trait boundary over the proprietary recording decoder
//! - `index/` - begin-timestamp resolution and floor search over file lists
//! - `catalog/` - channel discovery, name sanitization, representation sets
//! - `read/` - windowed reads with tick-exact intersection arithmetic
//! - `config` - persisted catalog descriptors (TOML)
//! - `service` - the host-facing facade tying the above together
//!
//! ## Example: catalog and read
//!
//! ```rust,no_run
//! # use std::rc::Rc;
//! # use sweepcat::source::RecordingSource;
//! # fn demo(source: Rc<dyn RecordingSource>) -> sweepcat::Result<()> {
//! use sweepcat::{AccessService, ReadRequest, Ticks};
//!
//! let service = AccessService::from_descriptor_file(source, "catalogs.toml".as_ref())?;
//! let catalog = service.materialize("line4")?;
//!
//! let channel = &catalog.channels[0];
//! let period = channel.representations[0].period;
//! let begin = Ticks::new(0);
//! let end = Ticks::new(period.raw() * 1000);
//!
//! let mut samples = vec![0.0; 1000];
//! let mut present = vec![false; 1000];
//! let mut requests = [ReadRequest {
//!     channel: channel.key.clone(),
//!     period,
//!     samples: &mut samples,
//!     present: &mut present,
//! }];
//! service.read("line4", begin, end, &mut requests)?;
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{AccessError, Result, Ticks, TICKS_PER_SECOND};

// Decoder trait boundary
pub mod source;

// File time-index
pub mod index;

// Catalog discovery
pub mod catalog;

// Windowed reads
pub mod read;

// Catalog descriptors
pub mod config;

// Host-facing facade
pub mod service;

// Re-export the primary API surface
pub use catalog::{build_catalog, Catalog, CatalogChannel, Representation};
pub use config::{load_descriptors, CatalogDescriptor};
pub use read::{read_window, CancelToken, ReadRequest};
pub use service::AccessService;
pub use source::ChannelKey;
