// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Host orchestration facade.
//!
//! `AccessService` is the surface the host protocol layer calls into: it
//! binds an injected [`RecordingSource`] to a set of parsed catalog
//! descriptors and exposes the three host queries: registration (which
//! catalogs exist), materialization (the full channel list of one catalog),
//! and the windowed read call.
//!
//! The source handle is constructor-injected and lives as long as the
//! service; per-call state (open files, begin timestamps) never outlives a
//! single query.

use std::path::Path;
use std::rc::Rc;

use crate::catalog::{build_catalog, Catalog};
use crate::config::{load_descriptors, CatalogDescriptor};
use crate::core::{AccessError, Result, Ticks};
use crate::read::{read_window, CancelToken, ReadRequest};
use crate::source::RecordingSource;

/// The access layer's host-facing service.
pub struct AccessService {
    source: Rc<dyn RecordingSource>,
    descriptors: Vec<CatalogDescriptor>,
}

impl AccessService {
    /// Create a service from an already-parsed descriptor set.
    pub fn new(source: Rc<dyn RecordingSource>, descriptors: Vec<CatalogDescriptor>) -> Self {
        Self {
            source,
            descriptors,
        }
    }

    /// Create a service by loading a descriptor file.
    pub fn from_descriptor_file(source: Rc<dyn RecordingSource>, path: &Path) -> Result<Self> {
        let descriptors = load_descriptors(path)?;
        Ok(Self::new(source, descriptors))
    }

    /// Registration query: (id, title) for every declared catalog.
    pub fn registrations(&self) -> Vec<(String, String)> {
        self.descriptors
            .iter()
            .map(|d| (d.id.clone(), d.title.clone()))
            .collect()
    }

    /// Find a catalog descriptor by id.
    pub fn descriptor(&self, id: &str) -> Result<&CatalogDescriptor> {
        self.descriptors
            .iter()
            .find(|d| d.id == id)
            .ok_or_else(|| AccessError::configuration(format!("unknown catalog id '{id}'")))
    }

    /// Materialization query: build the full catalog for one id.
    pub fn materialize(&self, id: &str) -> Result<Catalog> {
        let descriptor = self.descriptor(id)?;
        let files = descriptor.representative_files()?;
        build_catalog(
            self.source.as_ref(),
            descriptor.id.clone(),
            descriptor.title.clone(),
            &files,
        )
    }

    /// Windowed read call against one catalog's file scope.
    pub fn read(
        &self,
        id: &str,
        begin: Ticks,
        end: Ticks,
        requests: &mut [ReadRequest<'_>],
    ) -> Result<()> {
        self.read_with_cancel(id, begin, end, requests, &CancelToken::new())
    }

    /// Windowed read with a cooperative cancellation token.
    pub fn read_with_cancel(
        &self,
        id: &str,
        begin: Ticks,
        end: Ticks,
        requests: &mut [ReadRequest<'_>],
        cancel: &CancelToken,
    ) -> Result<()> {
        let descriptor = self.descriptor(id)?;
        let files = descriptor.resolve_files()?;
        read_window(
            self.source.as_ref(),
            &files,
            begin,
            end,
            requests,
            descriptor.min_confidence,
            cancel,
        )
    }
}
