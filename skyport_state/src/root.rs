// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The visualization root value.

use alloc::sync::Arc;
use alloc::vec::Vec;

use skyport_align::AlignMode;
use skyport_view::{GroupId, Viewport, ViewportId};

/// One alignment group's record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewportGroup {
    /// The group's id.
    pub id: GroupId,
    /// Whether scroll/rotate/flip changes propagate across the group.
    pub position_lock: bool,
}

/// The whole visualization state: every viewport plus the alignment policy.
///
/// An immutable value; the reducer returns new roots and shares unchanged
/// viewports by `Arc`.
#[derive(Clone, Debug, Default)]
pub struct VisRoot {
    pub(crate) viewports: Vec<Arc<Viewport>>,
    pub(crate) groups: Vec<ViewportGroup>,
    pub(crate) active: Option<ViewportId>,
    pub(crate) align_mode: AlignMode,
    pub(crate) wcs_master: Option<ViewportId>,
}

impl VisRoot {
    /// An empty root: no viewports, no alignment.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All viewports, in creation order.
    #[must_use]
    pub fn viewports(&self) -> &[Arc<Viewport>] {
        &self.viewports
    }

    /// Looks up a viewport by id.
    #[must_use]
    pub fn viewport(&self, id: &ViewportId) -> Option<&Arc<Viewport>> {
        self.viewports.iter().find(|vp| vp.id() == id)
    }

    /// All group records.
    #[must_use]
    pub fn groups(&self) -> &[ViewportGroup] {
        &self.groups
    }

    /// Looks up a group record.
    #[must_use]
    pub fn group(&self, id: &GroupId) -> Option<&ViewportGroup> {
        self.groups.iter().find(|g| &g.id == id)
    }

    /// Whether the named group propagates position changes.
    #[must_use]
    pub fn position_lock(&self, id: &GroupId) -> bool {
        self.group(id).is_some_and(|g| g.position_lock)
    }

    /// The active viewport id, if any.
    #[must_use]
    pub const fn active(&self) -> Option<&ViewportId> {
        self.active.as_ref()
    }

    /// The current group alignment mode.
    #[must_use]
    pub const fn align_mode(&self) -> AlignMode {
        self.align_mode
    }

    /// The viewport every other one tracks while a WCS match is active.
    #[must_use]
    pub const fn wcs_master(&self) -> Option<&ViewportId> {
        self.wcs_master.as_ref()
    }

    pub(crate) fn index_of(&self, id: &ViewportId) -> Option<usize> {
        self.viewports.iter().position(|vp| vp.id() == id)
    }
}
