// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The intent vocabulary: the entire mutation surface of the state.

use kurbo::Size;

use skyport_align::AlignMode;
use skyport_coords::{ScreenPt, WorldPt};
use skyport_plot::PlotDescriptor;
use skyport_view::{CenterOn, FlipAxis, GroupId, RotateTo, ViewContext, ViewportId};

/// A state-transition request, dispatched through [`crate::reduce`].
///
/// Intents are plain data. Every variant that names a viewport id is a no-op
/// when that id is unknown — see the crate docs for the rationale.
#[derive(Clone, Debug, PartialEq)]
pub enum Intent {
    /// Creates a viewport from a plot descriptor and runs its initial
    /// centering pass. An already-used id is a no-op.
    AddViewport {
        /// Id of the new viewport.
        id: ViewportId,
        /// Alignment group it joins (created on first use).
        group: GroupId,
        /// What to plot.
        descriptor: PlotDescriptor,
        /// Initial per-viewport context.
        context: ViewContext,
        /// Initial panel size.
        view_dim: Size,
    },
    /// Removes a viewport; clears the active/master references if they
    /// pointed at it.
    RemoveViewport {
        /// Id of the viewport to remove.
        id: ViewportId,
    },
    /// Marks a viewport as the active one.
    SetActive {
        /// Id of the viewport to activate.
        id: ViewportId,
    },
    /// Replaces a viewport's plot list with freshly fetched data.
    ///
    /// This is how asynchronous fetches re-enter the engine; it must tolerate
    /// the viewport having been removed in the meantime.
    ReplacePlotData {
        /// Id of the viewport receiving the data.
        id: ViewportId,
        /// The new data.
        descriptor: PlotDescriptor,
    },
    /// Sets an absolute zoom factor.
    ///
    /// Fans out to group-lock-flagged members of the same group.
    Zoom {
        /// Id of the viewport to zoom.
        id: ViewportId,
        /// Absolute zoom factor; non-positive factors leave the state
        /// untouched.
        factor: f64,
    },
    /// Scrolls to an absolute screen-space offset.
    ///
    /// Fans out across the position-locked group.
    Scroll {
        /// Id of the viewport to scroll.
        id: ViewportId,
        /// New scroll offset (clamped into the canvas).
        scroll: ScreenPt,
    },
    /// Rotates the panel.
    ///
    /// Fans out across the position-locked group via rotation matching.
    Rotate {
        /// Id of the viewport to rotate.
        id: ViewportId,
        /// Target angle or north-up.
        to: RotateTo,
        /// Whether north-up should stay sticky afterwards.
        north_lock: bool,
    },
    /// Mirrors the panel across an axis.
    ///
    /// Fans out across the position-locked group.
    Flip {
        /// Id of the viewport to flip.
        id: ViewportId,
        /// Which axis to mirror.
        axis: FlipAxis,
    },
    /// Recenters the visible region.
    ///
    /// Fans out across the position-locked group.
    Recenter {
        /// Id of the viewport to recenter.
        id: ViewportId,
        /// Where to center; `None` means fixed target, else data center.
        on: Option<CenterOn>,
    },
    /// Resizes the panel.
    Resize {
        /// Id of the viewport to resize.
        id: ViewportId,
        /// New panel size.
        view_dim: Size,
    },
    /// Switches the active plot (cube plane / FITS extension).
    ChangeActiveModel {
        /// Id of the viewport.
        id: ViewportId,
        /// Index of the plane to activate.
        index: usize,
    },
    /// Sets the group alignment mode and the WCS-match master.
    ///
    /// A non-`None` mode requires an existing master id; every other
    /// viewport is re-aligned to it immediately.
    ChangeAlignmentMode {
        /// The new mode.
        mode: AlignMode,
        /// The master viewport everyone else tracks; ignored (cleared) when
        /// `mode` is `None`.
        master: Option<ViewportId>,
    },
    /// Toggles position-lock propagation for one group.
    SetPositionLock {
        /// The group to change.
        group: GroupId,
        /// Whether position changes propagate.
        lock: bool,
    },
    /// Re-centers a HiPS viewport's synthetic canvas on a new sky position.
    ChangeProjectionCenter {
        /// Id of the viewport (all its planes are re-centered).
        id: ViewportId,
        /// The new projection center.
        center: WorldPt,
    },
}
