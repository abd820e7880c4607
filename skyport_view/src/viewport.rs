// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The viewport value: plots, display state, and scroll plumbing.

use alloc::string::String;

use kurbo::Size;
use smallvec::SmallVec;

use skyport_coords::{ImagePt, ScreenPt};
use skyport_plot::Plot;

use crate::converter::{CoordConverter, ViewTransform};

/// Stable identifier of one viewport.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewportId(String);

impl ViewportId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for ViewportId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of the alignment group a viewport belongs to.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct GroupId(String);

impl GroupId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for GroupId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

bitflags::bitflags! {
    /// Sticky per-viewport behavior flags.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct ViewLocks: u8 {
        /// Keep celestial north vertical across zoom, resize, and plane changes.
        const NORTH = 0b0000_0001;
        /// Color/overlay settings follow the group (the group-locked fan-out
        /// scope of the reducer).
        const GROUP = 0b0000_0010;
    }
}

/// How a viewport's zoom should be restored when its plot data is replaced.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ZoomLockMode {
    /// Keep the numeric zoom level (1x, 2x, ...).
    Level,
    /// Re-fit the data into the panel.
    FitFill,
}

/// Per-viewport context: lock flags and the zoom-restore mode.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub struct ViewContext {
    /// Sticky behavior flags.
    pub locks: ViewLocks,
    /// Zoom-restore policy across plot replacement, if any.
    pub zoom_lock: Option<ZoomLockMode>,
}

/// One on-screen panel: an ordered list of plots plus pan/zoom/rotate state.
///
/// Immutable; operations are defined in this crate's ops module and each
/// return a new `Viewport`. The scroll offset starts *unset* — a freshly
/// created viewport must go through a centering pass (`recenter`) before it
/// has a defined visible region; until then conversions treat scroll as zero.
#[derive(Clone, Debug, PartialEq)]
pub struct Viewport {
    pub(crate) id: ViewportId,
    pub(crate) group: GroupId,
    pub(crate) plots: SmallVec<[Plot; 2]>,
    pub(crate) prime_idx: usize,
    pub(crate) view_dim: Size,
    pub(crate) scroll: Option<ScreenPt>,
    pub(crate) rotation_deg: f64,
    pub(crate) flip_x: bool,
    pub(crate) flip_y: bool,
    pub(crate) context: ViewContext,
}

impl Viewport {
    /// Creates a viewport owning `plots`, with scroll unset.
    #[must_use]
    pub fn create(
        id: ViewportId,
        group: GroupId,
        plots: impl IntoIterator<Item = Plot>,
        context: ViewContext,
    ) -> Self {
        Self {
            id,
            group,
            plots: plots.into_iter().collect(),
            prime_idx: 0,
            view_dim: Size::ZERO,
            scroll: None,
            rotation_deg: 0.0,
            flip_x: false,
            flip_y: false,
            context,
        }
    }

    /// This viewport's id.
    #[must_use]
    pub const fn id(&self) -> &ViewportId {
        &self.id
    }

    /// The alignment group this viewport belongs to.
    #[must_use]
    pub const fn group(&self) -> &GroupId {
        &self.group
    }

    /// All plots, in order (cube planes / FITS extensions).
    #[must_use]
    pub fn plots(&self) -> &[Plot] {
        &self.plots
    }

    /// Index of the active plot.
    #[must_use]
    pub const fn prime_idx(&self) -> usize {
        self.prime_idx
    }

    /// The active plot, if the viewport has any.
    #[must_use]
    pub fn prime_plot(&self) -> Option<&Plot> {
        self.plots.get(self.prime_idx)
    }

    /// The panel's pixel size.
    #[must_use]
    pub const fn view_dim(&self) -> Size {
        self.view_dim
    }

    /// The scroll offset, or `None` before the initial centering pass.
    #[must_use]
    pub const fn scroll(&self) -> Option<ScreenPt> {
        self.scroll
    }

    /// Viewport rotation in degrees, `[0, 360)`.
    #[must_use]
    pub const fn rotation_deg(&self) -> f64 {
        self.rotation_deg
    }

    /// Whether the panel is mirrored horizontally.
    #[must_use]
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }

    /// Whether the panel is mirrored vertically.
    #[must_use]
    pub const fn flip_y(&self) -> bool {
        self.flip_y
    }

    /// The per-viewport context.
    #[must_use]
    pub const fn context(&self) -> ViewContext {
        self.context
    }

    /// The display transform currently in effect (scroll unset reads as zero).
    #[must_use]
    pub fn transform(&self) -> ViewTransform {
        ViewTransform {
            scroll: self.scroll.unwrap_or_default(),
            rotation_deg: self.rotation_deg,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            view_dim: self.view_dim,
        }
    }

    /// A converter for the active plot under the current transform.
    #[must_use]
    pub fn converter(&self) -> Option<CoordConverter<'_>> {
        Some(CoordConverter::new(self.prime_plot()?, self.transform()))
    }

    // ---- scroll plumbing -------------------------------------------------

    /// The visible extent of the canvas: `min(screen size, panel size)` per axis.
    #[must_use]
    pub fn scroll_extent(&self) -> Size {
        let Some(plot) = self.prime_plot() else {
            return Size::ZERO;
        };
        let screen = plot.screen_size();
        Size::new(
            screen.width.min(self.view_dim.width),
            screen.height.min(self.view_dim.height),
        )
    }

    /// The image point currently at the center of the visible region.
    ///
    /// Uses the scroll offset (unset reads as zero) plus half the visible
    /// extent, so a canvas smaller than the panel still reports its own
    /// center.
    #[must_use]
    pub fn current_center_point(&self) -> Option<ImagePt> {
        let cc = self.converter()?;
        let extent = self.scroll_extent();
        let scroll = self.scroll.unwrap_or_default();
        let center = ScreenPt::new(
            scroll.x() + extent.width / 2.0,
            scroll.y() + extent.height / 2.0,
        );
        Some(cc.screen_to_image(center))
    }

    /// The clamped scroll offset that puts `image` at the center of the panel.
    #[must_use]
    pub fn scroll_for_image_pt(&self, image: ImagePt) -> Option<ScreenPt> {
        let cc = self.converter()?;
        let sp = cc.image_to_screen(image);
        Some(self.clamp_scroll(ScreenPt::new(
            sp.x() - self.view_dim.width / 2.0,
            sp.y() - self.view_dim.height / 2.0,
        )))
    }

    /// The scroll offset that centers the canvas in the panel.
    #[must_use]
    pub fn scroll_for_center(&self) -> Option<ScreenPt> {
        let screen = self.prime_plot()?.screen_size();
        let x = if screen.width > self.view_dim.width {
            screen.width / 2.0 - self.view_dim.width / 2.0
        } else {
            0.0
        };
        let y = if screen.height > self.view_dim.height {
            screen.height / 2.0 - self.view_dim.height / 2.0
        } else {
            0.0
        };
        Some(ScreenPt::new(x, y))
    }

    /// A copy scrolled to `scroll` (clamped into the canvas).
    #[must_use]
    pub fn set_scroll(&self, scroll: ScreenPt) -> Self {
        let clamped = self.clamp_scroll(scroll);
        Self {
            scroll: Some(clamped),
            ..self.clone()
        }
    }

    /// A copy with a new panel size. Callers that need the center preserved
    /// use the resize operation instead.
    #[must_use]
    pub fn with_view_dim(&self, view_dim: Size) -> Self {
        Self {
            view_dim,
            ..self.clone()
        }
    }

    /// A copy with a new context.
    #[must_use]
    pub fn with_context(&self, context: ViewContext) -> Self {
        Self {
            context,
            ..self.clone()
        }
    }

    /// A copy rotated to a raw stored angle, normalized to `[0, 360)`.
    ///
    /// This bypasses the parity handling of the rotate operation; it is the
    /// entry point for alignment propagation, which has already decided the
    /// exact angle a member must store.
    #[must_use]
    pub fn with_rotation_deg(&self, rotation_deg: f64) -> Self {
        Self {
            rotation_deg: skyport_coords::normalize_angle(rotation_deg),
            ..self.clone()
        }
    }

    /// Clamps a scroll offset into `[0, max(screen − extent, 0)]` per axis.
    fn clamp_scroll(&self, scroll: ScreenPt) -> ScreenPt {
        let Some(plot) = self.prime_plot() else {
            return scroll;
        };
        let screen = plot.screen_size();
        let extent = self.scroll_extent();
        let max_x = (screen.width - extent.width).max(0.0);
        let max_y = (screen.height - extent.height).max(0.0);
        ScreenPt::new(scroll.x().clamp(0.0, max_x), scroll.y().clamp(0.0, max_y))
    }

    /// Snapshot of the current viewport state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> ViewportDebugInfo {
        ViewportDebugInfo {
            id: self.id.clone(),
            group: self.group.clone(),
            plot_count: self.plots.len(),
            prime_idx: self.prime_idx,
            view_dim: self.view_dim,
            scroll: self.scroll,
            rotation_deg: self.rotation_deg,
            flip_x: self.flip_x,
            flip_y: self.flip_y,
            context: self.context,
        }
    }
}

/// Debug snapshot of a [`Viewport`] state.
#[derive(Clone, Debug)]
pub struct ViewportDebugInfo {
    /// Viewport id.
    pub id: ViewportId,
    /// Alignment group id.
    pub group: GroupId,
    /// Number of plots owned.
    pub plot_count: usize,
    /// Index of the active plot.
    pub prime_idx: usize,
    /// Panel pixel size.
    pub view_dim: Size,
    /// Scroll offset, if initialized.
    pub scroll: Option<ScreenPt>,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Horizontal mirror flag.
    pub flip_x: bool,
    /// Vertical mirror flag.
    pub flip_y: bool,
    /// Per-viewport context.
    pub context: ViewContext,
}
