// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport operations: recenter, zoom, rotate, flip, resize, plane changes.
//!
//! Every operation is pure: it borrows the viewport, computes through
//! [`crate::CoordConverter`], and returns a new value. The shared discipline
//! is *anchor preservation* — whatever image point sat at the center of the
//! panel before an operation should still sit there afterwards, unless the
//! operation's whole purpose is to move it.

use kurbo::Size;
use smallvec::SmallVec;

use skyport_coords::{ImagePt, WorldPt, normalize_angle};
use skyport_plot::{InvalidZoomError, Plot};

use crate::viewport::{ViewLocks, Viewport, ZoomLockMode};

/// Where a recenter operation should aim.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum CenterOn {
    /// A sky position.
    World(WorldPt),
    /// A raw image position.
    Image(ImagePt),
}

/// What a rotate operation should aim for.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RotateTo {
    /// A user-facing angle in degrees.
    ///
    /// The stored viewport rotation is this angle *mirrored* when the active
    /// projection's east-left-of-north parity and the viewport's y-flip
    /// disagree, so the same gesture turns the sky the same way everywhere.
    Angle(f64),
    /// Whatever angle puts celestial north straight up.
    North,
}

/// Which axis a flip operation mirrors.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipAxis {
    /// Mirror horizontally.
    X,
    /// Mirror vertically.
    Y,
}

impl Viewport {
    /// Recenters the visible region.
    ///
    /// With an explicit target, centers there; an unconvertible world target
    /// is a no-op. With `None`, centers on the active plot's fixed-target
    /// attribute when it is present and convertible, else on the data's
    /// geometric center. Also serves as the initial centering pass for a
    /// freshly created viewport (scroll unset).
    #[must_use]
    pub fn recenter(&self, on: Option<CenterOn>) -> Self {
        let Some(cc) = self.converter() else {
            return self.clone();
        };
        let target = match on {
            Some(CenterOn::Image(p)) => Some(p),
            Some(CenterOn::World(w)) => match cc.world_to_image(w) {
                Some(p) => Some(p),
                None => return self.clone(),
            },
            None => cc
                .plot()
                .fixed_target()
                .and_then(|w| cc.world_to_image(w))
                .or_else(|| Some(cc.plot().data_center())),
        };
        match target.and_then(|p| self.scroll_for_image_pt(p)) {
            Some(scroll) => self.set_scroll(scroll),
            None => self.clone(),
        }
    }

    /// Re-zooms every owned plot to an absolute factor, keeping the image
    /// point at the panel center anchored there.
    pub fn with_zoom(&self, factor: f64) -> Result<Self, InvalidZoomError> {
        let anchor = self.scroll.and(self.current_center_point());
        let plots = self
            .plots
            .iter()
            .map(|p| p.clone().with_zoom(factor))
            .collect::<Result<SmallVec<[Plot; 2]>, InvalidZoomError>>()?;
        let next = Self { plots, ..self.clone() };
        Ok(match anchor.and_then(|p| next.scroll_for_image_pt(p)) {
            Some(scroll) => next.set_scroll(scroll),
            None => next,
        })
    }

    /// Rotates the panel.
    ///
    /// The scroll offset is untouched: rotation happens about the panel
    /// center, so the centered image point stays centered. `north_lock` makes
    /// the north orientation sticky across later zoom/resize/plane changes.
    #[must_use]
    pub fn rotate(&self, to: RotateTo, north_lock: bool) -> Self {
        let stored = match to {
            RotateTo::Angle(a) => {
                let mirror = self
                    .converter()
                    .is_some_and(|cc| cc.is_east_left_of_north())
                    != self.flip_y;
                if mirror { 360.0 - a } else { a }
            }
            RotateTo::North => self
                .converter()
                .and_then(|cc| cc.north_angle())
                .unwrap_or(self.rotation_deg),
        };
        let mut context = self.context;
        context.locks.set(ViewLocks::NORTH, north_lock);
        Self {
            rotation_deg: normalize_angle(stored),
            context,
            ..self.clone()
        }
    }

    /// Mirrors the panel across an axis.
    ///
    /// A y-flip also negates the stored rotation (`360 − angle`): rotation
    /// and y-mirror do not commute in screen space, and negating keeps the
    /// visual turn direction. The scroll is recomputed so the previously
    /// centered image point stays anchored.
    #[must_use]
    pub fn flip(&self, axis: FlipAxis) -> Self {
        let anchor = self.scroll.and(self.current_center_point());
        let mut next = self.clone();
        match axis {
            FlipAxis::X => next.flip_x = !next.flip_x,
            FlipAxis::Y => {
                next.flip_y = !next.flip_y;
                next.rotation_deg = normalize_angle(360.0 - next.rotation_deg);
            }
        }
        match anchor.and_then(|p| next.scroll_for_image_pt(p)) {
            Some(scroll) => next.set_scroll(scroll),
            None => next,
        }
    }

    /// Resizes the panel, keeping the centered image point centered.
    #[must_use]
    pub fn resize(&self, view_dim: Size) -> Self {
        let anchor = self.scroll.and(self.current_center_point());
        let next = Self {
            view_dim,
            ..self.clone()
        };
        match anchor.and_then(|p| next.scroll_for_image_pt(p)) {
            Some(scroll) => next.set_scroll(scroll),
            None => next,
        }
    }

    /// Switches the active plot (cube plane or FITS extension).
    ///
    /// The current center is carried over in *image* space: if that point is
    /// inside the new plane's data it stays centered, otherwise the view
    /// recenters on the new plane. An out-of-range index is a no-op.
    #[must_use]
    pub fn change_active_plot(&self, idx: usize) -> Self {
        if idx >= self.plots.len() || idx == self.prime_idx {
            return self.clone();
        }
        let anchor = self.scroll.and(self.current_center_point());
        let mut next = Self {
            prime_idx: idx,
            ..self.clone()
        };
        if let Some(anchor) = anchor {
            let in_range = next
                .converter()
                .is_some_and(|cc| cc.point_in_data(anchor));
            let scroll = if in_range {
                next.scroll_for_image_pt(anchor)
            } else {
                next.scroll_for_center()
            };
            if let Some(scroll) = scroll {
                next = next.set_scroll(scroll);
            }
        }
        if next.context.locks.contains(ViewLocks::NORTH) {
            next = next.rotate(RotateTo::North, true);
        }
        next
    }

    /// Replaces the owned plot list wholesale (new data arrived).
    ///
    /// The zoom-lock mode decides how zoom is restored: `Level` carries the
    /// previous numeric factor over, `FitFill` re-fits the new data into the
    /// panel, `None` keeps whatever the descriptors specified. Scroll resets
    /// to unset so the next centering pass re-derives it, and a sticky north
    /// lock re-applies itself.
    #[must_use]
    pub fn replace_plots(&self, plots: impl IntoIterator<Item = Plot>) -> Self {
        let old_zoom = self.prime_plot().map(Plot::zoom_factor);
        let mut plots: SmallVec<[Plot; 2]> = plots.into_iter().collect();

        let restored = match self.context.zoom_lock {
            Some(ZoomLockMode::Level) => old_zoom,
            Some(ZoomLockMode::FitFill) => plots.first().map(|p| fit_factor(self.view_dim, p)),
            None => None,
        };
        if let Some(factor) = restored {
            plots = plots
                .into_iter()
                .map(|p| p.clone().with_zoom(factor).unwrap_or(p))
                .collect();
        }

        let mut next = Self {
            plots,
            prime_idx: 0,
            scroll: None,
            ..self.clone()
        };
        if next.context.locks.contains(ViewLocks::NORTH) {
            next = next.rotate(RotateTo::North, true);
        }
        next
    }

    /// Re-centers every owned plane's projection on a new sky position and
    /// scrolls so that position sits at the panel center.
    ///
    /// This is the HiPS pan: the synthetic canvas does not move, the mapping
    /// painted onto it does. Pixel dimensions and zoom are untouched.
    #[must_use]
    pub fn retarget_projection(&self, center: WorldPt) -> Self {
        let plots: SmallVec<[Plot; 2]> = self
            .plots
            .iter()
            .map(|p| p.clone().with_projection_center(center))
            .collect();
        let next = Self {
            plots,
            ..self.clone()
        };
        // The new center lands on the projection's reference pixel, which is
        // the canvas center for all-sky plots.
        match next
            .converter()
            .and_then(|cc| cc.world_to_image(center))
            .and_then(|p| next.scroll_for_image_pt(p))
        {
            Some(scroll) => next.set_scroll(scroll),
            None => next,
        }
    }
}

/// The zoom factor that fits a plot's data inside a panel.
fn fit_factor(view_dim: Size, plot: &Plot) -> f64 {
    if view_dim.width <= 0.0
        || view_dim.height <= 0.0
        || plot.data_width() <= 0.0
        || plot.data_height() <= 0.0
    {
        return 1.0;
    }
    (view_dim.width / plot.data_width()).min(view_dim.height / plot.data_height())
}
