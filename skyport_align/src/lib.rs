// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_align --heading-base-level=0

//! Skyport Align: the policy that keeps grouped viewports visually matched.
//!
//! Given a *master* viewport and a *target* viewport, this crate computes the
//! scroll offset (and, for rotate operations, the rotation) the target must
//! adopt so the two panels stay in visual correspondence under an
//! [`AlignMode`]:
//!
//! - [`AlignMode::Pixel`] — the same raw image pixel sits at both centers
//!   (ignores the sky entirely; right for images with no usable WCS).
//! - [`AlignMode::PixelCenter`] — like `Pixel`, but offsets are measured from
//!   each image's own geometric center, so frames of different sizes stay
//!   co-registered.
//! - [`AlignMode::WcsStandard`] — the sky position under the master's center
//!   is placed under the target's center.
//! - [`AlignMode::WcsTarget`] — each plot's *fixed target* attribute is
//!   placed at the same panel-relative position.
//! - [`AlignMode::None`] — no sky or pixel matching; group propagation falls
//!   back to fractional scroll matching ([`match_scroll_fraction`]).
//!
//! Alignment never fails loudly: a pair of viewports that cannot be aligned
//! (no comparable projection, missing fixed target) yields
//! [`AlignOutcome::Unchanged`], and the target keeps its scroll. Grouped
//! viewports legitimately mix plain images with sky-calibrated ones; leaving
//! one member unsynchronized beats aborting the group.
//!
//! ## Rotation matching
//!
//! Matching rotation across two projections needs one extra bit: their
//! *east-left-of-north parity*. When the parities agree the target copies the
//! master's angle; when they disagree the angle is mirrored (`360 − a`), so
//! both panels turn their sky the same visual way. See [`rotation_to_match`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

use alloc::vec::Vec;

use skyport_coords::{ImagePt, ScreenPt, normalize_angle};
use skyport_view::Viewport;

/// How grouped viewports are kept in visual correspondence.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum AlignMode {
    /// No alignment; group propagation uses fractional scroll matching.
    #[default]
    None,
    /// Match raw image-pixel centers.
    Pixel,
    /// Match image centers offset from each frame's geometric center.
    PixelCenter,
    /// Match the sky position under the viewport centers.
    WcsStandard,
    /// Match each plot's fixed-target attribute position.
    WcsTarget,
}

/// What the policy decided for one target viewport.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AlignOutcome {
    /// Adopt this scroll offset.
    Scrolled(ScreenPt),
    /// Alignment unavailable for this pair; keep the target untouched.
    Unchanged,
}

impl AlignOutcome {
    /// The scroll to adopt, if the policy produced one.
    #[must_use]
    pub const fn scroll(self) -> Option<ScreenPt> {
        match self {
            Self::Scrolled(s) => Some(s),
            Self::Unchanged => None,
        }
    }
}

/// Computes the scroll the target must adopt to match the master under `mode`.
///
/// [`AlignMode::None`] always reports [`AlignOutcome::Unchanged`]; callers
/// that want fractional matching use [`match_scroll_fraction`] directly.
#[must_use]
pub fn align_scroll(master: &Viewport, target: &Viewport, mode: AlignMode) -> AlignOutcome {
    let scroll = match mode {
        AlignMode::None => None,
        AlignMode::Pixel => master
            .current_center_point()
            .and_then(|c| target.scroll_for_image_pt(c)),
        AlignMode::PixelCenter => pixel_center_scroll(master, target),
        AlignMode::WcsStandard => wcs_standard_scroll(master, target),
        AlignMode::WcsTarget => wcs_target_scroll(master, target),
    };
    match scroll {
        Some(s) => AlignOutcome::Scrolled(s),
        None => AlignOutcome::Unchanged,
    }
}

fn pixel_center_scroll(master: &Viewport, target: &Viewport) -> Option<ScreenPt> {
    let center = master.current_center_point()?;
    let master_mid = master.prime_plot()?.data_center();
    let target_mid = target.prime_plot()?.data_center();
    let aim = ImagePt::new(
        target_mid.x() + (center.x() - master_mid.x()),
        target_mid.y() + (center.y() - master_mid.y()),
    );
    target.scroll_for_image_pt(aim)
}

fn wcs_standard_scroll(master: &Viewport, target: &Viewport) -> Option<ScreenPt> {
    let center = master.current_center_point()?;
    let world = master.converter()?.image_to_world(center)?;
    let aim = target.converter()?.world_to_image(world)?;
    target.scroll_for_image_pt(aim)
}

fn wcs_target_scroll(master: &Viewport, target: &Viewport) -> Option<ScreenPt> {
    let master_cc = master.converter()?;
    let target_cc = target.converter()?;
    let master_ft = master_cc.plot().fixed_target()?;
    let target_ft = target_cc.plot().fixed_target()?;

    // Panel-relative position of the master's fixed target.
    let master_screen = master_cc.world_to_screen(master_ft)?;
    let master_scroll = master.scroll().unwrap_or_default();
    let dx = master_screen.x() - master_scroll.x();
    let dy = master_screen.y() - master_scroll.y();

    // Scroll that puts the target's own fixed target at that same position.
    let target_screen = target_cc.world_to_screen(target_ft)?;
    Some(ScreenPt::new(target_screen.x() - dx, target_screen.y() - dy))
}

/// The rotation a target must store to visually match the master's rotation.
///
/// When the two projections' east-left-of-north parities agree the angle is
/// copied; when they disagree it is mirrored (`360 − a`). Mirroring rather
/// than copying is what keeps both skies turning the same way on screen —
/// the single most delicate sign rule in this engine.
#[must_use]
pub fn rotation_to_match(
    master_rotation_deg: f64,
    master_east_left: bool,
    target_east_left: bool,
) -> f64 {
    if master_east_left == target_east_left {
        normalize_angle(master_rotation_deg)
    } else {
        normalize_angle(360.0 - master_rotation_deg)
    }
}

/// The scroll that gives the target the same *fractional* center position as
/// the master.
///
/// Used by group propagation when the alignment mode is [`AlignMode::None`]:
/// the center of the visible region lands at the same percentage of each
/// member's canvas, with no sky or pixel interpretation at all.
#[must_use]
pub fn match_scroll_fraction(master: &Viewport, target: &Viewport) -> Option<ScreenPt> {
    let master_screen = master.prime_plot()?.screen_size();
    if master_screen.width <= 0.0 || master_screen.height <= 0.0 {
        return None;
    }
    let master_extent = master.scroll_extent();
    let scroll = master.scroll().unwrap_or_default();
    let fx = (scroll.x() + master_extent.width / 2.0) / master_screen.width;
    let fy = (scroll.y() + master_extent.height / 2.0) / master_screen.height;

    let target_screen = target.prime_plot()?.screen_size();
    let target_extent = target.scroll_extent();
    Some(ScreenPt::new(
        target_screen.width * fx - target_extent.width / 2.0,
        target_screen.height * fy - target_extent.height / 2.0,
    ))
}

/// Applies the policy for one group member.
///
/// With `position_lock` off nothing propagates. With it on, mode `None` uses
/// fractional matching and every other mode goes through [`align_scroll`].
#[must_use]
pub fn align_member(
    master: &Viewport,
    member: &Viewport,
    mode: AlignMode,
    position_lock: bool,
) -> AlignOutcome {
    if !position_lock {
        return AlignOutcome::Unchanged;
    }
    match mode {
        AlignMode::None => match match_scroll_fraction(master, member) {
            Some(s) => AlignOutcome::Scrolled(s),
            None => AlignOutcome::Unchanged,
        },
        _ => align_scroll(master, member, mode),
    }
}

/// Applies the policy across a whole group, one outcome per member in order.
#[must_use]
pub fn propagate<'a>(
    master: &Viewport,
    members: impl IntoIterator<Item = &'a Viewport>,
    mode: AlignMode,
    position_lock: bool,
) -> Vec<AlignOutcome> {
    members
        .into_iter()
        .map(|member| align_member(master, member, mode, position_lock))
        .collect()
}
