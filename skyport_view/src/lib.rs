// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_view --heading-base-level=0

//! Skyport View: one on-screen sky-image panel and its coordinate machinery.
//!
//! A [`Viewport`] owns an ordered list of [plots](skyport_plot::Plot) (cube
//! planes or FITS extensions), the index of the active one, and the panel's
//! display state: pixel size, scroll offset, rotation angle, and flip flags.
//! Viewports are immutable values — every operation returns a new viewport —
//! and all geometry goes through [`CoordConverter`], which chains the four
//! tagged spaces:
//!
//! ```text
//! world  ⇄  image  ⇄  screen  ⇄  device
//!  (sky)   (pixels)  (zoomed    (rotated/flipped,
//!                     canvas)    inside the panel)
//! ```
//!
//! World ⇄ image goes through the plot's projection and can fail (`Option`);
//! the remaining legs are affine and total. Screen ⇄ device is one composed
//! [`kurbo::Affine`] — scroll translation, rotation about the viewport
//! center, then flips — and its inverse is the exact matrix inverse, so the
//! round trip is lossless.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Size;
//! use skyport_coords::CoordSys;
//! use skyport_plot::{Plot, PlotDescriptor, PlotId};
//! use skyport_view::{GroupId, ViewContext, Viewport, ViewportId};
//!
//! let desc = PlotDescriptor::Hips {
//!     frame: CoordSys::EquatorialJ2000,
//!     initial_lon: 0.0,
//!     initial_lat: 0.0,
//!     cube_depth: 1,
//! };
//! let plots = Plot::from_descriptor(PlotId::new("h"), &desc).unwrap();
//!
//! let vp = Viewport::create(
//!     ViewportId::new("v1"),
//!     GroupId::new("g1"),
//!     plots,
//!     ViewContext::default(),
//! )
//! .with_view_dim(Size::new(800.0, 600.0));
//!
//! // Scroll starts unset; center it on the survey's initial position.
//! let vp = vp.recenter(None);
//! let center = vp.current_center_point().unwrap();
//! assert!((center.x() - vp.prime_plot().unwrap().data_width() / 2.0).abs() < 1.0);
//! ```
//!
//! The sign conventions around rotation are the subtle part of this crate:
//! a stored rotation is mirrored (`360 − angle`) when the active projection's
//! east-left-of-north parity and the viewport's y-flip disagree, so that the
//! same user gesture turns the sky the same way on every panel. See
//! [`Viewport::rotate`].
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod converter;
mod floats;
mod ops;
mod viewport;

pub use converter::{CoordConverter, ViewTransform};
pub use ops::{CenterOn, FlipAxis, RotateTo};
pub use viewport::{
    GroupId, ViewContext, ViewLocks, Viewport, ViewportDebugInfo, ViewportId, ZoomLockMode,
};
