// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_coords --heading-base-level=0

//! Skyport Coords: tagged coordinate spaces for sky-image viewports.
//!
//! Sky-image viewers juggle four distinct 2D spaces at once, and most of the
//! historical bugs in this problem domain come from silently reinterpreting a
//! bare `(x, y)` pair from one space in another. This crate makes the space
//! part of the type:
//!
//! - [`WorldPt`] — a celestial position: longitude/latitude in degrees plus a
//!   [`CoordSys`] frame tag.
//! - [`ImagePt`] — a 1-based pixel position in an image's data grid.
//! - [`ScreenPt`] — a pixel position on the full zoomed canvas, before any
//!   viewport rotation or flip is applied.
//! - [`DevicePt`] — a pixel position inside the on-screen viewport element,
//!   after scroll, rotation, and flips.
//!
//! No arithmetic crosses spaces without an explicit converter (supplied by a
//! higher-level crate); the numeric carrier for the pixel spaces is
//! [`kurbo::Point`].
//!
//! ## Minimal example
//!
//! ```rust
//! use skyport_coords::{CoordSys, ImagePt, WorldPt};
//!
//! let target = WorldPt::new(10.68, 41.27, CoordSys::EquatorialJ2000);
//! let galactic = target.convert_to(CoordSys::Galactic);
//! assert_eq!(galactic.coord_sys(), CoordSys::Galactic);
//!
//! // Pixel spaces are plain tagged points.
//! let p = ImagePt::new(200.0, 200.0);
//! assert_eq!(p.x(), 200.0);
//! ```
//!
//! The crate also carries the small set of spherical helpers the viewport
//! layers need: great-circle separation, position angle, and angle
//! normalization. See [`world_distance`] and [`position_angle`].
//!
//! This crate is `no_std`.

#![no_std]

mod coordsys;
mod floats;
mod points;
mod sphere;

pub use coordsys::CoordSys;
pub use points::{DevicePt, ImagePt, ScreenPt, WorldPt};
pub use sphere::{normalize_angle, normalize_lon, position_angle, world_distance};

/// Degrees-to-radians multiplier.
pub const DEG_TO_RAD: f64 = core::f64::consts::PI / 180.0;
/// Radians-to-degrees multiplier.
pub const RAD_TO_DEG: f64 = 180.0 / core::f64::consts::PI;
