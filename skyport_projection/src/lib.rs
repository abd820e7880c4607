// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_projection --heading-base-level=0

//! Skyport Projection: sky ↔ pixel mapping for one image or HiPS layer.
//!
//! A [`Projection`] is an immutable value describing how one loaded layer maps
//! celestial coordinates to its own pixel grid. It is built once, from
//! FITS-header-like parameters ([`ProjectionSpec`]) or from HiPS survey
//! properties ([`Projection::all_sky`]), and replaced wholesale when the
//! underlying mapping changes — never mutated.
//!
//! Three algorithms are implemented:
//! - **Gnomonic (TAN)** and **orthographic (SIN)** — the zenithal projections
//!   that cover the vast majority of survey imagery.
//! - **Cylindrical all-sky (CAR)** — the wrapping projection backing the
//!   synthetic HiPS canvas.
//!
//! Headers without a spatial mapping produce an *unspecified* projection, and
//! headers with an unknown algorithm an *unrecognized* one; both still load
//! (the layer stays displayable) but every conversion returns `None`.
//!
//! ## Minimal example
//!
//! ```rust
//! use skyport_coords::{CoordSys, WorldPt};
//! use skyport_projection::{Projection, ProjectionSpec};
//!
//! let spec = ProjectionSpec {
//!     ctype: Some("TAN".into()),
//!     crpix1: 200.0,
//!     crpix2: 200.0,
//!     crval1: 10.0,
//!     crval2: 20.0,
//!     cdelt1: -0.000_2,
//!     cdelt2: 0.000_2,
//!     crota2: 0.0,
//!     coord_sys: CoordSys::EquatorialJ2000,
//! };
//! let proj = Projection::from_header(&spec).unwrap();
//!
//! // The reference value lands on the reference pixel.
//! let px = proj.world_to_pixel(WorldPt::j2000(10.0, 20.0)).unwrap();
//! assert!((px.x - 200.0).abs() < 1e-9);
//! assert!((px.y - 200.0).abs() < 1e-9);
//! ```
//!
//! Conversions are total: a sky point the projection cannot invert (for
//! example the far hemisphere of a TAN image) yields `None`, never a panic or
//! an error type. Errors are reserved for construction, where the caller can
//! act on them.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod floats;
mod header;
mod projection;
mod zenithal;

pub use header::{MalformedHeaderError, ProjectionSpec};
pub use projection::{ALL_SKY_CANVAS, ALL_SKY_SCALE_DEG, ProjAlgo, Projection, ProjectionKind};
