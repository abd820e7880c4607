// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=skyport_plot --heading-base-level=0

//! Skyport Plot: the immutable model of one loaded image or HiPS layer.
//!
//! A [`Plot`] bundles everything the viewport layers need to know about one
//! layer: its [projection](skyport_projection::Projection), pixel dimensions,
//! current zoom factor, and an attribute table (most notably the *fixed
//! target* — the world position the layer was originally searched at, used as
//! the default recenter anchor).
//!
//! Plots are copy-on-write values: zoom and attribute changes produce a new
//! `Plot`, never mutate one in place. A multi-extension FITS file or cube
//! produces one `Plot` per plane; the viewport owns the list and selects the
//! active plane.
//!
//! ## Minimal example
//!
//! ```rust
//! use skyport_coords::{CoordSys, WorldPt};
//! use skyport_plot::{Plot, PlotDescriptor, PlotId};
//!
//! let desc = PlotDescriptor::Hips {
//!     frame: CoordSys::EquatorialJ2000,
//!     initial_lon: 83.6,
//!     initial_lat: 22.0,
//!     cube_depth: 1,
//! };
//! let plots = Plot::from_descriptor(PlotId::new("hips-1"), &desc).unwrap();
//! assert_eq!(plots.len(), 1);
//!
//! // Zoom is absolute: the screen size is always data size × factor.
//! let zoomed = plots[0].clone().with_zoom(0.001).unwrap();
//! assert_eq!(zoomed.screen_size().width, zoomed.data_width() * 0.001);
//! ```
//!
//! ## Degraded layers
//!
//! An image descriptor whose header carries no usable spatial projection still
//! loads — the plot is displayable, its projection reports unimplemented, and
//! every coordinate conversion downstream returns `None`. The defect is kept
//! on the plot ([`Plot::header_defect`]) so a boundary can report it. Only a
//! structurally unusable descriptor (non-positive pixel dimensions) refuses to
//! build.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod attr;
mod descriptor;
mod plot;

pub use attr::{AttrKey, AttrValue};
pub use descriptor::PlotDescriptor;
pub use plot::{InvalidZoomError, Plot, PlotId, PlotKind};
pub use skyport_projection::MalformedHeaderError;
