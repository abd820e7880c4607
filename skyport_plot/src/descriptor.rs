// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inbound plot descriptors: what the data-fetch layer hands the engine.

use alloc::vec::Vec;

use skyport_coords::CoordSys;
use skyport_projection::ProjectionSpec;

use crate::attr::{AttrKey, AttrValue};

/// The raw description of a layer, as produced by the (out of scope) fetch
/// layer.
///
/// This is the engine's entire inbound surface for plot data: either the
/// header-shaped parameters of a FITS image, or the properties of a HiPS
/// survey.
#[derive(Clone, Debug, PartialEq)]
pub enum PlotDescriptor {
    /// A FITS image (possibly a cube of `cube_depth` planes).
    Image {
        /// Header-like spatial projection parameters.
        projection: ProjectionSpec,
        /// Data width in pixels.
        width: f64,
        /// Data height in pixels.
        height: f64,
        /// Initial zoom factor.
        zoom: f64,
        /// Initial attributes (fixed target, requested size, ...).
        attributes: Vec<(AttrKey, AttrValue)>,
        /// Number of cube planes; plain images use 1.
        cube_depth: usize,
    },
    /// A HiPS survey, rendered onto the synthetic all-sky canvas.
    Hips {
        /// Frame the survey's tiles are stored in.
        frame: CoordSys,
        /// Initial center longitude, degrees.
        initial_lon: f64,
        /// Initial center latitude, degrees.
        initial_lat: f64,
        /// Number of cube planes; plain surveys use 1.
        cube_depth: usize,
    },
}

impl PlotDescriptor {
    /// Number of planes this descriptor expands to (at least 1).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Image { cube_depth, .. } | Self::Hips { cube_depth, .. } => (*cube_depth).max(1),
        }
    }
}
