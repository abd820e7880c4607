// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header-like projection parameters and their validation error.

use alloc::string::String;

use skyport_coords::CoordSys;

/// FITS-header-like parameters describing a spatial projection.
///
/// Field names follow the conventional keywords so that values can be copied
/// straight out of a parsed header. `ctype` carries the three-letter algorithm
/// suffix (`"TAN"`, `"SIN"`, `"CAR"`); `None` means the header had no spatial
/// mapping at all.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectionSpec {
    /// Projection algorithm code, or `None` when the header carried no
    /// spatial WCS.
    pub ctype: Option<String>,
    /// Reference pixel, x axis.
    pub crpix1: f64,
    /// Reference pixel, y axis.
    pub crpix2: f64,
    /// Reference longitude in degrees.
    pub crval1: f64,
    /// Reference latitude in degrees.
    pub crval2: f64,
    /// Pixel scale along x, degrees per pixel, signed.
    pub cdelt1: f64,
    /// Pixel scale along y, degrees per pixel, signed.
    pub cdelt2: f64,
    /// Rotation baked into the WCS itself, degrees.
    pub crota2: f64,
    /// Frame the reference value is expressed in.
    pub coord_sys: CoordSys,
}

/// A header that names a spatial projection but cannot describe one.
///
/// Raised only for structural problems (non-finite or zero scale, non-finite
/// reference). Headers with no spatial mapping or an unknown algorithm are
/// *not* errors — they produce unspecified/unrecognized projections whose
/// conversions return `None`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedHeaderError {
    what: &'static str,
}

impl MalformedHeaderError {
    /// Creates an error naming the structural defect.
    #[must_use]
    pub const fn new(what: &'static str) -> Self {
        Self { what }
    }

    /// The defect, as a short static description.
    #[must_use]
    pub const fn what(&self) -> &'static str {
        self.what
    }
}

impl core::fmt::Display for MalformedHeaderError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "malformed projection header: {}", self.what)
    }
}

impl core::error::Error for MalformedHeaderError {}

impl ProjectionSpec {
    /// Returns the structural defect in this spec, if any.
    pub(crate) fn validate(&self) -> Result<(), MalformedHeaderError> {
        if self.ctype.is_none() {
            // No spatial WCS claimed: nothing to validate.
            return Ok(());
        }
        if !(self.crpix1.is_finite() && self.crpix2.is_finite()) {
            return Err(MalformedHeaderError::new("non-finite reference pixel"));
        }
        if !(self.crval1.is_finite() && self.crval2.is_finite()) {
            return Err(MalformedHeaderError::new("non-finite reference value"));
        }
        if !(self.cdelt1.is_finite() && self.cdelt2.is_finite())
            || self.cdelt1 == 0.0
            || self.cdelt2 == 0.0
        {
            return Err(MalformedHeaderError::new("bad pixel scale"));
        }
        if !self.crota2.is_finite() {
            return Err(MalformedHeaderError::new("non-finite rotation"));
        }
        Ok(())
    }
}
