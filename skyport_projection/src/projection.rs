// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The projection value: algorithm dispatch plus the linear pixel transform.

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::floats::FloatFuncs;
use crate::header::{MalformedHeaderError, ProjectionSpec};
use crate::zenithal;
use skyport_coords::{CoordSys, DEG_TO_RAD, WorldPt, normalize_lon};

/// Pixel scale of the synthetic all-sky canvas, degrees per pixel.
pub const ALL_SKY_SCALE_DEG: f64 = 0.000_25;

/// Pixel dimensions of the synthetic all-sky canvas (360° × 180° at
/// [`ALL_SKY_SCALE_DEG`]).
pub const ALL_SKY_CANVAS: (f64, f64) = (360.0 / ALL_SKY_SCALE_DEG, 180.0 / ALL_SKY_SCALE_DEG);

/// Implemented projection algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProjAlgo {
    /// Gnomonic (FITS `TAN`): tangent-plane imaging, the common survey case.
    Gnomonic,
    /// Orthographic (FITS `SIN`): interferometric imaging.
    Orthographic,
    /// Plate carrée (FITS `CAR`): the wrapping all-sky canvas used for HiPS.
    CylindricalAllSky,
}

/// What kind of mapping a [`Projection`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ProjectionKind {
    /// A usable spatial mapping.
    Implemented(ProjAlgo),
    /// The header carried no spatial WCS at all.
    Unspecified,
    /// A spatial WCS was present but its algorithm is unknown here.
    Unrecognized,
}

/// An immutable sky ↔ pixel mapping for one layer.
///
/// Pixel coordinates here are the projection's own grid: 0-based, y up. The
/// half-pixel shift to 1-based image coordinates is the converter layer's
/// concern, mirroring the split in the systems this models.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projection {
    kind: ProjectionKind,
    coord_sys: CoordSys,
    crpix: Point,
    crval: (f64, f64),
    cdelt: (f64, f64),
    crota2: f64,
}

impl Projection {
    /// Builds a projection from header-like parameters.
    ///
    /// - `ctype: None` → an [`ProjectionKind::Unspecified`] projection (loads,
    ///   converts to `None`).
    /// - Unknown `ctype` → [`ProjectionKind::Unrecognized`] (same degradation).
    /// - A named algorithm with structurally unusable numbers →
    ///   [`MalformedHeaderError`].
    pub fn from_header(spec: &ProjectionSpec) -> Result<Self, MalformedHeaderError> {
        spec.validate()?;
        let kind = match spec.ctype.as_deref() {
            None => ProjectionKind::Unspecified,
            Some("TAN") => ProjectionKind::Implemented(ProjAlgo::Gnomonic),
            Some("SIN") => ProjectionKind::Implemented(ProjAlgo::Orthographic),
            Some("CAR") => ProjectionKind::Implemented(ProjAlgo::CylindricalAllSky),
            Some(_) => ProjectionKind::Unrecognized,
        };
        Ok(Self {
            kind,
            coord_sys: spec.coord_sys,
            crpix: Point::new(spec.crpix1, spec.crpix2),
            crval: (spec.crval1, spec.crval2),
            cdelt: (spec.cdelt1, spec.cdelt2),
            crota2: spec.crota2,
        })
    }

    /// Builds a projection that carries no spatial mapping at all.
    ///
    /// Used when a layer's header is absent or unusable: the layer still
    /// loads, and every conversion returns `None`.
    #[must_use]
    pub const fn unspecified(coord_sys: CoordSys) -> Self {
        Self {
            kind: ProjectionKind::Unspecified,
            coord_sys,
            crpix: Point::new(0.0, 0.0),
            crval: (0.0, 0.0),
            cdelt: (1.0, 1.0),
            crota2: 0.0,
        }
    }

    /// Builds the wrapping all-sky projection backing a HiPS canvas.
    ///
    /// The canvas is [`ALL_SKY_CANVAS`] pixels, centered on `center`, with
    /// longitude increasing leftward (east-left, as sky images are viewed).
    #[must_use]
    pub fn all_sky(frame: CoordSys, center: WorldPt) -> Self {
        let center = center.convert_to(frame);
        Self {
            kind: ProjectionKind::Implemented(ProjAlgo::CylindricalAllSky),
            coord_sys: frame,
            crpix: Point::new(ALL_SKY_CANVAS.0 / 2.0, ALL_SKY_CANVAS.1 / 2.0),
            crval: (center.lon(), center.lat()),
            cdelt: (-ALL_SKY_SCALE_DEG, ALL_SKY_SCALE_DEG),
            crota2: 0.0,
        }
    }

    /// The mapping kind.
    #[must_use]
    pub const fn kind(self) -> ProjectionKind {
        self.kind
    }

    /// True when conversions can succeed.
    #[must_use]
    pub const fn is_implemented(self) -> bool {
        matches!(self.kind, ProjectionKind::Implemented(_))
    }

    /// True when the header claimed any spatial WCS (even an unknown one).
    #[must_use]
    pub const fn is_specified(self) -> bool {
        !matches!(self.kind, ProjectionKind::Unspecified)
    }

    /// True for projections that wrap the full sky (the HiPS canvas).
    #[must_use]
    pub const fn is_wrapping(self) -> bool {
        matches!(
            self.kind,
            ProjectionKind::Implemented(ProjAlgo::CylindricalAllSky)
        )
    }

    /// The frame the reference value is expressed in.
    #[must_use]
    pub const fn coord_sys(self) -> CoordSys {
        self.coord_sys
    }

    /// The reference value as a world point.
    #[must_use]
    pub const fn center(self) -> WorldPt {
        WorldPt::new(self.crval.0, self.crval.1, self.coord_sys)
    }

    /// Pixel scale in degrees per pixel (x axis magnitude).
    #[must_use]
    pub fn pixel_scale_deg(self) -> f64 {
        self.cdelt.0.abs()
    }

    /// A copy re-centered on `world`, preserving everything else.
    ///
    /// This is how a HiPS canvas pans: the projection is replaced wholesale
    /// with one whose reference value is the new center.
    #[must_use]
    pub fn with_center(self, world: WorldPt) -> Self {
        let world = world.convert_to(self.coord_sys);
        Self {
            crval: (world.lon(), world.lat()),
            ..self
        }
    }

    /// True when `other` describes the exact same mapping.
    ///
    /// Equivalence requires frame, reference point, reference value, scale,
    /// and rotation to match exactly; downstream caches key on this.
    #[must_use]
    pub fn same_mapping(self, other: &Self) -> bool {
        self.kind == other.kind
            && self.coord_sys == other.coord_sys
            && self.crpix == other.crpix
            && self.crval == other.crval
            && self.cdelt == other.cdelt
            && self.crota2 == other.crota2
    }

    /// Maps a sky position to this projection's pixel grid.
    ///
    /// Returns `None` for unspecified/unrecognized projections and for sky
    /// positions the algorithm cannot represent (far hemisphere of TAN/SIN).
    #[must_use]
    pub fn world_to_pixel(self, world: WorldPt) -> Option<Point> {
        let ProjectionKind::Implemented(algo) = self.kind else {
            return None;
        };
        let world = world.convert_to(self.coord_sys);
        let (lon0, lat0) = self.crval;
        let (xi, eta) = match algo {
            ProjAlgo::Gnomonic => zenithal::tan_project(world.lon(), world.lat(), lon0, lat0)?,
            ProjAlgo::Orthographic => {
                zenithal::sin_project(world.lon(), world.lat(), lon0, lat0)?
            }
            ProjAlgo::CylindricalAllSky => {
                let mut dlon = normalize_lon(world.lon() - lon0);
                if dlon > 180.0 {
                    dlon -= 360.0;
                }
                (dlon, world.lat() - lat0)
            }
        };
        self.pixel_from_intermediate(xi, eta)
    }

    /// Maps a pixel on this projection's grid to the sky.
    #[must_use]
    pub fn pixel_to_world(self, pixel: Point) -> Option<WorldPt> {
        let ProjectionKind::Implemented(algo) = self.kind else {
            return None;
        };
        let (xi, eta) = self.intermediate_from_pixel(pixel);
        let (lon0, lat0) = self.crval;
        let (lon, lat) = match algo {
            ProjAlgo::Gnomonic => zenithal::tan_deproject(xi, eta, lon0, lat0)?,
            ProjAlgo::Orthographic => zenithal::sin_deproject(xi, eta, lon0, lat0)?,
            ProjAlgo::CylindricalAllSky => {
                let lat = lat0 + eta;
                if !(-90.0..=90.0).contains(&lat) {
                    return None;
                }
                (normalize_lon(lon0 + xi), lat)
            }
        };
        Some(WorldPt::new(lon, lat, self.coord_sys))
    }

    // The linear half of the WCS: standard coordinates (degrees) to pixel
    // offsets via the CD matrix built from cdelt and crota2, and back.

    fn cd_matrix(self) -> [f64; 4] {
        let (sin_r, cos_r) = (self.crota2 * DEG_TO_RAD).sin_cos();
        let (d1, d2) = self.cdelt;
        [d1 * cos_r, -d2 * sin_r, d1 * sin_r, d2 * cos_r]
    }

    fn intermediate_from_pixel(self, pixel: Point) -> (f64, f64) {
        let dx = pixel.x - self.crpix.x;
        let dy = pixel.y - self.crpix.y;
        let [a, b, c, d] = self.cd_matrix();
        (a * dx + b * dy, c * dx + d * dy)
    }

    fn pixel_from_intermediate(self, xi: f64, eta: f64) -> Option<Point> {
        let [a, b, c, d] = self.cd_matrix();
        let det = a * d - b * c;
        if det == 0.0 {
            return None;
        }
        let dx = (d * xi - b * eta) / det;
        let dy = (a * eta - c * xi) / det;
        Some(Point::new(self.crpix.x + dx, self.crpix.y + dy))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    fn tan_spec() -> ProjectionSpec {
        ProjectionSpec {
            ctype: Some("TAN".to_string()),
            crpix1: 200.0,
            crpix2: 200.0,
            crval1: 10.0,
            crval2: 20.0,
            cdelt1: -0.000_2,
            cdelt2: 0.000_2,
            crota2: 0.0,
            coord_sys: CoordSys::EquatorialJ2000,
        }
    }

    #[test]
    fn reference_value_lands_on_reference_pixel() {
        let proj = Projection::from_header(&tan_spec()).unwrap();
        let px = proj.world_to_pixel(WorldPt::j2000(10.0, 20.0)).unwrap();
        assert!((px.x - 200.0).abs() < 1e-9);
        assert!((px.y - 200.0).abs() < 1e-9);
    }

    #[test]
    fn pixel_world_round_trip_within_half_pixel() {
        let proj = Projection::from_header(&tan_spec()).unwrap();
        for &(x, y) in &[(1.0, 1.0), (200.0, 200.0), (399.5, 12.25), (40.0, 390.0)] {
            let world = proj.pixel_to_world(Point::new(x, y)).unwrap();
            let back = proj.world_to_pixel(world).unwrap();
            assert!((back.x - x).abs() < 0.5, "x: {x} -> {}", back.x);
            assert!((back.y - y).abs() < 0.5, "y: {y} -> {}", back.y);
        }
    }

    #[test]
    fn negative_cdelt1_means_east_is_left() {
        let proj = Projection::from_header(&tan_spec()).unwrap();
        // A point east of center (greater RA) must land at smaller x.
        let east = proj.world_to_pixel(WorldPt::j2000(10.05, 20.0)).unwrap();
        assert!(east.x < 200.0);
    }

    #[test]
    fn crota_rotates_the_grid() {
        let mut spec = tan_spec();
        spec.crota2 = 90.0;
        let proj = Projection::from_header(&spec).unwrap();
        let north = proj.world_to_pixel(WorldPt::j2000(10.0, 20.05)).unwrap();
        // With a 90° CROTA2 north moves along x instead of y.
        assert!((north.y - 200.0).abs() < 1e-6, "y = {}", north.y);
        assert!((north.x - 200.0).abs() > 1.0, "x = {}", north.x);
    }

    #[test]
    fn unknown_algorithm_degrades_to_unrecognized() {
        let mut spec = tan_spec();
        spec.ctype = Some("ZPN".to_string());
        let proj = Projection::from_header(&spec).unwrap();
        assert_eq!(proj.kind(), ProjectionKind::Unrecognized);
        assert!(proj.is_specified());
        assert!(!proj.is_implemented());
        assert!(proj.world_to_pixel(WorldPt::j2000(10.0, 20.0)).is_none());
        assert!(proj.pixel_to_world(Point::new(1.0, 1.0)).is_none());
    }

    #[test]
    fn missing_wcs_degrades_to_unspecified() {
        let mut spec = tan_spec();
        spec.ctype = None;
        let proj = Projection::from_header(&spec).unwrap();
        assert_eq!(proj.kind(), ProjectionKind::Unspecified);
        assert!(!proj.is_specified());
    }

    #[test]
    fn all_sky_wraps_and_round_trips() {
        let proj = Projection::all_sky(CoordSys::EquatorialJ2000, WorldPt::j2000(0.0, 0.0));
        assert!(proj.is_wrapping());

        // A point just west of the wrap seam still projects.
        let px = proj.world_to_pixel(WorldPt::j2000(359.9, 5.0)).unwrap();
        let back = proj.pixel_to_world(px).unwrap();
        assert!((back.lon() - 359.9).abs() < 1e-9);
        assert!((back.lat() - 5.0).abs() < 1e-9);
    }

    #[test]
    fn with_center_only_moves_the_reference() {
        let proj = Projection::all_sky(CoordSys::EquatorialJ2000, WorldPt::j2000(0.0, 0.0));
        let moved = proj.with_center(WorldPt::j2000(120.0, -30.0));
        assert!(!proj.same_mapping(&moved));
        assert_eq!(moved.pixel_scale_deg(), proj.pixel_scale_deg());
        let px = moved.world_to_pixel(WorldPt::j2000(120.0, -30.0)).unwrap();
        assert!((px.x - ALL_SKY_CANVAS.0 / 2.0).abs() < 1e-9);
        assert!((px.y - ALL_SKY_CANVAS.1 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn same_mapping_requires_exact_match() {
        let a = Projection::from_header(&tan_spec()).unwrap();
        let b = Projection::from_header(&tan_spec()).unwrap();
        assert!(a.same_mapping(&b));

        let mut spec = tan_spec();
        spec.cdelt1 *= 1.000_001;
        let c = Projection::from_header(&spec).unwrap();
        assert!(!a.same_mapping(&c));
    }

    #[test]
    fn far_hemisphere_returns_none() {
        let proj = Projection::from_header(&tan_spec()).unwrap();
        assert!(proj.world_to_pixel(WorldPt::j2000(190.0, -20.0)).is_none());
    }
}
