// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sky reference frames and the equatorial/galactic rotation.

#[cfg(not(feature = "std"))]
use crate::floats::FloatFuncs;
use crate::sphere::normalize_lon;
use crate::{DEG_TO_RAD, RAD_TO_DEG};

/// A celestial reference frame.
///
/// The engine only exercises the two frames that sky surveys and HiPS
/// properties actually deliver; both are right-handed spherical frames, so
/// conversion is an exact rotation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum CoordSys {
    /// Equatorial coordinates, J2000 equinox (ICRS to the precision used here).
    #[default]
    EquatorialJ2000,
    /// IAU 1958 galactic coordinates.
    Galactic,
}

// North galactic pole in J2000 and the galactic longitude of the north
// celestial pole (IAU 1958 system carried to J2000).
const GAL_POLE_RA: f64 = 192.859_48;
const GAL_POLE_DEC: f64 = 27.128_25;
const GAL_LON_OF_NCP: f64 = 122.931_92;

/// Rotates `(lon, lat)` degrees from frame `from` into frame `to`.
///
/// The caller is expected to have already short-circuited the `from == to`
/// case; this function computes the rotation unconditionally.
#[must_use]
pub(crate) fn convert(lon: f64, lat: f64, from: CoordSys, to: CoordSys) -> (f64, f64) {
    match (from, to) {
        (CoordSys::EquatorialJ2000, CoordSys::Galactic) => equatorial_to_galactic(lon, lat),
        (CoordSys::Galactic, CoordSys::EquatorialJ2000) => galactic_to_equatorial(lon, lat),
        _ => (lon, lat),
    }
}

fn equatorial_to_galactic(ra: f64, dec: f64) -> (f64, f64) {
    let (sin_dec, cos_dec) = (dec * DEG_TO_RAD).sin_cos();
    let (sin_pole_dec, cos_pole_dec) = (GAL_POLE_DEC * DEG_TO_RAD).sin_cos();
    let (sin_dra, cos_dra) = ((ra - GAL_POLE_RA) * DEG_TO_RAD).sin_cos();

    let sin_b = sin_dec * sin_pole_dec + cos_dec * cos_pole_dec * cos_dra;
    let b = sin_b.clamp(-1.0, 1.0).asin();
    let y = cos_dec * sin_dra;
    let x = sin_dec * cos_pole_dec - cos_dec * sin_pole_dec * cos_dra;
    let l = GAL_LON_OF_NCP * DEG_TO_RAD - y.atan2(x);
    (normalize_lon(l * RAD_TO_DEG), b * RAD_TO_DEG)
}

fn galactic_to_equatorial(l: f64, b: f64) -> (f64, f64) {
    let (sin_b, cos_b) = (b * DEG_TO_RAD).sin_cos();
    let (sin_pole_dec, cos_pole_dec) = (GAL_POLE_DEC * DEG_TO_RAD).sin_cos();
    let (sin_dl, cos_dl) = ((GAL_LON_OF_NCP - l) * DEG_TO_RAD).sin_cos();

    let sin_dec = sin_b * sin_pole_dec + cos_b * cos_pole_dec * cos_dl;
    let dec = sin_dec.clamp(-1.0, 1.0).asin();
    let y = cos_b * sin_dl;
    let x = sin_b * cos_pole_dec - cos_b * sin_pole_dec * cos_dl;
    let ra = GAL_POLE_RA * DEG_TO_RAD + y.atan2(x);
    (normalize_lon(ra * RAD_TO_DEG), dec * RAD_TO_DEG)
}
