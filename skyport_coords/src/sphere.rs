// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Spherical helpers: separation, position angle, normalization.

#[cfg(not(feature = "std"))]
use crate::floats::FloatFuncs;
use crate::points::WorldPt;
use crate::{DEG_TO_RAD, RAD_TO_DEG};

/// Normalizes a longitude into `[0, 360)` degrees.
#[must_use]
pub fn normalize_lon(lon: f64) -> f64 {
    let r = lon % 360.0;
    if r < 0.0 { r + 360.0 } else { r }
}

/// Normalizes a rotation angle into `[0, 360)` degrees.
///
/// Identical to [`normalize_lon`] numerically; kept separate so call sites
/// say what they mean.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    normalize_lon(angle)
}

/// Great-circle separation between two world points, in degrees.
///
/// The points are brought into a common frame before measuring. The result is
/// in `[0, 180]`.
#[must_use]
pub fn world_distance(a: WorldPt, b: WorldPt) -> f64 {
    let b = b.convert_to(a.coord_sys());
    let (sin_lat_a, cos_lat_a) = (a.lat() * DEG_TO_RAD).sin_cos();
    let (sin_lat_b, cos_lat_b) = (b.lat() * DEG_TO_RAD).sin_cos();
    let cos_dlon = ((b.lon() - a.lon()) * DEG_TO_RAD).cos();

    let cos_d = sin_lat_a * sin_lat_b + cos_lat_a * cos_lat_b * cos_dlon;
    cos_d.clamp(-1.0, 1.0).acos() * RAD_TO_DEG
}

/// Position angle of `to` as seen from `from`, in degrees east of north.
///
/// This is the bearing of the great circle from `from` toward `to`: 0 points
/// at the celestial north pole, 90 points due east. The result is normalized
/// into `[0, 360)`. Undefined (returns 0) when the points coincide.
#[must_use]
pub fn position_angle(from: WorldPt, to: WorldPt) -> f64 {
    let to = to.convert_to(from.coord_sys());
    let (sin_lat_f, cos_lat_f) = (from.lat() * DEG_TO_RAD).sin_cos();
    let (sin_lat_t, cos_lat_t) = (to.lat() * DEG_TO_RAD).sin_cos();
    let (sin_dlon, cos_dlon) = ((to.lon() - from.lon()) * DEG_TO_RAD).sin_cos();

    let y = sin_dlon * cos_lat_t;
    let x = cos_lat_f * sin_lat_t - sin_lat_f * cos_lat_t * cos_dlon;
    if y == 0.0 && x == 0.0 {
        return 0.0;
    }
    normalize_angle(y.atan2(x) * RAD_TO_DEG)
}
