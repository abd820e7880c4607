// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Zenithal projection math: gnomonic (TAN) and orthographic (SIN).
//!
//! Both project about a tangent point `(lon0, lat0)` into "standard
//! coordinates" `(xi, eta)` in degrees, xi increasing with longitude and eta
//! with latitude. The far side of the sky is unrepresentable and maps to
//! `None`.

#[cfg(not(feature = "std"))]
use crate::floats::FloatFuncs;
use skyport_coords::{DEG_TO_RAD, RAD_TO_DEG, normalize_lon};

// Below this, treat the direction cosine toward the tangent plane as
// degenerate rather than dividing by it.
const MIN_DIRECTION_COSINE: f64 = 1e-12;

/// Projects a sky position to gnomonic standard coordinates, degrees.
pub(crate) fn tan_project(lon: f64, lat: f64, lon0: f64, lat0: f64) -> Option<(f64, f64)> {
    let (xi, eta, d) = direction(lon, lat, lon0, lat0);
    if d <= MIN_DIRECTION_COSINE {
        return None;
    }
    Some((xi / d * RAD_TO_DEG, eta / d * RAD_TO_DEG))
}

/// Projects a sky position to orthographic standard coordinates, degrees.
pub(crate) fn sin_project(lon: f64, lat: f64, lon0: f64, lat0: f64) -> Option<(f64, f64)> {
    let (xi, eta, d) = direction(lon, lat, lon0, lat0);
    if d < 0.0 {
        return None;
    }
    Some((xi * RAD_TO_DEG, eta * RAD_TO_DEG))
}

/// Deprojects gnomonic standard coordinates (degrees) back to the sky.
pub(crate) fn tan_deproject(xi: f64, eta: f64, lon0: f64, lat0: f64) -> Option<(f64, f64)> {
    let xi = xi * DEG_TO_RAD;
    let eta = eta * DEG_TO_RAD;
    let rho = (xi * xi + eta * eta).sqrt();
    // c is the angular distance from the tangent point.
    let c = rho.atan();
    Some(sky_from_polar(xi, eta, rho, c, lon0, lat0))
}

/// Deprojects orthographic standard coordinates (degrees) back to the sky.
pub(crate) fn sin_deproject(xi: f64, eta: f64, lon0: f64, lat0: f64) -> Option<(f64, f64)> {
    let xi = xi * DEG_TO_RAD;
    let eta = eta * DEG_TO_RAD;
    let rho = (xi * xi + eta * eta).sqrt();
    if rho > 1.0 {
        return None;
    }
    let c = rho.clamp(-1.0, 1.0).asin();
    Some(sky_from_polar(xi, eta, rho, c, lon0, lat0))
}

/// Standard coordinates (radians) and the direction cosine toward the tangent
/// plane.
fn direction(lon: f64, lat: f64, lon0: f64, lat0: f64) -> (f64, f64, f64) {
    let (sin_lat, cos_lat) = (lat * DEG_TO_RAD).sin_cos();
    let (sin_lat0, cos_lat0) = (lat0 * DEG_TO_RAD).sin_cos();
    let (sin_dlon, cos_dlon) = ((lon - lon0) * DEG_TO_RAD).sin_cos();

    let d = sin_lat * sin_lat0 + cos_lat * cos_lat0 * cos_dlon;
    let xi = cos_lat * sin_dlon;
    let eta = sin_lat * cos_lat0 - cos_lat * sin_lat0 * cos_dlon;
    (xi, eta, d)
}

/// Inverse of the polar decomposition shared by all zenithal projections.
fn sky_from_polar(xi: f64, eta: f64, rho: f64, c: f64, lon0: f64, lat0: f64) -> (f64, f64) {
    if rho == 0.0 {
        return (normalize_lon(lon0), lat0);
    }
    let (sin_c, cos_c) = c.sin_cos();
    let (sin_lat0, cos_lat0) = (lat0 * DEG_TO_RAD).sin_cos();

    let lat = (cos_c * sin_lat0 + eta * sin_c * cos_lat0 / rho)
        .clamp(-1.0, 1.0)
        .asin();
    let dlon = (xi * sin_c).atan2(rho * cos_lat0 * cos_c - eta * sin_lat0 * sin_c);
    (
        normalize_lon(lon0 + dlon * RAD_TO_DEG),
        lat * RAD_TO_DEG,
    )
}
