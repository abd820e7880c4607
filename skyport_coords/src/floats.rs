// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float-function shim: route transcendental math to `libm` in `no_std` builds.
//!
//! With the `std` feature enabled the inherent `f64` methods are used and this
//! module is inert. Without `std`, the [`FloatFuncs`] trait supplies the same
//! method names backed by `libm`, mirroring how Kurbo handles its own float
//! math.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("skyport_coords requires either the `std` or the `libm` feature");

/// Transcendental float methods for `no_std` builds.
#[cfg(not(feature = "std"))]
pub(crate) trait FloatFuncs: Sized {
    /// Cosine (radians).
    fn cos(self) -> Self;
    /// Simultaneous sine and cosine (radians).
    fn sin_cos(self) -> (Self, Self);
    /// Arcsine, in radians.
    fn asin(self) -> Self;
    /// Arccosine, in radians.
    fn acos(self) -> Self;
    /// Four-quadrant arctangent, in radians.
    fn atan2(self, other: Self) -> Self;
}

#[cfg(not(feature = "std"))]
impl FloatFuncs for f64 {
    fn cos(self) -> f64 {
        libm::cos(self)
    }

    fn sin_cos(self) -> (f64, f64) {
        (libm::sin(self), libm::cos(self))
    }

    fn asin(self) -> f64 {
        libm::asin(self)
    }

    fn acos(self) -> f64 {
        libm::acos(self)
    }

    fn atan2(self, other: f64) -> f64 {
        libm::atan2(self, other)
    }
}
