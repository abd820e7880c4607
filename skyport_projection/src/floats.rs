// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float-function shim: route transcendental math to `libm` in `no_std` builds.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("skyport_projection requires either the `std` or the `libm` feature");

/// Transcendental float methods for `no_std` builds.
#[cfg(not(feature = "std"))]
pub(crate) trait FloatFuncs: Sized {
    /// Simultaneous sine and cosine (radians).
    fn sin_cos(self) -> (Self, Self);
    /// Arcsine, in radians.
    fn asin(self) -> Self;
    /// Arctangent, in radians.
    fn atan(self) -> Self;
    /// Four-quadrant arctangent, in radians.
    fn atan2(self, other: Self) -> Self;
    /// Square root.
    fn sqrt(self) -> Self;
}

#[cfg(not(feature = "std"))]
impl FloatFuncs for f64 {
    fn sin_cos(self) -> (f64, f64) {
        (libm::sin(self), libm::cos(self))
    }

    fn asin(self) -> f64 {
        libm::asin(self)
    }

    fn atan(self) -> f64 {
        libm::atan(self)
    }

    fn atan2(self, other: f64) -> f64 {
        libm::atan2(self, other)
    }

    fn sqrt(self) -> f64 {
        libm::sqrt(self)
    }
}
