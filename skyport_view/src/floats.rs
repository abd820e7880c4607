// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Float-function shim: route transcendental math to `libm` in `no_std` builds.

#[cfg(all(not(feature = "std"), not(feature = "libm")))]
compile_error!("skyport_view requires either the `std` or the `libm` feature");

/// Transcendental float methods for `no_std` builds.
#[cfg(not(feature = "std"))]
pub(crate) trait FloatFuncs: Sized {
    /// Four-quadrant arctangent, in radians.
    fn atan2(self, other: Self) -> Self;
}

#[cfg(not(feature = "std"))]
impl FloatFuncs for f64 {
    fn atan2(self, other: f64) -> f64 {
        libm::atan2(self, other)
    }
}
