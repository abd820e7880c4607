// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The four tagged point spaces.

use kurbo::Point;

use crate::CoordSys;
use crate::coordsys;

macro_rules! pixel_space {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(Copy, Clone, Debug, PartialEq, Default)]
        pub struct $name(pub Point);

        impl $name {
            /// Creates a point in this space from raw coordinates.
            #[must_use]
            pub const fn new(x: f64, y: f64) -> Self {
                Self(Point::new(x, y))
            }

            /// The x coordinate.
            #[must_use]
            pub const fn x(self) -> f64 {
                self.0.x
            }

            /// The y coordinate.
            #[must_use]
            pub const fn y(self) -> f64 {
                self.0.y
            }
        }

        impl From<Point> for $name {
            fn from(p: Point) -> Self {
                Self(p)
            }
        }

        impl From<$name> for Point {
            fn from(p: $name) -> Self {
                p.0
            }
        }
    };
}

pixel_space! {
    /// A position in an image's data grid, in 1-based pixels.
    ///
    /// `(1, 1)` is the center of the first data pixel; a point is inside the
    /// data when `1 <= x <= width` and `1 <= y <= height`. The y axis points
    /// *up* (toward increasing data rows), matching FITS convention.
    ImagePt
}

pixel_space! {
    /// A position on the full zoomed canvas, before viewport rotation/flip.
    ///
    /// Screen space is image space scaled by the zoom factor with the y axis
    /// flipped to point down; `(0, 0)` is the canvas's top-left corner. The
    /// canvas covers the whole image, not just the visible part.
    ScreenPt
}

pixel_space! {
    /// A position inside the viewport element, after scroll, rotation, and flips.
    ///
    /// `(0, 0)` is the viewport's top-left corner; a point is on-display when
    /// it falls inside the viewport's pixel size.
    DevicePt
}

/// A celestial position: longitude and latitude in degrees plus a frame tag.
///
/// Longitude is right ascension (equatorial) or galactic longitude; latitude
/// is declination or galactic latitude. Values are stored as given; use
/// [`crate::normalize_lon`] where a canonical range is required.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WorldPt {
    lon: f64,
    lat: f64,
    coord_sys: CoordSys,
}

impl WorldPt {
    /// Creates a world point in the given frame.
    #[must_use]
    pub const fn new(lon: f64, lat: f64, coord_sys: CoordSys) -> Self {
        Self {
            lon,
            lat,
            coord_sys,
        }
    }

    /// Creates an equatorial J2000 world point.
    #[must_use]
    pub const fn j2000(lon: f64, lat: f64) -> Self {
        Self::new(lon, lat, CoordSys::EquatorialJ2000)
    }

    /// Longitude in degrees.
    #[must_use]
    pub const fn lon(self) -> f64 {
        self.lon
    }

    /// Latitude in degrees.
    #[must_use]
    pub const fn lat(self) -> f64 {
        self.lat
    }

    /// The frame this point is expressed in.
    #[must_use]
    pub const fn coord_sys(self) -> CoordSys {
        self.coord_sys
    }

    /// Re-expresses this point in another frame.
    ///
    /// Returns `self` unchanged when the frames already match.
    #[must_use]
    pub fn convert_to(self, to: CoordSys) -> Self {
        if self.coord_sys == to {
            return self;
        }
        let (lon, lat) = coordsys::convert(self.lon, self.lat, self.coord_sys, to);
        Self::new(lon, lat, to)
    }
}
