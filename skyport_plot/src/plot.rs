// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The plot value and its copy-on-write operations.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::Size;

use skyport_coords::{ImagePt, WorldPt};
use skyport_projection::{ALL_SKY_CANVAS, MalformedHeaderError, Projection};

use crate::attr::{AttrKey, AttrValue};
use crate::descriptor::PlotDescriptor;

/// Stable identifier of one plot (one plane of one layer).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PlotId(String);

impl PlotId {
    /// Creates an id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for PlotId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}

/// What kind of layer a plot is.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PlotKind {
    /// A FITS image (or one plane of a cube).
    Image,
    /// A HiPS survey on the synthetic all-sky canvas.
    Hips,
}

/// A zoom factor that is not a positive finite number.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct InvalidZoomError {
    factor: f64,
}

impl InvalidZoomError {
    /// The rejected factor.
    #[must_use]
    pub const fn factor(&self) -> f64 {
        self.factor
    }
}

impl core::fmt::Display for InvalidZoomError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "invalid zoom factor {}: must be positive and finite",
            self.factor
        )
    }
}

impl core::error::Error for InvalidZoomError {}

/// One loaded image or HiPS layer.
///
/// Immutable: every operation that "changes" a plot returns a new value. See
/// the crate docs for the lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub struct Plot {
    id: PlotId,
    kind: PlotKind,
    projection: Projection,
    data_width: f64,
    data_height: f64,
    zoom_factor: f64,
    attributes: HashMap<AttrKey, AttrValue>,
    cube_idx: usize,
    header_defect: Option<MalformedHeaderError>,
}

impl Plot {
    /// Expands a descriptor into one plot per cube plane.
    ///
    /// Plane ids are derived from `id` as `<id>--<plane>`. An image header
    /// without a usable spatial projection still loads (see
    /// [`Plot::header_defect`]); only non-positive pixel dimensions refuse to
    /// build.
    pub fn from_descriptor(
        id: PlotId,
        desc: &PlotDescriptor,
    ) -> Result<Vec<Self>, MalformedHeaderError> {
        let template = match desc {
            PlotDescriptor::Image {
                projection,
                width,
                height,
                zoom,
                attributes,
                ..
            } => {
                if !(width.is_finite() && height.is_finite()) || *width <= 0.0 || *height <= 0.0 {
                    return Err(MalformedHeaderError::new("non-positive pixel dimensions"));
                }
                let (proj, defect) = match Projection::from_header(projection) {
                    Ok(p) => (p, None),
                    Err(e) => (Projection::unspecified(projection.coord_sys), Some(e)),
                };
                let zoom = if zoom.is_finite() && *zoom > 0.0 {
                    *zoom
                } else {
                    1.0
                };
                Self {
                    id: id.clone(),
                    kind: PlotKind::Image,
                    projection: proj,
                    data_width: *width,
                    data_height: *height,
                    zoom_factor: zoom,
                    attributes: attributes.iter().cloned().collect(),
                    cube_idx: 0,
                    header_defect: defect,
                }
            }
            PlotDescriptor::Hips {
                frame,
                initial_lon,
                initial_lat,
                ..
            } => {
                let center = WorldPt::new(*initial_lon, *initial_lat, *frame);
                let mut attributes = HashMap::new();
                attributes.insert(AttrKey::FixedTarget, AttrValue::World(center));
                Self {
                    id: id.clone(),
                    kind: PlotKind::Hips,
                    projection: Projection::all_sky(*frame, center),
                    data_width: ALL_SKY_CANVAS.0,
                    data_height: ALL_SKY_CANVAS.1,
                    zoom_factor: 1.0,
                    attributes,
                    cube_idx: 0,
                    header_defect: None,
                }
            }
        };

        Ok((0..desc.depth())
            .map(|plane| Self {
                id: PlotId::new(format!("{id}--{plane}")),
                cube_idx: plane,
                ..template.clone()
            })
            .collect())
    }

    /// This plot's id.
    #[must_use]
    pub const fn id(&self) -> &PlotId {
        &self.id
    }

    /// What kind of layer this is.
    #[must_use]
    pub const fn kind(&self) -> PlotKind {
        self.kind
    }

    /// The layer's projection.
    #[must_use]
    pub const fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Data width in pixels.
    #[must_use]
    pub const fn data_width(&self) -> f64 {
        self.data_width
    }

    /// Data height in pixels.
    #[must_use]
    pub const fn data_height(&self) -> f64 {
        self.data_height
    }

    /// The geometric center of the data grid, in image coordinates.
    #[must_use]
    pub fn data_center(&self) -> ImagePt {
        ImagePt::new(self.data_width / 2.0, self.data_height / 2.0)
    }

    /// The current zoom factor.
    #[must_use]
    pub const fn zoom_factor(&self) -> f64 {
        self.zoom_factor
    }

    /// The full zoomed canvas size: data dimensions × zoom factor.
    #[must_use]
    pub fn screen_size(&self) -> Size {
        Size::new(
            self.data_width * self.zoom_factor,
            self.data_height * self.zoom_factor,
        )
    }

    /// Which cube plane this plot is (0 for plain images).
    #[must_use]
    pub const fn cube_idx(&self) -> usize {
        self.cube_idx
    }

    /// The header defect this layer loaded with, if any.
    #[must_use]
    pub const fn header_defect(&self) -> Option<&MalformedHeaderError> {
        self.header_defect.as_ref()
    }

    /// Looks up an attribute.
    #[must_use]
    pub fn attribute(&self, key: AttrKey) -> Option<&AttrValue> {
        self.attributes.get(&key)
    }

    /// The fixed-target attribute, if present and a world point.
    #[must_use]
    pub fn fixed_target(&self) -> Option<WorldPt> {
        self.attribute(AttrKey::FixedTarget)?.as_world()
    }

    /// A copy at a different zoom factor.
    ///
    /// Zoom is absolute, not cumulative: the screen size of the result depends
    /// only on `factor`, never on the zoom history.
    pub fn with_zoom(self, factor: f64) -> Result<Self, InvalidZoomError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(InvalidZoomError { factor });
        }
        Ok(Self {
            zoom_factor: factor,
            ..self
        })
    }

    /// A copy with one attribute set (replacing any previous value).
    #[must_use]
    pub fn with_attribute(self, key: AttrKey, value: AttrValue) -> Self {
        let mut attributes = self.attributes.clone();
        attributes.insert(key, value);
        Self { attributes, ..self }
    }

    /// A copy whose projection is re-centered on `world`.
    ///
    /// Pixel dimensions are preserved; this is the HiPS pan primitive.
    #[must_use]
    pub fn with_projection_center(self, world: WorldPt) -> Self {
        Self {
            projection: self.projection.with_center(world),
            ..self
        }
    }
}
