// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate conversion between the four point spaces of one viewport.

use kurbo::{Affine, Point, Size, Vec2};

use skyport_coords::{DEG_TO_RAD, DevicePt, ImagePt, RAD_TO_DEG, ScreenPt, WorldPt, normalize_angle};
use skyport_plot::Plot;

#[cfg(not(feature = "std"))]
use crate::floats::FloatFuncs;

/// The affine half of a viewport's display state.
///
/// Everything needed to map the zoomed screen canvas into the on-screen panel:
/// scroll offset (screen-space top-left of the visible region), rotation in
/// degrees, flip flags, and the panel's pixel size. Rotation and flips are
/// applied about the panel center.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ViewTransform {
    /// Screen-space coordinate at the viewport's top-left corner.
    pub scroll: ScreenPt,
    /// Viewport rotation in degrees, normalized to `[0, 360)`.
    pub rotation_deg: f64,
    /// Mirror the panel horizontally.
    pub flip_x: bool,
    /// Mirror the panel vertically.
    pub flip_y: bool,
    /// The panel's pixel size.
    pub view_dim: Size,
}

impl ViewTransform {
    fn device_from_screen(&self) -> Affine {
        let center = Point::new(self.view_dim.width / 2.0, self.view_dim.height / 2.0);
        let mut m = Affine::rotate_about(self.rotation_deg * DEG_TO_RAD, center)
            * Affine::translate(Vec2::new(-self.scroll.x(), -self.scroll.y()));
        if self.flip_x {
            m = Affine::new([-1.0, 0.0, 0.0, 1.0, self.view_dim.width, 0.0]) * m;
        }
        if self.flip_y {
            m = Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, self.view_dim.height]) * m;
        }
        m
    }
}

/// Converter among world, image, screen, and device space for one plot.
///
/// Built from a plot (projection + pixel grid + zoom) and a [`ViewTransform`].
/// All operations are pure and total: conversions that pass through the
/// projection return `Option` and yield `None` where the sky position is not
/// representable; the affine legs always succeed.
#[derive(Clone, Debug)]
pub struct CoordConverter<'p> {
    plot: &'p Plot,
    transform: ViewTransform,
    device_from_screen: Affine,
    screen_from_device: Affine,
}

impl<'p> CoordConverter<'p> {
    /// Creates a converter for `plot` under the given display transform.
    #[must_use]
    pub fn new(plot: &'p Plot, transform: ViewTransform) -> Self {
        let device_from_screen = transform.device_from_screen();
        Self {
            plot,
            transform,
            device_from_screen,
            screen_from_device: device_from_screen.inverse(),
        }
    }

    /// The plot this converter reads from.
    #[must_use]
    pub const fn plot(&self) -> &'p Plot {
        self.plot
    }

    /// The display transform this converter applies.
    #[must_use]
    pub const fn transform(&self) -> &ViewTransform {
        &self.transform
    }

    // ---- world ⇄ image --------------------------------------------------

    /// Maps a sky position into the plot's 1-based image grid.
    ///
    /// `None` when the projection is unusable or cannot represent the
    /// position (for example, the far hemisphere of a tangent-plane image).
    #[must_use]
    pub fn world_to_image(&self, world: WorldPt) -> Option<ImagePt> {
        let p = self.plot.projection().world_to_pixel(world)?;
        Some(ImagePt::new(p.x + 0.5, p.y + 0.5))
    }

    /// Maps an image position to the sky.
    #[must_use]
    pub fn image_to_world(&self, image: ImagePt) -> Option<WorldPt> {
        self.plot
            .projection()
            .pixel_to_world(Point::new(image.x() - 0.5, image.y() - 0.5))
    }

    // ---- image ⇄ screen -------------------------------------------------

    /// Maps an image position onto the zoomed screen canvas.
    ///
    /// Screen y runs down while image y runs up, so the image's y axis is
    /// flipped across the data height.
    #[must_use]
    pub fn image_to_screen(&self, image: ImagePt) -> ScreenPt {
        let z = self.plot.zoom_factor();
        ScreenPt::new(
            image.x() * z,
            (self.plot.data_height() - image.y()) * z,
        )
    }

    /// Maps a screen-canvas position back into the image grid.
    #[must_use]
    pub fn screen_to_image(&self, screen: ScreenPt) -> ImagePt {
        let z = self.plot.zoom_factor();
        ImagePt::new(screen.x() / z, self.plot.data_height() - screen.y() / z)
    }

    // ---- screen ⇄ device ------------------------------------------------

    /// Applies scroll, rotation, and flips: screen canvas → panel pixels.
    #[must_use]
    pub fn screen_to_device(&self, screen: ScreenPt) -> DevicePt {
        DevicePt::from(self.device_from_screen * Point::from(screen))
    }

    /// The exact inverse of [`CoordConverter::screen_to_device`].
    #[must_use]
    pub fn device_to_screen(&self, device: DevicePt) -> ScreenPt {
        ScreenPt::from(self.screen_from_device * Point::from(device))
    }

    // ---- composed legs --------------------------------------------------

    /// Sky → screen canvas.
    #[must_use]
    pub fn world_to_screen(&self, world: WorldPt) -> Option<ScreenPt> {
        Some(self.image_to_screen(self.world_to_image(world)?))
    }

    /// Screen canvas → sky.
    #[must_use]
    pub fn screen_to_world(&self, screen: ScreenPt) -> Option<WorldPt> {
        self.image_to_world(self.screen_to_image(screen))
    }

    /// Image grid → panel pixels.
    #[must_use]
    pub fn image_to_device(&self, image: ImagePt) -> DevicePt {
        self.screen_to_device(self.image_to_screen(image))
    }

    /// Panel pixels → image grid.
    #[must_use]
    pub fn device_to_image(&self, device: DevicePt) -> ImagePt {
        self.screen_to_image(self.device_to_screen(device))
    }

    /// Sky → panel pixels.
    #[must_use]
    pub fn world_to_device(&self, world: WorldPt) -> Option<DevicePt> {
        Some(self.image_to_device(self.world_to_image(world)?))
    }

    /// Panel pixels → sky.
    #[must_use]
    pub fn device_to_world(&self, device: DevicePt) -> Option<WorldPt> {
        self.image_to_world(self.device_to_image(device))
    }

    // ---- predicates -----------------------------------------------------

    /// True when the device point falls inside the panel.
    #[must_use]
    pub fn point_on_display(&self, device: DevicePt) -> bool {
        let Size { width, height } = self.transform.view_dim;
        device.x() >= 0.0 && device.x() <= width && device.y() >= 0.0 && device.y() <= height
    }

    /// True when the image point falls inside the data grid
    /// (`1 ≤ x ≤ width`, `1 ≤ y ≤ height`).
    #[must_use]
    pub fn point_in_data(&self, image: ImagePt) -> bool {
        image.x() >= 1.0
            && image.x() <= self.plot.data_width()
            && image.y() >= 1.0
            && image.y() <= self.plot.data_height()
    }

    // ---- orientation probes ---------------------------------------------

    /// Whether east is on the left when north is up, for this plot.
    ///
    /// Determined empirically by comparing the sky longitude at the left and
    /// right edges of the data, the only approach that works uniformly across
    /// projections. Defaults to `true` when the projection cannot answer.
    #[must_use]
    pub fn is_east_left_of_north(&self) -> bool {
        let mid_y = self.plot.data_height() / 2.0;
        let right = self.image_to_world(ImagePt::new(self.plot.data_width() - 1.0, mid_y));
        let left = self.image_to_world(ImagePt::new(1.0, mid_y));
        match (left, right) {
            (Some(l), Some(r)) => l.lon() > r.lon(),
            _ => true,
        }
    }

    /// The viewport rotation (degrees) that would put celestial north straight
    /// up in the panel.
    ///
    /// Probes the sky direction of north at the data center and measures its
    /// screen-space bearing. `None` when the projection cannot convert the
    /// probes.
    #[must_use]
    pub fn north_angle(&self) -> Option<f64> {
        let center = self.image_to_world(ImagePt::new(
            self.plot.data_width() / 2.0,
            self.plot.data_height() / 2.0,
        ))?;
        // A probe a few screen pixels toward the pole; step away from it when
        // the center is too close for the probe to stay on the sphere.
        let step = self.plot.projection().pixel_scale_deg() / self.plot.zoom_factor() * 5.0;
        let (probe_lat, sign) = if center.lat() + step <= 90.0 {
            (center.lat() + step, 1.0)
        } else {
            (center.lat() - step, -1.0)
        };
        let north = WorldPt::new(center.lon(), probe_lat, center.coord_sys());

        let sc = self.world_to_screen(center)?;
        let sn = self.world_to_screen(north)?;
        let vx = (sn.x() - sc.x()) * sign;
        let vy = (sn.y() - sc.y()) * sign;
        if vx == 0.0 && vy == 0.0 {
            return None;
        }
        // North currently points along (vx, vy) on the canvas; the rotation
        // must carry that bearing to straight up (0, -1).
        Some(normalize_angle(-90.0 - vy.atan2(vx) * RAD_TO_DEG))
    }
}
