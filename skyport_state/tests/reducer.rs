// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Intent-level scenarios across the whole engine: creation, zoom, rotation,
//! group propagation, WCS matching, and the no-op guarantees.

use std::sync::Arc;

use kurbo::Size;
use skyport_align::AlignMode;
use skyport_coords::{CoordSys, ImagePt, ScreenPt, WorldPt};
use skyport_plot::{AttrKey, AttrValue, PlotDescriptor};
use skyport_projection::ProjectionSpec;
use skyport_state::{Intent, VisRoot, reduce, reduce_with_changes};
use skyport_view::{
    CenterOn, FlipAxis, GroupId, RotateTo, ViewContext, ViewLocks, Viewport, ViewportId,
};

fn tan_spec(crval1: f64, crval2: f64, scale: f64, crpix: f64) -> ProjectionSpec {
    ProjectionSpec {
        ctype: Some("TAN".into()),
        crpix1: crpix,
        crpix2: crpix,
        crval1,
        crval2,
        cdelt1: -scale,
        cdelt2: scale,
        crota2: 0.0,
        coord_sys: CoordSys::EquatorialJ2000,
    }
}

fn image_descriptor(spec: ProjectionSpec, size: f64, fixed_target: Option<WorldPt>) -> PlotDescriptor {
    PlotDescriptor::Image {
        projection: spec,
        width: size,
        height: size,
        zoom: 1.0,
        attributes: fixed_target
            .map(|w| vec![(AttrKey::FixedTarget, AttrValue::World(w))])
            .unwrap_or_default(),
        cube_depth: 1,
    }
}

fn add(root: &VisRoot, id: &str, group: &str, desc: PlotDescriptor, view: f64) -> VisRoot {
    reduce(
        root,
        &Intent::AddViewport {
            id: ViewportId::new(id),
            group: GroupId::new(group),
            descriptor: desc,
            context: ViewContext::default(),
            view_dim: Size::new(view, view),
        },
    )
}

fn vp<'r>(root: &'r VisRoot, id: &str) -> &'r Arc<Viewport> {
    root.viewport(&ViewportId::new(id)).expect("viewport exists")
}

fn center_of(viewport: &Viewport) -> ImagePt {
    viewport.current_center_point().expect("has a center")
}

#[test]
fn add_viewport_runs_initial_centering() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let v1 = vp(&root, "v1");
    assert!(v1.scroll().is_some(), "initial centering pass ran");
    let center = center_of(v1);
    assert!((center.x() - 200.0).abs() < 1e-9);
    assert!((center.y() - 200.0).abs() < 1e-9);
    assert_eq!(root.active(), Some(&ViewportId::new("v1")));
}

#[test]
fn set_active_switches_only_the_active_reference() {
    let mut root = VisRoot::new();
    for id in ["v1", "v2"] {
        root = add(
            &root,
            id,
            "g",
            image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
            100.0,
        );
    }
    assert_eq!(root.active(), Some(&ViewportId::new("v2")));

    let (next, changed) = reduce_with_changes(
        &root,
        &Intent::SetActive {
            id: ViewportId::new("v1"),
        },
    );
    assert_eq!(next.active(), Some(&ViewportId::new("v1")));
    assert!(changed.is_empty(), "no viewport value was replaced");
    for (a, b) in root.viewports().iter().zip(next.viewports()) {
        assert!(Arc::ptr_eq(a, b));
    }

    // An unknown id leaves the active reference alone.
    let same = reduce(
        &next,
        &Intent::SetActive {
            id: ViewportId::new("missing"),
        },
    );
    assert_eq!(same.active(), Some(&ViewportId::new("v1")));
}

#[test]
fn unknown_viewport_id_is_a_noop_sharing_every_arc() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let (next, changed) = reduce_with_changes(
        &root,
        &Intent::Zoom {
            id: ViewportId::new("does-not-exist"),
            factor: 2.0,
        },
    );
    assert!(changed.is_empty());
    assert_eq!(next.viewports().len(), root.viewports().len());
    for (a, b) in root.viewports().iter().zip(next.viewports()) {
        assert!(Arc::ptr_eq(a, b), "untouched viewports stay pointer-equal");
    }
}

#[test]
fn recenter_on_already_centered_world_point_keeps_origin_scroll() {
    // The 400×400/zoom-1 panel whose world target maps to the image center:
    // recentering there leaves the scroll at (0, 0).
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        400.0,
    );
    let root = add(
        &root,
        "bystander",
        "g2",
        image_descriptor(tan_spec(50.0, -10.0, 0.000_2, 200.0), 400.0, None),
        400.0,
    );
    let bystander_before = Arc::clone(vp(&root, "bystander"));

    let next = reduce(
        &root,
        &Intent::Recenter {
            id: ViewportId::new("v1"),
            on: Some(CenterOn::World(WorldPt::j2000(10.0, 20.0))),
        },
    );
    assert_eq!(vp(&next, "v1").scroll(), Some(ScreenPt::new(0.0, 0.0)));
    assert!(
        Arc::ptr_eq(&bystander_before, vp(&next, "bystander")),
        "ungrouped viewport untouched"
    );
}

#[test]
fn rotate_90_with_east_left_parity_stores_270() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        400.0,
    );
    let next = reduce(
        &root,
        &Intent::Rotate {
            id: ViewportId::new("v1"),
            to: RotateTo::Angle(90.0),
            north_lock: false,
        },
    );
    assert_eq!(vp(&next, "v1").rotation_deg(), 270.0);
}

#[test]
fn zoom_preserves_center_and_reports_change() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let root = reduce(
        &root,
        &Intent::Recenter {
            id: ViewportId::new("v1"),
            on: Some(CenterOn::Image(ImagePt::new(250.0, 130.0))),
        },
    );
    let (next, changed) = reduce_with_changes(
        &root,
        &Intent::Zoom {
            id: ViewportId::new("v1"),
            factor: 2.0,
        },
    );
    assert_eq!(changed, vec![ViewportId::new("v1")]);
    let v1 = vp(&next, "v1");
    assert_eq!(v1.prime_plot().unwrap().zoom_factor(), 2.0);
    let center = center_of(v1);
    assert!((center.x() - 250.0).abs() < 1e-9);
    assert!((center.y() - 130.0).abs() < 1e-9);
}

#[test]
fn invalid_zoom_factor_retains_previous_state() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g1",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let before = Arc::clone(vp(&root, "v1"));
    let next = reduce(
        &root,
        &Intent::Zoom {
            id: ViewportId::new("v1"),
            factor: -3.0,
        },
    );
    assert!(Arc::ptr_eq(&before, vp(&next, "v1")));
}

#[test]
fn zoom_fans_out_to_group_locked_members_only() {
    let locked = ViewContext {
        locks: ViewLocks::GROUP,
        zoom_lock: None,
    };
    let mut root = VisRoot::new();
    for id in ["a", "b"] {
        root = reduce(
            &root,
            &Intent::AddViewport {
                id: ViewportId::new(id),
                group: GroupId::new("g"),
                descriptor: image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
                context: locked,
                view_dim: Size::new(100.0, 100.0),
            },
        );
    }
    // Same group but not flagged: stays at zoom 1.
    root = add(
        &root,
        "c",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );

    let next = reduce(
        &root,
        &Intent::Zoom {
            id: ViewportId::new("a"),
            factor: 4.0,
        },
    );
    assert_eq!(vp(&next, "a").prime_plot().unwrap().zoom_factor(), 4.0);
    assert_eq!(vp(&next, "b").prime_plot().unwrap().zoom_factor(), 4.0);
    assert_eq!(vp(&next, "c").prime_plot().unwrap().zoom_factor(), 1.0);
}

#[test]
fn position_locked_group_matches_scroll_fractions() {
    // Three members of different canvas sizes; alignment mode None, so the
    // lock propagates *fractional* scroll position.
    let mut root = VisRoot::new();
    root = add(
        &root,
        "a",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    root = add(
        &root,
        "b",
        "g",
        image_descriptor(tan_spec(30.0, 5.0, 0.000_5, 400.0), 800.0, None),
        200.0,
    );
    root = add(
        &root,
        "c",
        "g",
        image_descriptor(tan_spec(200.0, -40.0, 0.001, 100.0), 200.0, None),
        50.0,
    );
    root = reduce(
        &root,
        &Intent::SetPositionLock {
            group: GroupId::new("g"),
            lock: true,
        },
    );

    let next = reduce(
        &root,
        &Intent::Scroll {
            id: ViewportId::new("a"),
            scroll: ScreenPt::new(250.0, 100.0),
        },
    );

    let fraction = |viewport: &Viewport| {
        let screen = viewport.prime_plot().unwrap().screen_size();
        let extent = viewport.scroll_extent();
        let scroll = viewport.scroll().unwrap();
        (
            (scroll.x() + extent.width / 2.0) / screen.width,
            (scroll.y() + extent.height / 2.0) / screen.height,
        )
    };
    let fa = fraction(vp(&next, "a"));
    let fb = fraction(vp(&next, "b"));
    let fc = fraction(vp(&next, "c"));
    assert!((fa.0 - fb.0).abs() < 1e-9 && (fa.1 - fb.1).abs() < 1e-9, "{fa:?} vs {fb:?}");
    assert!((fa.0 - fc.0).abs() < 1e-9 && (fa.1 - fc.1).abs() < 1e-9, "{fa:?} vs {fc:?}");
}

#[test]
fn flip_propagates_across_position_locked_group() {
    let mut root = VisRoot::new();
    for id in ["a", "b"] {
        root = add(
            &root,
            id,
            "g",
            image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
            100.0,
        );
    }
    root = reduce(
        &root,
        &Intent::SetPositionLock {
            group: GroupId::new("g"),
            lock: true,
        },
    );
    let next = reduce(
        &root,
        &Intent::Flip {
            id: ViewportId::new("a"),
            axis: FlipAxis::Y,
        },
    );
    assert!(vp(&next, "a").flip_y());
    assert!(vp(&next, "b").flip_y(), "flip re-applied to the group");
}

#[test]
fn wcs_standard_match_aligns_sky_centers_and_tracks_resize() {
    let mut root = VisRoot::new();
    root = add(
        &root,
        "master",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    root = add(
        &root,
        "follower",
        "g",
        image_descriptor(tan_spec(10.05, 19.95, 0.000_5, 300.0), 600.0, None),
        150.0,
    );
    root = reduce(
        &root,
        &Intent::Recenter {
            id: ViewportId::new("master"),
            on: Some(CenterOn::World(WorldPt::j2000(10.01, 20.01))),
        },
    );

    let root = reduce(
        &root,
        &Intent::ChangeAlignmentMode {
            mode: AlignMode::WcsStandard,
            master: Some(ViewportId::new("master")),
        },
    );
    assert_eq!(root.align_mode(), AlignMode::WcsStandard);

    let sky_center = |viewport: &Viewport| {
        viewport
            .converter()
            .unwrap()
            .image_to_world(center_of(viewport))
            .unwrap()
    };
    let master_sky = sky_center(vp(&root, "master"));
    let follower_sky = sky_center(vp(&root, "follower"));
    let tol = 0.000_2; // the smaller pixel scale of the pair
    assert!(skyport_coords::world_distance(master_sky, follower_sky) < tol);

    // Resizing the follower re-derives its scroll from the master rather
    // than preserving its own center.
    let resized = reduce(
        &root,
        &Intent::Resize {
            id: ViewportId::new("follower"),
            view_dim: Size::new(80.0, 120.0),
        },
    );
    let follower_sky = sky_center(vp(&resized, "follower"));
    assert!(skyport_coords::world_distance(master_sky, follower_sky) < tol);
}

#[test]
fn wcs_match_bridges_a_galactic_hips_master_and_an_equatorial_image() {
    // The frames differ; alignment must convert through the sky, not the
    // numeric lon/lat pairs.
    let mut root = VisRoot::new();
    root = add(
        &root,
        "hips",
        "g",
        PlotDescriptor::Hips {
            frame: CoordSys::Galactic,
            initial_lon: 0.0,
            initial_lat: 0.0,
            cube_depth: 1,
        },
        400.0,
    );
    // An image whose footprint covers the galactic center.
    root = add(
        &root,
        "img",
        "g",
        image_descriptor(tan_spec(266.405, -28.936, 0.000_5, 300.0), 600.0, None),
        150.0,
    );
    let root = reduce(
        &root,
        &Intent::ChangeAlignmentMode {
            mode: AlignMode::WcsStandard,
            master: Some(ViewportId::new("hips")),
        },
    );

    let sky = |id: &str| {
        let viewport = vp(&root, id);
        viewport
            .converter()
            .unwrap()
            .image_to_world(center_of(viewport))
            .unwrap()
    };
    let sep = skyport_coords::world_distance(sky("hips"), sky("img"));
    assert!(sep < 0.001, "separation {sep}");
}

#[test]
fn alignment_mode_requires_an_existing_master() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let next = reduce(
        &root,
        &Intent::ChangeAlignmentMode {
            mode: AlignMode::WcsStandard,
            master: Some(ViewportId::new("gone")),
        },
    );
    assert_eq!(next.align_mode(), AlignMode::None);
    assert!(next.wcs_master().is_none());
}

#[test]
fn removing_the_master_clears_the_match() {
    let mut root = VisRoot::new();
    for id in ["m", "f"] {
        root = add(
            &root,
            id,
            "g",
            image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
            100.0,
        );
    }
    root = reduce(
        &root,
        &Intent::ChangeAlignmentMode {
            mode: AlignMode::Pixel,
            master: Some(ViewportId::new("m")),
        },
    );
    let next = reduce(
        &root,
        &Intent::RemoveViewport {
            id: ViewportId::new("m"),
        },
    );
    assert!(next.viewport(&ViewportId::new("m")).is_none());
    assert_eq!(next.align_mode(), AlignMode::None);
    assert!(next.wcs_master().is_none());
}

#[test]
fn replace_plot_data_for_a_removed_viewport_is_absorbed() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let root = reduce(
        &root,
        &Intent::RemoveViewport {
            id: ViewportId::new("v1"),
        },
    );
    // The fetch that was in flight when the viewport went away.
    let (next, changed) = reduce_with_changes(
        &root,
        &Intent::ReplacePlotData {
            id: ViewportId::new("v1"),
            descriptor: image_descriptor(tan_spec(1.0, 2.0, 0.000_2, 100.0), 200.0, None),
        },
    );
    assert!(changed.is_empty());
    assert!(next.viewports().is_empty());
}

#[test]
fn replace_plot_data_recenters_on_the_new_fixed_target() {
    let root = VisRoot::new();
    let root = add(
        &root,
        "v1",
        "g",
        image_descriptor(tan_spec(10.0, 20.0, 0.000_2, 200.0), 400.0, None),
        100.0,
    );
    let target = WorldPt::j2000(50.02, -5.0);
    let next = reduce(
        &root,
        &Intent::ReplacePlotData {
            id: ViewportId::new("v1"),
            descriptor: image_descriptor(tan_spec(50.0, -5.0, 0.000_2, 300.0), 600.0, Some(target)),
        },
    );
    let v1 = vp(&next, "v1");
    assert_eq!(v1.prime_plot().unwrap().data_width(), 600.0);
    let expected = v1.converter().unwrap().world_to_image(target).unwrap();
    let center = center_of(v1);
    assert!((center.x() - expected.x()).abs() < 1e-6);
    assert!((center.y() - expected.y()).abs() < 1e-6);
}

#[test]
fn change_active_model_keeps_center_across_planes() {
    let desc = PlotDescriptor::Image {
        projection: tan_spec(10.0, 20.0, 0.000_2, 200.0),
        width: 400.0,
        height: 400.0,
        zoom: 1.0,
        attributes: vec![],
        cube_depth: 4,
    };
    let root = add(&VisRoot::new(), "cube", "g", desc, 100.0);
    let root = reduce(
        &root,
        &Intent::Recenter {
            id: ViewportId::new("cube"),
            on: Some(CenterOn::Image(ImagePt::new(300.0, 120.0))),
        },
    );
    let next = reduce(
        &root,
        &Intent::ChangeActiveModel {
            id: ViewportId::new("cube"),
            index: 3,
        },
    );
    let cube = vp(&next, "cube");
    assert_eq!(cube.prime_idx(), 3);
    let center = center_of(cube);
    assert!((center.x() - 300.0).abs() < 1e-9);
    assert!((center.y() - 120.0).abs() < 1e-9);

    // Out-of-range plane index: nothing changes, same allocation.
    let before = Arc::clone(vp(&next, "cube"));
    let same = reduce(
        &next,
        &Intent::ChangeActiveModel {
            id: ViewportId::new("cube"),
            index: 9,
        },
    );
    assert!(Arc::ptr_eq(&before, vp(&same, "cube")));
}

#[test]
fn hips_projection_recenter_pans_the_canvas() {
    let root = add(
        &VisRoot::new(),
        "hips",
        "g",
        PlotDescriptor::Hips {
            frame: CoordSys::EquatorialJ2000,
            initial_lon: 0.0,
            initial_lat: 0.0,
            cube_depth: 1,
        },
        800.0,
    );
    let aim = WorldPt::j2000(120.0, -30.0);
    let next = reduce(
        &root,
        &Intent::ChangeProjectionCenter {
            id: ViewportId::new("hips"),
            center: aim,
        },
    );
    let hips = vp(&next, "hips");
    let center_world = hips
        .converter()
        .unwrap()
        .image_to_world(center_of(hips))
        .unwrap();
    assert!((center_world.lon() - 120.0).abs() < 0.01, "{}", center_world.lon());
    assert!((center_world.lat() + 30.0).abs() < 0.01, "{}", center_world.lat());
}
