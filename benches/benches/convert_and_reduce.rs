// Copyright 2026 the Skyport Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::Size;
use skyport_coords::{CoordSys, ImagePt, ScreenPt, WorldPt};
use skyport_plot::{Plot, PlotDescriptor, PlotId};
use skyport_projection::ProjectionSpec;
use skyport_state::{Intent, VisRoot, reduce};
use skyport_view::{CoordConverter, GroupId, ViewContext, ViewTransform, ViewportId};

fn tan_spec(crval1: f64, crval2: f64) -> ProjectionSpec {
    ProjectionSpec {
        ctype: Some("TAN".into()),
        crpix1: 512.0,
        crpix2: 512.0,
        crval1,
        crval2,
        cdelt1: -0.000_2,
        cdelt2: 0.000_2,
        crota2: 0.0,
        coord_sys: CoordSys::EquatorialJ2000,
    }
}

fn bench_converter(c: &mut Criterion) {
    let mut group = c.benchmark_group("converter");

    let desc = PlotDescriptor::Image {
        projection: tan_spec(83.6, 22.0),
        width: 1024.0,
        height: 1024.0,
        zoom: 2.0,
        attributes: vec![],
        cube_depth: 1,
    };
    let plot = Plot::from_descriptor(PlotId::new("bench"), &desc)
        .unwrap()
        .remove(0);
    let cc = CoordConverter::new(
        &plot,
        ViewTransform {
            scroll: ScreenPt::new(512.0, 512.0),
            rotation_deg: 45.0,
            flip_x: false,
            flip_y: true,
            view_dim: Size::new(800.0, 600.0),
        },
    );

    // Hypothesis: the projection legs dominate; the affine legs should be an
    // order of magnitude cheaper.
    group.bench_function("world_to_device", |b| {
        let wp = WorldPt::j2000(83.61, 22.01);
        b.iter(|| black_box(cc.world_to_device(black_box(wp))));
    });
    group.bench_function("image_to_device", |b| {
        let ip = ImagePt::new(600.0, 400.0);
        b.iter(|| black_box(cc.image_to_device(black_box(ip))));
    });
    group.bench_function("device_round_trip", |b| {
        let sp = ScreenPt::new(700.0, 300.0);
        b.iter(|| black_box(cc.device_to_screen(cc.screen_to_device(black_box(sp)))));
    });

    group.finish();
}

fn bench_reducer(c: &mut Criterion) {
    let mut group = c.benchmark_group("reducer");

    for members in [2usize, 8, 32] {
        let mut root = VisRoot::new();
        for i in 0..members {
            root = reduce(
                &root,
                &Intent::AddViewport {
                    id: ViewportId::new(format!("v{i}")),
                    group: GroupId::new("g"),
                    descriptor: PlotDescriptor::Image {
                        projection: tan_spec(83.6 + i as f64 * 0.01, 22.0),
                        width: 1024.0,
                        height: 1024.0,
                        zoom: 1.0,
                        attributes: vec![],
                        cube_depth: 1,
                    },
                    context: ViewContext::default(),
                    view_dim: Size::new(400.0, 400.0),
                },
            );
        }
        root = reduce(
            &root,
            &Intent::SetPositionLock {
                group: GroupId::new("g"),
                lock: true,
            },
        );

        group.throughput(Throughput::Elements(members as u64));
        group.bench_with_input(
            BenchmarkId::new("locked_group_scroll", members),
            &root,
            |b, root| {
                let intent = Intent::Scroll {
                    id: ViewportId::new("v0"),
                    scroll: ScreenPt::new(300.0, 200.0),
                };
                b.iter(|| black_box(reduce(black_box(root), &intent)));
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_converter, bench_reducer);
criterion_main!(benches);
