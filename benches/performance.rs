// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Meshedit Contributors

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use meshedit::geometry::{HalfEdgeMesh, Primitive, TriangleTransform};
use meshedit::io::stl;
use nalgebra::{Point3, Vector3};

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("cube", |b| {
        b.iter(|| {
            Primitive::cube(black_box(10.0), Point3::origin())
                .tessellate()
                .unwrap()
        });
    });

    for level in [32, 64] {
        group.bench_with_input(BenchmarkId::new("sphere", level), &level, |b, &level| {
            b.iter(|| {
                Primitive::sphere(black_box(10.0), black_box(level), Point3::origin())
                    .tessellate()
                    .unwrap()
            });
        });
    }

    group.bench_function("cylinder", |b| {
        b.iter(|| {
            Primitive::cylinder(black_box(5.0), black_box(20.0), black_box(64), Point3::origin())
                .tessellate()
                .unwrap()
        });
    });

    group.finish();
}

fn bench_halfedge(c: &mut Criterion) {
    let mut group = c.benchmark_group("halfedge");
    let sphere = Primitive::sphere(10.0, 64, Point3::origin())
        .tessellate()
        .unwrap();

    group.bench_function("build_sphere_64", |b| {
        b.iter(|| HalfEdgeMesh::from_mesh(black_box(&sphere)).unwrap());
    });

    let he_mesh = HalfEdgeMesh::from_mesh(&sphere).unwrap();
    group.bench_function("view_sphere_64", |b| {
        b.iter(|| black_box(&he_mesh).get_vertices_faces());
    });

    let transform = TriangleTransform::new()
        .translate(Vector3::new(0.1, 0.0, 0.0))
        .rotate(Vector3::new(5.0, 10.0, 15.0))
        .scale(Vector3::new(1.01, 1.01, 1.01));
    group.bench_function("transform_triangle", |b| {
        let mut mesh = he_mesh.clone();
        b.iter(|| mesh.transform_triangle(black_box(100), &transform));
    });

    group.finish();
}

fn bench_stl(c: &mut Criterion) {
    let mut group = c.benchmark_group("stl");
    let sphere = Primitive::sphere(10.0, 64, Point3::origin())
        .tessellate()
        .unwrap();

    let mut ascii = Vec::new();
    stl::write_ascii(&mut ascii, &sphere, None, "bench").unwrap();
    let mut binary = Vec::new();
    stl::write_binary(&mut binary, &sphere, None).unwrap();

    group.bench_function("write_ascii", |b| {
        b.iter(|| {
            let mut out = Vec::with_capacity(ascii.len());
            stl::write_ascii(&mut out, black_box(&sphere), None, "bench").unwrap();
            out
        });
    });

    group.bench_function("read_ascii", |b| {
        b.iter(|| stl::read_ascii(black_box(ascii.as_slice())).unwrap());
    });

    group.bench_function("read_binary", |b| {
        b.iter(|| stl::read_binary(black_box(binary.as_slice())).unwrap());
    });

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_halfedge, bench_stl);
criterion_main!(benches);
