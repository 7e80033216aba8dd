use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::DVec3;
use road_lane_engine::mesh::build_road_meshes;
use road_lane_engine::{
    parse_road_json, write_road_json, CatmullRomCurve3, EngineOptions, MeshScope, Road,
    RoadTemplate, SharedCurve, SplitRequest,
};
use std::hint::black_box;
use std::sync::Arc;

/// Geschwungene Referenzlinie der ungefähren Länge `length`.
fn build_key_path(length: f64) -> SharedCurve {
    let points = (0..=8)
        .map(|i| {
            let x = length * i as f64 / 8.0;
            let z = (i as f64 * 0.9).sin() * length * 0.05;
            DVec3::new(x, 0.0, z)
        })
        .collect();
    Arc::new(CatmullRomCurve3::centripetal(points))
}

fn build_road(length: f64, lanes: u32, options: &EngineOptions) -> Road {
    Road::create(
        1,
        build_key_path(length),
        None,
        &RoadTemplate::two_way(lanes, 3.5),
        options,
    )
}

fn build_tapered_road(length: f64, options: &EngineOptions) -> Road {
    let mut road = build_road(length, 3, options);
    road_lane_engine::app::use_cases::split_section(
        &mut road,
        -3,
        SplitRequest::Widen { from: 0.3, to: 0.5 },
        options,
    )
    .expect("Übergang fehlgeschlagen");
    road
}

fn bench_road_create(c: &mut Criterion) {
    let options = EngineOptions::default();
    let mut group = c.benchmark_group("road_create");

    for &length in &[100.0f64, 1_000.0] {
        group.bench_with_input(
            BenchmarkId::from_parameter(length),
            &length,
            |b, &length| b.iter(|| black_box(build_road(black_box(length), 3, &options))),
        );
    }
    group.finish();
}

fn bench_transition_split(c: &mut Criterion) {
    let options = EngineOptions::default();
    c.bench_function("split_widen_300m", |b| {
        b.iter(|| black_box(build_tapered_road(black_box(300.0), &options)))
    });
}

fn bench_mesh_batch(c: &mut Criterion) {
    let options = EngineOptions::default();
    let road = build_tapered_road(1_000.0, &options);

    c.bench_function("mesh_batch_all", |b| {
        b.iter(|| {
            let meshes = build_road_meshes(black_box(&road), MeshScope::All, &options)
                .expect("Mesh-Batch fehlgeschlagen");
            black_box(meshes.triangle_count())
        })
    });
}

fn bench_json_roundtrip(c: &mut Criterion) {
    let options = EngineOptions::default();
    let road = build_tapered_road(300.0, &options);
    let json = write_road_json(&road).expect("JSON fehlgeschlagen");

    c.bench_function("json_parse", |b| {
        b.iter(|| {
            let road = parse_road_json(black_box(&json), road.key_path.clone(), None, &options)
                .expect("JSON-Parse fehlgeschlagen");
            black_box(road.sections.len())
        })
    });
}

criterion_group!(
    core_benches,
    bench_road_create,
    bench_transition_split,
    bench_mesh_batch,
    bench_json_roundtrip
);
criterion_main!(core_benches);
