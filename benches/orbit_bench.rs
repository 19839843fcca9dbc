//! Benchmarks for the CPU side of a frame: orbit formulas, clip
//! sampling, skinning and sphere generation.

use std::hint::black_box;
use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Mat4, Quat, Vec3};
use orbital::animation::skinning::skin_vertices;
use orbital::animation::{
    AnimationClip, AnimationMixer, Channel, ChannelValues, Interpolation,
    LocalTransform,
};
use orbital::geometry::uv_sphere;
use orbital::options::LightingOptions;
use orbital::orbit::{advance_frame, formulas, AnimationState, TrackedKind};
use orbital::scene::{Environment, SceneGraph};

fn orbit_formula_benchmark(c: &mut Criterion) {
    c.bench_function("transform_for_all_kinds", |b| {
        b.iter(|| {
            for kind in TrackedKind::ALL {
                let _ = black_box(formulas::transform_for(
                    kind,
                    black_box(12.3),
                    black_box(4.5),
                ));
            }
        });
    });
}

fn frame_step_benchmark(c: &mut Criterion) {
    let mut graph = SceneGraph::new();
    let mut environment = Environment::setup(&mut graph, &LightingOptions::default());
    let mut state = AnimationState::new();
    c.bench_function("advance_frame_empty_slots", |b| {
        b.iter(|| advance_frame(&mut state, &mut graph, &mut environment, black_box(0.016)));
    });
}

fn mixer_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixer_update");
    for nodes in [16, 64, 256] {
        let channels = (0..nodes)
            .map(|node| Channel {
                node,
                interpolation: Interpolation::Linear,
                times: (0..30).map(|k| k as f32 / 30.0).collect(),
                values: ChannelValues::Rotation(
                    (0..30)
                        .map(|k| Quat::from_rotation_y(k as f32 * 0.1))
                        .collect(),
                ),
            })
            .collect();
        let clips: Arc<[AnimationClip]> =
            Arc::from(vec![AnimationClip::new("swim", channels)]);
        let mut mixer =
            AnimationMixer::new(vec![LocalTransform::default(); nodes], clips);
        if let Some(action) = mixer.clip_action(0) {
            action.play();
        }
        group.bench_function(format!("{nodes}_nodes"), |b| {
            b.iter(|| mixer.update(black_box(0.016)));
        });
    }
    group.finish();
}

fn skinning_benchmark(c: &mut Criterion) {
    let mesh = uv_sphere(1.0, 64, 32);
    let n = mesh.vertices.len();
    let joints = vec![[0u16, 1, 0, 0]; n];
    let weights = vec![[0.5f32, 0.5, 0.0, 0.0]; n];
    let mats = [Mat4::IDENTITY, Mat4::from_translation(Vec3::X)];
    let mut out = Vec::with_capacity(n);
    c.bench_function("skin_sphere_64x32", |b| {
        b.iter(|| skin_vertices(&mesh.vertices, &joints, &weights, &mats, &mut out));
    });
}

fn sphere_benchmark(c: &mut Criterion) {
    c.bench_function("uv_sphere_moon", |b| {
        b.iter(|| black_box(uv_sphere(black_box(50.0), 32, 16)));
    });
}

criterion_group!(
    benches,
    orbit_formula_benchmark,
    frame_step_benchmark,
    mixer_benchmark,
    skinning_benchmark,
    sphere_benchmark
);
criterion_main!(benches);
