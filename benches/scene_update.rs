use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use hero_scene::config::Settings;
use hero_scene::core::particles::generate_positions;
use hero_scene::scenes::create_hero_scene;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn hero_settings(particles: usize) -> Settings {
    Settings {
        seed: Some(1),
        particle_count: particles,
        ..Settings::default()
    }
}

/// Benchmark: one frame of animation on the hero scene
fn bench_scene_update(c: &mut Criterion) {
    let mut scene = create_hero_scene(&hero_settings(200));
    let mut t = 0.0_f32;

    c.bench_function("scene_update", |b| {
        b.iter(|| {
            t += 1.0 / 60.0;
            scene.update(black_box(t));
        })
    });
}

/// Benchmark: building the per-frame snapshot handed to the renderer
fn bench_frame_graph(c: &mut Criterion) {
    let mut scene = create_hero_scene(&hero_settings(200));
    scene.update(12.0);

    c.bench_function("frame_graph", |b| {
        b.iter(|| black_box(scene.frame_graph().meshes.len()))
    });
}

/// Benchmark: particle generation at several field sizes
fn bench_particle_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("particle_generation");
    for count in [200usize, 2_000, 20_000] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rng = StdRng::seed_from_u64(7);
            b.iter(|| black_box(generate_positions(count, &mut rng)))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_scene_update, bench_frame_graph, bench_particle_generation);
criterion_main!(benches);
