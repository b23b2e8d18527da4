#![allow(missing_docs)]

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use strata_utils::noise::{NoiseField, PerlinNoise};
use strata_utils::random::LegacyRandom;

fn bench_perlin_creation(c: &mut Criterion) {
    c.bench_function("perlin_noise_create_16_octaves", |b| {
        b.iter(|| {
            let mut rng = LegacyRandom::from_seed(black_box(0));
            black_box(PerlinNoise::from_octaves(&mut rng, -15..=0));
        });
    });
}

fn bench_perlin_get_value(c: &mut Criterion) {
    let mut rng = LegacyRandom::from_seed(0);
    let noise = PerlinNoise::from_octaves(&mut rng, -15..=0);

    c.bench_function("perlin_noise_get_value_16_octaves", |b| {
        let mut x = 0.0;
        b.iter(|| {
            x += 1.0;
            black_box(noise.get_value(black_box(x * 200.0), 10.0, 37.5, 1.0, 0.0, true));
        });
    });
}

criterion_group!(benches, bench_perlin_creation, bench_perlin_get_value);
criterion_main!(benches);
