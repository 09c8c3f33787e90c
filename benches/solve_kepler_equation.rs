use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use satmission::kepler::{mean_to_true_anomaly, solve_kepler_equation};

/// Uniform random in [0, 2π)
#[inline]
fn rand_angle(rng: &mut StdRng) -> f64 {
    rng.random::<f64>() * std::f64::consts::TAU
}

/// Draw `samples` (M, e) pairs with e in `ecc_range`.
fn cases(rng: &mut StdRng, samples: usize, ecc_range: std::ops::Range<f64>) -> Vec<(f64, f64)> {
    (0..samples)
        .map(|_| (rand_angle(rng), rng.random_range(ecc_range.clone())))
        .collect()
}

/// Typical regime: e ∈ [0.0, 0.7)
fn bench_typical(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xDEADBEEF);

    c.bench_function("solve_kepler_equation/typical_e<0.7", |b| {
        b.iter_batched(
            || cases(&mut rng, 10_000, 0.0..0.7),
            |cases| {
                for (m, e) in cases {
                    let ecc_anom = solve_kepler_equation(black_box(m), black_box(e)).unwrap();
                    black_box(ecc_anom);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// High-eccentricity (still elliptic): e ∈ [0.7, 0.95)
fn bench_high_e(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xBADF00D);

    c.bench_function("solve_kepler_equation/high_e_0.7..0.95", |b| {
        b.iter_batched(
            || cases(&mut rng, 10_000, 0.7..0.95),
            |cases| {
                for (m, e) in cases {
                    let _ = black_box(solve_kepler_equation(black_box(m), black_box(e)));
                }
            },
            BatchSize::LargeInput,
        )
    });
}

/// Near-circular LEO regime, through the full mean to true anomaly conversion.
fn bench_leo_true_anomaly(c: &mut Criterion) {
    let mut rng = StdRng::seed_from_u64(0xFEEDFACE);

    c.bench_function("mean_to_true_anomaly/leo_e<0.01", |b| {
        b.iter_batched(
            || cases(&mut rng, 10_000, 0.0..0.01),
            |cases| {
                for (m, e) in cases {
                    let f = mean_to_true_anomaly(black_box(m), black_box(e)).unwrap();
                    black_box(f);
                }
            },
            BatchSize::LargeInput,
        )
    });
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_typical, bench_high_e, bench_leo_true_anomaly
);
criterion_main!(benches);
