//! Benchmarks for the exponential decay envelope.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::dsp::envelope::DecayEnvelope;
use saavy_metronome::graph::node::RenderCtx;

use crate::BLOCK_SIZES;

pub fn bench_envelope(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/envelope");
    let ctx = RenderCtx::from_freq(48_000.0, 1_000.0, 1.0);

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Long ramp so the measured block is always decaying
        let mut env = DecayEnvelope::new(10.0);
        env.trigger(&ctx);
        group.bench_with_input(BenchmarkId::new("decay", size), &size, |b, _| {
            b.iter(|| {
                if !env.is_active() {
                    env.trigger(&ctx);
                }
                env.render(black_box(&mut buffer));
            })
        });

        // Finished envelope writing silence
        let mut env = DecayEnvelope::new(0.001);
        env.trigger(&ctx);
        for _ in 0..100 {
            env.next_sample();
        }
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| {
                env.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}
