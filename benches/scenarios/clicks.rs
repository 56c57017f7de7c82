//! Benchmarks for tone rendering and look-ahead ticks.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use saavy_metronome::engine::{tone_channel, AudioClock, FrameClock, Tone, MAX_VOICES};
use saavy_metronome::sequencing::{LookaheadScheduler, Transport};

use crate::BLOCK_SIZES;

const SAMPLE_RATE: f64 = 48_000.0;

pub fn bench_renderer(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/renderer");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Silence: queue empty, no voices sounding
        let (_tx, mut renderer) = tone_channel(FrameClock::new(SAMPLE_RATE));
        group.bench_with_input(BenchmarkId::new("idle", size), &size, |b, _| {
            b.iter(|| renderer.render(black_box(&mut buffer)))
        });

        // Every voice ringing, each block split at a fresh onset
        let clock = FrameClock::new(SAMPLE_RATE);
        let (mut tx, mut renderer) = tone_channel(clock.clone());
        group.bench_with_input(BenchmarkId::new("all_voices", size), &size, |b, _| {
            b.iter(|| {
                let now = clock.now();
                for i in 0..MAX_VOICES {
                    let _ = tx.send(Tone {
                        frequency: 600.0 + 50.0 * i as f32,
                        start_time: now + i as f64 * size as f64 / (MAX_VOICES as f64 * SAMPLE_RATE),
                        duration: 0.05,
                    });
                }
                renderer.render(black_box(&mut buffer));
            })
        });
    }

    group.finish();
}

pub fn bench_scheduler(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/scheduler");
    let scheduler = LookaheadScheduler::default();

    for bpm in [60i64, 600] {
        let mut transport = Transport::new(bpm, 4);
        transport.start(0.0);
        let mut now = 0.0;
        group.bench_with_input(BenchmarkId::new("tick", bpm), &bpm, |b, _| {
            b.iter(|| {
                now += 0.025;
                black_box(scheduler.collect_due(&mut transport, black_box(now)))
            })
        });
    }

    group.finish();
}
