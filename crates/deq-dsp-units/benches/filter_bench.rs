// SPDX-License-Identifier: LGPL-3.0-or-later

//! Criterion benchmarks for chain processing, response evaluation and
//! engine rebuilds.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use deq_dsp_units::filters::chain::FilterChain;
use deq_dsp_units::filters::engine::EqualizerEngine;
use deq_dsp_units::filters::spec::{FilterKind, FilterSpec};
use deq_dsp_units::units::log_frequencies;

const SR: f64 = 44100.0;
const BUF_SIZE: usize = 44100;

/// Generate a deterministic white noise buffer using a simple LCG.
fn white_noise(len: usize) -> Vec<f32> {
    let mut state: u64 = 0xDEAD_BEEF_CAFE_BABE;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            ((state >> 33) as i32) as f32 / (i32::MAX as f32)
        })
        .collect()
}

fn five_stages() -> Vec<FilterSpec> {
    [
        (FilterKind::HighPass, 0.0, 40.0, 0.707),
        (FilterKind::Peak, 3.0, 120.0, 1.0),
        (FilterKind::Peak, -4.0, 800.0, 2.0),
        (FilterKind::Peak, 2.5, 4000.0, 1.5),
        (FilterKind::LowPass, 0.0, 16000.0, 0.707),
    ]
    .into_iter()
    .filter_map(|(k, g, f, q)| FilterSpec::new(k, g, f, q).ok())
    .collect()
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_chain");
    let input = white_noise(BUF_SIZE);
    let specs = five_stages();
    let Ok(chain) = FilterChain::build(&specs, SR) else {
        return;
    };

    group.bench_function("apply_5_stages_1s", |b| {
        b.iter(|| black_box(chain.apply(black_box(&input))));
    });

    group.bench_function("build_5_stages", |b| {
        b.iter(|| black_box(FilterChain::build(black_box(&specs), SR)));
    });

    let freqs = log_frequencies(20.0, 20000.0, 512);
    group.bench_function("combined_response_512", |b| {
        b.iter(|| black_box(chain.combined_response(black_box(&freqs))));
    });

    group.finish();
}

fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("equalizer_engine");
    let mut eq = EqualizerEngine::new(SR);
    eq.set_specs(five_stages());

    group.bench_function("rebuild_and_responses", |b| {
        b.iter(|| {
            eq.specs_mut()[2].gain_db = -4.0;
            let _ = eq.rebuild();
            black_box(eq.responses())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_chain, bench_engine);
criterion_main!(benches);
