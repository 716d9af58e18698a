//! Allocation recompute and codec benchmarks
//!
//! Run with: cargo bench

#[path = "../tests/helpers/mod.rs"]
mod helpers;

use {
    criterion::{criterion_group, criterion_main, BatchSize, Criterion},
    helpers::{current_record, legacy_record},
    operation_splits::{decode, encode, AllocationState, DecodeIntent, EngineConfig, Role},
    std::hint::black_box,
};

fn crewed_state(crew: usize) -> AllocationState {
    let mut state = AllocationState::new(36.0);
    state.set_total_amount(1_000_000);
    for i in 0..crew {
        let role = if i % 2 == 0 { Role::Pilot } else { Role::Helper };
        let _ = state.add_participant(&format!("Operador {i}"), role);
    }
    state
}

fn bench_recompute(c: &mut Criterion) {
    for crew in [2usize, 10, 50] {
        let state = crewed_state(crew);

        c.bench_function(&format!("allocation.set_share.crew_{crew}"), |b| {
            b.iter_batched(
                || state.clone(),
                |mut s| {
                    s.set_share("Operador 0", Role::Pilot, black_box("17,5"));
                    s
                },
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_codec(c: &mut Criterion) {
    let config = EngineConfig::default();
    let legacy = legacy_record();
    let current = current_record();

    c.bench_function("codec.decode.legacy", |b| {
        b.iter(|| decode(black_box(&legacy), DecodeIntent::Edit, &config));
    });

    c.bench_function("codec.decode.current", |b| {
        b.iter(|| decode(black_box(&current), DecodeIntent::Edit, &config));
    });

    let state = crewed_state(10);
    c.bench_function("codec.encode.crew_10", |b| {
        b.iter(|| encode(black_box(&state)));
    });
}

criterion_group!(benches, bench_recompute, bench_codec);
criterion_main!(benches);
