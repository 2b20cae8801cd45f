use std::hint::black_box;

use concentration_core::*;
use criterion::{Criterion, criterion_group, criterion_main};

fn bench_deal(c: &mut Criterion) {
    let mut group = c.benchmark_group("deal");
    for size in GridSize::ALL {
        group.bench_function(size.label(), |b| {
            let mut seed = 0u64;
            b.iter(|| {
                seed = seed.wrapping_add(1);
                RandomBoardGenerator::new(black_box(seed), SymbolPool::default())
                    .generate(size.pair_count())
                    .unwrap()
            })
        });
    }
    group.finish();
}

fn bench_full_session(c: &mut Criterion) {
    c.bench_function("reveal 6x4 in board order", |b| {
        b.iter(|| {
            let mut engine = Engine::with_options(
                VirtualClock::new(),
                black_box(7),
                Timing::immediate_start(),
                SymbolPool::default(),
            );
            engine.configure(SessionConfig::unlimited(GridSize::Large));
            let board = engine.session().board().clone();
            for tile in board.iter() {
                engine.reveal_tile(tile.id);
                if engine.session().revealed().len() == 2 {
                    engine.clear_revealed();
                }
            }
            engine.status()
        })
    });
}

criterion_group!(benches, bench_deal, bench_full_session);
criterion_main!(benches);
