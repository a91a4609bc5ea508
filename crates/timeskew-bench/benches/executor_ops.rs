//! Criterion micro-benchmarks for the executors over the counter sweeper.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use timeskew_bench::reference_config;
use timeskew_core::Field4D;
use timeskew_engine::{run_reference, CounterSweeper, TiledSchedule};

/// Benchmark: one tiled counter run of the reference config.
fn bench_tiled_counter_run(c: &mut Criterion) {
    let config = reference_config();
    let schedule = TiledSchedule::build(&config).unwrap();

    c.bench_function("tiled_counter_run_100", |b| {
        b.iter(|| {
            let mut volt: Field4D<u32> = Field4D::new("volt", config.grid_size, 1);
            let mut curr: Field4D<u32> = Field4D::new("curr", config.grid_size, 1);
            let mut sweeper = CounterSweeper {
                volt: &mut volt,
                curr: &mut curr,
            };
            schedule.run(&mut sweeper).unwrap();
            black_box(&volt);
        });
    });
}

/// Benchmark: the naive reference sweep over the same grid.
fn bench_reference_counter_run(c: &mut Criterion) {
    let config = reference_config();

    c.bench_function("reference_counter_run_100", |b| {
        b.iter(|| {
            let mut volt: Field4D<u32> = Field4D::new("volt", config.grid_size, 1);
            let mut curr: Field4D<u32> = Field4D::new("curr", config.grid_size, 1);
            let mut sweeper = CounterSweeper {
                volt: &mut volt,
                curr: &mut curr,
            };
            run_reference(&mut sweeper, config.grid_size, config.timesteps).unwrap();
            black_box(&volt);
        });
    });
}

criterion_group!(benches, bench_tiled_counter_run, bench_reference_counter_run);
criterion_main!(benches);
