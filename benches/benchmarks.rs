// benches/benchmarks.rs - Performance benchmarks (criterion)
//
//   1. Full run of the worked example with a seeded generator
//   2. Long exhausting run (history growth)
//   3. Single perturb + score + reconsider step

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use reflect_agent::core::random::{RngSource, ScriptedSource};
use reflect_agent::core::refine_loop::RefinementLoop;
use reflect_agent::core::types::LoopConfig;

fn bench_worked_example(c: &mut Criterion) {
    c.bench_function("run_worked_example_seeded", |b| {
        b.iter(|| {
            let config = LoopConfig::new(0.65, 15, 0.02).with_initial_value(0.2);
            let mut lp = RefinementLoop::new(config, RngSource::seeded(black_box(42)));
            black_box(lp.run())
        })
    });
}

fn bench_long_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_exhausting");
    for budget in [100_i64, 10_000] {
        group.bench_function(format!("{budget}_iterations"), |b| {
            b.iter(|| {
                // target outside [0, 1] never converges
                let config = LoopConfig::new(2.0, budget, 0.0);
                let mut lp = RefinementLoop::new(config, RngSource::seeded(7));
                black_box(lp.run())
            })
        });
    }
    group.finish();
}

fn bench_single_step(c: &mut Criterion) {
    c.bench_function("perturb_score_reconsider", |b| {
        b.iter(|| {
            let config = LoopConfig::new(0.5, 2, 0.0).with_initial_value(0.3);
            let mut lp = RefinementLoop::new(config, ScriptedSource::new([0.1, -0.1]));
            lp.perturb();
            lp.score();
            lp.perturb();
            lp.score();
            black_box(lp.reconsider())
        })
    });
}

criterion_group!(
    benches,
    bench_worked_example,
    bench_long_run,
    bench_single_step
);
criterion_main!(benches);
