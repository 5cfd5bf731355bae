//! Criterion benchmarks for schedule evaluation, single SA runs and small
//! portfolio runs on random instances.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_sched_anneal::portfolio::{PortfolioConfig, PortfolioRunner};
use u_sched_anneal::random::create_rng;
use u_sched_anneal::sa::{SaConfig, SaRunner, Solution, TemperatureSchedule};
use u_sched_anneal::scheduling::{exchange, ProblemInstance, RelocateTask};

fn instance(processors: usize, tasks: usize) -> ProblemInstance {
    ProblemInstance::generate(processors, tasks, 1..=100, &mut create_rng(42))
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate");

    for &tasks in &[100usize, 1000, 10_000] {
        let schedule = instance(16, tasks).initial_schedule().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &schedule, |b, s| {
            b.iter(|| black_box(s).evaluate())
        });
    }
    group.finish();
}

fn bench_exchange(c: &mut Criterion) {
    let mut group = c.benchmark_group("exchange_roundtrip");

    for &tasks in &[1000usize, 10_000] {
        let schedule = instance(16, tasks).initial_schedule().unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(tasks), &schedule, |b, s| {
            b.iter(|| {
                let bytes = exchange::to_bytes(black_box(s)).unwrap();
                black_box(exchange::from_bytes(&bytes).unwrap())
            })
        });
    }
    group.finish();
}

fn bench_sa_schedules(c: &mut Criterion) {
    let mut group = c.benchmark_group("sa_run");
    group.sample_size(10);

    let initial = instance(8, 200).initial_schedule().unwrap();
    for schedule in TemperatureSchedule::ALL {
        let config = SaConfig::default().with_schedule(schedule).with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(schedule),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = SaRunner::run(black_box(&initial), &RelocateTask, black_box(c));
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_portfolio_workers(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio");
    group.sample_size(10);

    let inst = instance(8, 200);
    for &workers in &[1usize, 2, 4] {
        let config = PortfolioConfig::default()
            .with_workers(workers)
            .with_max_rounds_without_improvement(2)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::new("workers", workers), &config, |b, c| {
            b.iter(|| {
                let result = PortfolioRunner::run(black_box(&inst), black_box(c)).unwrap();
                black_box(result)
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate,
    bench_exchange,
    bench_sa_schedules,
    bench_portfolio_workers
);
criterion_main!(benches);
