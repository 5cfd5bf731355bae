//! Portfolio round loop.

use std::path::Path;

use rayon::ThreadPool;
use tracing::{debug, info, warn};

use super::channel::{duplex, Endpoint};
use super::config::PortfolioConfig;
use crate::error::{Error, Result};
use crate::random::{create_rng, derive_seed};
use crate::sa::{SaConfig, SaRunner, Solution};
use crate::scheduling::{exchange, ProblemInstance, RelocateTask, Schedule};

/// Result of a portfolio run.
#[derive(Debug, Clone)]
pub struct PortfolioResult {
    /// The best schedule found by any worker in any round.
    pub best: Schedule,

    /// Cost of the best schedule.
    pub best_cost: f64,

    /// Number of completed rounds.
    pub rounds: usize,

    /// Number of rounds in which some worker beat the global best.
    pub improving_rounds: usize,

    /// Global best cost at the start and after every round.
    pub cost_history: Vec<f64>,

    /// Run-level seed the worker seeds were derived from.
    pub seed: u64,
}

/// Runs independent SA searches in parallel and keeps the best result.
///
/// # Algorithm
///
/// 1. `global_best` = round-robin schedule
/// 2. Each round, every worker receives an encoded copy of `global_best`
///    over its own channel, runs one SA search to termination with its own
///    seeded generator, and sends back its best schedule
/// 3. The orchestrator waits for all workers, then keeps the strictly
///    cheapest schedule among `global_best` and the results
/// 4. Stop after `max_rounds_without_improvement` consecutive rounds in
///    which no worker beat `global_best`
///
/// Workers share no mutable state; feeding the best schedule back each round
/// turns independent restarts into a search focused on the best basin found.
///
/// There is no timeout: a worker that never finishes stalls its round.
pub struct PortfolioRunner;

impl PortfolioRunner {
    /// Runs the portfolio on `instance`, starting from its round-robin
    /// schedule.
    pub fn run(instance: &ProblemInstance, config: &PortfolioConfig) -> Result<PortfolioResult> {
        let initial = instance.initial_schedule()?;
        Self::run_from(initial, config)
    }

    /// Loads an instance file and runs the portfolio on it.
    pub fn run_file<P: AsRef<Path>>(path: P, config: &PortfolioConfig) -> Result<PortfolioResult> {
        let instance = ProblemInstance::load(path)?;
        Self::run(&instance, config)
    }

    /// Runs the portfolio starting from `initial`.
    #[tracing::instrument(
        level = "debug",
        name = "portfolio",
        skip_all,
        fields(
            processors = initial.processor_count(),
            tasks = initial.task_count(),
            workers = config.workers,
            schedule = %config.sa.schedule,
        )
    )]
    pub fn run_from(initial: Schedule, config: &PortfolioConfig) -> Result<PortfolioResult> {
        config.validate()?;
        initial.validate()?;

        let seed = config.seed.unwrap_or_else(rand::random);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.workers)
            .thread_name(|i| format!("sa-worker-{i}"))
            .build()?;

        let mut best_cost = initial.evaluate();
        let mut best = initial;
        let mut cost_history = vec![best_cost];
        let mut rounds = 0usize;
        let mut improving_rounds = 0usize;
        let mut stale_rounds = 0usize;

        while stale_rounds < config.max_rounds_without_improvement {
            let results = run_round(&pool, &best, config, seed, rounds)?;

            let mut improved = false;
            for (worker, candidate) in results.into_iter().enumerate() {
                let cost = candidate.evaluate();
                debug!(round = rounds, worker, cost, "worker result");
                if cost < best_cost {
                    best = candidate;
                    best_cost = cost;
                    improved = true;
                }
            }

            if improved {
                improving_rounds += 1;
                stale_rounds = 0;
                info!(round = rounds, best_cost, "global best improved");
            } else {
                stale_rounds += 1;
            }
            rounds += 1;
            cost_history.push(best_cost);
        }

        info!(rounds, improving_rounds, best_cost, "portfolio finished");

        Ok(PortfolioResult {
            best,
            best_cost,
            rounds,
            improving_rounds,
            cost_history,
            seed,
        })
    }
}

/// Fans `best` out to every worker and collects one result per worker.
///
/// Every seed message is buffered on its channel before the workers start,
/// and results are read only after the whole round has finished, so no pool
/// thread ever blocks waiting on another.
fn run_round(
    pool: &ThreadPool,
    best: &Schedule,
    config: &PortfolioConfig,
    run_seed: u64,
    round: usize,
) -> Result<Vec<Schedule>> {
    let payload = exchange::to_bytes(best)?;

    let mut orchestrator_ends = Vec::with_capacity(config.workers);
    let mut worker_ends = Vec::with_capacity(config.workers);
    for _ in 0..config.workers {
        let (orchestrator, worker) = duplex();
        orchestrator.send(payload.clone())?;
        orchestrator_ends.push(orchestrator);
        worker_ends.push(worker);
    }

    let mut failures: Vec<Option<Error>> = (0..config.workers).map(|_| None).collect();
    let sa = &config.sa;
    pool.scope(|scope| {
        for ((index, endpoint), failure) in worker_ends.into_iter().enumerate().zip(&mut failures) {
            let seed = derive_seed(run_seed, round, index);
            scope.spawn(move |_| {
                if let Err(e) = run_worker(&endpoint, sa, seed) {
                    *failure = Some(e);
                }
            });
        }
    });

    for (worker, failure) in failures.into_iter().enumerate() {
        if let Some(source) = failure {
            warn!(round, worker, error = %source, "worker failed");
            return Err(Error::Worker {
                round,
                worker,
                source: Box::new(source),
            });
        }
    }

    orchestrator_ends
        .iter()
        .enumerate()
        .map(|(worker, endpoint)| {
            endpoint.recv_schedule().map_err(|source| Error::Worker {
                round,
                worker,
                source: Box::new(source),
            })
        })
        .collect()
}

/// Worker body: receive the seed schedule, anneal it, send back the best.
fn run_worker(endpoint: &Endpoint, sa: &SaConfig, seed: u64) -> Result<()> {
    let start = endpoint.recv_schedule()?;
    let mut rng = create_rng(seed);
    let result = SaRunner::run_with_rng(&start, &RelocateTask, sa, &mut rng);
    debug!(
        seed,
        iterations = result.iterations,
        temperature_steps = result.temperature_steps,
        best_cost = result.best_cost,
        "search finished"
    );
    endpoint.send_schedule(&result.best)
}
