//! SA execution loop.

use super::config::SaConfig;
use super::types::{Mutation, Solution};
use crate::random::create_rng;
use rand::Rng;

/// Result of a Simulated Annealing run.
#[derive(Debug, Clone)]
pub struct SaResult<S: Clone> {
    /// The best solution found.
    pub best: S,

    /// Cost of the best solution.
    pub best_cost: f64,

    /// Total number of steps (neighbor evaluations).
    pub iterations: usize,

    /// Number of completed temperature levels.
    pub temperature_steps: usize,

    /// Temperature when the algorithm stopped.
    pub final_temperature: f64,

    /// Number of accepted moves (including improvements).
    pub accepted_moves: usize,

    /// Number of accepted moves that strictly lowered the current cost.
    pub improving_moves: usize,

    /// Best cost at the start and after every temperature level.
    pub cost_history: Vec<f64>,
}

/// Executes the Simulated Annealing algorithm.
///
/// # Algorithm
///
/// 1. `current = best = initial`, `T = T0`
/// 2. Repeat batches of `iterations_per_temperature` steps:
///    a. Clone `current`, mutate the clone, evaluate it
///    b. Metropolis acceptance: take it if `delta <= 0` or
///    `u < exp(-delta / T)`
///    c. If `current` beats `best`, record it and reset the stagnation streak;
///    otherwise extend the streak
/// 3. After each batch, `T = schedule(T0, k)` for the batch count `k`
/// 4. Stop once the streak reaches `max_iter_without_improvement`, or
///    as soon as `best` reaches [`Solution::lower_bound`]
///
/// The returned solution is never worse than the initial one.
pub struct SaRunner;

impl SaRunner {
    /// Runs SA from `initial`, seeding the generator from [`SaConfig::seed`].
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`SaConfig::validate`]
    /// first to get a descriptive error).
    pub fn run<S, M>(initial: &S, mutation: &M, config: &SaConfig) -> SaResult<S>
    where
        S: Solution,
        M: Mutation<S>,
    {
        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };
        Self::run_with_rng(initial, mutation, config, &mut rng)
    }

    /// Runs SA from `initial` drawing randomness from `rng`.
    ///
    /// [`SaConfig::seed`] is ignored.
    ///
    /// # Panics
    /// Panics if the configuration is invalid.
    pub fn run_with_rng<S, M, R>(
        initial: &S,
        mutation: &M,
        config: &SaConfig,
        rng: &mut R,
    ) -> SaResult<S>
    where
        S: Solution,
        M: Mutation<S>,
        R: Rng,
    {
        config.validate().expect("invalid SaConfig");

        let t0 = config.initial_temperature;
        let ceiling = config.max_iter_without_improvement;
        let floor = initial.lower_bound();
        let at_floor = |cost: f64| floor.is_some_and(|bound| cost <= bound);

        let mut current = initial.clone();
        let mut current_cost = current.evaluate();
        let mut best = initial.clone();
        let mut best_cost = current_cost;

        let mut temperature = t0;
        let mut temperature_steps = 0usize;
        let mut total_iterations = 0usize;
        let mut accepted_moves = 0usize;
        let mut improving_moves = 0usize;
        let mut streak = 0usize;

        let mut cost_history = vec![best_cost];

        while streak < ceiling && !at_floor(best_cost) {
            for _ in 0..config.iterations_per_temperature {
                let mut candidate = current.clone();
                mutation.apply(&mut candidate, rng);
                let candidate_cost = candidate.evaluate();
                let delta = candidate_cost - current_cost;

                // Metropolis acceptance criterion
                let accept = if delta <= 0.0 {
                    true
                } else if temperature > 0.0 {
                    let probability = (-delta / temperature).exp();
                    rng.random_range(0.0..1.0) < probability
                } else {
                    false
                };

                if accept {
                    if delta < 0.0 {
                        improving_moves += 1;
                    }
                    current = candidate;
                    current_cost = candidate_cost;
                    accepted_moves += 1;
                }

                if current_cost < best_cost {
                    best = current.clone();
                    best_cost = current_cost;
                    streak = 0;
                } else {
                    streak += 1;
                }

                total_iterations += 1;

                if streak >= ceiling || at_floor(best_cost) {
                    break;
                }
            }

            temperature_steps += 1;
            temperature = config.schedule.temperature(t0, temperature_steps);
            cost_history.push(best_cost);
        }

        SaResult {
            best,
            best_cost,
            iterations: total_iterations,
            temperature_steps,
            final_temperature: temperature,
            accepted_moves,
            improving_moves,
            cost_history,
        }
    }
}
