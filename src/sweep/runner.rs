//! Sweep execution and report table.

use std::io::Write;
use std::time::Instant;

use rand::Rng;
use tracing::info;

use super::config::SweepConfig;
use crate::error::Result;
use crate::portfolio::{PortfolioConfig, PortfolioRunner};
use crate::random::create_rng;
use crate::sa::{SaConfig, TemperatureSchedule};
use crate::scheduling::ProblemInstance;

/// Header of the CSV report.
pub const CSV_HEADER: &str =
    "Processors,Tasks,TemperatureSchedule,AverageTime(s),AverageCriterionK,Processes";

/// Averaged measurements for one sweep combination.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepRow {
    pub processors: usize,
    pub tasks: usize,
    pub schedule: TemperatureSchedule,
    /// Mean wall-clock time of one portfolio run, in seconds.
    pub average_time_secs: f64,
    /// Mean best cost over the runs.
    pub average_cost: f64,
    pub workers: usize,
}

impl SweepRow {
    /// Writes this row as one CSV line.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(
            out,
            "{},{},{},{},{},{}",
            self.processors,
            self.tasks,
            self.schedule,
            self.average_time_secs,
            self.average_cost,
            self.workers
        )
    }
}

/// Runs a benchmark sweep.
pub struct SweepRunner;

impl SweepRunner {
    /// Runs every combination and returns one row per combination, in
    /// processors → tasks → workers → schedule order.
    pub fn run(config: &SweepConfig) -> Result<Vec<SweepRow>> {
        let mut rows = Vec::new();
        Self::run_with(config, |row| {
            rows.push(row.clone());
            Ok(())
        })?;
        Ok(rows)
    }

    /// Runs the sweep and streams the CSV report (header included) to `out`.
    pub fn run_csv<W: Write>(config: &SweepConfig, out: &mut W) -> Result<Vec<SweepRow>> {
        writeln!(out, "{CSV_HEADER}")?;
        let mut rows = Vec::new();
        Self::run_with(config, |row| {
            row.write_csv(out)?;
            out.flush()?;
            rows.push(row.clone());
            Ok(())
        })?;
        Ok(rows)
    }

    /// Runs the sweep, handing each row to `on_row` as soon as it is ready.
    #[tracing::instrument(level = "debug", name = "sweep", skip_all)]
    pub fn run_with<F>(config: &SweepConfig, mut on_row: F) -> Result<()>
    where
        F: FnMut(&SweepRow) -> Result<()>,
    {
        config.validate()?;
        let mut rng = create_rng(config.seed.unwrap_or_else(rand::random));

        for processors in config.processors.values() {
            for tasks in config.tasks.values() {
                let instance = prepare_instance(config, processors, tasks, &mut rng)?;

                for workers in config.workers.values() {
                    for &schedule in &config.schedules {
                        let portfolio = PortfolioConfig::default()
                            .with_workers(workers)
                            .with_sa(
                                SaConfig::default()
                                    .with_initial_temperature(config.initial_temperature)
                                    .with_schedule(schedule)
                                    .with_max_iter_without_improvement(
                                        config.max_iter_without_improvement,
                                    ),
                            )
                            .with_max_rounds_without_improvement(
                                config.max_rounds_without_improvement,
                            );

                        let mut total_time = 0.0;
                        let mut total_cost = 0.0;
                        for _ in 0..config.runs {
                            let portfolio = portfolio.clone().with_seed(rng.random());
                            let start = Instant::now();
                            let result = PortfolioRunner::run(&instance, &portfolio)?;
                            total_time += start.elapsed().as_secs_f64();
                            total_cost += result.best_cost;
                        }

                        let runs = config.runs as f64;
                        let row = SweepRow {
                            processors,
                            tasks,
                            schedule,
                            average_time_secs: total_time / runs,
                            average_cost: total_cost / runs,
                            workers,
                        };
                        info!(
                            processors,
                            tasks,
                            %schedule,
                            workers,
                            average_time_secs = row.average_time_secs,
                            average_cost = row.average_cost,
                            "combination finished"
                        );
                        on_row(&row)?;
                    }
                }
            }
        }
        Ok(())
    }
}

/// Generates the instance for one (processors, tasks) pair, passing it
/// through the data file when one is configured.
fn prepare_instance<R: Rng>(
    config: &SweepConfig,
    processors: usize,
    tasks: usize,
    rng: &mut R,
) -> Result<ProblemInstance> {
    let instance =
        ProblemInstance::generate(processors, tasks, config.duration_range.clone(), rng);
    match &config.data_file {
        Some(path) => {
            instance.save(path)?;
            Ok(ProblemInstance::load(path)?)
        }
        None => Ok(instance),
    }
}
