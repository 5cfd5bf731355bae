//! u-sched-anneal - command line front end
//!
//! `generate` writes a random instance file, `solve` runs one portfolio on
//! an instance file, `sweep` benchmarks the portfolio and writes a CSV table.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use u_sched_anneal::portfolio::{PortfolioConfig, PortfolioRunner};
use u_sched_anneal::random::create_rng;
use u_sched_anneal::sa::{SaConfig, TemperatureSchedule};
use u_sched_anneal::scheduling::ProblemInstance;
use u_sched_anneal::sweep::{StepRange, SweepConfig, SweepRunner};
use u_sched_anneal::{Error, Result};

#[derive(Debug, Parser)]
#[command(name = "u-sched-anneal", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Write a random problem instance file.
    Generate {
        #[arg(long)]
        processors: usize,
        #[arg(long)]
        tasks: usize,
        #[arg(long, default_value_t = 1)]
        min_duration: u32,
        #[arg(long, default_value_t = 100)]
        max_duration: u32,
        #[arg(long, short, default_value = "tasks.csv")]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run the portfolio on an instance file and report the best schedule.
    Solve {
        /// Instance file (`processors,tasks` then the durations).
        file: PathBuf,
        #[arg(long, default_value_t = 1)]
        workers: usize,
        #[arg(long, default_value_t = TemperatureSchedule::Cauchy)]
        schedule: TemperatureSchedule,
        #[command(flatten)]
        search: SearchArgs,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the schedule as a text Gantt chart.
        #[arg(long)]
        print: bool,
    },

    /// Benchmark every size, worker count and schedule combination.
    Sweep {
        #[arg(long, default_value_t = 2)]
        min_processors: usize,
        #[arg(long, default_value_t = 503)]
        max_processors: usize,
        #[arg(long, default_value_t = 100)]
        processor_step: usize,
        #[arg(long, default_value_t = 2500)]
        min_tasks: usize,
        #[arg(long, default_value_t = 22500)]
        max_tasks: usize,
        #[arg(long, default_value_t = 2500)]
        task_step: usize,
        #[arg(long, default_value_t = 1)]
        min_workers: usize,
        #[arg(long, default_value_t = 1)]
        max_workers: usize,
        #[arg(long, default_value_t = 1)]
        worker_step: usize,
        #[command(flatten)]
        search: SearchArgs,
        /// Timed runs per combination.
        #[arg(long, default_value_t = 5)]
        runs: usize,
        /// Instance file each generated instance is passed through.
        #[arg(long)]
        data_file: Option<PathBuf>,
        #[arg(long, short, default_value = "parallel_results.csv")]
        output: PathBuf,
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, Args)]
struct SearchArgs {
    #[arg(long, default_value_t = 1000.0)]
    initial_temperature: f64,
    /// Non-improving SA steps before a worker stops.
    #[arg(long, default_value_t = 100)]
    max_iter_without_improvement: usize,
    /// Non-improving rounds before the portfolio stops.
    #[arg(long, default_value_t = 10)]
    max_rounds_without_improvement: usize,
}

fn main() -> ExitCode {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .try_init();

    match run(Cli::parse().command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Generate {
            processors,
            tasks,
            min_duration,
            max_duration,
            output,
            seed,
        } => {
            if processors == 0 || min_duration == 0 || min_duration > max_duration {
                return Err(Error::InvalidConfig(
                    "need at least one processor and 1 <= min-duration <= max-duration".into(),
                ));
            }
            let mut rng = create_rng(seed.unwrap_or_else(rand::random));
            let instance =
                ProblemInstance::generate(processors, tasks, min_duration..=max_duration, &mut rng);
            instance.save(&output)?;
            tracing::info!(path = %output.display(), processors, tasks, "instance written");
            Ok(())
        }

        Command::Solve {
            file,
            workers,
            schedule,
            search,
            seed,
            print,
        } => {
            let mut config = PortfolioConfig::default()
                .with_workers(workers)
                .with_sa(
                    SaConfig::default()
                        .with_initial_temperature(search.initial_temperature)
                        .with_schedule(schedule)
                        .with_max_iter_without_improvement(search.max_iter_without_improvement),
                )
                .with_max_rounds_without_improvement(search.max_rounds_without_improvement);
            config.seed = seed;

            let result = PortfolioRunner::run_file(&file, &config)?;

            let stdout = io::stdout();
            let mut out = stdout.lock();
            writeln!(out, "best cost: {}", result.best_cost)?;
            writeln!(out, "makespan: {}", result.best.makespan())?;
            writeln!(
                out,
                "rounds: {} ({} improving), seed {}",
                result.rounds, result.improving_rounds, result.seed
            )?;
            if print {
                write!(out, "{}", result.best)?;
            }
            Ok(())
        }

        Command::Sweep {
            min_processors,
            max_processors,
            processor_step,
            min_tasks,
            max_tasks,
            task_step,
            min_workers,
            max_workers,
            worker_step,
            search,
            runs,
            data_file,
            output,
            seed,
        } => {
            let mut config = SweepConfig::default()
                .with_processors(StepRange::new(min_processors, max_processors, processor_step))
                .with_tasks(StepRange::new(min_tasks, max_tasks, task_step))
                .with_workers(StepRange::new(min_workers, max_workers, worker_step))
                .with_initial_temperature(search.initial_temperature)
                .with_max_iter_without_improvement(search.max_iter_without_improvement)
                .with_max_rounds_without_improvement(search.max_rounds_without_improvement)
                .with_runs(runs);
            config.data_file = data_file;
            config.seed = seed;

            let mut out = BufWriter::new(File::create(&output)?);
            let rows = SweepRunner::run_csv(&config, &mut out)?;
            out.flush()?;
            tracing::info!(path = %output.display(), rows = rows.len(), "sweep written");
            Ok(())
        }
    }
}
