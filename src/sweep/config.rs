//! Sweep configuration.

use std::ops::RangeInclusive;
use std::path::PathBuf;

use crate::error::Error;
use crate::sa::TemperatureSchedule;

/// Inclusive integer range walked with a fixed step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRange {
    pub start: usize,
    pub end: usize,
    pub step: usize,
}

impl StepRange {
    pub fn new(start: usize, end: usize, step: usize) -> Self {
        Self { start, end, step }
    }

    /// A range holding only `value`.
    pub fn single(value: usize) -> Self {
        Self::new(value, value, 1)
    }

    /// Values `start, start + step, ...` up to and including `end`.
    ///
    /// # Panics
    /// Panics if `step` is 0.
    pub fn values(&self) -> impl Iterator<Item = usize> {
        (self.start..=self.end).step_by(self.step)
    }

    fn validate(&self, name: &str) -> Result<(), Error> {
        if self.step == 0 {
            return Err(Error::InvalidConfig(format!("{name} step must be at least 1")));
        }
        if self.start > self.end {
            return Err(Error::InvalidConfig(format!(
                "{name} range is empty: {} > {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

/// Configuration of a benchmark sweep.
///
/// Every combination of processor count, task count, worker count and
/// temperature schedule is run `runs` times on a freshly generated instance.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SweepConfig {
    pub processors: StepRange,
    pub tasks: StepRange,
    pub workers: StepRange,

    /// Schedules to compare, in report order.
    pub schedules: Vec<TemperatureSchedule>,

    pub initial_temperature: f64,
    pub max_iter_without_improvement: usize,
    pub max_rounds_without_improvement: usize,

    /// Timed repetitions per combination.
    pub runs: usize,

    /// Range task durations are drawn from.
    pub duration_range: RangeInclusive<u32>,

    /// If set, every generated instance is written here and read back
    /// before it is solved.
    pub data_file: Option<PathBuf>,

    /// Seed for instance generation and portfolio runs. Random when absent.
    pub seed: Option<u64>,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            processors: StepRange::new(2, 503, 100),
            tasks: StepRange::new(2500, 22500, 2500),
            workers: StepRange::single(1),
            schedules: TemperatureSchedule::ALL.to_vec(),
            initial_temperature: 1000.0,
            max_iter_without_improvement: 100,
            max_rounds_without_improvement: 10,
            runs: 5,
            duration_range: 1..=100,
            data_file: None,
            seed: None,
        }
    }
}

impl SweepConfig {
    pub fn with_processors(mut self, range: StepRange) -> Self {
        self.processors = range;
        self
    }

    pub fn with_tasks(mut self, range: StepRange) -> Self {
        self.tasks = range;
        self
    }

    pub fn with_workers(mut self, range: StepRange) -> Self {
        self.workers = range;
        self
    }

    pub fn with_schedules(mut self, schedules: Vec<TemperatureSchedule>) -> Self {
        self.schedules = schedules;
        self
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_max_iter_without_improvement(mut self, n: usize) -> Self {
        self.max_iter_without_improvement = n;
        self
    }

    pub fn with_max_rounds_without_improvement(mut self, n: usize) -> Self {
        self.max_rounds_without_improvement = n;
        self
    }

    pub fn with_runs(mut self, n: usize) -> Self {
        self.runs = n;
        self
    }

    pub fn with_duration_range(mut self, range: RangeInclusive<u32>) -> Self {
        self.duration_range = range;
        self
    }

    pub fn with_data_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_file = Some(path.into());
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        self.processors.validate("processors")?;
        self.tasks.validate("tasks")?;
        self.workers.validate("workers")?;
        if self.processors.start == 0 {
            return Err(Error::InvalidConfig("processor count must be at least 1".into()));
        }
        if self.workers.start == 0 {
            return Err(Error::InvalidConfig("worker count must be at least 1".into()));
        }
        if self.schedules.is_empty() {
            return Err(Error::InvalidConfig("no temperature schedules selected".into()));
        }
        if self.runs == 0 {
            return Err(Error::InvalidConfig("runs must be at least 1".into()));
        }
        if *self.duration_range.start() == 0 || self.duration_range.is_empty() {
            return Err(Error::InvalidConfig(format!(
                "duration range {:?} must be non-empty and positive",
                self.duration_range
            )));
        }
        if self.initial_temperature.is_nan() {
            return Err(Error::InvalidConfig("initial_temperature must not be NaN".into()));
        }
        Ok(())
    }
}
