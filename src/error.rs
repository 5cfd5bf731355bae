//! Error types.
//!
//! Errors fall into four groups:
//!
//! - [`InstanceError`]: a problem-instance file is missing or malformed.
//! - [`ScheduleError`]: a schedule violates its partition invariant.
//! - [`ExchangeError`] / [`TransportError`]: a schedule could not be shipped
//!   to or from a worker.
//! - [`Error`]: the crate-level error returned by portfolio and sweep runs.
//!
//! Nothing is retried. A heuristic search has no partial result worth
//! salvaging, so every failure propagates to the top-level caller.

use std::io;
use std::path::PathBuf;

/// Crate-level result alias.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Failure to load or parse a problem instance.
#[derive(Debug, thiserror::Error)]
pub enum InstanceError {
    #[error("failed to read instance file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("instance is missing the {0} line")]
    MissingLine(&'static str),

    #[error("invalid {field} value {value:?}")]
    InvalidField { field: &'static str, value: String },

    #[error("processor count must be at least 1")]
    NoProcessors,

    #[error("task {task} has non-positive duration {duration}")]
    NonPositiveDuration { task: usize, duration: i64 },

    #[error("header declares {declared} tasks but {found} durations were given")]
    TaskCountMismatch { declared: usize, found: usize },
}

/// A schedule does not form a valid partition of its tasks.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScheduleError {
    #[error("a schedule needs at least one processor")]
    NoProcessors,

    #[error("expected {expected} processor sequences, got {found}")]
    ProcessorCountMismatch { expected: usize, found: usize },

    #[error("task id {task} is out of range for {task_count} tasks")]
    UnknownTask { task: usize, task_count: usize },

    #[error("task {0} is assigned more than once")]
    DuplicateTask(usize),

    #[error("task {0} is not assigned to any processor")]
    MissingTask(usize),
}

/// Failure in the binary schedule exchange format.
#[derive(Debug, thiserror::Error)]
pub enum ExchangeError {
    /// Short read/write or other I/O failure on the underlying stream.
    #[error("schedule transfer failed: {0}")]
    Io(#[from] io::Error),

    #[error("negative {field} on the wire: {value}")]
    NegativeValue { field: &'static str, value: i32 },

    #[error("task {task} has a zero duration on the wire")]
    ZeroDuration { task: usize },

    #[error("{field} value {value} does not fit in a 32-bit wire integer")]
    ValueOutOfRange { field: &'static str, value: u64 },

    #[error("{0} trailing bytes after encoded schedule")]
    TrailingBytes(usize),

    #[error("decoded schedule is invalid: {0}")]
    InvalidSchedule(#[from] ScheduleError),
}

/// Failure of a worker channel.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("channel peer disconnected before sending")]
    Disconnected,

    #[error("channel peer disconnected before receiving")]
    SendFailed,
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Instance(#[from] InstanceError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),

    #[error(transparent)]
    Exchange(#[from] ExchangeError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("failed to launch worker pool: {0}")]
    WorkerLaunch(#[from] rayon::ThreadPoolBuildError),

    #[error("worker {worker} failed in round {round}: {source}")]
    Worker {
        round: usize,
        worker: usize,
        #[source]
        source: Box<Error>,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}
