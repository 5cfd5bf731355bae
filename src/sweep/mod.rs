//! Benchmark sweep over problem sizes, worker counts and schedules.
//!
//! For each processor count and task count a random instance is generated;
//! every worker count and temperature schedule is then timed over several
//! portfolio runs, producing one averaged [`SweepRow`]. The rows are written
//! as a CSV table with the header [`CSV_HEADER`].

mod config;
mod runner;

pub use config::{StepRange, SweepConfig};
pub use runner::{SweepRow, SweepRunner, CSV_HEADER};
