//! Parallel-portfolio simulated annealing for scheduling independent tasks
//! on identical processors.
//!
//! Minimizes the total completion time of a set of tasks with fixed
//! durations spread over a fixed number of processors:
//!
//! - **Simulated Annealing (SA)**: generic single-solution engine with
//!   Boltzmann, Cauchy and logarithmic temperature schedules.
//! - **Scheduling**: the schedule representation, its cost, the
//!   task-relocation move, the binary exchange format, and problem
//!   instance files.
//! - **Portfolio**: rounds of independent SA workers on a thread pool,
//!   each seeded with the best schedule so far.
//! - **Sweep**: benchmark harness timing the portfolio over problem sizes,
//!   worker counts and schedules.
//!
//! # Example
//!
//! ```
//! use u_sched_anneal::portfolio::{PortfolioConfig, PortfolioRunner};
//! use u_sched_anneal::scheduling::ProblemInstance;
//!
//! let instance = ProblemInstance::parse("2,3\n3,1,2\n").unwrap();
//! let config = PortfolioConfig::default().with_workers(2).with_seed(1);
//! let result = PortfolioRunner::run(&instance, &config).unwrap();
//! assert!(result.best_cost <= 9.0);
//! ```

pub mod error;
pub mod portfolio;
pub mod random;
pub mod sa;
pub mod scheduling;
pub mod sweep;

pub use error::{Error, Result};
