//! Scheduling of independent tasks on identical processors.
//!
//! The objective is the total completion time: each processor runs its
//! tasks back to back, and every task contributes the time at which it
//! finishes. Minimizing it favors balanced processors with short tasks first.
//!
//! - [`Schedule`]: the solution representation, implementing
//!   [`Solution`](crate::sa::Solution).
//! - [`RelocateTask`]: the neighborhood move, implementing
//!   [`Mutation`](crate::sa::Mutation).
//! - [`exchange`]: binary format for shipping schedules to workers.
//! - [`ProblemInstance`]: task durations plus processor count, with the
//!   text file format.

pub mod exchange;
mod instance;
mod mutation;
mod solution;

pub use instance::ProblemInstance;
pub use mutation::RelocateTask;
pub use solution::Schedule;
