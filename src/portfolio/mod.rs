//! Parallel portfolio of simulated annealing searches.
//!
//! A portfolio run is a sequence of synchronous rounds. Each round fans the
//! current best schedule out to `workers` independent SA searches, waits for
//! all of them, and keeps the cheapest result. Workers run on a dedicated
//! thread pool, own their state and random generator, and talk to the
//! orchestrator only through a byte channel carrying the
//! [`exchange`](crate::scheduling::exchange) format.

mod channel;
mod config;
mod runner;

pub use channel::{duplex, Endpoint};
pub use config::PortfolioConfig;
pub use runner::{PortfolioResult, PortfolioRunner};
