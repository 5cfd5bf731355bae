//! Simulated Annealing (SA).
//!
//! A single-solution trajectory metaheuristic inspired by the physical
//! annealing process. Accepts worsening moves with a probability that
//! decreases over time (temperature), allowing the search to escape
//! local optima.
//!
//! The engine is generic: a problem supplies a [`Solution`] (evaluation and
//! cloning) and a [`Mutation`] (in-place perturbation), and picks one of the
//! [`TemperatureSchedule`] variants.
//!
//! # References
//!
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"
//! - Cerny (1985), "Thermodynamical Approach to the Travelling Salesman Problem"
//! - Szu & Hartley (1987), "Fast Simulated Annealing"

mod config;
mod cooling;
mod runner;
mod types;

pub use config::SaConfig;
pub use cooling::TemperatureSchedule;
pub use runner::{SaResult, SaRunner};
pub use types::{Mutation, Solution};
