//! SA configuration.

use super::cooling::TemperatureSchedule;
use crate::error::Error;

/// Configuration for the Simulated Annealing engine.
///
/// The search runs batches of `iterations_per_temperature` steps at a fixed
/// temperature, then cools according to `schedule`. It stops once
/// `max_iter_without_improvement` consecutive steps fail to improve the best
/// solution.
///
/// # Examples
///
/// ```
/// use u_sched_anneal::sa::{SaConfig, TemperatureSchedule};
///
/// let config = SaConfig::default()
///     .with_initial_temperature(500.0)
///     .with_schedule(TemperatureSchedule::Boltzmann)
///     .with_max_iter_without_improvement(200)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SaConfig {
    /// Initial temperature `T0`. Higher values allow more exploration.
    ///
    /// Zero or negative values are accepted and turn the search into pure
    /// descent (only non-worsening moves are taken).
    pub initial_temperature: f64,

    /// Temperature schedule.
    pub schedule: TemperatureSchedule,

    /// Number of steps at each temperature level.
    pub iterations_per_temperature: usize,

    /// Consecutive non-improving steps after which the search stops.
    pub max_iter_without_improvement: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 1000.0,
            schedule: TemperatureSchedule::default(),
            iterations_per_temperature: 50,
            max_iter_without_improvement: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_schedule(mut self, schedule: TemperatureSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_max_iter_without_improvement(mut self, n: usize) -> Self {
        self.max_iter_without_improvement = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.initial_temperature.is_nan() {
            return Err(Error::InvalidConfig(
                "initial_temperature must not be NaN".into(),
            ));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::InvalidConfig(
                "iterations_per_temperature must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SaConfig::default();
        assert!((config.initial_temperature - 1000.0).abs() < 1e-10);
        assert_eq!(config.iterations_per_temperature, 50);
        assert_eq!(config.max_iter_without_improvement, 100);
        assert_eq!(config.schedule, TemperatureSchedule::Cauchy);
        assert!(config.seed.is_none());
    }

    #[test]
    fn test_validate_ok() {
        assert!(SaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_degenerate_temperatures_ok() {
        assert!(SaConfig::default().with_initial_temperature(0.0).validate().is_ok());
        assert!(SaConfig::default().with_initial_temperature(-5.0).validate().is_ok());
    }

    #[test]
    fn test_validate_nan_temperature() {
        let config = SaConfig::default().with_initial_temperature(f64::NAN);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_batch() {
        let config = SaConfig::default().with_iterations_per_temperature(0);
        assert!(config.validate().is_err());
    }
}
