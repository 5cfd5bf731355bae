//! Portfolio configuration.

use crate::error::Error;
use crate::sa::{SaConfig, TemperatureSchedule};

/// Configuration for a parallel portfolio run.
///
/// # Examples
///
/// ```
/// use u_sched_anneal::portfolio::PortfolioConfig;
/// use u_sched_anneal::sa::TemperatureSchedule;
///
/// let config = PortfolioConfig::default()
///     .with_workers(4)
///     .with_schedule(TemperatureSchedule::Logarithmic)
///     .with_max_rounds_without_improvement(5)
///     .with_seed(42);
/// assert_eq!(config.workers, 4);
/// assert_eq!(config.sa.schedule, TemperatureSchedule::Logarithmic);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PortfolioConfig {
    /// Number of independent SA workers per round.
    pub workers: usize,

    /// Engine configuration shared by every worker. Its `seed` is ignored;
    /// workers derive their own seeds from [`PortfolioConfig::seed`].
    pub sa: SaConfig,

    /// Consecutive rounds without a global improvement after which the
    /// portfolio stops.
    pub max_rounds_without_improvement: usize,

    /// Run-level random seed. Drawn at random when absent.
    pub seed: Option<u64>,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            workers: 1,
            sa: SaConfig::default(),
            max_rounds_without_improvement: 10,
            seed: None,
        }
    }
}

impl PortfolioConfig {
    pub fn with_workers(mut self, n: usize) -> Self {
        self.workers = n;
        self
    }

    pub fn with_sa(mut self, sa: SaConfig) -> Self {
        self.sa = sa;
        self
    }

    /// Shorthand for setting the engine's temperature schedule.
    pub fn with_schedule(mut self, schedule: TemperatureSchedule) -> Self {
        self.sa.schedule = schedule;
        self
    }

    pub fn with_max_rounds_without_improvement(mut self, n: usize) -> Self {
        self.max_rounds_without_improvement = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), Error> {
        if self.workers == 0 {
            return Err(Error::InvalidConfig("workers must be at least 1".into()));
        }
        self.sa.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PortfolioConfig::default();
        assert_eq!(config.workers, 1);
        assert_eq!(config.max_rounds_without_improvement, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_workers() {
        assert!(PortfolioConfig::default().with_workers(0).validate().is_err());
    }

    #[test]
    fn test_validate_checks_engine() {
        let config =
            PortfolioConfig::default().with_sa(SaConfig::default().with_iterations_per_temperature(0));
        assert!(config.validate().is_err());
    }
}
