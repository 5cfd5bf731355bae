//! Temperature schedules.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Temperature as a function of the outer iteration count.
///
/// Every variant is a pure function of the initial temperature `T0` and the
/// number of completed temperature levels `k`.
///
/// # References
///
/// - Boltzmann: Geman & Geman (1984), logarithmic cooling with convergence proof
/// - Cauchy: Szu & Hartley (1987), "fast" simulated annealing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TemperatureSchedule {
    /// `T(k) = T0 / ln(1 + k)`.
    ///
    /// Slowest cooling. Divergent at `k = 0`, where `T0` is returned instead.
    Boltzmann,

    /// `T(k) = T0 / (1 + k)`.
    #[default]
    Cauchy,

    /// `T(k) = T0 * ln(1 + k) / (1 + k)`.
    ///
    /// Peaks near `T0 / e` around `k = 2`, then decays; zero at `k = 0`.
    Logarithmic,
}

impl TemperatureSchedule {
    /// All variants, in reporting order.
    pub const ALL: [TemperatureSchedule; 3] = [
        TemperatureSchedule::Boltzmann,
        TemperatureSchedule::Cauchy,
        TemperatureSchedule::Logarithmic,
    ];

    /// Temperature after `k` completed temperature levels.
    pub fn temperature(&self, t0: f64, k: usize) -> f64 {
        let k = k as f64;
        match self {
            TemperatureSchedule::Boltzmann => {
                if k == 0.0 {
                    t0
                } else {
                    t0 / k.ln_1p()
                }
            }
            TemperatureSchedule::Cauchy => t0 / (1.0 + k),
            TemperatureSchedule::Logarithmic => t0 * k.ln_1p() / (1.0 + k),
        }
    }

    /// Name used in reports and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            TemperatureSchedule::Boltzmann => "Boltzmann",
            TemperatureSchedule::Cauchy => "Cauchy",
            TemperatureSchedule::Logarithmic => "Logarithmic",
        }
    }
}

impl fmt::Display for TemperatureSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureSchedule {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemperatureSchedule::ALL
            .into_iter()
            .find(|schedule| schedule.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                Error::InvalidConfig(format!(
                    "unknown temperature schedule {s:?} (expected Boltzmann, Cauchy or Logarithmic)"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boltzmann() {
        let t = TemperatureSchedule::Boltzmann.temperature(1000.0, 1);
        assert!((t - 1000.0 / 2f64.ln()).abs() < 1e-9);
        assert_eq!(TemperatureSchedule::Boltzmann.temperature(1000.0, 0), 1000.0);
    }

    #[test]
    fn test_cauchy() {
        assert_eq!(TemperatureSchedule::Cauchy.temperature(100.0, 0), 100.0);
        assert_eq!(TemperatureSchedule::Cauchy.temperature(100.0, 4), 20.0);
    }

    #[test]
    fn test_logarithmic() {
        assert_eq!(TemperatureSchedule::Logarithmic.temperature(100.0, 0), 0.0);
        let t = TemperatureSchedule::Logarithmic.temperature(100.0, 9);
        assert!((t - 100.0 * 10f64.ln() / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_cooling_decreases_eventually() {
        for schedule in TemperatureSchedule::ALL {
            let early = schedule.temperature(1000.0, 10);
            let late = schedule.temperature(1000.0, 10_000);
            assert!(late < early, "{schedule} did not cool: {early} -> {late}");
            assert!(late > 0.0);
        }
    }

    #[test]
    fn test_parse_roundtrip_names() {
        for schedule in TemperatureSchedule::ALL {
            assert_eq!(schedule.name().parse::<TemperatureSchedule>().unwrap(), schedule);
        }
        assert_eq!(
            " cauchy ".parse::<TemperatureSchedule>().unwrap(),
            TemperatureSchedule::Cauchy
        );
        assert!("geometric".parse::<TemperatureSchedule>().is_err());
    }
}
