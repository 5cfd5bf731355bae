//! Problem instances and their text file format.
//!
//! An instance file has exactly two lines:
//!
//! ```text
//! 3,5
//! 12,7,40,3,9
//! ```
//!
//! The first holds `processor_count,task_count`; the second holds one
//! positive duration per task, in task-id order.

use std::fmt;
use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use rand::Rng;

use super::solution::Schedule;
use crate::error::{InstanceError, ScheduleError};

/// A set of tasks to distribute over identical processors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemInstance {
    /// Number of identical processors. At least 1.
    pub processor_count: usize,
    /// Duration of every task, indexed by task id. All positive.
    pub durations: Vec<u32>,
}

impl ProblemInstance {
    /// Creates an instance, checking processor count and durations.
    pub fn new(processor_count: usize, durations: Vec<u32>) -> Result<Self, InstanceError> {
        if processor_count == 0 {
            return Err(InstanceError::NoProcessors);
        }
        if let Some(task) = durations.iter().position(|&d| d == 0) {
            return Err(InstanceError::NonPositiveDuration { task, duration: 0 });
        }
        Ok(Self {
            processor_count,
            durations,
        })
    }

    /// Draws task durations uniformly from `duration_range`.
    ///
    /// # Panics
    /// Panics if `processor_count` is 0 or the range is empty or contains 0.
    pub fn generate<R: Rng>(
        processor_count: usize,
        task_count: usize,
        duration_range: RangeInclusive<u32>,
        rng: &mut R,
    ) -> Self {
        assert!(processor_count > 0, "processor_count must be at least 1");
        assert!(
            *duration_range.start() > 0 && duration_range.start() <= duration_range.end(),
            "duration range must be non-empty and positive"
        );
        let durations = (0..task_count)
            .map(|_| rng.random_range(duration_range.clone()))
            .collect();
        Self {
            processor_count,
            durations,
        }
    }

    /// Parses the two-line text format.
    pub fn parse(text: &str) -> Result<Self, InstanceError> {
        let mut lines = text.lines();
        let header = lines.next().ok_or(InstanceError::MissingLine("header"))?;
        let mut fields = header.split(',');
        let processor_count = parse_field(fields.next(), "processor count")?;
        let task_count = parse_field(fields.next(), "task count")?;
        if let Some(extra) = fields.next() {
            return Err(InstanceError::InvalidField {
                field: "header",
                value: extra.to_string(),
            });
        }

        let durations: Vec<u32> = match lines.next() {
            Some(line) if !line.trim().is_empty() => line
                .split(',')
                .enumerate()
                .map(|(task, raw)| parse_duration(task, raw))
                .collect::<Result<_, _>>()?,
            Some(_) | None if task_count == 0 => Vec::new(),
            _ => return Err(InstanceError::MissingLine("durations")),
        };

        if durations.len() != task_count {
            return Err(InstanceError::TaskCountMismatch {
                declared: task_count,
                found: durations.len(),
            });
        }
        Self::new(processor_count, durations)
    }

    /// Reads and parses an instance file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, InstanceError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| InstanceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Writes the instance in the two-line text format.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        fs::write(path, self.to_string())
    }

    pub fn task_count(&self) -> usize {
        self.durations.len()
    }

    /// Round-robin starting schedule for this instance.
    pub fn initial_schedule(&self) -> Result<Schedule, ScheduleError> {
        Schedule::round_robin(self.processor_count, self.durations.clone())
    }
}

impl fmt::Display for ProblemInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{},{}", self.processor_count, self.durations.len())?;
        for (i, d) in self.durations.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{d}")?;
        }
        writeln!(f)
    }
}

fn parse_field(raw: Option<&str>, field: &'static str) -> Result<usize, InstanceError> {
    let raw = raw.ok_or(InstanceError::MissingLine("header"))?;
    raw.trim().parse().map_err(|_| InstanceError::InvalidField {
        field,
        value: raw.to_string(),
    })
}

fn parse_duration(task: usize, raw: &str) -> Result<u32, InstanceError> {
    let value: i64 = raw.trim().parse().map_err(|_| InstanceError::InvalidField {
        field: "duration",
        value: raw.to_string(),
    })?;
    if value <= 0 {
        return Err(InstanceError::NonPositiveDuration {
            task,
            duration: value,
        });
    }
    u32::try_from(value).map_err(|_| InstanceError::InvalidField {
        field: "duration",
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::sa::Solution;

    #[test]
    fn test_parse() {
        let inst = ProblemInstance::parse("2,3\n3,1,2\n").unwrap();
        assert_eq!(inst.processor_count, 2);
        assert_eq!(inst.durations, vec![3, 1, 2]);
        assert_eq!(inst.initial_schedule().unwrap().evaluate(), 9.0);
    }

    #[test]
    fn test_parse_tolerates_whitespace_and_crlf() {
        let inst = ProblemInstance::parse("2, 3\r\n 3 ,1,2\r\n").unwrap();
        assert_eq!(inst.durations, vec![3, 1, 2]);
    }

    #[test]
    fn test_parse_zero_tasks() {
        let inst = ProblemInstance::parse("4,0\n").unwrap();
        assert_eq!(inst.task_count(), 0);
        let inst = ProblemInstance::parse("4,0\n\n").unwrap();
        assert_eq!(inst.task_count(), 0);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            ProblemInstance::parse(""),
            Err(InstanceError::MissingLine("header"))
        ));
        assert!(matches!(
            ProblemInstance::parse("2\n1,2\n"),
            Err(InstanceError::MissingLine("header"))
        ));
        assert!(matches!(
            ProblemInstance::parse("x,2\n1,2\n"),
            Err(InstanceError::InvalidField { field: "processor count", .. })
        ));
        assert!(matches!(
            ProblemInstance::parse("2,2\n"),
            Err(InstanceError::MissingLine("durations"))
        ));
        assert!(matches!(
            ProblemInstance::parse("2,2\n1,abc\n"),
            Err(InstanceError::InvalidField { field: "duration", .. })
        ));
        assert!(matches!(
            ProblemInstance::parse("2,2\n1,-3\n"),
            Err(InstanceError::NonPositiveDuration { task: 1, duration: -3 })
        ));
        assert!(matches!(
            ProblemInstance::parse("2,3\n1,2\n"),
            Err(InstanceError::TaskCountMismatch { declared: 3, found: 2 })
        ));
        assert!(matches!(
            ProblemInstance::parse("0,1\n1\n"),
            Err(InstanceError::NoProcessors)
        ));
        assert!(matches!(
            ProblemInstance::parse("2,2\n1,2,\n"),
            Err(InstanceError::InvalidField { field: "duration", .. })
        ));
    }

    #[test]
    fn test_display_matches_file_format() {
        let inst = ProblemInstance::new(3, vec![12, 7, 40]).unwrap();
        assert_eq!(inst.to_string(), "3,3\n12,7,40\n");
        assert_eq!(ProblemInstance::parse(&inst.to_string()).unwrap(), inst);
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join(format!(
            "u-sched-anneal-instance-{}.csv",
            std::process::id()
        ));
        let inst = ProblemInstance::generate(4, 25, 1..=100, &mut create_rng(8));
        inst.save(&path).unwrap();
        let loaded = ProblemInstance::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded, inst);
    }

    #[test]
    fn test_load_missing_file() {
        let err = ProblemInstance::load("/nonexistent/u-sched-anneal/tasks.csv").unwrap_err();
        assert!(matches!(err, InstanceError::Io { .. }));
    }

    #[test]
    fn test_generate_respects_range() {
        let inst = ProblemInstance::generate(2, 500, 5..=9, &mut create_rng(1));
        assert_eq!(inst.task_count(), 500);
        assert!(inst.durations.iter().all(|d| (5..=9).contains(d)));
    }

    #[test]
    fn test_new_rejects_zero_duration() {
        assert!(matches!(
            ProblemInstance::new(1, vec![1, 0]),
            Err(InstanceError::NonPositiveDuration { task: 1, duration: 0 })
        ));
    }
}
