//! Task-to-processor assignment.

use std::fmt;

use crate::error::ScheduleError;
use crate::sa::Solution;

/// An assignment of tasks to identical processors.
///
/// Processor `p` runs the tasks in `processors()[p]` back to back, in order.
/// Every task id in `0..task_count()` appears exactly once across all
/// processors, and the processor count is fixed at construction.
///
/// Every schedule owns its duration table and its assignment, so a clone
/// shares no storage with the schedule it was cloned from.
///
/// # Examples
///
/// ```
/// use u_sched_anneal::scheduling::Schedule;
/// use u_sched_anneal::sa::Solution;
///
/// let schedule = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
/// assert_eq!(schedule.processors(), &[vec![0, 2], vec![1]]);
/// // P0 completes at 3 and 5, P1 at 1.
/// assert_eq!(schedule.evaluate(), 9.0);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    processors: Vec<Vec<usize>>,
    durations: Vec<u32>,
}

impl Schedule {
    /// Creates a schedule with `processor_count` empty processors.
    ///
    /// The result holds no tasks yet, so it only satisfies the partition
    /// invariant when `durations` is empty; use [`Schedule::assign`] to fill
    /// it or [`Schedule::round_robin`] to get a complete assignment.
    pub fn new(processor_count: usize, durations: Vec<u32>) -> Result<Self, ScheduleError> {
        if processor_count == 0 {
            return Err(ScheduleError::NoProcessors);
        }
        Ok(Self {
            processors: vec![Vec::new(); processor_count],
            durations,
        })
    }

    /// Creates the round-robin assignment: task `i` runs on processor
    /// `i mod processor_count`.
    pub fn round_robin(processor_count: usize, durations: Vec<u32>) -> Result<Self, ScheduleError> {
        let mut schedule = Self::new(processor_count, durations)?;
        for task in 0..schedule.task_count() {
            schedule.assign(task % processor_count, task);
        }
        Ok(schedule)
    }

    /// Creates a schedule from an explicit assignment, checking the
    /// partition invariant.
    pub fn from_assignment(
        durations: Vec<u32>,
        processors: Vec<Vec<usize>>,
    ) -> Result<Self, ScheduleError> {
        if processors.is_empty() {
            return Err(ScheduleError::NoProcessors);
        }
        let schedule = Self {
            processors,
            durations,
        };
        schedule.validate()?;
        Ok(schedule)
    }

    /// Appends `task` to the end of `processor`'s sequence.
    ///
    /// # Panics
    /// Panics if `processor` is out of range.
    pub fn assign(&mut self, processor: usize, task: usize) {
        self.processors[processor].push(task);
    }

    /// Removes the task at `index` in `from`'s sequence and appends it to `to`.
    ///
    /// Returns the moved task id, or `None` (leaving the schedule untouched)
    /// if any argument is out of range.
    pub fn move_task(&mut self, from: usize, index: usize, to: usize) -> Option<usize> {
        if to >= self.processors.len() || index >= self.processors.get(from)?.len() {
            return None;
        }
        let task = self.processors[from].remove(index);
        self.processors[to].push(task);
        Some(task)
    }

    /// Checks that every task appears exactly once.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        let task_count = self.task_count();
        let mut seen = vec![false; task_count];
        for &task in self.processors.iter().flatten() {
            match seen.get_mut(task) {
                None => return Err(ScheduleError::UnknownTask { task, task_count }),
                Some(true) => return Err(ScheduleError::DuplicateTask(task)),
                Some(slot) => *slot = true,
            }
        }
        match seen.iter().position(|&assigned| !assigned) {
            Some(task) => Err(ScheduleError::MissingTask(task)),
            None => Ok(()),
        }
    }

    pub fn processor_count(&self) -> usize {
        self.processors.len()
    }

    pub fn task_count(&self) -> usize {
        self.durations.len()
    }

    /// Task sequence of every processor.
    pub fn processors(&self) -> &[Vec<usize>] {
        &self.processors
    }

    /// Duration of every task, indexed by task id.
    pub fn durations(&self) -> &[u32] {
        &self.durations
    }

    /// Time at which each processor finishes its last task.
    pub fn completion_times(&self) -> Vec<u64> {
        self.processors
            .iter()
            .map(|tasks| tasks.iter().map(|&t| u64::from(self.durations[t])).sum())
            .collect()
    }

    /// Latest completion time over all processors.
    pub fn makespan(&self) -> u64 {
        self.completion_times().into_iter().max().unwrap_or(0)
    }
}

impl Solution for Schedule {
    /// Sum of the completion times of all tasks.
    ///
    /// Accumulated in `f64`: the total outgrows `u64` on large instances.
    fn evaluate(&self) -> f64 {
        let mut total = 0.0;
        for tasks in &self.processors {
            let mut completion = 0.0;
            for &task in tasks {
                completion += f64::from(self.durations[task]);
                total += completion;
            }
        }
        total
    }

    /// Completion times are never negative.
    fn lower_bound(&self) -> Option<f64> {
        Some(0.0)
    }
}

/// Text Gantt chart: one line per processor, each task printed as its id
/// repeated once per time unit.
impl fmt::Display for Schedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (p, tasks) in self.processors.iter().enumerate() {
            write!(f, "P{p}:")?;
            for &task in tasks {
                f.write_str(" ")?;
                let label = task.to_string();
                for _ in 0..self.durations[task] {
                    f.write_str(&label)?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_round_robin_assignment() {
        let s = Schedule::round_robin(3, vec![1, 2, 3, 4, 5]).unwrap();
        assert_eq!(s.processors(), &[vec![0, 3], vec![1, 4], vec![2]]);
        assert!(s.validate().is_ok());
    }

    #[test]
    fn test_no_processors_rejected() {
        assert_eq!(
            Schedule::round_robin(0, vec![1]).unwrap_err(),
            ScheduleError::NoProcessors
        );
    }

    #[test]
    fn test_evaluate_example() {
        let s = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        assert_eq!(s.evaluate(), 9.0);

        let better = Schedule::from_assignment(vec![3, 1, 2], vec![vec![1, 2], vec![0]]).unwrap();
        assert_eq!(better.evaluate(), 7.0);
    }

    #[test]
    fn test_evaluate_single_processor_is_prefix_sum() {
        let s = Schedule::round_robin(1, vec![2, 5, 1]).unwrap();
        // 2 + 7 + 8
        assert_eq!(s.evaluate(), 17.0);
        assert_eq!(s.makespan(), 8);
    }

    #[test]
    fn test_evaluate_empty() {
        for p in 1..5 {
            let s = Schedule::round_robin(p, vec![]).unwrap();
            assert_eq!(s.evaluate(), 0.0);
            assert_eq!(s.makespan(), 0);
        }
    }

    #[test]
    fn test_move_task() {
        let mut s = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        assert_eq!(s.move_task(0, 0, 1), Some(0));
        assert_eq!(s.processors(), &[vec![2], vec![1, 0]]);
        assert!(s.validate().is_ok());

        // same processor: moves to the back
        assert_eq!(s.move_task(1, 0, 1), Some(1));
        assert_eq!(s.processors(), &[vec![2], vec![0, 1]]);
    }

    #[test]
    fn test_move_task_out_of_range() {
        let mut s = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        let before = s.clone();
        assert_eq!(s.move_task(5, 0, 0), None);
        assert_eq!(s.move_task(1, 3, 0), None);
        assert_eq!(s.move_task(0, 0, 2), None);
        assert_eq!(s, before);
    }

    #[test]
    fn test_evaluate_beyond_u64_range() {
        let n = 100_000u32;
        let s = Schedule::round_robin(1, vec![u32::MAX; n as usize]).unwrap();
        let expected = f64::from(u32::MAX) * f64::from(n) * (f64::from(n) + 1.0) / 2.0;

        let cost = s.evaluate();
        assert!(cost > u64::MAX as f64);
        assert!((cost - expected).abs() / expected < 1e-9);
    }

    #[test]
    fn test_clone_owns_durations() {
        let original = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        let copy = original.clone();
        assert_eq!(copy.durations(), original.durations());
        assert_ne!(copy.durations().as_ptr(), original.durations().as_ptr());
    }

    #[test]
    fn test_clone_is_independent() {
        let original = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        let mut copy = original.clone();
        copy.move_task(0, 1, 1);
        assert_eq!(original.processors(), &[vec![0, 2], vec![1]]);
        assert_ne!(copy, original);
    }

    #[test]
    fn test_validate_rejects_bad_partitions() {
        let dup = Schedule::from_assignment(vec![1, 1], vec![vec![0], vec![0]]);
        assert_eq!(dup.unwrap_err(), ScheduleError::DuplicateTask(0));

        let missing = Schedule::from_assignment(vec![1, 1], vec![vec![0], vec![]]);
        assert_eq!(missing.unwrap_err(), ScheduleError::MissingTask(1));

        let unknown = Schedule::from_assignment(vec![1], vec![vec![0, 3]]);
        assert_eq!(
            unknown.unwrap_err(),
            ScheduleError::UnknownTask { task: 3, task_count: 1 }
        );

        let none = Schedule::from_assignment(vec![1], vec![]);
        assert_eq!(none.unwrap_err(), ScheduleError::NoProcessors);
    }

    #[test]
    fn test_completion_times() {
        let s = Schedule::round_robin(2, vec![3, 1, 2, 4]).unwrap();
        assert_eq!(s.completion_times(), vec![5, 5]);
    }

    #[test]
    fn test_display_gantt() {
        let s = Schedule::round_robin(2, vec![3, 1, 2]).unwrap();
        assert_eq!(s.to_string(), "P0: 000 22\nP1: 1\n");
    }

    proptest! {
        #[test]
        fn prop_round_robin_is_partition(
            processors in 1usize..8,
            durations in prop::collection::vec(1u32..100, 0..60),
        ) {
            let s = Schedule::round_robin(processors, durations).unwrap();
            prop_assert!(s.validate().is_ok());
            prop_assert_eq!(s.processor_count(), processors);
        }

        #[test]
        fn prop_cost_is_sum_of_prefix_sums(durations in prop::collection::vec(1u32..1000, 0..40)) {
            let s = Schedule::round_robin(1, durations.clone()).unwrap();
            let mut completion = 0u64;
            let mut expected = 0u64;
            for d in durations {
                completion += u64::from(d);
                expected += completion;
            }
            prop_assert_eq!(s.evaluate(), expected as f64);
        }
    }
}
