//! Neighborhood move for [`Schedule`].

use rand::Rng;

use super::solution::Schedule;
use crate::sa::Mutation;

/// Moves one random task to the back of a random processor.
///
/// The source processor is drawn uniformly; if it is empty the call does
/// nothing. Otherwise a task is drawn uniformly from its sequence, removed,
/// and appended to a uniformly drawn destination (possibly the source itself,
/// which sends the task to the back of its own queue).
#[derive(Debug, Clone, Copy, Default)]
pub struct RelocateTask;

impl Mutation<Schedule> for RelocateTask {
    fn apply<R: Rng>(&self, schedule: &mut Schedule, rng: &mut R) {
        let processor_count = schedule.processor_count();
        let from = rng.random_range(0..processor_count);
        let len = schedule.processors()[from].len();
        if len == 0 {
            return;
        }
        let index = rng.random_range(0..len);
        let to = rng.random_range(0..processor_count);
        schedule.move_task(from, index, to);
    }
}
