//! # Completion Calculator
//!
//! Pure functions deriving completion ratios from the hierarchy model.
//! Inputs are always well-formed in-memory structures; an empty task list
//! yields zero, never an error.

use crate::project::{Floor, Project};

/// Percentage of a floor's tasks that are complete, rounded to the nearest
/// integer. 0 when the floor has no tasks.
pub fn floor_completion_percent(floor: &Floor) -> u8 {
    if floor.tasks.is_empty() {
        return 0;
    }
    let completed = floor.tasks.iter().filter(|t| t.completed).count();
    percent(completed, floor.tasks.len())
}

/// True iff the floor has at least one task and every task is complete.
///
/// This is the live predicate used by aggregate statistics; it is distinct
/// from the floor's cached `completed` latch, which never resets.
pub fn is_floor_fully_completed(floor: &Floor) -> bool {
    !floor.tasks.is_empty() && floor.tasks.iter().all(|t| t.completed)
}

/// Whole-project completion percentage.
///
/// Task counts are flattened across all floors (total completed tasks over
/// total tasks), not averaged per floor. 0 when the project has no tasks.
pub fn project_completion_percent(project: &Project) -> u8 {
    let (completed, total) = project_task_counts(project);
    if total == 0 {
        return 0;
    }
    percent(completed, total)
}

/// (completed, total) task counts across every floor of a project.
pub fn project_task_counts(project: &Project) -> (usize, usize) {
    let mut completed = 0;
    let mut total = 0;
    for floor in &project.floors {
        total += floor.tasks.len();
        completed += floor.tasks.iter().filter(|t| t.completed).count();
    }
    (completed, total)
}

/// A project counts as completed iff it has at least one floor and every
/// floor satisfies [`is_floor_fully_completed`].
pub fn is_project_completed(project: &Project) -> bool {
    !project.floors.is_empty() && project.floors.iter().all(is_floor_fully_completed)
}

fn percent(part: usize, whole: usize) -> u8 {
    ((part as f64 / whole as f64) * 100.0).round() as u8
}
