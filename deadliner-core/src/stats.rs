//! Aggregate progress numbers over deadlines and tasks.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::deadline::Deadline;
use crate::task::Task;
use crate::time::days_between;

/// Deadlines due within this many days (inclusive) count as upcoming.
pub const UPCOMING_DEADLINE_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    pub total_tasks: usize,
    pub completed_tasks: usize,
    /// Percent in `[0, 100]`; 0 when there are no tasks.
    pub completion_rate: f64,
    pub upcoming_deadlines: usize,
}

pub fn compute_stats(deadlines: &[Deadline], tasks: &[Task], today: NaiveDate) -> Stats {
    let total_tasks = tasks.len();
    let completed_tasks = tasks.iter().filter(|t| t.completed).count();
    let completion_rate = if total_tasks == 0 {
        0.0
    } else {
        completed_tasks as f64 / total_tasks as f64 * 100.0
    };

    let upcoming_deadlines = deadlines
        .iter()
        .filter(|d| {
            let left = days_between(today, d.due_date);
            (0..=UPCOMING_DEADLINE_WINDOW_DAYS).contains(&left)
        })
        .count();

    Stats {
        total_tasks,
        completed_tasks,
        completion_rate,
        upcoming_deadlines,
    }
}
