//! Read-only views over the task set: one day's agenda and the upcoming window.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;
use crate::time::add_days;

pub const DEFAULT_HORIZON_DAYS: u32 = 7;

/// Derived agenda for a single calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPlan {
    pub date: NaiveDate,
    /// High → medium → low; equal priorities keep input order.
    pub tasks: Vec<Task>,
    /// Minutes, exact sum of `tasks[*].duration`. Widened so a day can hold
    /// any number of maximal tasks.
    pub total_study_time: u64,
    /// True iff every task is completed (vacuously true for an empty day).
    pub completed: bool,
}

impl DayPlan {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn remaining_minutes(&self) -> u64 {
        self.tasks
            .iter()
            .filter(|t| !t.completed)
            .map(|t| u64::from(t.duration))
            .sum()
    }
}

pub fn build_day_plan(date: NaiveDate, tasks: &[Task]) -> DayPlan {
    let mut day_tasks: Vec<Task> = tasks
        .iter()
        .filter(|t| t.scheduled_date == date)
        .cloned()
        .collect();

    // `sort_by` is stable.
    day_tasks.sort_by(|a, b| b.priority.cmp(&a.priority));

    let total_study_time = day_tasks.iter().map(|t| u64::from(t.duration)).sum();
    let completed = day_tasks.iter().all(|t| t.completed);

    DayPlan {
        date,
        tasks: day_tasks,
        total_study_time,
        completed,
    }
}

/// Incomplete tasks scheduled in `[today, today + horizon_days]`, earliest first.
pub fn upcoming_tasks(tasks: &[Task], today: NaiveDate, horizon_days: u32) -> Vec<Task> {
    let end = add_days(today, i64::from(horizon_days));
    let mut out: Vec<Task> = tasks
        .iter()
        .filter(|t| !t.completed && t.scheduled_date >= today && t.scheduled_date <= end)
        .cloned()
        .collect();
    out.sort_by_key(|t| t.scheduled_date);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Priority;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 5, 10).unwrap()
    }

    fn task(id: &str, offset: i64, priority: Priority) -> Task {
        Task::new(id, "d1", id, add_days(today(), offset)).with_priority(priority)
    }

    #[test]
    fn day_plan_orders_by_priority_descending() {
        let tasks = vec![
            task("low", 0, Priority::Low),
            task("high", 0, Priority::High),
            task("medium", 0, Priority::Medium),
        ];
        let plan = build_day_plan(today(), &tasks);
        let ids: Vec<_> = plan.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["high", "medium", "low"]);
        // Input untouched.
        assert_eq!(tasks[0].id, "low");
    }

    #[test]
    fn equal_priorities_keep_input_order() {
        let tasks = vec![
            task("a", 0, Priority::Medium),
            task("b", 0, Priority::High),
            task("c", 0, Priority::Medium),
            task("d", 0, Priority::High),
        ];
        let plan = build_day_plan(today(), &tasks);
        let ids: Vec<_> = plan.tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn total_is_exact_sum_and_filters_by_date() {
        let tasks = vec![
            task("a", 0, Priority::Low).with_duration(37),
            task("b", 0, Priority::Low).with_duration(71),
            task("c", 1, Priority::Low).with_duration(500),
        ];
        let plan = build_day_plan(today(), &tasks);
        assert_eq!(plan.tasks.len(), 2);
        assert_eq!(plan.total_study_time, 108);
        assert_eq!(
            plan.total_study_time,
            plan.tasks.iter().map(|t| u64::from(t.duration)).sum::<u64>()
        );
    }

    #[test]
    fn maximal_durations_sum_without_overflow() {
        let tasks = vec![
            task("a", 0, Priority::High).with_duration(u32::MAX),
            task("b", 0, Priority::Low).with_duration(u32::MAX),
        ];
        let plan = build_day_plan(today(), &tasks);
        assert_eq!(plan.total_study_time, 2 * u64::from(u32::MAX));
        assert_eq!(plan.remaining_minutes(), plan.total_study_time);
    }

    #[test]
    fn completed_flag_requires_every_task() {
        let mut tasks = vec![task("a", 0, Priority::Low), task("b", 0, Priority::High)];
        tasks[0].completed = true;
        let plan = build_day_plan(today(), &tasks);
        assert!(!plan.completed);
        assert_eq!(plan.remaining_minutes(), 30);

        tasks[1].completed = true;
        assert!(build_day_plan(today(), &tasks).completed);
    }

    #[test]
    fn empty_day_is_vacuously_complete() {
        let plan = build_day_plan(today(), &[]);
        assert!(plan.is_empty());
        assert!(plan.completed);
        assert_eq!(plan.total_study_time, 0);
    }

    #[test]
    fn upcoming_excludes_past_beyond_horizon_and_completed() {
        let tasks = vec![
            task("far", 10, Priority::Low),
            task("plus3", 3, Priority::Low),
            task("past", -1, Priority::High),
            task("today", 0, Priority::Low),
            task("done", 1, Priority::Low).completed(),
        ];
        let up = upcoming_tasks(&tasks, today(), DEFAULT_HORIZON_DAYS);
        let ids: Vec<_> = up.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["today", "plus3"]);
    }

    #[test]
    fn upcoming_horizon_is_inclusive() {
        let tasks = vec![task("edge", 7, Priority::Low), task("over", 8, Priority::Low)];
        let up = upcoming_tasks(&tasks, today(), 7);
        assert_eq!(up.len(), 1);
        assert_eq!(up[0].id, "edge");
        assert!(upcoming_tasks(&tasks, today(), 0).is_empty());
    }
}
