//! TaskStore: in-memory source of truth for deadlines and their tasks.
//!
//! Insertion order is preserved: the day-plan sort is stable, so the order
//! tasks were generated in is the tie-break for equal priorities.

use chrono::NaiveDate;
use tracing::info;

use crate::deadline::Deadline;
use crate::error::{PlannerError, PlannerResult};
use crate::task::Task;

/// Move a task to `new_date`. Moved work is unfinished work, so the
/// completion flag is cleared; priority and duration are untouched.
pub fn reschedule(mut task: Task, new_date: NaiveDate) -> Task {
    task.scheduled_date = new_date;
    task.completed = false;
    task
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct TaskStore {
    deadlines: Vec<Deadline>,
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from loaded collections, dropping tasks whose
    /// deadline no longer exists.
    pub fn from_parts(deadlines: Vec<Deadline>, tasks: Vec<Task>) -> Self {
        let before = tasks.len();
        let tasks: Vec<Task> = tasks
            .into_iter()
            .filter(|t| deadlines.iter().any(|d| d.id == t.deadline_id))
            .collect();
        if tasks.len() != before {
            tracing::warn!(
                dropped = before - tasks.len(),
                "dropped tasks referencing unknown deadlines"
            );
        }
        Self { deadlines, tasks }
    }

    pub fn into_parts(self) -> (Vec<Deadline>, Vec<Task>) {
        (self.deadlines, self.tasks)
    }

    pub fn deadlines(&self) -> &[Deadline] {
        &self.deadlines
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_empty(&self) -> bool {
        self.deadlines.is_empty()
    }

    pub fn deadline(&self, id: &str) -> Option<&Deadline> {
        self.deadlines.iter().find(|d| d.id == id)
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn tasks_for<'a>(&'a self, deadline_id: &'a str) -> impl Iterator<Item = &'a Task> + 'a {
        self.tasks.iter().filter(move |t| t.deadline_id == deadline_id)
    }

    /// Append a deadline together with its generated tasks.
    pub fn add_deadline(&mut self, deadline: Deadline, tasks: Vec<Task>) -> PlannerResult<()> {
        if self.deadline(&deadline.id).is_some() {
            return Err(PlannerError::invalid(format!(
                "deadline id already exists: {}",
                deadline.id
            )));
        }
        if let Some(stray) = tasks.iter().find(|t| t.deadline_id != deadline.id) {
            return Err(PlannerError::invalid(format!(
                "task {} does not belong to deadline {}",
                stray.id, deadline.id
            )));
        }

        info!(deadline_id = %deadline.id, tasks = tasks.len(), "adding deadline");
        self.deadlines.push(deadline);
        self.tasks.extend(tasks);
        Ok(())
    }

    /// Mark a task completed. Completing twice is a no-op.
    pub fn complete(&mut self, task_id: &str) -> PlannerResult<&Task> {
        let task = self.task_mut(task_id)?;
        if !task.completed {
            task.completed = true;
            info!(task_id, "task completed");
        }
        Ok(&*task)
    }

    pub fn reschedule(&mut self, task_id: &str, new_date: NaiveDate) -> PlannerResult<&Task> {
        let task = self.task_mut(task_id)?;
        let moved = reschedule(task.clone(), new_date);
        info!(
            task_id,
            from = %task.scheduled_date,
            to = %new_date,
            "task rescheduled"
        );
        *task = moved;
        Ok(&*task)
    }

    /// Remove a deadline and every task generated from it.
    pub fn remove_deadline(&mut self, deadline_id: &str) -> PlannerResult<Deadline> {
        let pos = self
            .deadlines
            .iter()
            .position(|d| d.id == deadline_id)
            .ok_or_else(|| PlannerError::deadline_not_found(deadline_id))?;

        let deadline = self.deadlines.remove(pos);
        let before = self.tasks.len();
        self.tasks.retain(|t| t.deadline_id != deadline_id);
        info!(
            deadline_id,
            tasks_removed = before - self.tasks.len(),
            "deadline removed"
        );
        Ok(deadline)
    }

    fn task_mut(&mut self, task_id: &str) -> PlannerResult<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| PlannerError::task_not_found(task_id))
    }
}
