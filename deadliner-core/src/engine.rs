//! Deadliner engine: wires the decomposer, task store and query layer to a
//! repository.
//!
//! Every mutation persists the full snapshot; queries are recomputed on
//! demand from the current store and never mutate it.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::info;
use uuid::Uuid;

use crate::deadline::{Deadline, NewDeadline};
use crate::decomposer::decompose;
use crate::error::PlannerResult;
use crate::export::render_schedule;
use crate::planner::{DayPlan, build_day_plan, upcoming_tasks};
use crate::profile::Profile;
use crate::repository::{Repository, Snapshot};
use crate::stats::{Stats, compute_stats};
use crate::store::TaskStore;
use crate::task::Task;

const DEADLINE_ID_LEN: usize = 8;

#[derive(Debug)]
pub struct Deadliner<R: Repository> {
    repo: R,
    store: TaskStore,
    profile: Profile,
}

impl<R: Repository> Deadliner<R> {
    /// Load the current snapshot from `repo`.
    pub fn open(repo: R) -> PlannerResult<Self> {
        let Snapshot {
            deadlines,
            tasks,
            profile,
        } = repo.load()?;
        Ok(Self {
            repo,
            store: TaskStore::from_parts(deadlines, tasks),
            profile,
        })
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    pub fn deadlines(&self) -> &[Deadline] {
        self.store.deadlines()
    }

    pub fn tasks(&self) -> &[Task] {
        self.store.tasks()
    }

    /// Validate, decompose against the current profile, store and persist.
    pub fn add_deadline(
        &mut self,
        input: NewDeadline,
        today: NaiveDate,
        now: DateTime<Utc>,
    ) -> PlannerResult<(Deadline, Vec<Task>)> {
        let id = self.fresh_deadline_id();
        let deadline = input.into_deadline(id, now)?;
        let tasks = decompose(&deadline, &self.profile, today);

        self.store.add_deadline(deadline.clone(), tasks.clone())?;
        self.persist()?;

        info!(
            deadline_id = %deadline.id,
            title = %deadline.title,
            tasks = tasks.len(),
            "deadline planned"
        );
        Ok((deadline, tasks))
    }

    pub fn complete_task(&mut self, task_id: &str) -> PlannerResult<Task> {
        let task = self.store.complete(task_id)?.clone();
        self.persist()?;
        Ok(task)
    }

    pub fn reschedule_task(&mut self, task_id: &str, new_date: NaiveDate) -> PlannerResult<Task> {
        let task = self.store.reschedule(task_id, new_date)?.clone();
        self.persist()?;
        Ok(task)
    }

    pub fn remove_deadline(&mut self, deadline_id: &str) -> PlannerResult<Deadline> {
        let deadline = self.store.remove_deadline(deadline_id)?;
        self.persist()?;
        Ok(deadline)
    }

    /// Applies to deadlines added afterwards; existing tasks are kept.
    pub fn update_profile(&mut self, profile: Profile) -> PlannerResult<()> {
        profile.validate()?;
        self.profile = profile;
        self.persist()?;
        info!(
            daily_study_hours = self.profile.daily_study_hours,
            "profile updated"
        );
        Ok(())
    }

    pub fn day_plan(&self, date: NaiveDate) -> DayPlan {
        build_day_plan(date, self.store.tasks())
    }

    pub fn upcoming(&self, today: NaiveDate, horizon_days: u32) -> Vec<Task> {
        upcoming_tasks(self.store.tasks(), today, horizon_days)
    }

    pub fn stats(&self, today: NaiveDate) -> Stats {
        compute_stats(self.store.deadlines(), self.store.tasks(), today)
    }

    pub fn export(&self, today: NaiveDate) -> String {
        render_schedule(self.store.deadlines(), self.store.tasks(), today)
    }

    fn persist(&mut self) -> PlannerResult<()> {
        let snapshot = Snapshot {
            deadlines: self.store.deadlines().to_vec(),
            tasks: self.store.tasks().to_vec(),
            profile: self.profile.clone(),
        };
        self.repo.save(&snapshot)
    }

    fn fresh_deadline_id(&self) -> String {
        loop {
            let mut id = Uuid::new_v4().simple().to_string();
            id.truncate(DEADLINE_ID_LEN);
            if self.store.deadline(&id).is_none() {
                return id;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deadline::DeadlineKind;
    use crate::error::PlannerError;
    use crate::repository::MemoryRepository;
    use crate::time::add_days;
    use chrono::TimeZone;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 5).unwrap()
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 5, 14, 0, 0).unwrap()
    }

    fn engine() -> Deadliner<MemoryRepository> {
        Deadliner::open(MemoryRepository::new()).unwrap()
    }

    #[test]
    fn add_deadline_persists_deadline_and_tasks() {
        let mut e = engine();
        let due = add_days(today(), 4);
        let input =
            NewDeadline::new("Essay", "English", DeadlineKind::Assignment, due).with_hours(3.0);
        let (d, tasks) = e.add_deadline(input, today(), now()).unwrap();

        assert_eq!(d.id.len(), DEADLINE_ID_LEN);
        assert_eq!(d.created_at, now());
        assert_eq!(tasks.len(), 3);
        assert!(tasks.iter().all(|t| t.deadline_id == d.id));

        let saved = e.repository().snapshot();
        assert_eq!(saved.deadlines.len(), 1);
        assert_eq!(saved.tasks.len(), 3);
        assert_eq!(e.repository().save_count(), 1);
    }

    #[test]
    fn invalid_input_never_reaches_the_store() {
        let mut e = engine();
        let input = NewDeadline::new("", "English", DeadlineKind::Assignment, today());
        let err = e.add_deadline(input, today(), now()).unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
        assert!(e.deadlines().is_empty());
        assert_eq!(e.repository().save_count(), 0);
    }

    #[test]
    fn mutations_round_trip_through_the_repository() {
        let mut e = engine();
        let input = NewDeadline::new("Final", "History", DeadlineKind::Exam, add_days(today(), 5));
        let (_, tasks) = e.add_deadline(input, today(), now()).unwrap();
        let first = tasks[0].id.clone();

        e.complete_task(&first).unwrap();
        assert_eq!(e.stats(today()).completed_tasks, 1);

        let moved = e.reschedule_task(&first, add_days(today(), 1)).unwrap();
        assert!(!moved.completed);

        let reopened = Deadliner::open(e.repository().clone()).unwrap();
        let t = reopened.store().task(&first).unwrap();
        assert_eq!(t.scheduled_date, add_days(today(), 1));
        assert!(!t.completed);
    }

    #[test]
    fn profile_changes_affect_new_deadlines_only() {
        let mut e = engine();
        let due = add_days(today(), 3);
        let (_, before) = e
            .add_deadline(
                NewDeadline::new("Lab", "Science", DeadlineKind::Assignment, due).with_hours(10.0),
                today(),
                now(),
            )
            .unwrap();

        e.update_profile(Profile {
            daily_study_hours: 1.0,
            ..Profile::default()
        })
        .unwrap();

        let (_, after) = e
            .add_deadline(
                NewDeadline::new("Lab 2", "Science", DeadlineKind::Assignment, due)
                    .with_hours(10.0),
                today(),
                now(),
            )
            .unwrap();

        assert_eq!(before[0].duration, 144);
        assert_eq!(after[0].duration, 36);
        assert_eq!(e.tasks().len(), before.len() + after.len());
    }

    #[test]
    fn invalid_profile_is_rejected() {
        let mut e = engine();
        let err = e
            .update_profile(Profile {
                daily_study_hours: -2.0,
                ..Profile::default()
            })
            .unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
        assert_eq!(e.profile(), &Profile::default());
    }
}
