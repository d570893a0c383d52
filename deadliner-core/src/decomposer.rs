//! Deadline decomposer: turns one deadline + profile into a dated task sequence.
//!
//! Deterministic and infallible: "today" is injected, all arithmetic is in
//! whole minutes, and degenerate horizons (due today or overdue) collapse to
//! a one-day floor instead of erroring.
//!
//! Per-kind policy:
//! - Exam: study days = max(1, days - 1), first day reviews materials, last
//!   day is a high-priority final review, plus a 15 min reminder the day
//!   before the due date.
//! - Project: three back-to-back phases (30/50/20 split of time and days).
//! - Assignment: even split over max(1, days - 1) work days.
//!
//! No study or work task exceeds the profile's daily cap (60% of the daily budget).

use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::deadline::{Deadline, DeadlineKind};
use crate::profile::Profile;
use crate::task::{Priority, Task, TaskKind};
use crate::time::{add_days, days_between};

pub const REMINDER_MINUTES: u32 = 15;

/// Longest horizon a single deadline is spread over.
pub const MAX_HORIZON_DAYS: u32 = 366;

struct Phase {
    name: &'static str,
    slug: &'static str,
    percent: u32,
}

const PROJECT_PHASES: [Phase; 3] = [
    Phase {
        name: "Planning & Research",
        slug: "planning-research",
        percent: 30,
    },
    Phase {
        name: "Implementation",
        slug: "implementation",
        percent: 50,
    },
    Phase {
        name: "Review & Polish",
        slug: "review-polish",
        percent: 20,
    },
];

/// Shared quantities for one decomposition.
#[derive(Debug, Clone, Copy)]
struct Allocation {
    today: NaiveDate,
    /// Days until due, floored at 1.
    days: u32,
    total_minutes: u32,
    daily_cap: u32,
}

impl Allocation {
    fn new(deadline: &Deadline, profile: &Profile, today: NaiveDate) -> Self {
        let raw_days = days_between(today, deadline.due_date);
        if raw_days < 1 {
            warn!(
                deadline_id = %deadline.id,
                raw_days,
                "deadline is due today or overdue; using a one-day horizon"
            );
        }
        if raw_days > i64::from(MAX_HORIZON_DAYS) {
            warn!(
                deadline_id = %deadline.id,
                raw_days,
                max = MAX_HORIZON_DAYS,
                "deadline is far out; planning only the first days"
            );
        }
        let days = u32::try_from(raw_days.clamp(1, i64::from(MAX_HORIZON_DAYS)))
            .unwrap_or(MAX_HORIZON_DAYS);

        let total = (deadline.estimated_hours * 60.0).round();
        let total_minutes = if total.is_finite() && total > 0.0 {
            total.min(f64::from(u32::MAX)) as u32
        } else {
            0
        };

        Self {
            today,
            days,
            total_minutes,
            daily_cap: profile.daily_cap_minutes(),
        }
    }

    fn date(&self, offset: u32) -> NaiveDate {
        add_days(self.today, i64::from(offset))
    }
}

/// Even share of `bucket` over `days`, bounded by the cap and never zero.
fn per_day(bucket: u32, days: u32, cap: u32) -> u32 {
    (bucket / days.max(1)).min(cap).max(1)
}

/// `minutes * percent / 100`, widened so large budgets cannot overflow.
fn phase_minutes(minutes: u32, percent: u32) -> u32 {
    let share = u64::from(minutes) * u64::from(percent) / 100;
    u32::try_from(share).unwrap_or(u32::MAX)
}

/// `ceil(days * percent / 100)` without float drift, at least 1.
fn phase_days(days: u32, percent: u32) -> u32 {
    let scaled = u64::from(days) * u64::from(percent);
    let ceil = scaled.div_ceil(100);
    u32::try_from(ceil).unwrap_or(u32::MAX).max(1)
}

/// Decompose `deadline` into tasks, starting on `today`.
pub fn decompose(deadline: &Deadline, profile: &Profile, today: NaiveDate) -> Vec<Task> {
    let alloc = Allocation::new(deadline, profile, today);

    let tasks = match deadline.kind {
        DeadlineKind::Exam => exam_tasks(deadline, &alloc),
        DeadlineKind::Project => project_tasks(deadline, &alloc),
        DeadlineKind::Assignment => assignment_tasks(deadline, &alloc),
    };

    debug!(
        deadline_id = %deadline.id,
        kind = deadline.kind.as_str(),
        days = alloc.days,
        total_minutes = alloc.total_minutes,
        daily_cap = alloc.daily_cap,
        tasks = tasks.len(),
        "decomposed deadline"
    );

    tasks
}

fn exam_tasks(deadline: &Deadline, alloc: &Allocation) -> Vec<Task> {
    let study_days = alloc.days.saturating_sub(1).max(1);
    let daily = per_day(alloc.total_minutes, study_days, alloc.daily_cap);
    let mut tasks = Vec::with_capacity(study_days as usize + 2);

    if study_days == 1 {
        // One day carries both the opening review and the final review.
        let review = (daily / 2).max(1);
        let final_review = daily.saturating_sub(review).max(1);
        tasks.push(review_task(deadline, alloc, 0, review));
        tasks.push(final_review_task(deadline, alloc, 0, final_review));
    } else {
        let last = study_days - 1;
        for i in 0..study_days {
            let task = match i {
                0 => review_task(deadline, alloc, i, daily),
                i if i == last => final_review_task(deadline, alloc, i, daily),
                _ => Task::new(
                    format!("{}-study-{}", deadline.id, i),
                    &deadline.id,
                    format!("Study {}", deadline.subject),
                    alloc.date(i),
                )
                .with_description(format!("Deep study session for {}", deadline.title))
                .with_duration(daily)
                .with_kind(TaskKind::Study)
                .with_priority(deadline.priority),
            };
            tasks.push(task);
        }
    }

    tasks.push(
        Task::new(
            format!("{}-reminder", deadline.id),
            &deadline.id,
            "Final prep reminder",
            add_days(deadline.due_date, -1),
        )
        .with_description(format!(
            "Tomorrow is your {}! Review key concepts.",
            deadline.title
        ))
        .with_duration(REMINDER_MINUTES)
        .with_kind(TaskKind::Reminder)
        .with_priority(Priority::High),
    );

    tasks
}

fn review_task(deadline: &Deadline, alloc: &Allocation, day: u32, minutes: u32) -> Task {
    Task::new(
        format!("{}-review-{}", deadline.id, day),
        &deadline.id,
        format!("Review {} materials", deadline.subject),
        alloc.date(day),
    )
    .with_description(format!(
        "Review notes and textbook chapters for {}",
        deadline.title
    ))
    .with_duration(minutes)
    .with_kind(TaskKind::Study)
    .with_priority(deadline.priority)
}

fn final_review_task(deadline: &Deadline, alloc: &Allocation, day: u32, minutes: u32) -> Task {
    Task::new(
        format!("{}-final-review-{}", deadline.id, day),
        &deadline.id,
        format!("Final review for {}", deadline.subject),
        alloc.date(day),
    )
    .with_description(format!(
        "Practice problems and final review for {}",
        deadline.title
    ))
    .with_duration(minutes)
    .with_kind(TaskKind::Study)
    .with_priority(Priority::High)
}

fn project_tasks(deadline: &Deadline, alloc: &Allocation) -> Vec<Task> {
    let mut tasks = Vec::new();
    let mut offset = 0u32;

    for phase in &PROJECT_PHASES {
        let minutes = phase_minutes(alloc.total_minutes, phase.percent);
        let days = phase_days(alloc.days, phase.percent);
        let daily = per_day(minutes, days, alloc.daily_cap);

        for i in 0..days {
            tasks.push(
                Task::new(
                    format!("{}-{}-{}", deadline.id, phase.slug, i),
                    &deadline.id,
                    format!("{}: {}", phase.name, deadline.title),
                    alloc.date(offset + i),
                )
                .with_description(format!(
                    "Work on {} phase of {}",
                    phase.name.to_lowercase(),
                    deadline.title
                ))
                .with_duration(daily)
                .with_kind(TaskKind::Assignment)
                .with_priority(deadline.priority),
            );
        }

        offset += days;
    }

    tasks
}

fn assignment_tasks(deadline: &Deadline, alloc: &Allocation) -> Vec<Task> {
    let work_days = alloc.days.saturating_sub(1).max(1);
    let daily = per_day(alloc.total_minutes, work_days, alloc.daily_cap);

    (0..work_days)
        .map(|i| {
            Task::new(
                format!("{}-work-{}", deadline.id, i),
                &deadline.id,
                format!("Work on {}", deadline.title),
                alloc.date(i),
            )
            .with_description(format!(
                "Continue working on {} for {}",
                deadline.title, deadline.subject
            ))
            .with_duration(daily)
            .with_kind(TaskKind::Assignment)
            .with_priority(deadline.priority)
        })
        .collect()
}
