//! Task model: one dated, time-boxed unit of study work generated from a deadline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Ordered so that `High > Medium > Low`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" | "med" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Study,
    /// Hands-on work toward a plain assignment or project.
    Assignment,
    Reminder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    /// Back-reference to the owning deadline.
    pub deadline_id: String,
    pub title: String,
    pub description: String,
    pub scheduled_date: NaiveDate,
    /// Minutes, always > 0.
    pub duration: u32,
    pub completed: bool,
    pub kind: TaskKind,
    pub priority: Priority,
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        deadline_id: impl Into<String>,
        title: impl Into<String>,
        scheduled_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            deadline_id: deadline_id.into(),
            title: title.into(),
            description: String::new(),
            scheduled_date,
            duration: 30,
            completed: false,
            kind: TaskKind::Study,
            priority: Priority::Medium,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_duration(mut self, minutes: u32) -> Self {
        self.duration = minutes.max(1);
        self
    }

    pub fn with_kind(mut self, kind: TaskKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_orders_high_above_low() {
        let mut ps = vec![Priority::Low, Priority::High, Priority::Medium];
        ps.sort_by(|a, b| b.cmp(a));
        assert_eq!(ps, vec![Priority::High, Priority::Medium, Priority::Low]);
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("HIGH".parse::<Priority>(), Ok(Priority::High));
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn task_serializes_date_as_plain_calendar_date() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        let t = Task::new("t1", "d1", "Study", d).with_kind(TaskKind::Reminder);
        let json = serde_json::to_value(&t).unwrap();
        assert_eq!(json["scheduled_date"], "2026-03-09");
        assert_eq!(json["kind"], "reminder");
        assert_eq!(json["priority"], "medium");
    }

    #[test]
    fn zero_duration_is_clamped_positive() {
        let d = NaiveDate::from_ymd_opt(2026, 3, 9).unwrap();
        assert_eq!(Task::new("t1", "d1", "x", d).with_duration(0).duration, 1);
    }
}
