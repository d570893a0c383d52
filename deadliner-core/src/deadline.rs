//! Deadline model: a user-declared academic obligation with a due date and effort estimate.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};
use crate::task::Priority;

/// Upper bound on a single estimate; keeps the minute budget well inside `u32`.
pub const MAX_ESTIMATED_HOURS: f64 = 10_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeadlineKind {
    /// Plain homework-style assignment.
    Assignment,
    Exam,
    Project,
}

impl DeadlineKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeadlineKind::Assignment => "assignment",
            DeadlineKind::Exam => "exam",
            DeadlineKind::Project => "project",
        }
    }
}

impl std::str::FromStr for DeadlineKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "assignment" | "homework" | "plain" => Ok(DeadlineKind::Assignment),
            "exam" | "test" | "quiz" => Ok(DeadlineKind::Exam),
            "project" => Ok(DeadlineKind::Project),
            other => Err(format!("unknown deadline kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deadline {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub kind: DeadlineKind,
    pub due_date: NaiveDate,
    pub priority: Priority,
    /// Hours, > 0.
    pub estimated_hours: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Modeled for completeness; nothing in the engine sets it.
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// User input for a deadline that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDeadline {
    pub title: String,
    pub subject: String,
    pub kind: DeadlineKind,
    pub due_date: NaiveDate,
    pub priority: Priority,
    pub estimated_hours: f64,
    #[serde(default)]
    pub note: Option<String>,
}

impl NewDeadline {
    pub fn new(
        title: impl Into<String>,
        subject: impl Into<String>,
        kind: DeadlineKind,
        due_date: NaiveDate,
    ) -> Self {
        Self {
            title: title.into(),
            subject: subject.into(),
            kind,
            due_date,
            priority: Priority::Medium,
            estimated_hours: 2.0,
            note: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn validate(&self) -> PlannerResult<()> {
        if self.title.trim().is_empty() {
            return Err(PlannerError::invalid("title must be non-empty"));
        }
        if self.subject.trim().is_empty() {
            return Err(PlannerError::invalid("subject must be non-empty"));
        }
        if !self.estimated_hours.is_finite() || self.estimated_hours <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "estimated hours must be positive, got {}",
                self.estimated_hours
            )));
        }
        if self.estimated_hours > MAX_ESTIMATED_HOURS {
            return Err(PlannerError::invalid(format!(
                "estimated hours must be at most {MAX_ESTIMATED_HOURS}, got {}",
                self.estimated_hours
            )));
        }
        Ok(())
    }

    /// Validate and stamp identity + creation time.
    pub fn into_deadline(
        self,
        id: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> PlannerResult<Deadline> {
        self.validate()?;
        let note = self
            .note
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        Ok(Deadline {
            id: id.into(),
            title: self.title.trim().to_string(),
            subject: self.subject.trim().to_string(),
            kind: self.kind,
            due_date: self.due_date,
            priority: self.priority,
            estimated_hours: self.estimated_hours,
            note,
            completed: false,
            created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn due() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 11, 2).unwrap()
    }

    #[test]
    fn blank_title_is_rejected() {
        let nd = NewDeadline::new("   ", "Math", DeadlineKind::Exam, due());
        let err = nd.validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn blank_subject_is_rejected() {
        let nd = NewDeadline::new("Midterm", "", DeadlineKind::Exam, due());
        assert!(nd.validate().is_err());
    }

    #[test]
    fn non_positive_hours_are_rejected() {
        let nd = NewDeadline::new("Essay", "English", DeadlineKind::Assignment, due())
            .with_hours(0.0);
        assert!(nd.validate().is_err());
        let nd = nd.with_hours(f64::NAN);
        assert!(nd.validate().is_err());
    }

    #[test]
    fn oversized_hours_are_rejected() {
        let nd = NewDeadline::new("Thesis", "History", DeadlineKind::Project, due())
            .with_hours(MAX_ESTIMATED_HOURS);
        assert!(nd.validate().is_ok());
        let err = nd.with_hours(2_000_000.0).validate().unwrap_err();
        assert!(matches!(err, PlannerError::InvalidInput(_)));
    }

    #[test]
    fn into_deadline_trims_and_starts_incomplete() {
        let created = Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap();
        let d = NewDeadline::new(" Midterm ", " Math ", DeadlineKind::Exam, due())
            .with_priority(Priority::High)
            .with_hours(6.0)
            .with_note("  ")
            .into_deadline("d1", created)
            .unwrap();
        assert_eq!(d.title, "Midterm");
        assert_eq!(d.subject, "Math");
        assert_eq!(d.note, None);
        assert!(!d.completed);
        assert_eq!(d.created_at, created);
    }

    #[test]
    fn kind_parses_aliases() {
        assert_eq!("Quiz".parse::<DeadlineKind>(), Ok(DeadlineKind::Exam));
        assert_eq!("homework".parse::<DeadlineKind>(), Ok(DeadlineKind::Assignment));
    }
}
