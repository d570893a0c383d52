//! Study-capacity profile consumed by the decomposer.

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Share of the daily budget any single deadline may claim.
pub const DAILY_CAP_FRACTION: f64 = 0.6;

/// There are only so many hours in a day.
pub const MAX_DAILY_STUDY_HOURS: f64 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl std::str::FromStr for TimeOfDay {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Ok(TimeOfDay::Morning),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "evening" => Ok(TimeOfDay::Evening),
            "night" => Ok(TimeOfDay::Night),
            other => Err(format!("unknown time of day: {other}")),
        }
    }
}

/// Accepted and stored; task generation is identical for both.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StudyStyle {
    Focused,
    Distributed,
}

impl std::str::FromStr for StudyStyle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "focused" => Ok(StudyStyle::Focused),
            "distributed" => Ok(StudyStyle::Distributed),
            other => Err(format!("unknown study style: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub daily_study_hours: f64,
    #[serde(default)]
    pub preferred_times: Vec<TimeOfDay>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub study_style: StudyStyle,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            daily_study_hours: 4.0,
            preferred_times: vec![TimeOfDay::Morning, TimeOfDay::Evening],
            subjects: ["Math", "Science", "History", "English"]
                .into_iter()
                .map(String::from)
                .collect(),
            study_style: StudyStyle::Distributed,
        }
    }
}

impl Profile {
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.daily_study_hours.is_finite() || self.daily_study_hours <= 0.0 {
            return Err(PlannerError::invalid(format!(
                "daily study hours must be positive, got {}",
                self.daily_study_hours
            )));
        }
        if self.daily_study_hours > MAX_DAILY_STUDY_HOURS {
            return Err(PlannerError::invalid(format!(
                "daily study hours must be at most {MAX_DAILY_STUDY_HOURS}, got {}",
                self.daily_study_hours
            )));
        }
        Ok(())
    }

    /// Per-deadline daily ceiling in whole minutes (never below 1).
    ///
    /// A hand-edited profile above the daily maximum is treated as the maximum.
    pub fn daily_cap_minutes(&self) -> u32 {
        let hours = self.daily_study_hours.min(MAX_DAILY_STUDY_HOURS);
        let cap = (hours * 60.0 * DAILY_CAP_FRACTION).floor();
        if cap.is_finite() && cap >= 1.0 {
            cap as u32
        } else {
            1
        }
    }
}
