//! Error taxonomy for the planning engine.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlannerError {
    /// Rejected before anything reaches the decomposer.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// Load/save failures reported by a repository backend.
    #[error("storage error: {0}")]
    Storage(String),
}

pub type PlannerResult<T> = Result<T, PlannerError>;

impl PlannerError {
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn task_not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound {
            kind: "task",
            id: id.into(),
        }
    }

    pub fn deadline_not_found<S: Into<String>>(id: S) -> Self {
        Self::NotFound {
            kind: "deadline",
            id: id.into(),
        }
    }

    pub fn storage<S: Into<String>>(msg: S) -> Self {
        Self::Storage(msg.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PlannerError::NotFound { .. })
    }
}

impl From<serde_json::Error> for PlannerError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(format!("serialization: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_message_names_kind_and_id() {
        let e = PlannerError::task_not_found("t-42");
        assert_eq!(e.to_string(), "task not found: t-42");
        assert!(e.is_not_found());
        assert!(!PlannerError::invalid("x").is_not_found());
    }
}
