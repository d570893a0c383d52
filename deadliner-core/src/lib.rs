//! deadliner-core: study-planning engine.
//!
//! Turns academic deadlines into dated study tasks and derives daily agendas
//! and progress statistics from the flat task set. "Today" is always an
//! explicit argument; nothing in this crate reads the wall clock.

pub mod deadline;
pub mod decomposer;
pub mod engine;
pub mod error;
pub mod export;
pub mod planner;
pub mod profile;
pub mod repository;
pub mod stats;
pub mod store;
pub mod task;
pub mod time;

pub use deadline::{Deadline, DeadlineKind, NewDeadline};
pub use decomposer::decompose;
pub use engine::Deadliner;
pub use error::{PlannerError, PlannerResult};
pub use export::render_schedule;
pub use planner::{DEFAULT_HORIZON_DAYS, DayPlan, build_day_plan, upcoming_tasks};
pub use profile::{Profile, StudyStyle, TimeOfDay};
pub use repository::{JsonFileRepository, MemoryRepository, Repository, Snapshot};
pub use stats::{Stats, compute_stats};
pub use store::{TaskStore, reschedule};
pub use task::{Priority, Task, TaskKind};
