//! Persistence boundary: full-collection load/save behind one trait.
//!
//! The engine never does partial updates; every mutation saves the whole
//! snapshot. Backends are interchangeable:
//! - `MemoryRepository` keeps the snapshot in process (tests, dry runs).
//! - `JsonFileRepository` writes `deadlines.json`, `tasks.json` and
//!   `profile.json` into a data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::deadline::Deadline;
use crate::error::{PlannerError, PlannerResult};
use crate::profile::Profile;
use crate::task::Task;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub deadlines: Vec<Deadline>,
    pub tasks: Vec<Task>,
    pub profile: Profile,
}

pub trait Repository {
    fn load(&self) -> PlannerResult<Snapshot>;
    fn save(&mut self, snapshot: &Snapshot) -> PlannerResult<()>;
}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    snapshot: Snapshot,
    saves: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: Snapshot) -> Self {
        Self { snapshot, saves: 0 }
    }

    /// Number of successful saves, useful for asserting persistence happened.
    pub fn save_count(&self) -> usize {
        self.saves
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }
}

impl Repository for MemoryRepository {
    fn load(&self) -> PlannerResult<Snapshot> {
        Ok(self.snapshot.clone())
    }

    fn save(&mut self, snapshot: &Snapshot) -> PlannerResult<()> {
        self.snapshot = snapshot.clone();
        self.saves += 1;
        Ok(())
    }
}

const DEADLINES_FILE: &str = "deadlines.json";
const TASKS_FILE: &str = "tasks.json";
const PROFILE_FILE: &str = "profile.json";

#[derive(Debug, Clone)]
pub struct JsonFileRepository {
    dir: PathBuf,
}

impl JsonFileRepository {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn read_or<T: DeserializeOwned>(&self, name: &str, fallback: T) -> PlannerResult<T> {
        let p = self.dir.join(name);
        if !p.exists() {
            return Ok(fallback);
        }
        let s = fs::read_to_string(&p)
            .map_err(|e| PlannerError::storage(format!("read {}: {e}", p.display())))?;
        serde_json::from_str(&s)
            .map_err(|e| PlannerError::storage(format!("parse {}: {e}", p.display())))
    }

    fn write<T: Serialize + ?Sized>(&self, name: &str, value: &T) -> PlannerResult<()> {
        let p = self.dir.join(name);
        let json = serde_json::to_string_pretty(value)?;
        fs::write(&p, json)
            .map_err(|e| PlannerError::storage(format!("write {}: {e}", p.display())))
    }
}

impl Repository for JsonFileRepository {
    fn load(&self) -> PlannerResult<Snapshot> {
        let snapshot = Snapshot {
            deadlines: self.read_or(DEADLINES_FILE, Vec::new())?,
            tasks: self.read_or(TASKS_FILE, Vec::new())?,
            profile: self.read_or(PROFILE_FILE, Profile::default())?,
        };
        debug!(
            dir = %self.dir.display(),
            deadlines = snapshot.deadlines.len(),
            tasks = snapshot.tasks.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    fn save(&mut self, snapshot: &Snapshot) -> PlannerResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| PlannerError::storage(format!("create {}: {e}", self.dir.display())))?;
        self.write(DEADLINES_FILE, &snapshot.deadlines)?;
        self.write(TASKS_FILE, &snapshot.tasks)?;
        self.write(PROFILE_FILE, &snapshot.profile)?;
        debug!(dir = %self.dir.display(), "saved snapshot");
        Ok(())
    }
}
