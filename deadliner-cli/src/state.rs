use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::config::Config;

/// `$DEADLINER_HOME`, or `~/.deadliner`.
pub fn deadliner_home() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("DEADLINER_HOME") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".deadliner"))
}

pub fn ensure_deadliner_home() -> Result<PathBuf> {
    let dir = deadliner_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

/// Where deadlines/tasks/profile JSON live: config override or `<home>/data`.
pub fn data_dir(cfg: &Config) -> Result<PathBuf> {
    match &cfg.storage.data_dir {
        Some(dir) => Ok(dir.clone()),
        None => Ok(ensure_deadliner_home()?.join("data")),
    }
}
