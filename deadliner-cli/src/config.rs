use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::state::ensure_deadliner_home;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralSection,
    pub storage: StorageSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSection {
    /// IANA zone used to decide what "today" is.
    pub timezone: String,
    /// Default window for `deadliner upcoming`.
    pub horizon_days: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Defaults to `<home>/data` when unset.
    pub data_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// `EnvFilter` directive; `RUST_LOG` wins when set.
    pub level: String,
}

impl Default for GeneralSection {
    fn default() -> Self {
        Self {
            timezone: "America/Chicago".to_string(),
            horizon_days: deadliner_core::DEFAULT_HORIZON_DAYS,
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_deadliner_home()?.join("config.toml"))
}

/// Effective configuration: `config.toml` under the home dir, or defaults.
pub fn load_config() -> Result<Config> {
    read_config(&config_path()?)
}

fn read_config(path: &Path) -> Result<Config> {
    match fs::read_to_string(path) {
        Ok(s) => parse_config(&s).with_context(|| format!("parse {}", path.display())),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Config::default()),
        Err(e) => Err(e).with_context(|| format!("read {}", path.display())),
    }
}

pub fn parse_config(s: &str) -> Result<Config> {
    Ok(toml::from_str(s)?)
}

/// Write a default config unless one is already there. Returns the path
/// and whether a file was created.
pub fn init_config() -> Result<(PathBuf, bool)> {
    let path = config_path()?;
    let created = write_default_config(&path)?;
    Ok((path, created))
}

fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    let body = toml::to_string_pretty(&Config::default()).context("serialize config")?;
    fs::write(path, body).with_context(|| format!("write {}", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_fills_defaults() {
        let cfg = parse_config("[general]\ntimezone = \"Europe/Berlin\"\n").unwrap();
        assert_eq!(cfg.general.timezone, "Europe/Berlin");
        assert_eq!(cfg.general.horizon_days, 7);
        assert_eq!(cfg.logging.level, "warn");
        assert!(cfg.storage.data_dir.is_none());
    }

    #[test]
    fn default_config_round_trips() {
        let s = toml::to_string_pretty(&Config::default()).unwrap();
        let back = parse_config(&s).unwrap();
        assert_eq!(back.general.timezone, "America/Chicago");
    }

    #[test]
    fn missing_file_means_defaults_and_init_never_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        assert_eq!(read_config(&path).unwrap().general.horizon_days, 7);

        assert!(write_default_config(&path).unwrap());
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        assert!(!write_default_config(&path).unwrap());
        assert_eq!(read_config(&path).unwrap().logging.level, "debug");
    }

    #[test]
    fn malformed_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[general\n").unwrap();
        let err = read_config(&path).unwrap_err();
        assert!(format!("{err}").contains("config.toml"));
    }
}
