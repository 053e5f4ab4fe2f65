/// Runtime configuration resolved from command-line options and environment
use anyhow::{Context, Result};
use mastery_core::catalog::{self, Catalog};
use mastery_core::store::FileStore;
use mastery_core::tracker::Tracker;
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "python-mastery-os";
const LOG_FILE: &str = "mastery.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub state_dir: PathBuf,
    pub catalog_path: Option<PathBuf>,
    pub high_contrast: bool,
}

impl Config {
    pub fn new(
        state_dir: Option<PathBuf>,
        catalog_path: Option<PathBuf>,
        high_contrast: bool,
    ) -> Self {
        Self {
            state_dir: state_dir.unwrap_or_else(default_state_dir),
            catalog_path,
            high_contrast,
        }
    }

    pub fn log_path(&self) -> PathBuf {
        self.state_dir.join(LOG_FILE)
    }

    /// User curriculum when one is configured, the built-in one otherwise
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => catalog::load_catalog(&path.to_string_lossy())
                .with_context(|| format!("Failed to load catalog {}", path.display())),
            None => catalog::builtin().context("Built-in curriculum is invalid"),
        }
    }

    pub fn ensure_state_dir(&self) -> Result<&Path> {
        fs::create_dir_all(&self.state_dir).with_context(|| {
            format!("Failed to create state directory {}", self.state_dir.display())
        })?;
        Ok(&self.state_dir)
    }

    pub fn open_tracker(&self) -> Result<Tracker<FileStore>> {
        let catalog = self.load_catalog()?;
        let dir = self.ensure_state_dir()?;
        Ok(Tracker::open(catalog, FileStore::new(dir)))
    }
}

/// Platform data dir, or a dot-directory in the working dir when there is none
pub fn default_state_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from(format!(".{}", APP_DIR)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_state_dir_wins() {
        let config = Config::new(Some(PathBuf::from("/tmp/x")), None, false);
        assert_eq!(config.state_dir, PathBuf::from("/tmp/x"));
        assert_eq!(config.log_path(), PathBuf::from("/tmp/x/mastery.log"));
    }

    #[test]
    fn test_default_state_dir_named_after_app() {
        assert!(default_state_dir().ends_with("python-mastery-os")
            || default_state_dir().ends_with(".python-mastery-os"));
    }

    #[test]
    fn test_builtin_catalog_when_unset() {
        let config = Config::new(Some(PathBuf::from(".")), None, false);
        let catalog = config.load_catalog().unwrap();
        assert!(catalog.section("home").is_some());
    }

    #[test]
    fn test_missing_catalog_file_is_error() {
        let config = Config::new(None, Some(PathBuf::from("/nonexistent/curriculum.yaml")), false);
        let err = config.load_catalog().unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to load catalog"));
    }

    #[test]
    fn test_open_tracker_creates_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::new(Some(tmp.path().join("state")), None, false);
        let tracker = config.open_tracker().unwrap();
        assert!(tmp.path().join("state").is_dir());
        assert!(tracker.state().checked.is_empty());
    }
}
