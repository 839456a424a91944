//! File system paths for the client profile.

use crate::{CoreError, CoreResult};
use std::path::PathBuf;

/// Manages file system paths for the client profile directory.
#[derive(Debug, Clone)]
pub struct Paths {
    /// Base directory for client profile files (~/.salon)
    base_dir: PathBuf,
}

impl Paths {
    /// Create a new Paths instance rooted at `~/.salon`.
    pub fn new() -> CoreResult<Self> {
        let home = dirs::home_dir()
            .ok_or_else(|| CoreError::Path("Could not determine home directory".to_string()))?;

        Ok(Self {
            base_dir: home.join(".salon"),
        })
    }

    /// Create a new Paths instance with a custom base directory.
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.salon).
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the config file path (~/.salon/config.json).
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the token file path (~/.salon/tokens.json).
    ///
    /// Credentials stored here survive process restarts within the same
    /// profile directory.
    pub fn tokens_file(&self) -> PathBuf {
        self.base_dir.join("tokens.json")
    }

    /// Get the logs directory (~/.salon/logs).
    pub fn logs_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Ensure all required directories exist.
    pub fn ensure_dirs(&self) -> CoreResult<()> {
        std::fs::create_dir_all(&self.base_dir)?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }
}

impl Default for Paths {
    fn default() -> Self {
        Self::new().expect("Failed to determine home directory")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_paths_with_base_dir() {
        let base = PathBuf::from("/tmp/test-salon");
        let paths = Paths::with_base_dir(base.clone());

        assert_eq!(paths.base_dir(), &base);
        assert_eq!(paths.config_file(), base.join("config.json"));
        assert_eq!(paths.tokens_file(), base.join("tokens.json"));
        assert_eq!(paths.logs_dir(), base.join("logs"));
    }

    #[test]
    fn test_paths_default() {
        let paths = Paths::new().unwrap();
        let home = dirs::home_dir().unwrap();

        assert_eq!(paths.base_dir(), &home.join(".salon"));
    }

    #[test]
    fn test_ensure_dirs_creates_directories() {
        let dir = tempdir().unwrap();
        let base = dir.path().join("salon");
        let paths = Paths::with_base_dir(base.clone());

        assert!(!base.exists());
        assert!(!paths.logs_dir().exists());

        paths.ensure_dirs().unwrap();

        assert!(base.exists());
        assert!(base.is_dir());
        assert!(paths.logs_dir().exists());
        assert!(paths.logs_dir().is_dir());
    }

    #[test]
    fn test_ensure_dirs_idempotent() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();
        paths.ensure_dirs().unwrap();

        assert!(paths.base_dir().exists());
        assert!(paths.logs_dir().exists());
    }

    #[test]
    fn test_tokens_file_inside_base_dir() {
        let dir = tempdir().unwrap();
        let paths = Paths::with_base_dir(dir.path().to_path_buf());

        assert!(paths.tokens_file().starts_with(paths.base_dir()));
        assert!(paths.config_file().starts_with(paths.base_dir()));
    }
}
