//! Global context for bomsmith operations.
//!
//! Provides centralized access to the working directory and the default
//! local repository.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;

/// Name of the settings file looked up in the working directory.
pub const SETTINGS_FILE: &str = "Bom.toml";

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Default local repository (`~/.m2/repository`)
    local_repository: PathBuf,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        Ok(Self::with_cwd(cwd))
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Self {
        let local_repository = match BaseDirs::new() {
            Some(dirs) => dirs.home_dir().join(".m2").join("repository"),
            // Fallback to a repository under the working directory
            None => cwd.join(".m2").join("repository"),
        };

        GlobalContext {
            cwd,
            local_repository,
        }
    }

    /// Override the default local repository.
    pub fn set_local_repository(&mut self, path: PathBuf) {
        self.local_repository = path;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Default local repository path.
    pub fn local_repository(&self) -> &Path {
        &self.local_repository
    }

    /// Settings file in the working directory.
    pub fn settings_path(&self) -> PathBuf {
        self.cwd.join(SETTINGS_FILE)
    }

    /// Resolve a user-supplied path against the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }
}
