//! Path management for SmartSwipe files.
//!
//! ```text
//! ~/.config/smartswipe/        # Config directory
//! └── config.toml              # Engine configuration
//!
//! ~/.local/share/smartswipe/   # Data directory
//! └── funnel/                  # Funnel state, one JSON file per key
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "smartswipe";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// The platform config or data directory could not be determined.
    DirNotFound(&'static str),
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::DirNotFound(kind) => write!(f, "Cannot find {} directory", kind),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for smartswipe_core::FunnelError {
    fn from(err: PathError) -> Self {
        smartswipe_core::FunnelError::io(err.to_string())
    }
}

/// Platform paths for SmartSwipe.
pub struct SmartSwipePaths;

impl SmartSwipePaths {
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("config"))
    }

    pub fn data_dir() -> Result<PathBuf, PathError> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::DirNotFound("data"))
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the directory used by the file-backed funnel store.
    pub fn funnel_dir() -> Result<PathBuf, PathError> {
        Ok(Self::data_dir()?.join("funnel"))
    }
}
