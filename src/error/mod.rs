//! Error types and handling infrastructure for documentation mirroring

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Coarse classification of mirror failures, used for exit handling and tips
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MirrorErrorKind {
    /// Creating a mirrored directory failed for a reason other than "already exists"
    Filesystem,
    /// The source tree could not be read
    Traversal,
    /// A documentation conversion failed under the abort policy
    Conversion,
    /// The one-time setup step failed
    Setup,
    /// The configuration was rejected before the run started
    Configuration,
}

impl fmt::Display for MirrorErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Filesystem => "filesystem",
            Self::Traversal => "traversal",
            Self::Conversion => "conversion",
            Self::Setup => "setup",
            Self::Configuration => "configuration",
        };
        f.write_str(name)
    }
}

/// Main error type for mirror operations
#[derive(Debug, thiserror::Error)]
pub enum MirrorError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read source tree: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to list {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("conversion of {} failed: {reason}", path.display())]
    Conversion { path: PathBuf, reason: String },

    #[error("setup command `{command}` failed: {reason}")]
    Setup { command: String, reason: String },

    #[error("Invalid configuration: {message}")]
    Configuration { message: String },
}

impl MirrorError {
    pub fn create_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    pub fn write_output(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::WriteOutput {
            path: path.into(),
            source,
        }
    }

    pub fn read_dir(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::ReadDir {
            path: path.into(),
            source,
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> MirrorErrorKind {
        match self {
            Self::CreateDir { .. } | Self::WriteOutput { .. } => MirrorErrorKind::Filesystem,
            Self::Walk(_) | Self::ReadDir { .. } => MirrorErrorKind::Traversal,
            Self::Conversion { .. } => MirrorErrorKind::Conversion,
            Self::Setup { .. } => MirrorErrorKind::Setup,
            Self::Configuration { .. } => MirrorErrorKind::Configuration,
        }
    }

    /// Create a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::CreateDir { path, source } if source.kind() == io::ErrorKind::PermissionDenied => {
                format!("Permission denied creating {}", path.display())
            }
            Self::Walk(err) => match err.path() {
                Some(path) => format!("Cannot read {}: {}", path.display(), err),
                None => format!("Cannot read source tree: {}", err),
            },
            _ => self.to_string(),
        }
    }
}

/// Result type for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;
