//! Configuration options for mirroring a source tree into documentation

use std::path::PathBuf;

use super::path_mapping::PathMapping;
use crate::error::{MirrorError, MirrorResult};

/// When mirrored directories are created
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DirPolicy {
    /// Mirror every directory visited in the source tree
    #[default]
    Eager,
    /// Only mirror directories that contain at least one qualifying file
    Lazy,
}

/// What to do when the documentation tool fails on a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConversionFailurePolicy {
    /// Keep whatever the tool wrote and move on without a word
    Ignore,
    /// Log a warning, keep going
    #[default]
    Warn,
    /// Stop the run at the first failing file
    Abort,
}

/// Mirror run configuration
#[derive(Debug, Clone)]
pub struct MirrorConfig {
    /// Root of the source tree
    pub source_root: PathBuf,
    /// Root of the documentation tree
    pub dest_root: PathBuf,
    /// Suffix a file name must end with to be converted (normalized to start with `.`)
    pub extension: String,
    /// Suffix given to generated documentation files
    pub markup_extension: String,
    pub mapping: PathMapping,
    pub dir_policy: DirPolicy,
    pub on_conversion_failure: ConversionFailurePolicy,
    /// Visit siblings in file-name order instead of filesystem order
    pub sort_entries: bool,
    /// Follow symbolic links while walking
    pub follow_links: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            source_root: PathBuf::from("src"),
            dest_root: PathBuf::from("docs"),
            extension: ".js".to_string(),
            markup_extension: ".md".to_string(),
            mapping: PathMapping::default(),
            dir_policy: DirPolicy::default(),
            on_conversion_failure: ConversionFailurePolicy::default(),
            sort_entries: false,
            follow_links: false,
        }
    }
}

impl MirrorConfig {
    /// Create a configuration for the given roots and source extension
    pub fn new(
        source_root: impl Into<PathBuf>,
        dest_root: impl Into<PathBuf>,
        extension: &str,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            dest_root: dest_root.into(),
            extension: normalize_extension(extension),
            ..Default::default()
        }
    }

    pub fn with_markup_extension(mut self, extension: &str) -> Self {
        self.markup_extension = normalize_extension(extension);
        self
    }

    pub fn with_mapping(mut self, mapping: PathMapping) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn with_dir_policy(mut self, policy: DirPolicy) -> Self {
        self.dir_policy = policy;
        self
    }

    pub fn with_failure_policy(mut self, policy: ConversionFailurePolicy) -> Self {
        self.on_conversion_failure = policy;
        self
    }

    pub fn with_sorted_entries(mut self, enabled: bool) -> Self {
        self.sort_entries = enabled;
        self
    }

    pub fn with_follow_links(mut self, enabled: bool) -> Self {
        self.follow_links = enabled;
        self
    }

    /// Validate configuration before a run
    pub fn validate(&self) -> MirrorResult<()> {
        if self.extension.len() < 2 {
            return Err(MirrorError::configuration("source extension must not be empty"));
        }

        if self.markup_extension.len() < 2 {
            return Err(MirrorError::configuration("markup extension must not be empty"));
        }

        if self.extension == self.markup_extension {
            return Err(MirrorError::configuration(format!(
                "source and markup extensions are both '{}'",
                self.extension
            )));
        }

        if !self.source_root.is_dir() {
            return Err(MirrorError::configuration(format!(
                "source root {} is not a directory",
                self.source_root.display()
            )));
        }

        Ok(())
    }
}

/// Trim and prefix with `.` so `js`, `.js` and ` .js ` all mean the same suffix
pub fn normalize_extension(extension: &str) -> String {
    let trimmed = extension.trim();
    if trimmed.starts_with('.') {
        trimmed.to_string()
    } else {
        format!(".{}", trimmed)
    }
}
