//! Run statistics for mirror operations

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// What a mirror run did
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MirrorReport {
    /// Mirrored directories created by this run
    pub directories_created: usize,
    /// Mirrored directories that were already present
    pub directories_existing: usize,
    /// Files converted successfully
    pub files_converted: usize,
    /// Source files that did not carry the recognized extension
    pub files_skipped: usize,
    /// Source files whose conversion failed
    pub conversion_failures: Vec<PathBuf>,
    /// Wall time of the run in milliseconds
    pub elapsed_ms: u64,
    pub started_at: chrono::DateTime<chrono::Utc>,
}

impl Default for MirrorReport {
    fn default() -> Self {
        Self {
            directories_created: 0,
            directories_existing: 0,
            files_converted: 0,
            files_skipped: 0,
            conversion_failures: Vec::new(),
            elapsed_ms: 0,
            started_at: chrono::Utc::now(),
        }
    }
}

impl MirrorReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_failure(&mut self, source: PathBuf) {
        self.conversion_failures.push(source);
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);
    }

    /// Qualifying files seen, whatever the outcome
    pub fn files_attempted(&self) -> usize {
        self.files_converted + self.conversion_failures.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.conversion_failures.is_empty()
    }

    /// Get a formatted summary
    pub fn summary(&self) -> String {
        let mut line = format!(
            "Converted {} of {} files in {:.1}s, {} directories created ({} already present)",
            self.files_converted,
            self.files_attempted(),
            self.elapsed_ms as f32 / 1000.0,
            self.directories_created,
            self.directories_existing
        );
        if self.has_failures() {
            line.push_str(&format!(", {} failed", self.conversion_failures.len()));
        }
        line
    }

    /// Export to JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
