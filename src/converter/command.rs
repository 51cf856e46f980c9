use std::fs::File;
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use super::{ConversionOutcome, Converter};

/// Default documentation extractor for JavaScript sources
pub const DEFAULT_CONVERTER: &str = "jsdoc2md";

/// Runs an external program as `program [args...] <source>` with its standard
/// output redirected into the destination file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandConverter {
    program: String,
    args: Vec<String>,
}

impl Default for CommandConverter {
    fn default() -> Self {
        Self::new(DEFAULT_CONVERTER)
    }
}

impl CommandConverter {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Extra arguments placed before the source path
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl Converter for CommandConverter {
    fn convert(&self, source: &Path, output: File) -> ConversionOutcome {
        debug!(program = %self.program, source = %source.display(), "running converter");

        let status = Command::new(&self.program)
            .args(&self.args)
            .arg(source)
            .stdin(Stdio::null())
            .stdout(Stdio::from(output))
            .stderr(Stdio::inherit())
            .status();

        match status {
            Ok(status) if status.success() => ConversionOutcome::Succeeded,
            Ok(status) => ConversionOutcome::Failed {
                code: status.code(),
            },
            Err(e) => ConversionOutcome::SpawnFailed {
                message: e.to_string(),
            },
        }
    }
}
