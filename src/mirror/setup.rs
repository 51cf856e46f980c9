//! One-time environment setup run before a mirror

use std::process::Command;

use tracing::info;

use crate::error::{MirrorError, MirrorResult};

/// Installs the documentation tool before the walk starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    program: String,
    args: Vec<String>,
}

impl Default for SetupStep {
    fn default() -> Self {
        Self::new("npm", ["install", "jsdoc-to-markdown"])
    }
}

impl SetupStep {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Full command line, for messages
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run the step to completion; any failure is fatal.
    pub fn run(&self) -> MirrorResult<()> {
        info!(command = %self.command_line(), "running setup step");

        let status = Command::new(&self.program)
            .args(&self.args)
            .status()
            .map_err(|e| MirrorError::Setup {
                command: self.command_line(),
                reason: e.to_string(),
            })?;

        if !status.success() {
            return Err(MirrorError::Setup {
                command: self.command_line(),
                reason: match status.code() {
                    Some(code) => format!("exited with status {}", code),
                    None => "terminated by signal".to_string(),
                },
            });
        }

        Ok(())
    }
}
