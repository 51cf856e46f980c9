//! Documentation converters
//!
//! A converter turns one source file into markup text written to an already
//! opened destination file. The walker never looks inside the text.

use std::fs::File;
use std::path::Path;

pub mod command;

pub use command::CommandConverter;

/// How a single conversion ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    Succeeded,
    /// The tool ran and exited unsuccessfully (`None` when killed by a signal)
    Failed { code: Option<i32> },
    /// The tool could not be started at all
    SpawnFailed { message: String },
}

impl ConversionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded)
    }

    /// Short human description of a failed outcome
    pub fn describe(&self) -> String {
        match self {
            Self::Succeeded => "succeeded".to_string(),
            Self::Failed { code: Some(code) } => format!("exited with status {}", code),
            Self::Failed { code: None } => "terminated by signal".to_string(),
            Self::SpawnFailed { message } => format!("could not start: {}", message),
        }
    }
}

/// Source file in, markup text out
pub trait Converter {
    /// Convert `source`, writing markup into `output`.
    ///
    /// `output` has already been truncated; whatever is written stays even on failure.
    fn convert(&self, source: &Path, output: File) -> ConversionOutcome;
}

impl<F> Converter for F
where
    F: Fn(&Path, File) -> ConversionOutcome,
{
    fn convert(&self, source: &Path, output: File) -> ConversionOutcome {
        self(source, output)
    }
}
