//! Documentation tree mirroring
//!
//! Walks a source tree, recreates its directory layout under a documentation
//! root and runs an external extractor (such as `jsdoc2md`) on every script
//! file, capturing its output as a markup file in the mirrored location.

pub mod cli;
pub mod converter;
pub mod error;
pub mod mirror;

// Re-export commonly used types
pub use converter::{CommandConverter, ConversionOutcome, Converter};
pub use error::{MirrorError, MirrorErrorKind, MirrorResult};
pub use mirror::{
    mirror, ConversionFailurePolicy, DirPolicy, DocMirror, MirrorConfig, MirrorEvent, MirrorReport,
    PathMapping, SetupStep,
};
