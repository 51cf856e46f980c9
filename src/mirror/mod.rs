//! Source tree to documentation tree mirroring
//!
//! This module contains the walker, its configuration, path mapping and run statistics.

pub mod config;
pub mod engine;
pub mod filter;
pub mod path_mapping;
pub mod setup;
pub mod stats;

pub use config::{ConversionFailurePolicy, DirPolicy, MirrorConfig};
pub use engine::{mirror, DocMirror, MirrorEvent};
pub use path_mapping::{PathMapper, PathMapping};
pub use setup::SetupStep;
pub use stats::MirrorReport;
