//! Core walker that mirrors a source tree into a documentation tree

use std::collections::HashSet;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use super::config::{ConversionFailurePolicy, DirPolicy, MirrorConfig};
use super::filter::is_source_file;
use super::path_mapping::PathMapper;
use super::stats::MirrorReport;
use crate::converter::{CommandConverter, ConversionOutcome, Converter};
use crate::error::{MirrorError, MirrorResult};

/// Progress notifications emitted while a run is underway
#[derive(Debug)]
pub enum MirrorEvent<'a> {
    DirectoryCreated {
        path: &'a Path,
    },
    Converted {
        source: &'a Path,
        destination: &'a Path,
    },
    ConversionFailed {
        source: &'a Path,
        destination: &'a Path,
        outcome: &'a ConversionOutcome,
    },
}

type Observer = Box<dyn Fn(&MirrorEvent<'_>)>;

/// Mutable bookkeeping for a single run
struct RunState {
    report: MirrorReport,
    ensured: HashSet<PathBuf>,
}

/// Walks a source tree depth-first and converts every qualifying file into
/// the mirrored location under the destination root.
pub struct DocMirror<C> {
    config: MirrorConfig,
    converter: C,
    observer: Option<Observer>,
}

impl<C: Converter> DocMirror<C> {
    pub fn new(config: MirrorConfig, converter: C) -> Self {
        Self {
            config,
            converter,
            observer: None,
        }
    }

    /// Receive an event for every created directory and converted file
    pub fn with_observer(mut self, observer: impl Fn(&MirrorEvent<'_>) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    pub fn config(&self) -> &MirrorConfig {
        &self.config
    }

    /// Mirror the whole tree.
    ///
    /// Stops at the first filesystem error, leaving whatever was already
    /// written in place. Conversion failures follow
    /// [`MirrorConfig::on_conversion_failure`].
    pub fn run(&self) -> MirrorResult<MirrorReport> {
        self.config.validate()?;

        let start = Instant::now();
        let mapper = PathMapper::new(
            self.config.mapping,
            &self.config.source_root,
            &self.config.dest_root,
        )?;
        let mut state = RunState {
            report: MirrorReport::new(),
            ensured: HashSet::new(),
        };

        info!(
            source = %self.config.source_root.display(),
            destination = %mapper.dest_base().display(),
            extension = %self.config.extension,
            mapping = self.config.mapping.as_str(),
            "mirroring documentation"
        );

        // An unwritable destination must fail before any conversion runs
        self.ensure_dir(mapper.dest_base(), &mut state)?;

        let excluded = self.destination_inside_source(&mapper)?;
        if let Some(excluded) = &excluded {
            debug!(path = %excluded.display(), "destination lies inside the source tree, not walking it");
        }

        let mut walker = WalkDir::new(&self.config.source_root).follow_links(self.config.follow_links);
        if self.config.sort_entries {
            walker = walker.sort_by_file_name();
        }

        let entries = walker
            .into_iter()
            .filter_entry(|entry| excluded.as_deref() != Some(entry.path()));
        for entry in entries {
            let entry = entry?;
            if entry.file_type().is_dir() {
                self.process_directory(entry.path(), &mapper, &mut state)?;
            }
        }

        state.report.finish(start.elapsed());
        info!("{}", state.report.summary());
        Ok(state.report)
    }

    /// The output subtree as the walker would reach it, when it sits below the source root.
    ///
    /// Walking it would mirror freshly created directories again, without end.
    fn destination_inside_source(&self, mapper: &PathMapper) -> MirrorResult<Option<PathBuf>> {
        let source = resolve(&self.config.source_root)?;

        for candidate in [self.config.dest_root.as_path(), mapper.dest_base()] {
            let resolved = resolve(candidate)?;
            if let Ok(relative) = resolved.strip_prefix(&source) {
                // dest == source is fine for the root itself; its nested base may still need skipping
                if relative.as_os_str().is_empty() {
                    continue;
                }
                return Ok(Some(self.config.source_root.join(relative)));
            }
        }

        Ok(None)
    }

    fn process_directory(&self, dir: &Path, mapper: &PathMapper, state: &mut RunState) -> MirrorResult<()> {
        let mirrored = mapper.mirror_dir(dir)?;
        debug!(source = %dir.display(), mirrored = %mirrored.display(), "visiting directory");

        if self.config.dir_policy == DirPolicy::Eager {
            self.ensure_dir(&mirrored, state)?;
        }

        for source in self.source_files(dir, state)? {
            let Some(destination) =
                mapper.mirror_file(&source, &self.config.extension, &self.config.markup_extension)?
            else {
                state.report.files_skipped += 1;
                continue;
            };

            self.ensure_dir(&mirrored, state)?;
            self.convert_file(&source, &destination, state)?;
        }

        Ok(())
    }

    /// Qualifying files directly inside `dir`; everything else is counted as skipped
    fn source_files(&self, dir: &Path, state: &mut RunState) -> MirrorResult<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in fs::read_dir(dir).map_err(|e| MirrorError::read_dir(dir, e))? {
            let path = entry.map_err(|e| MirrorError::read_dir(dir, e))?.path();
            if is_source_file(&path, &self.config.extension) {
                files.push(path);
            } else if path.is_file() {
                state.report.files_skipped += 1;
            }
        }

        if self.config.sort_entries {
            files.sort();
        }

        Ok(files)
    }

    /// Create `dir` and its ancestors; an existing directory counts as success
    fn ensure_dir(&self, dir: &Path, state: &mut RunState) -> MirrorResult<()> {
        if !state.ensured.insert(dir.to_path_buf()) {
            return Ok(());
        }

        if dir.is_dir() {
            state.report.directories_existing += 1;
            return Ok(());
        }

        fs::create_dir_all(dir).map_err(|e| MirrorError::create_dir(dir, e))?;
        state.report.directories_created += 1;
        debug!(path = %dir.display(), "created directory");
        self.emit(&MirrorEvent::DirectoryCreated { path: dir });
        Ok(())
    }

    fn convert_file(&self, source: &Path, destination: &Path, state: &mut RunState) -> MirrorResult<()> {
        let output = File::create(destination).map_err(|e| MirrorError::write_output(destination, e))?;
        let outcome = self.converter.convert(source, output);

        if outcome.is_success() {
            state.report.files_converted += 1;
            debug!(source = %source.display(), destination = %destination.display(), "converted");
            self.emit(&MirrorEvent::Converted {
                source,
                destination,
            });
            return Ok(());
        }

        state.report.record_failure(source.to_path_buf());
        self.emit(&MirrorEvent::ConversionFailed {
            source,
            destination,
            outcome: &outcome,
        });

        match self.config.on_conversion_failure {
            ConversionFailurePolicy::Ignore => {
                debug!(source = %source.display(), "conversion {}", outcome.describe());
            }
            ConversionFailurePolicy::Warn => {
                warn!(source = %source.display(), "conversion {}", outcome.describe());
            }
            ConversionFailurePolicy::Abort => {
                return Err(MirrorError::Conversion {
                    path: source.to_path_buf(),
                    reason: outcome.describe(),
                });
            }
        }

        Ok(())
    }

    fn emit(&self, event: &MirrorEvent<'_>) {
        if let Some(observer) = &self.observer {
            observer(event);
        }
    }
}

fn resolve(path: &Path) -> MirrorResult<PathBuf> {
    path.canonicalize()
        .map_err(|e| MirrorError::configuration(format!("cannot resolve {}: {}", path.display(), e)))
}

/// Mirror `source_root` into `dest_root` with the default `jsdoc2md` converter,
/// converting every file ending in `extension`.
pub fn mirror(
    source_root: impl AsRef<Path>,
    dest_root: impl AsRef<Path>,
    extension: &str,
) -> MirrorResult<MirrorReport> {
    let config = MirrorConfig::new(source_root.as_ref(), dest_root.as_ref(), extension);
    DocMirror::new(config, CommandConverter::default()).run()
}
