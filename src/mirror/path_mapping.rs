use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{MirrorError, MirrorResult};

/// How a source directory is placed under the destination root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PathMapping {
    /// `dest/<source root name>/<relative>`: `src/sub` under `docs` becomes `docs/src/sub`.
    #[default]
    Nested,
    /// `dest/<relative>`: `src/sub` under `docs` becomes `docs/sub`.
    Flattened,
}

impl PathMapping {
    pub fn as_str(&self) -> &'static str {
        match self {
            PathMapping::Nested => "nested",
            PathMapping::Flattened => "flattened",
        }
    }
}

/// Maps paths inside a source tree onto the mirrored documentation tree.
///
/// The mapping only depends on the path relative to the source root, so it is
/// invertible with [`PathMapper::source_dir_for`].
#[derive(Debug, Clone)]
pub struct PathMapper {
    source_root: PathBuf,
    dest_base: PathBuf,
}

impl PathMapper {
    pub fn new(mapping: PathMapping, source_root: &Path, dest_root: &Path) -> MirrorResult<Self> {
        let dest_base = match mapping {
            PathMapping::Flattened => dest_root.to_path_buf(),
            PathMapping::Nested => dest_root.join(root_name(source_root)?),
        };

        Ok(Self {
            source_root: source_root.to_path_buf(),
            dest_base,
        })
    }

    /// Directory that mirrors the source root itself
    pub fn dest_base(&self) -> &Path {
        &self.dest_base
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    /// Mirrored directory for a directory inside the source tree
    pub fn mirror_dir(&self, source_dir: &Path) -> MirrorResult<PathBuf> {
        let relative = source_dir.strip_prefix(&self.source_root).map_err(|_| {
            MirrorError::configuration(format!(
                "{} is outside the source root {}",
                source_dir.display(),
                self.source_root.display()
            ))
        })?;
        Ok(self.dest_base.join(relative))
    }

    /// Mirrored documentation file for a qualifying source file.
    ///
    /// Only the trailing `source_ext` is replaced, so `a.test.js` becomes `a.test.md`.
    /// Returns `None` when the file name does not qualify.
    pub fn mirror_file(
        &self,
        source_file: &Path,
        source_ext: &str,
        markup_ext: &str,
    ) -> MirrorResult<Option<PathBuf>> {
        let Some(parent) = source_file.parent() else {
            return Ok(None);
        };
        let Some(name) = source_file.file_name().and_then(OsStr::to_str) else {
            return Ok(None);
        };
        let Some(doc_name) = markup_file_name(name, source_ext, markup_ext) else {
            return Ok(None);
        };
        Ok(Some(self.mirror_dir(parent)?.join(doc_name)))
    }

    /// Inverse of [`PathMapper::mirror_dir`]
    pub fn source_dir_for(&self, mirrored_dir: &Path) -> Option<PathBuf> {
        mirrored_dir
            .strip_prefix(&self.dest_base)
            .ok()
            .map(|relative| self.source_root.join(relative))
    }
}

/// `name<source_ext>` -> `name<markup_ext>`; `None` if `file_name` does not carry
/// the extension or has nothing in front of it.
pub fn markup_file_name(file_name: &str, source_ext: &str, markup_ext: &str) -> Option<String> {
    let stem = file_name.strip_suffix(source_ext)?;
    if stem.is_empty() {
        return None;
    }
    Some(format!("{}{}", stem, markup_ext))
}

fn root_name(source_root: &Path) -> MirrorResult<PathBuf> {
    if let Some(name) = source_root.file_name() {
        return Ok(PathBuf::from(name));
    }

    // `.`, `..` and friends have no final component until resolved
    let resolved = source_root
        .canonicalize()
        .map_err(|e| MirrorError::configuration(format!("cannot resolve {}: {}", source_root.display(), e)))?;
    resolved
        .file_name()
        .map(PathBuf::from)
        .ok_or_else(|| {
            MirrorError::configuration(format!(
                "source root {} has no name to nest under the destination",
                source_root.display()
            ))
        })
}
