use std::path::Path;

/// Return true if `path` is a file whose name ends with `extension` and has
/// something in front of it
pub fn is_source_file(path: &Path, extension: &str) -> bool {
    path.is_file()
        && path
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name.len() > extension.len() && name.ends_with(extension))
}
