use docmirror::mirror::path_mapping::{markup_file_name, PathMapper, PathMapping};
use pretty_assertions::assert_eq;
use std::path::{Path, PathBuf};

#[test]
fn test_markup_file_name() {
    assert_eq!(markup_file_name("a.js", ".js", ".md"), Some("a.md".to_string()));
    assert_eq!(markup_file_name("a.min.js", ".js", ".md"), Some("a.min.md".to_string()));
    assert_eq!(markup_file_name("a.json", ".js", ".md"), None);
    assert_eq!(markup_file_name(".js", ".js", ".md"), None);
}

#[test]
fn test_distinct_sources_map_to_distinct_docs() {
    let mapper = PathMapper::new(PathMapping::Nested, Path::new("src"), Path::new("docs")).unwrap();
    let sources = ["src/a.js", "src/sub/a.js", "src/sub/deeper/a.js", "src/b.js"];

    let mut mapped: Vec<PathBuf> = sources
        .iter()
        .map(|s| mapper.mirror_file(Path::new(s), ".js", ".md").unwrap().unwrap())
        .collect();
    mapped.sort();
    mapped.dedup();

    assert_eq!(mapped.len(), sources.len());
}

#[test]
fn test_mapping_is_deterministic() {
    for mapping in [PathMapping::Nested, PathMapping::Flattened] {
        let first = PathMapper::new(mapping, Path::new("src"), Path::new("docs")).unwrap();
        let second = PathMapper::new(mapping, Path::new("src"), Path::new("docs")).unwrap();
        let source = Path::new("src/api/vote.js");
        assert_eq!(
            first.mirror_file(source, ".js", ".md").unwrap(),
            second.mirror_file(source, ".js", ".md").unwrap()
        );
    }
}
