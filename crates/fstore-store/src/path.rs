//! Translation of logical keys into filesystem paths.

use std::path::{Path, PathBuf};

use fstore_types::KEY_SEPARATOR;

/// Maps hierarchical keys onto paths below a base directory.
///
/// Keys are split on `/` and empty segments are dropped, so `"a/b"`,
/// `"/a/b"` and `"a//b/"` all name the same path and no key can replace the
/// base directory the way an absolute [`Path::join`] would. Rejecting `.`
/// and `..` segments is left to key validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathMapper {
    directory: PathBuf,
    extension: Option<String>,
}

impl PathMapper {
    /// Create a mapper rooted at `directory`. An empty `extension` means
    /// leaf files carry no extension at all.
    pub fn new(directory: impl Into<PathBuf>, extension: &str) -> Self {
        let extension = extension.trim_start_matches('.');
        Self {
            directory: directory.into(),
            extension: (!extension.is_empty()).then(|| extension.to_string()),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn extension(&self) -> Option<&str> {
        self.extension.as_deref()
    }

    /// Path of the file holding a single leaf value.
    pub fn file_path(&self, key: &str) -> PathBuf {
        self.key_path(key, true)
    }

    /// Path of the directory holding a key's children.
    pub fn dir_path(&self, key: &str) -> PathBuf {
        self.key_path(key, false)
    }

    /// `directory/key`, with `.extension` appended to the last segment when
    /// requested and configured. The extension is appended, never
    /// substituted, so `"a.b"` maps to `a.b.json`.
    pub fn key_path(&self, key: &str, with_extension: bool) -> PathBuf {
        let mut path = self.directory.clone();
        let mut segments = key.split(KEY_SEPARATOR).filter(|s| !s.is_empty()).peekable();

        while let Some(segment) = segments.next() {
            match (&self.extension, with_extension, segments.peek()) {
                (Some(ext), true, None) => path.push(format!("{segment}.{ext}")),
                _ => path.push(segment),
            }
        }

        path
    }

    /// Strip the configured extension from a directory entry name, yielding
    /// the leaf key segment. Names without the extension are returned as-is.
    pub fn leaf_name<'a>(&self, file_name: &'a str) -> &'a str {
        let Some(ext) = &self.extension else {
            return file_name;
        };
        file_name
            .strip_suffix(ext.as_str())
            .and_then(|rest| rest.strip_suffix('.'))
            .filter(|stem| !stem.is_empty())
            .unwrap_or(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn mapper() -> PathMapper {
        PathMapper::new("/var/store", "json")
    }

    // -----------------------------------------------------------------------
    // key_path
    // -----------------------------------------------------------------------

    #[test]
    fn leaf_file_gets_extension() {
        assert_eq!(
            mapper().file_path("deployments/app"),
            PathBuf::from("/var/store/deployments/app.json")
        );
    }

    #[test]
    fn directory_has_no_extension() {
        assert_eq!(
            mapper().dir_path("deployments/app"),
            PathBuf::from("/var/store/deployments/app")
        );
    }

    #[test]
    fn extension_is_appended_not_substituted() {
        assert_eq!(
            mapper().file_path("nodes/web.v2"),
            PathBuf::from("/var/store/nodes/web.v2.json")
        );
    }

    #[test]
    fn empty_extension_means_bare_files() {
        let m = PathMapper::new("/var/store", "");
        assert_eq!(m.extension(), None);
        assert_eq!(m.file_path("a/b"), PathBuf::from("/var/store/a/b"));
    }

    #[test]
    fn leading_dot_in_extension_is_ignored() {
        let m = PathMapper::new("/var/store", ".toml");
        assert_eq!(m.file_path("a"), PathBuf::from("/var/store/a.toml"));
    }

    #[test]
    fn absolute_keys_stay_below_directory() {
        assert_eq!(mapper().file_path("/a/b"), PathBuf::from("/var/store/a/b.json"));
    }

    #[test]
    fn redundant_separators_collapse() {
        assert_eq!(mapper().file_path("a//b/"), mapper().file_path("a/b"));
    }

    #[test]
    fn root_prefix_is_directory() {
        assert_eq!(mapper().dir_path(""), PathBuf::from("/var/store"));
        assert_eq!(mapper().dir_path("/"), PathBuf::from("/var/store"));
    }

    // -----------------------------------------------------------------------
    // leaf_name
    // -----------------------------------------------------------------------

    #[test]
    fn leaf_name_strips_configured_extension() {
        let m = mapper();
        assert_eq!(m.leaf_name("app.json"), "app");
        assert_eq!(m.leaf_name("web.v2.json"), "web.v2");
    }

    #[test]
    fn leaf_name_keeps_foreign_names() {
        let m = mapper();
        assert_eq!(m.leaf_name("notes.txt"), "notes.txt");
        assert_eq!(m.leaf_name("appjson"), "appjson");
        assert_eq!(m.leaf_name(".json"), ".json");
    }

    #[test]
    fn leaf_name_without_extension() {
        let m = PathMapper::new("/var/store", "");
        assert_eq!(m.leaf_name("app.json"), "app.json");
    }

    // -----------------------------------------------------------------------
    // Properties
    // -----------------------------------------------------------------------

    proptest! {
        #[test]
        fn mapped_paths_stay_below_directory(key in "[a-z/]{0,24}") {
            let m = mapper();
            prop_assert!(m.file_path(&key).starts_with(m.directory()));
            prop_assert!(m.dir_path(&key).starts_with(m.directory()));
        }

        #[test]
        fn leaf_name_inverts_file_path(segments in prop::collection::vec("[a-z0-9_.-]{1,10}", 1..5)) {
            prop_assume!(segments.iter().all(|s| s != "." && s != ".."));
            let m = mapper();
            let key = segments.join("/");
            let path = m.file_path(&key);
            let file_name = path.file_name().unwrap().to_str().unwrap();
            prop_assert_eq!(m.leaf_name(file_name), segments.last().unwrap().as_str());
        }
    }
}
