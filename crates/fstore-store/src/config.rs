use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use fstore_codec::{Codec, Encoding};

use crate::error::{StoreError, StoreResult};
use crate::file::StoreOptions;

/// Name of the store directory below a working directory.
pub const STORE_DIR_NAME: &str = "store";

/// Configuration for a [`FileStore`](crate::FileStore).
///
/// Every field is optional in the TOML form:
///
/// ```toml
/// directory = "/var/lib/orchestrator/store"
/// encoding = "json"            # json | toml | bincode
/// filename_extension = "json"  # defaults to the encoding's extension; "" for none
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub directory: PathBuf,
    pub encoding: Encoding,
    pub filename_extension: Option<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::from_working_directory(".")
    }
}

impl StoreConfig {
    /// JSON store in `<working_directory>/store`.
    pub fn from_working_directory(working_directory: impl AsRef<Path>) -> Self {
        Self {
            directory: working_directory.as_ref().join(STORE_DIR_NAME),
            encoding: Encoding::default(),
            filename_extension: None,
        }
    }

    /// Parse a TOML configuration document.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        toml::from_str(text).map_err(|e| StoreError::Config(e.to_string()))
    }

    /// Read a TOML configuration file.
    pub fn load(path: &Path) -> StoreResult<Self> {
        let text = fs::read_to_string(path).map_err(|e| StoreError::io(path, e))?;
        Self::from_toml_str(&text)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Extension of leaf files: the configured one, else the encoding's.
    pub fn extension(&self) -> &str {
        self.filename_extension
            .as_deref()
            .unwrap_or_else(|| self.encoding.extension())
    }

    pub fn options(&self) -> StoreOptions<Encoding> {
        StoreOptions {
            directory: self.directory.clone(),
            filename_extension: self.extension().to_string(),
            codec: self.encoding,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.directory, PathBuf::from("./store"));
        assert_eq!(c.encoding, Encoding::Json);
        assert_eq!(c.extension(), "json");
    }

    #[test]
    fn from_working_directory() {
        let c = StoreConfig::from_working_directory("/opt/work");
        assert_eq!(c.directory, PathBuf::from("/opt/work/store"));
    }

    #[test]
    fn parse_full_document() {
        let c = StoreConfig::from_toml_str(
            r#"
            directory = "/data/store"
            encoding = "toml"
            filename_extension = "state"
            "#,
        )
        .unwrap();
        assert_eq!(c.directory, PathBuf::from("/data/store"));
        assert_eq!(c.encoding, Encoding::Toml);
        assert_eq!(c.extension(), "state");
    }

    #[test]
    fn missing_fields_take_defaults() {
        let c = StoreConfig::from_toml_str("encoding = \"bincode\"").unwrap();
        assert_eq!(c.directory, PathBuf::from("./store"));
        assert_eq!(c.extension(), "bin");
    }

    #[test]
    fn empty_extension_is_kept() {
        let c = StoreConfig::from_toml_str("filename_extension = \"\"").unwrap();
        assert_eq!(c.extension(), "");
        assert_eq!(c.options().filename_extension, "");
    }

    #[test]
    fn unknown_fields_rejected() {
        let err = StoreConfig::from_toml_str("directroy = \"/typo\"").unwrap_err();
        assert!(matches!(err, StoreError::Config(_)));
    }

    #[test]
    fn unknown_encoding_rejected() {
        assert!(StoreConfig::from_toml_str("encoding = \"yaml\"").is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fstore.toml");
        fs::write(&path, "directory = \"/srv/store\"\n").unwrap();

        let c = StoreConfig::load(&path).unwrap();
        assert_eq!(c.directory, PathBuf::from("/srv/store"));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(err.is_io());
    }

    #[test]
    fn options_carry_encoding() {
        let mut c = StoreConfig::from_working_directory("/w");
        c.encoding = Encoding::Bincode;
        let options = c.options();
        assert_eq!(options.directory, PathBuf::from("/w/store"));
        assert_eq!(options.filename_extension, "bin");
        assert_eq!(options.codec, Encoding::Bincode);
    }
}
