// # File Option Source
//
// Reads options from a JSON object of string values:
//
// ```json
// {
//   "domain-name": "example.com",
//   "id-broker-value": "broker.us-west-2.example.net"
// }
// ```
//
// The file is read once at startup. A missing file, malformed JSON or a
// non-string value is a configuration error.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::error::{Error, Result};
use crate::traits::OptionSource;

/// Option source loaded from a JSON config file
#[derive(Debug, Clone)]
pub struct FileOptionSource {
    path: PathBuf,
    values: HashMap<String, String>,
}

impl FileOptionSource {
    /// Load options from `path`
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config file {}: {}", path.display(), e))
        })?;

        let values = Self::parse(&content)
            .map_err(|e| Error::config(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Loaded {} option(s) from {}", values.len(), path.display());

        Ok(Self {
            path: path.to_path_buf(),
            values,
        })
    }

    /// Parse a JSON object of string values
    fn parse(content: &str) -> Result<HashMap<String, String>> {
        let json: Value = serde_json::from_str(content)?;
        let object = json
            .as_object()
            .ok_or_else(|| Error::config("config file must contain a JSON object"))?;

        object
            .iter()
            .map(|(key, value)| match value {
                Value::String(s) => Ok((key.clone(), s.clone())),
                other => Err(Error::config(format!(
                    "option '{}' must be a string, got {}",
                    key, other
                ))),
            })
            .collect()
    }

    /// Path the options were loaded from
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl OptionSource for FileOptionSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).filter(|value| !value.is_empty()).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_string_values() {
        let file = write_config(
            r#"{"domain-name": "example.com", "id-broker-value": "broker.example.net"}"#,
        );

        let source = FileOptionSource::load(file.path()).unwrap();
        assert_eq!(source.get("domain-name", ""), "example.com");
        assert_eq!(source.get("id-broker-value", ""), "broker.example.net");
        assert_eq!(source.get("ssp-value", ""), "");
        assert_eq!(source.path(), file.path());
    }

    #[test]
    fn test_non_string_value_is_rejected() {
        let file = write_config(r#"{"domain-name": 42}"#);

        let err = FileOptionSource::load(file.path()).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("domain-name"));
    }

    #[test]
    fn test_non_object_is_rejected() {
        let file = write_config(r#"["domain-name"]"#);
        assert!(FileOptionSource::load(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = FileOptionSource::load(dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_empty_value_is_unset() {
        let file = write_config(r#"{"ssp-name": "", "ssp-value": "ssp.example.net"}"#);

        let source = FileOptionSource::load(file.path()).unwrap();
        assert_eq!(source.lookup("ssp-name"), None);
        assert_eq!(source.get("ssp-name", "ssp"), "ssp");
        assert_eq!(source.get("ssp-value", ""), "ssp.example.net");
    }
}
