//! Loading of the `~/.beachfrontrc` credentials file
use crate::error::{ClientError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".beachfrontrc";

pub const DOMAIN: &str = "domain";
pub const AUTH: &str = "auth";
pub const PLANET_KEY: &str = "planet_key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    fields: HashMap<String, String>,
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ClientError::NoHomeDir)?;
        Ok(home.join(CONFIG_FILE))
    }

    /// Reads the requested `fields` from the JSON object stored at `path`.
    ///
    /// If any one field is missing or empty the whole read fails, so callers
    /// never see a partial credential set.
    pub fn read<P: AsRef<Path>>(path: P, fields: &[&str]) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ClientError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let all: HashMap<String, String> =
            serde_json::from_str(&content).map_err(|source| ClientError::ConfigParse {
                path: path.to_path_buf(),
                source,
            })?;
        Self::select(all, fields)
    }

    fn select(mut all: HashMap<String, String>, fields: &[&str]) -> Result<Self> {
        let fields = fields
            .iter()
            .map(|&field| match all.remove(field) {
                Some(value) if !value.is_empty() => Ok((field.to_owned(), value)),
                _ => Err(ClientError::MissingField(field.to_owned())),
            })
            .collect::<Result<HashMap<_, _>>>()?;
        Ok(Self { fields })
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    /// Like `get`, for fields the caller asked for when reading.
    pub fn require(&self, field: &str) -> Result<&str> {
        self.get(field)
            .ok_or_else(|| ClientError::MissingField(field.to_owned()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_requested_fields() {
        let file = write_config(
            r#"{"domain": "example.com", "auth": "secret", "planet_key": "abc123"}"#,
        );
        let config = Config::read(file.path(), &[DOMAIN, AUTH]).unwrap();
        assert_eq!(config.len(), 2);
        assert_eq!(config.get(DOMAIN), Some("example.com"));
        assert_eq!(config.get(AUTH), Some("secret"));
        // Only the requested subset is kept
        assert_eq!(config.get(PLANET_KEY), None);
    }

    #[test]
    fn test_missing_field_fails() {
        let file = write_config(r#"{"domain": "example.com"}"#);
        let err = Config::read(file.path(), &[DOMAIN, AUTH]).unwrap_err();
        assert!(matches!(err, ClientError::MissingField(ref f) if f == "auth"));
        assert_eq!(err.to_string(), "Missing item in .beachfrontrc: 'auth'");
    }

    #[test]
    fn test_empty_field_fails() {
        let file = write_config(r#"{"domain": "example.com", "auth": ""}"#);
        let err = Config::read(file.path(), &[DOMAIN, AUTH]).unwrap_err();
        assert!(matches!(err, ClientError::MissingField(ref f) if f == "auth"));
    }

    #[test]
    fn test_malformed_file_fails() {
        let file = write_config(r#"{"domain": 42}"#);
        let err = Config::read(file.path(), &[DOMAIN]).unwrap_err();
        assert!(matches!(err, ClientError::ConfigParse { .. }));
    }

    #[test]
    fn test_unreadable_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::read(dir.path().join(CONFIG_FILE), &[DOMAIN]).unwrap_err();
        assert!(matches!(err, ClientError::ConfigRead { .. }));
    }

    #[test]
    fn test_require() {
        let file = write_config(r#"{"domain": "example.com"}"#);
        let config = Config::read(file.path(), &[DOMAIN]).unwrap();
        assert_eq!(config.require(DOMAIN).unwrap(), "example.com");
        assert!(config.require(AUTH).is_err());
    }
}
