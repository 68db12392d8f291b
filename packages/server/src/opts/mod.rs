//! Server options document (YAML).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// On-disk options. Currently a single recognized key:
///
/// ```yaml
/// database_cluster:
///   - sqlite://fleet-a.db
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Options {
    #[serde(default)]
    pub database_cluster: Vec<String>,
}

impl Options {
    /// Read the options document from a YAML file.
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read options file {}", path.display()))?;
        serde_yaml::from_str(&raw)
            .with_context(|| format!("Failed to parse options file {}", path.display()))
    }

    /// Write the options document to a YAML file.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let raw = serde_yaml::to_string(self).context("Failed to serialize options")?;
        std::fs::write(path, raw)
            .with_context(|| format!("Failed to write options file {}", path.display()))
    }

    /// First cluster host, if any is configured.
    pub fn database_url(&self) -> Option<&str> {
        self.database_cluster.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    fn temp_path() -> std::path::PathBuf {
        std::env::temp_dir().join(format!("options-{}.yaml", Uuid::new_v4()))
    }

    #[test]
    fn options_round_trip_through_a_file() {
        let path = temp_path();
        let options = Options {
            database_cluster: vec![
                "sqlite://fleet-a.db".to_string(),
                "sqlite://fleet-b.db".to_string(),
            ],
        };

        options.write(&path).unwrap();
        let read_back = Options::read(&path).unwrap();
        assert_eq!(read_back, options);
        assert_eq!(read_back.database_url(), Some("sqlite://fleet-a.db"));

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn parses_the_recognized_key() {
        let options: Options =
            serde_yaml::from_str("database_cluster:\n  - sqlite://only.db\n").unwrap();
        assert_eq!(options.database_cluster, vec!["sqlite://only.db"]);
    }

    #[test]
    fn missing_key_defaults_to_empty() {
        let options: Options = serde_yaml::from_str("{}").unwrap();
        assert!(options.database_cluster.is_empty());
        assert_eq!(options.database_url(), None);
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(Options::read(temp_path()).is_err());
    }
}
