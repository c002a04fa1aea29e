use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default output format for `aidep check`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Global user configuration loaded from `~/.aidep/config.toml`.
///
/// A missing or malformed file yields the defaults; configuration can tune
/// the tool but never stop a scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Conflict ids suppressed from reports.
    #[serde(default)]
    pub ignore: Vec<String>,

    #[serde(default)]
    pub output: OutputFormat,
}

impl GlobalConfig {
    /// Load the global configuration, or return defaults if the file doesn't
    /// exist or fails to parse.
    pub fn load() -> Self {
        Self::load_from(&Self::default_path())
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.is_file() {
            return Self::default();
        }
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => {
                tracing::warn!("failed to read {}: {e}", path.display());
                return Self::default();
            }
        };
        match toml::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Returns the default path to the global config file.
    pub fn default_path() -> PathBuf {
        dirs_path().join("config.toml")
    }

    pub fn is_ignored(&self, conflict_id: &str) -> bool {
        self.ignore.iter().any(|id| id == conflict_id)
    }
}

/// Returns the path to the aidep data directory (`~/.aidep/`).
pub fn dirs_path() -> PathBuf {
    let home = std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .unwrap_or_else(|_| ".".to_string());
    Path::new(&home).join(".aidep")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let config = GlobalConfig::load_from(Path::new("/nonexistent/config.toml"));
        assert!(config.ignore.is_empty());
        assert_eq!(config.output, OutputFormat::Text);
    }

    #[test]
    fn parses_ignore_and_output() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(
            &path,
            "ignore = [\"langchain-llama-sqlalchemy\"]\noutput = \"json\"\n",
        )
        .unwrap();

        let config = GlobalConfig::load_from(&path);
        assert!(config.is_ignored("langchain-llama-sqlalchemy"));
        assert!(!config.is_ignored("openai-langchain-breaking"));
        assert_eq!(config.output, OutputFormat::Json);
    }

    #[test]
    fn malformed_file_yields_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        std::fs::write(&path, "ignore = not-a-list").unwrap();

        let config = GlobalConfig::load_from(&path);
        assert!(config.ignore.is_empty());
    }
}
