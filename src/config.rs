use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::help::{BotIdentity, FormatterConfig};

fn default_prefix() -> String {
    "!".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Prefix shown in signatures and the ending note, e.g. `!` or `<@42> `.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default)]
    pub bot: BotIdentity,
    /// Path to the catalog JSON file.
    #[serde(default)]
    pub catalog: Option<PathBuf>,
    #[serde(default)]
    pub formatter: FormatterConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            bot: BotIdentity::default(),
            catalog: None,
            formatter: FormatterConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("Invalid JSON in config: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("IO error reading config: {0}")]
    IoError(#[from] std::io::Error),
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|p| p.join(".config").join("helpbook.json"))
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    let path = config_path().ok_or_else(|| {
        ConfigError::NotFound(PathBuf::from("~/.config/helpbook.json"))
    })?;

    load_config_from(&path)
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Err(ConfigError::NotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn deserialize_config() {
        let json = r#"{
            "prefix": "<@42> ",
            "bot": { "id": "42", "name": "helpbot" },
            "catalog": "/tmp/catalog.json",
            "formatter": { "show_hidden": true, "page_size_limit": 1500 }
        }"#;

        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.prefix, "<@42> ");
        assert_eq!(config.bot, BotIdentity::new("42", "helpbot"));
        assert_eq!(config.catalog, Some(PathBuf::from("/tmp/catalog.json")));
        assert!(config.formatter.show_hidden);
        assert_eq!(config.formatter.page_size_limit, 1500);
        assert_eq!(config.formatter.line_width, 80);
        assert_eq!(config.formatter.page_fence, "```");
    }

    #[test]
    fn empty_object_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.catalog, None);
        assert_eq!(config.formatter, FormatterConfig::default());
    }

    #[test]
    fn load_missing_config() {
        let err = load_config_from(Path::new("/nonexistent/helpbook.json")).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn load_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "prefix": "?" }}"#).unwrap();

        let config = load_config_from(file.path()).unwrap();
        assert_eq!(config.prefix, "?");
    }

    #[test]
    fn load_invalid_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ nope").unwrap();

        let err = load_config_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidJson(_)));
    }
}
