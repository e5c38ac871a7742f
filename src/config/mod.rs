//! Configuration management for the tag input application.
//!
//! Settings are loaded from a TOML file in the platform config directory,
//! with defaults for everything that is not set.

mod settings;

pub use settings::WidgetConfig;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Configuration file errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// The config file exists but could not be read.
    #[error("could not read the configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The config file is not valid TOML.
    #[error("could not parse the configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// A setting has an invalid value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),
}

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Widget settings.
    pub widget: WidgetConfig,
}

impl Config {
    /// Load the configuration from the default location.
    ///
    /// A missing file yields the default configuration; a present but
    /// unreadable or invalid file is an error.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load the configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadError)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// The default config file path:
    /// `<platform config dir>/taginput/config.toml`.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join("taginput").join("config.toml"))
    }

    /// Check setting invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.widget.validate()
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
    fn test_load_from_full_file() {
        let file = write_config(
            r#"
            [widget]
            wrapper_width = 80
            content_width = 76
            min_input_width = 10
            row_height = 1
            placeholder = "add a tag"
            call_url = "https://example.com/tags"
            call_method = "get"
            local_store = false
            auto_search = true
            debounce_ms = 500
            "#,
        );

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.widget.wrapper_width, 80);
        assert_eq!(config.widget.placeholder, "add a tag");
        assert!(config.widget.auto_search);
        assert!(!config.widget.local_store);
        assert_eq!(config.widget.debounce_ms, 500);
    }

    #[test]
    fn test_load_from_partial_file_uses_defaults() {
        let file = write_config(
            r#"
            [widget]
            placeholder = "tags..."
            "#,
        );

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.widget.placeholder, "tags...");
        assert_eq!(config.widget.wrapper_width, 60);
        assert_eq!(config.widget.debounce_ms, 800);
    }

    #[test]
    fn test_load_from_invalid_toml() {
        let file = write_config("widget = [not toml");
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = Config::load_from(Path::new("/nonexistent/taginput.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }

    #[test]
    fn test_validate_rejects_content_wider_than_wrapper() {
        let file = write_config(
            r#"
            [widget]
            wrapper_width = 40
            content_width = 50
            "#,
        );
        let err = Config::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError(_)));
    }

    #[test]
    fn test_validate_rejects_min_input_wider_than_content() {
        let mut config = Config::default();
        config.widget.min_input_width = config.widget.content_width + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_zero_row_height() {
        let mut config = Config::default();
        config.widget.row_height = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_default_is_valid() {
        assert!(Config::default().validate().is_ok());
    }
}
