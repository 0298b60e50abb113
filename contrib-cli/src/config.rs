//! Application configuration.
//!
//! Values come from a TOML file and are then overridden by command-line flags:
//!
//! ```toml
//! [service]
//! backend = "http"
//! connection = "http://127.0.0.1:8000"
//!
//! [logging]
//! level = "debug"
//! file = "contrib.log"
//! ```

use std::path::{Path, PathBuf};

use contrib_core::service::ServiceConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

/// Config file picked up from the working directory when none is named.
pub const DEFAULT_CONFIG_FILE: &str = "contrib.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}'", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub service: ServiceSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceSection {
    pub backend: String,
    pub connection: String,
}

impl Default for ServiceSection {
    fn default() -> Self {
        Self {
            backend: "sqlite".to_string(),
            connection: "contrib.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingSection {
    pub level: String,
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Reads `path` when given; otherwise [`DEFAULT_CONFIG_FILE`] if it exists,
    /// falling back to built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.is_file() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        Self::from_toml_str(&text).map_err(|source| ConfigError::Parse { path, source })
    }

    /// Command-line flags take precedence over file values.
    pub fn apply_overrides(
        &mut self,
        cli: &Cli,
    ) {
        if let Some(backend) = &cli.backend {
            self.service.backend = backend.clone();
        }
        if let Some(connection) = &cli.connection {
            self.service.connection = connection.clone();
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        if let Some(file) = &cli.log_file {
            self.logging.file = Some(file.clone());
        }
    }

    pub fn service_config(&self) -> ServiceConfig {
        ServiceConfig {
            backend: self.service.backend.trim().to_ascii_lowercase(),
            connection_string: self.service.connection.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = AppConfig::from_toml_str("").unwrap();

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.service.backend, "sqlite");
        assert_eq!(config.service.connection, "contrib.db");
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [service]
            backend = "http"
            connection = "http://127.0.0.1:8000"
            "#,
        )
        .unwrap();

        assert_eq!(config.service.backend, "http");
        assert_eq!(config.logging, LoggingSection::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(AppConfig::from_toml_str("[service]\nport = 8000\n").is_err());
    }

    #[test]
    fn load_reports_missing_explicit_file() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/contrib.toml")));

        assert!(matches!(result, Err(ConfigError::Read { .. })));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("contrib.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\nfile = \"plan.log\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, Some(PathBuf::from("plan.log")));
    }

    #[test]
    fn cli_flags_override_file_values() {
        let mut config = AppConfig::from_toml_str("[service]\nbackend = \"sqlite\"\n").unwrap();
        let cli = Cli::try_parse_from([
            "contrib",
            "--backend",
            "HTTP",
            "--connection",
            "http://plan.internal",
            "--log-level",
            "warn",
            "show",
        ])
        .unwrap();

        config.apply_overrides(&cli);

        assert_eq!(
            config.service_config(),
            ServiceConfig {
                backend: "http".to_string(),
                connection_string: "http://plan.internal".to_string(),
            }
        );
        assert_eq!(config.logging.level, "warn");
    }
}
