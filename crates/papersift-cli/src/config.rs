//! Configuration management for the CLI.
//!
//! Two files are involved: the CLI settings at `~/.papersift/config.toml`
//! (output preferences, default domain config, worker count) and the domain
//! configuration the filters run with.

use crate::error::{CliError, Result};
use papersift_filters::DomainConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Domain configuration used when `--config` is not given
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain_config: Option<PathBuf>,

    /// Worker tasks for the filter command
    #[serde(default = "default_jobs")]
    pub jobs: usize,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable tables and reports
    Table,
    /// JSON format
    Json,
}

impl Config {
    /// Get the configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".papersift").join("config.toml"))
    }

    /// Load configuration from the default path, or defaults if absent.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from a path, or defaults if absent.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            Ok(toml::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Load the domain configuration the filters run with
    ///
    /// An explicit path wins over the settings file; with neither, the
    /// built-in model-stealing domain is used. A path that cannot be loaded
    /// is an error, never a silent fallback.
    pub fn domain(&self, explicit: Option<&Path>) -> Result<Arc<DomainConfig>> {
        let path = explicit.or(self.settings.domain_config.as_deref());
        let config = match path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading domain configuration");
                DomainConfig::load(path)?
            }
            None => DomainConfig::default(),
        };
        Ok(Arc::new(config))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            domain_config: None,
            jobs: default_jobs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_jobs() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.settings.domain_config.is_none());
        assert!(config.settings.jobs >= 1);
    }

    #[test]
    fn test_load_written_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.settings.format = OutputFormat::Json;
        config.settings.jobs = 3;
        fs::write(&path, toml::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.settings.format, OutputFormat::Json);
        assert_eq!(loaded.settings.jobs, 3);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = Config::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.settings.color);
    }

    #[test]
    fn test_partial_settings() {
        let config: Config = toml::from_str("[settings]\ncolor = false\n").unwrap();
        assert!(!config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
    }

    #[test]
    fn test_domain_resolution() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        fs::write(&path, "domain_name = \"prompt_injection\"\n").unwrap();

        let config = Config::default();
        assert_eq!(config.domain(None).unwrap().domain_name, "model_stealing");
        assert_eq!(config.domain(Some(&path)).unwrap().domain_name, "prompt_injection");

        let mut config = Config::default();
        config.settings.domain_config = Some(path);
        assert_eq!(config.domain(None).unwrap().domain_name, "prompt_injection");
    }

    #[test]
    fn test_bad_domain_config_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("domain.toml");
        fs::write(&path, "[thresholds]\ntopic_dominance_ratio = -1.0\n").unwrap();

        let result = Config::default().domain(Some(&path));
        assert!(matches!(result, Err(CliError::Domain(_))));
        assert!(Config::default().domain(Some(&dir.path().join("missing.toml"))).is_err());
    }
}
