//! Configuration handling for release-delta
//!
//! Configuration is stored in `release-delta.toml` (project, found in the
//! current directory or a parent) and `~/.config/release-delta/config.toml`
//! (global). Both files are optional.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::Override;

/// Project configuration file name
pub const PROJECT_CONFIG_FILE: &str = "release-delta.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to parse configuration: {0}")]
    Parse(String),
}

/// Output format for commands
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Project-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Environment used when none is given on the command line
    pub environment: Option<String>,

    /// Overrides (`chart=version`) applied before command-line overrides
    pub overrides: Vec<String>,

    /// Metadata file name inside a chart directory
    pub chart_file: String,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            environment: None,
            overrides: vec![],
            chart_file: super::CHART_FILE.to_string(),
        }
    }
}

impl ProjectConfig {
    /// Parses the configured overrides
    pub fn parsed_overrides(&self) -> Result<Vec<Override>, ConfigError> {
        self.overrides
            .iter()
            .map(|s| Override::parse(s).map_err(|e| ConfigError::Invalid(e.to_string())))
            .collect()
    }
}

/// Global user configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GlobalConfig {
    /// Default output format (text or json)
    pub default_format: OutputFormat,
}

/// Combined configuration (global + project)
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub project: ProjectConfig,
    pub global: GlobalConfig,
    pub project_root: Option<PathBuf>,
}

impl Config {
    /// Loads configuration from default locations
    pub fn load() -> Result<Self> {
        let global = Self::load_global()?;
        let project_root = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::find_project_root(&cwd));

        let project = match &project_root {
            Some(root) => Self::load_project_config(root)?,
            None => ProjectConfig::default(),
        };

        Ok(Self {
            project,
            global,
            project_root,
        })
    }

    /// Returns the global config directory
    pub fn global_config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "release-delta", "release-delta")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Loads global configuration
    fn load_global() -> Result<GlobalConfig> {
        let config_dir = match Self::global_config_dir() {
            Some(dir) => dir,
            None => return Ok(GlobalConfig::default()),
        };

        let config_path = config_dir.join("config.toml");
        if !config_path.exists() {
            return Ok(GlobalConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read global config: {}", config_path.display()))?;

        log::debug!("Loaded global config from {}", config_path.display());
        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .context("Failed to parse global config")
    }

    /// Loads project configuration from a specific root
    fn load_project_config(project_root: &Path) -> Result<ProjectConfig> {
        let config_path = project_root.join(PROJECT_CONFIG_FILE);

        if !config_path.exists() {
            return Ok(ProjectConfig::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read project config: {}", config_path.display()))?;

        log::debug!("Loaded project config from {}", config_path.display());
        toml::from_str(&content)
            .map_err(|e| ConfigError::Parse(e.to_string()))
            .with_context(|| format!("Failed to parse project config: {}", config_path.display()))
    }

    /// Finds the nearest directory at or above `start` holding a project config
    pub fn find_project_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();

        loop {
            if current.join(PROJECT_CONFIG_FILE).is_file() {
                return Some(current);
            }

            if !current.pop() {
                return None;
            }
        }
    }

    /// Picks the environment: explicit value first, then the project default
    pub fn resolve_environment(&self, explicit: Option<&str>) -> Result<String> {
        explicit
            .or(self.project.environment.as_deref())
            .filter(|env| !env.trim().is_empty())
            .map(str::to_string)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No environment given. Pass --env, set RELEASE_DELTA_ENV, \
                     or set 'environment' in {}",
                    PROJECT_CONFIG_FILE
                )
            })
    }

    /// Merges configured overrides with explicit ones; explicit ones win
    pub fn overrides_with(&self, explicit: &[Override]) -> Result<Vec<Override>> {
        let mut overrides = self
            .project
            .parsed_overrides()
            .context("Failed to read overrides from project config")?;
        overrides.extend_from_slice(explicit);
        Ok(overrides)
    }

    /// Returns the chart metadata path for a chart directory
    pub fn chart_file_in(&self, chart_dir: &Path) -> PathBuf {
        chart_dir.join(&self.project.chart_file)
    }

    /// Saves the project configuration
    pub fn save_project(&self) -> Result<()> {
        let root = self
            .project_root
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("No project root to save configuration into"))?;
        let config_path = root.join(PROJECT_CONFIG_FILE);

        let content =
            toml::to_string_pretty(&self.project).context("Failed to serialize project config")?;

        fs::write(&config_path, content)
            .with_context(|| format!("Failed to write project config: {}", config_path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config() {
        let config = Config::default();

        assert_eq!(config.project.chart_file, "Chart.yaml");
        assert!(config.project.environment.is_none());
        assert_eq!(config.global.default_format, OutputFormat::Text);
    }

    #[test]
    fn parse_project_config() {
        let toml = r#"
environment = "staging"
overrides = ["api=2.0.0"]
"#;

        let config: ProjectConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.environment.as_deref(), Some("staging"));
        assert_eq!(config.overrides, vec!["api=2.0.0"]);
        assert_eq!(config.chart_file, "Chart.yaml");
    }

    #[test]
    fn parse_global_config() {
        let config: GlobalConfig = toml::from_str("default_format = \"json\"\n").unwrap();
        assert_eq!(config.default_format, OutputFormat::Json);
    }

    #[test]
    fn missing_project_config_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_project_config(dir.path()).unwrap();
        assert!(config.environment.is_none());
        assert!(config.overrides.is_empty());
    }

    #[test]
    fn find_project_root_walks_up() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "").unwrap();

        let sub_dir = dir.path().join("sub").join("dir");
        fs::create_dir_all(&sub_dir).unwrap();

        let root = Config::find_project_root(&sub_dir);
        assert_eq!(root.as_deref(), Some(dir.path()));
    }

    #[test]
    fn project_config_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(PROJECT_CONFIG_FILE),
            "environment = \"prod\"\nchart_file = \"chart.yml\"\n",
        )
        .unwrap();

        let config = Config {
            project: Config::load_project_config(dir.path()).unwrap(),
            ..Config::default()
        };
        assert_eq!(config.project.environment.as_deref(), Some("prod"));
        assert_eq!(
            config.chart_file_in(Path::new("charts/api")),
            Path::new("charts/api/chart.yml")
        );
    }

    #[test]
    fn malformed_project_config_is_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(PROJECT_CONFIG_FILE), "environment = [").unwrap();

        let err = Config::load_project_config(dir.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to parse project config"));
    }

    #[test]
    fn explicit_environment_wins() {
        let mut config = Config::default();
        config.project.environment = Some("staging".to_string());

        assert_eq!(config.resolve_environment(Some("prod")).unwrap(), "prod");
        assert_eq!(config.resolve_environment(None).unwrap(), "staging");
    }

    #[test]
    fn missing_environment_is_error() {
        let config = Config::default();
        assert!(config.resolve_environment(None).is_err());
        assert!(config.resolve_environment(Some("")).is_err());
    }

    #[test]
    fn explicit_overrides_come_last() {
        let mut config = Config::default();
        config.project.overrides = vec!["api=1.0".to_string()];

        let explicit = vec![Override::parse("api=2.0").unwrap()];
        let merged = config.overrides_with(&explicit).unwrap();

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1].chart_version, "2.0");
    }

    #[test]
    fn bad_configured_override_is_error() {
        let mut config = Config::default();
        config.project.overrides = vec!["api".to_string()];

        assert!(config.overrides_with(&[]).is_err());
    }

    #[test]
    fn save_and_reload_project() {
        let dir = TempDir::new().unwrap();
        let mut config = Config {
            project_root: Some(dir.path().to_path_buf()),
            ..Config::default()
        };
        config.project.environment = Some("qa".to_string());

        config.save_project().unwrap();

        let reloaded = Config::load_project_config(dir.path()).unwrap();
        assert_eq!(reloaded.environment.as_deref(), Some("qa"));
    }
}
