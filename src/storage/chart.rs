//! Chart metadata version stamping
//!
//! Rewrites the `version` field of a chart's metadata file to
//! `<version>-<suffix>`, keeping every other key.

use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::{Mapping, Value};
use thiserror::Error;

/// Default metadata file name inside a chart directory
pub const CHART_FILE: &str = "Chart.yaml";

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("Failed to access chart file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse chart file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Chart file {} has no version", .0.display())]
    MissingVersion(PathBuf),

    #[error("Chart file {} has a non-string version", .0.display())]
    InvalidVersion(PathBuf),

    #[error("Version suffix is empty")]
    EmptySuffix,
}

/// Appends `-<suffix>` to the version in `<chart_dir>/Chart.yaml`
///
/// Returns the new version.
pub fn stamp_chart_version(chart_dir: &Path, suffix: &str) -> Result<String, ChartError> {
    stamp_chart_file(&chart_dir.join(CHART_FILE), suffix)
}

/// Appends `-<suffix>` to the version in the given metadata file
pub fn stamp_chart_file(path: &Path, suffix: &str) -> Result<String, ChartError> {
    if suffix.is_empty() {
        return Err(ChartError::EmptySuffix);
    }

    let mut chart = read_chart(path)?;
    let version = version_of(&chart, path)?;
    let new_version = format!("{}-{}", version, suffix);

    chart.insert(Value::from("version"), Value::from(new_version.clone()));

    let content = serde_yaml::to_string(&chart).map_err(|source| ChartError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    fs::write(path, content).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    log::debug!("Stamped {}: {} -> {}", path.display(), version, new_version);
    Ok(new_version)
}

/// Reads the version from `<chart_dir>/Chart.yaml`
pub fn read_chart_version(chart_dir: &Path) -> Result<String, ChartError> {
    let path = chart_dir.join(CHART_FILE);
    let chart = read_chart(&path)?;
    version_of(&chart, &path)
}

fn read_chart(path: &Path) -> Result<Mapping, ChartError> {
    let content = fs::read_to_string(path).map_err(|source| ChartError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    serde_yaml::from_str(&content).map_err(|source| ChartError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn version_of(chart: &Mapping, path: &Path) -> Result<String, ChartError> {
    match chart.get("version") {
        None | Some(Value::Null) => Err(ChartError::MissingVersion(path.to_path_buf())),
        Some(Value::String(version)) => Ok(version.clone()),
        Some(_) => Err(ChartError::InvalidVersion(path.to_path_buf())),
    }
}
