//! Manifest loading
//!
//! A manifest is a YAML document with a `charts` list. Each entry names a
//! chart, its version and optionally the charts it depends on. Loading it
//! for an environment produces one release per entry.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::domain::ReleaseSpec;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Failed to read manifest {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse manifest: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid manifest: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize)]
struct ManifestDocument {
    charts: Vec<ChartEntry>,
}

#[derive(Debug, Deserialize)]
struct ChartEntry {
    name: String,
    version: String,
    #[serde(default)]
    depends_on: Option<Vec<String>>,
}

/// Reads a manifest file and builds releases for `env`
pub fn load_manifest(path: &Path, env: &str) -> Result<Vec<ReleaseSpec>, ManifestError> {
    let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let releases = parse_manifest(&content, env)?;
    log::debug!(
        "Loaded {} releases from {} for environment '{}'",
        releases.len(),
        path.display(),
        env
    );
    Ok(releases)
}

/// Parses manifest text and builds releases for `env`
///
/// Entries keep document order. Duplicate chart names are not rejected,
/// only logged; every entry is kept.
pub fn parse_manifest(content: &str, env: &str) -> Result<Vec<ReleaseSpec>, ManifestError> {
    if env.trim().is_empty() {
        return Err(ManifestError::Invalid("environment name is empty".to_string()));
    }

    let document: ManifestDocument = serde_yaml::from_str(content)?;

    let mut seen = HashSet::new();
    let mut releases = Vec::with_capacity(document.charts.len());

    for (i, entry) in document.charts.into_iter().enumerate() {
        if entry.name.trim().is_empty() {
            return Err(ManifestError::Invalid(format!("chart #{} has an empty name", i + 1)));
        }
        if entry.version.trim().is_empty() {
            return Err(ManifestError::Invalid(format!(
                "chart '{}' has an empty version",
                entry.name
            )));
        }
        if !seen.insert(entry.name.clone()) {
            log::warn!(
                "Chart '{}' is listed more than once; duplicate charts give undefined results",
                entry.name
            );
        }

        releases.push(
            ReleaseSpec::for_environment(env, &entry.name, entry.version)
                .with_dependencies(entry.depends_on.unwrap_or_default()),
        );
    }

    Ok(releases)
}
