//! Version overrides
//!
//! An override forces a chart to a version regardless of what the manifest
//! declares. Overrides are written as `chart=version`.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use super::release::ReleaseSpec;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    #[error("Override '{0}' is missing '=' (expected chart=version)")]
    MissingSeparator(String),

    #[error("Override '{0}' has an empty chart name")]
    EmptyChart(String),

    #[error("Override '{0}' has an empty version")]
    EmptyVersion(String),
}

/// A forced version for one chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Override {
    pub chart_name: String,
    pub chart_version: String,
}

impl Override {
    /// Parses `chart=version`, splitting on the first `=`
    pub fn parse(s: &str) -> Result<Self, OverrideError> {
        let (chart, version) = s
            .split_once('=')
            .ok_or_else(|| OverrideError::MissingSeparator(s.to_string()))?;

        let chart = chart.trim();
        let version = version.trim();

        if chart.is_empty() {
            return Err(OverrideError::EmptyChart(s.to_string()));
        }
        if version.is_empty() {
            return Err(OverrideError::EmptyVersion(s.to_string()));
        }

        Ok(Self {
            chart_name: chart.to_string(),
            chart_version: version.to_string(),
        })
    }

    /// Returns true if this override targets the release's chart
    pub fn matches(&self, release: &ReleaseSpec) -> bool {
        self.chart_name == release.chart_name
    }
}

impl FromStr for Override {
    type Err = OverrideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Override {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.chart_name, self.chart_version)
    }
}

/// Applies overrides to a release set
///
/// Every release appears once in the output, in input order. If several
/// overrides name the same chart, the last one wins.
pub fn apply_overrides(releases: &[ReleaseSpec], overrides: &[Override]) -> Vec<ReleaseSpec> {
    releases
        .iter()
        .map(|release| {
            let mut release = release.clone();
            if let Some(o) = overrides.iter().rev().find(|o| o.matches(&release)) {
                if release.chart_version != o.chart_version {
                    log::debug!(
                        "Overriding {} version {} -> {}",
                        release.chart_name,
                        release.chart_version,
                        o.chart_version
                    );
                    release.chart_version = o.chart_version.clone();
                }
            }
            release
        })
        .collect()
}
