//! Release domain model
//!
//! A release is one chart deployed into one environment. Releases are
//! compared by identity (release name, chart name, chart version); the
//! dependency list rides along but never takes part in equality.

use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A deployable release of a chart
#[derive(Debug, Clone, Serialize)]
pub struct ReleaseSpec {
    /// Unique release name, `<environment>-<chart_name>`
    pub release_name: String,

    /// The chart this release deploys
    pub chart_name: String,

    /// Chart version, arbitrary string
    pub chart_version: String,

    /// Chart names this release depends on
    pub dependencies: Vec<String>,
}

impl ReleaseSpec {
    /// Creates a release with no dependencies
    pub fn new(
        release_name: impl Into<String>,
        chart_name: impl Into<String>,
        chart_version: impl Into<String>,
    ) -> Self {
        Self {
            release_name: release_name.into(),
            chart_name: chart_name.into(),
            chart_version: chart_version.into(),
            dependencies: Vec::new(),
        }
    }

    /// Creates a release whose name is derived from the environment
    pub fn for_environment(env: &str, chart_name: &str, chart_version: impl Into<String>) -> Self {
        Self::new(Self::release_name_for(env, chart_name), chart_name, chart_version)
    }

    /// Builds the release name for a chart in an environment
    pub fn release_name_for(env: &str, chart_name: &str) -> String {
        format!("{}-{}", env, chart_name)
    }

    /// Replaces the dependency list
    pub fn with_dependencies<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies = deps.into_iter().map(Into::into).collect();
        self
    }

    /// Returns true if this release depends on the given chart
    pub fn depends_on(&self, chart_name: &str) -> bool {
        self.dependencies.iter().any(|d| d == chart_name)
    }
}

// Identity only: dependencies are not compared.
impl PartialEq for ReleaseSpec {
    fn eq(&self, other: &Self) -> bool {
        self.release_name == other.release_name
            && self.chart_name == other.chart_name
            && self.chart_version == other.chart_version
    }
}

impl Eq for ReleaseSpec {}

impl Hash for ReleaseSpec {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.release_name.hash(state);
        self.chart_name.hash(state);
        self.chart_version.hash(state);
    }
}

impl fmt::Display for ReleaseSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "release name: {}", self.release_name)?;
        writeln!(f, "chart name: {}", self.chart_name)?;
        write!(f, "chart version: {}", self.chart_version)?;
        for dep in &self.dependencies {
            write!(f, "\ndepends_on: {}", dep)?;
        }
        Ok(())
    }
}
