//! # Storage Layer
//!
//! File formats read and written by release-delta.
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Manifest | YAML, top-level `charts` list | any path given on the command line |
//! | Chart metadata | YAML | `<chart_dir>/Chart.yaml` |
//! | Project config | TOML | `release-delta.toml` in the current dir or a parent |
//! | Global config | TOML | `~/.config/release-delta/config.toml` |
//!
//! ## Manifest Layout
//!
//! ```yaml
//! charts:
//!   - name: api
//!     version: 1.4.0
//!     depends_on: [db]
//!   - name: db
//!     version: 12.1.0
//! ```
//!
//! ## Key Types
//!
//! - [`load_manifest`] - Read a manifest into release specs for an environment
//! - [`stamp_chart_version`] - Append a suffix to a chart's version in place
//! - [`Config`] - Project and global configuration

mod manifest;
mod chart;
mod config;

pub use manifest::{load_manifest, parse_manifest, ManifestError};
pub use chart::{read_chart_version, stamp_chart_version, stamp_chart_file, ChartError, CHART_FILE};
pub use config::{
    Config, ConfigError, GlobalConfig, OutputFormat, ProjectConfig, PROJECT_CONFIG_FILE,
};
