//! release-delta - Decide which chart releases changed between two manifests
//!
//! A manifest lists charts with a version and the charts they depend on.
//! Loading it for an environment yields one [`ReleaseSpec`] per chart. The
//! delta engine compares a prior release set against a new one and keeps the
//! releases that changed, pruning dependencies that are already satisfied.

pub mod domain;
pub mod storage;
pub mod cli;

pub use domain::{compute_releases_delta, DeployPlan, Override, ReleaseSpec};
