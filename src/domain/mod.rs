//! Domain models for release-delta
//!
//! Contains the core release logic without any I/O concerns.

mod release;
mod delta;
mod overrides;
mod plan;

pub use release::ReleaseSpec;
pub use delta::{
    compute_releases_delta, find_chart_index, remove_chart_at, remove_chart_from_dependencies,
};
pub use overrides::{apply_overrides, Override, OverrideError};
pub use plan::{DeployPlan, PlanError};
