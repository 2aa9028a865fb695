//! Release commands (delta, show)

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;

use super::output::Output;
use crate::domain::{
    apply_overrides, compute_releases_delta, find_chart_index, remove_chart_at, DeployPlan,
    Override, ReleaseSpec,
};
use crate::storage::{load_manifest, Config};

/// Options shared by commands that load a manifest
#[derive(Args, Debug)]
pub struct ManifestArgs {
    /// Environment prefix for release names
    #[arg(long, short, env = "RELEASE_DELTA_ENV")]
    pub env: Option<String>,

    /// Force a chart version (repeatable)
    #[arg(long = "set", value_name = "CHART=VERSION")]
    pub overrides: Vec<Override>,
}

#[derive(Args, Debug)]
pub struct DeltaArgs {
    /// Manifest describing the releases to act on (overrides apply here)
    pub from: PathBuf,

    /// Manifest to compare against
    pub to: PathBuf,

    #[command(flatten)]
    pub manifest: ManifestArgs,

    /// Drop a chart from the result (repeatable)
    #[arg(long = "skip", value_name = "CHART")]
    pub skip: Vec<String>,

    /// Order the result so dependencies come first
    #[arg(long)]
    pub ordered: bool,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Manifest to load
    pub manifest_path: PathBuf,

    #[command(flatten)]
    pub manifest: ManifestArgs,
}

/// Loads a manifest for the resolved environment
fn load(output: &Output, path: &Path, env: &str) -> Result<Vec<ReleaseSpec>> {
    output.verbose_ctx("load", &format!("Reading {} for environment '{}'", path.display(), env));
    load_manifest(path, env).with_context(|| format!("Failed to load {}", path.display()))
}

/// Show releases in FROM that changed relative to TO
pub fn delta(output: &Output, config: &Config, args: &DeltaArgs) -> Result<()> {
    let env = config.resolve_environment(args.manifest.env.as_deref())?;
    let overrides = config.overrides_with(&args.manifest.overrides)?;

    let from = apply_overrides(&load(output, &args.from, &env)?, &overrides);
    let to = load(output, &args.to, &env)?;
    output.verbose_ctx(
        "delta",
        &format!(
            "Comparing {} releases against {} ({} overrides)",
            from.len(),
            to.len(),
            overrides.len()
        ),
    );

    let mut releases = compute_releases_delta(&from, &to);

    for chart in &args.skip {
        let before = releases.len();
        while let Some(index) = find_chart_index(&releases, chart) {
            releases = remove_chart_at(releases, index);
        }
        if releases.len() == before {
            output.verbose_ctx("delta", &format!("Skipped chart '{}' is not in the delta", chart));
        }
    }

    if args.ordered {
        let plan = DeployPlan::from_releases(&releases).context("Failed to order releases")?;
        releases = plan.order();
        for release in &releases {
            let external = plan.external_dependencies(&release.chart_name);
            if !external.is_empty() {
                output.verbose_ctx(
                    "delta",
                    &format!(
                        "{} waits on releases outside the delta: {}",
                        release.chart_name,
                        external.join(", ")
                    ),
                );
            }
        }
    }

    output.verbose_ctx("delta", &format!("{} releases changed", releases.len()));
    output.releases(&releases, "No changes.");
    Ok(())
}

/// Show the releases a manifest produces
pub fn show(output: &Output, config: &Config, args: &ShowArgs) -> Result<()> {
    let env = config.resolve_environment(args.manifest.env.as_deref())?;
    let overrides = config.overrides_with(&args.manifest.overrides)?;

    let releases = apply_overrides(&load(output, &args.manifest_path, &env)?, &overrides);

    output.releases(&releases, "No releases.");
    Ok(())
}
