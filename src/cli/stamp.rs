//! Chart version stamping command

use std::path::Path;

use anyhow::{Context, Result};

use super::output::Output;
use crate::storage::{stamp_chart_file, Config};

/// Append a suffix to a chart's version and print the result
pub fn run(output: &Output, config: &Config, chart_dir: &Path, suffix: &str) -> Result<()> {
    let chart_file = config.chart_file_in(chart_dir);
    output.verbose_ctx("stamp", &format!("Stamping {} with '{}'", chart_file.display(), suffix));

    let version = stamp_chart_file(&chart_file, suffix)
        .with_context(|| format!("Failed to stamp chart in {}", chart_dir.display()))?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "chart_dir": chart_dir.display().to_string(),
            "version": version,
        }));
    } else {
        println!("{}", version);
    }

    Ok(())
}
