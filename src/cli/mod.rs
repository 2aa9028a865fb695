//! # Command-Line Interface
//!
//! User-facing CLI commands and output formatting.
//!
//! ## Commands
//!
//! | Command | Purpose |
//! |---------|---------|
//! | `init` | Write a `release-delta.toml` with a default environment |
//! | `delta` | Releases in FROM that changed relative to TO |
//! | `show` | Releases loaded from one manifest |
//! | `stamp` | Append a suffix to a chart's version |
//!
//! ## Output Formats
//!
//! All commands support `--format` flag:
//! - `text` (default) - Human-readable output
//! - `json` - Machine-parseable JSON
//!
//! The default can be changed with `default_format` in the global config.
//!
//! ## Verbose Mode
//!
//! Use `--verbose` (or `-v`) for debug output. It also raises the log level
//! to `debug`; `RUST_LOG` takes precedence when set:
//! ```bash
//! release-delta --verbose delta new.yaml old.yaml --env prod
//! ```
//!
//! ## Entry Point
//!
//! Call [`run()`] to parse arguments and execute the appropriate command.

mod app;
mod output;
mod release_cmd;
mod stamp;

pub use app::{Cli, Commands, run};
pub use output::{Output, OutputFormat};
