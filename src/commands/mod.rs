//! # CLI Command Implementations
//!
//! - `create`: the default action; scaffolds a project from the template and
//!   the selected add-ons.
//! - `list`: prints the add-on catalog (`--list-addons`).
//!
//! Each module exposes an `execute` function that turns parsed arguments into
//! calls into the `scaffolder` library and renders the result.

pub mod create;
pub mod list;

use std::path::Path;

use anyhow::Result;
use scaffolder::config::Settings;
use scaffolder::suggestions;

/// Load the settings file, or the built-in defaults when none is given.
pub fn load_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) if !path.exists() => Err(suggestions::config_not_found(path)),
        Some(path) => Ok(Settings::from_file(path)?),
        None => Ok(Settings::default()),
    }
}
