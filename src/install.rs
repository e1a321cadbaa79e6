//! Dependency installation through the selected package manager.

use std::fs;
use std::path::Path;
use std::process::Command;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::package_manager::PackageManager;

/// Verify that the package manager can be executed.
pub fn ensure_available(manager: PackageManager) -> Result<()> {
    match Command::new(manager.command()).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err(Error::ToolNotFound {
            tool: manager.command().to_string(),
        }),
    }
}

/// Run `<manager> install` in `dir` and wait for it to finish.
///
/// Output is captured; on failure the captured stderr (or stdout, for tools
/// that report errors there) becomes part of the error.
pub fn install_dependencies(manager: PackageManager, dir: &Path) -> Result<()> {
    debug!("{} (in {})", manager.install_command(), dir.display());

    let output = Command::new(manager.command())
        .args(manager.install_args())
        .current_dir(dir)
        .output()
        .map_err(|_| Error::ToolNotFound {
            tool: manager.command().to_string(),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let details = if stderr.is_empty() {
            String::from_utf8_lossy(&output.stdout).trim().to_string()
        } else {
            stderr
        };
        return Err(Error::Install {
            manager: manager.command().to_string(),
            stderr: details,
        });
    }

    info!("installed dependencies with {}", manager);
    Ok(())
}

/// Delete lockfiles written by package managers other than `manager`.
///
/// Templates are usually committed with one lockfile; keeping a foreign one
/// next to the chosen manager's lockfile confuses tooling. Returns the names
/// of the removed files.
pub fn remove_foreign_lockfiles(manager: PackageManager, dir: &Path) -> Result<Vec<String>> {
    let mut removed = Vec::new();

    for other in PackageManager::ALL {
        if other == manager {
            continue;
        }
        let lockfile = dir.join(other.lockfile());
        if lockfile.is_file() {
            fs::remove_file(&lockfile)?;
            debug!("removed {}", lockfile.display());
            removed.push(other.lockfile().to_string());
        }
    }

    Ok(removed)
}
