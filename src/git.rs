//! Git plumbing.
//!
//! Everything here shells out to the system `git` command, which
//! automatically handles:
//! - SSH keys from ~/.ssh/
//! - Git credential helpers
//! - Personal access tokens
//! - Any authentication configured in ~/.gitconfig

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use log::debug;

use crate::error::{Error, Result};

/// Verify that `git` can be executed.
pub fn ensure_available() -> Result<()> {
    match Command::new("git").arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        _ => Err(Error::ToolNotFound {
            tool: "git".to_string(),
        }),
    }
}

/// Clone a repository at a specific ref using a shallow clone.
///
/// The target directory must not exist yet; it is never removed or
/// overwritten. Missing parent directories are created.
pub fn clone_shallow(url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
    if target_dir.exists() {
        return Err(Error::DirectoryExists {
            path: target_dir.display().to_string(),
        });
    }

    if let Some(parent) = target_dir.parent() {
        fs::create_dir_all(parent)?;
    }

    debug!(
        "git clone --depth=1 --branch {} {} {}",
        ref_name,
        url,
        target_dir.display()
    );
    let output = Command::new("git")
        .args(["clone", "--depth=1", "--branch", ref_name, url])
        .arg(target_dir)
        .output()
        .map_err(|e| Error::GitClone {
            url: url.to_string(),
            git_ref: ref_name.to_string(),
            message: e.to_string(),
            hint: Some("Make sure git is installed and on your PATH".to_string()),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        let hint = clone_hint(&stderr, ref_name);
        return Err(Error::GitClone {
            url: url.to_string(),
            git_ref: ref_name.to_string(),
            message: stderr,
            hint,
        });
    }

    Ok(())
}

/// Pick a hint for the common ways a clone fails.
fn clone_hint(stderr: &str, ref_name: &str) -> Option<String> {
    if stderr.contains("Authentication failed")
        || stderr.contains("Permission denied")
        || stderr.contains("Could not read from remote repository")
    {
        Some(
            "For private repositories make sure an SSH key is loaded in ssh-agent, \
             git credentials are configured, or a personal access token is set up"
                .to_string(),
        )
    } else if stderr.contains("Remote branch") && stderr.contains("not found") {
        Some(format!(
            "The branch or tag '{}' does not exist; pass an existing one with --ref",
            ref_name
        ))
    } else if stderr.contains("not found") || stderr.contains("does not exist") {
        Some("Check the repository URL".to_string())
    } else {
        None
    }
}

/// Delete the `.git` directory of a freshly cloned repository, so the project
/// does not carry the template's history.
///
/// Returns `true` if there was something to remove.
pub fn remove_history(dir: &Path) -> Result<bool> {
    let git_dir = dir.join(".git");
    if git_dir.is_dir() {
        fs::remove_dir_all(&git_dir)?;
        Ok(true)
    } else if git_dir.is_file() {
        // Worktrees and submodules use a `.git` file pointing elsewhere.
        fs::remove_file(&git_dir)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Whether `dir` is inside an existing git work tree.
pub fn is_inside_work_tree(dir: &Path) -> bool {
    Command::new("git")
        .args(["rev-parse", "--is-inside-work-tree"])
        .current_dir(dir)
        .output()
        .map(|output| {
            output.status.success() && String::from_utf8_lossy(&output.stdout).trim() == "true"
        })
        .unwrap_or(false)
}

fn run_git(dir: &Path, args: &[&str]) -> Result<Output> {
    let command = format!("git {}", args.join(" "));
    debug!("{} (in {})", command, dir.display());

    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|e| Error::GitCommand {
            command: command.clone(),
            path: dir.display().to_string(),
            stderr: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::GitCommand {
            command,
            path: dir.display().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(output)
}

/// Initialize a repository in `dir` and record everything in it as the first
/// commit.
pub fn init_repository(dir: &Path, message: &str) -> Result<()> {
    run_git(dir, &["init"])?;
    run_git(dir, &["add", "-A"])?;
    run_git(dir, &["commit", "-m", message])?;
    Ok(())
}
