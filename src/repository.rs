//! # External Tool Seams
//!
//! The scaffolding workflow talks to two kinds of external programs: git and
//! a package manager. This module puts each behind a trait so the workflow
//! can be exercised without either being installed.
//!
//! - **`GitOperations`**: clone, drop cloned history, detect an enclosing
//!   work tree, initialize a repository.
//! - **`InstallOperations`**: check for the package manager, install
//!   dependencies, clean up foreign lockfiles.
//!
//! `DefaultGitOperations` and `DefaultInstallOperations` forward to the
//! `git` and `install` modules. Tests substitute recording mocks.

use std::path::Path;

use crate::error::Result;
use crate::package_manager::PackageManager;

/// Trait for git operations - allows mocking in tests
pub trait GitOperations {
    /// Fail with `Error::ToolNotFound` when git cannot be run.
    fn ensure_available(&self) -> Result<()>;

    /// Shallow-clone `url` at `ref_name` into the not-yet-existing `target_dir`.
    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()>;

    /// Remove the `.git` entry of a clone. Returns whether one existed.
    fn remove_history(&self, dir: &Path) -> Result<bool>;

    /// Whether `dir` already belongs to a git work tree.
    fn is_inside_work_tree(&self, dir: &Path) -> bool;

    /// `git init` plus an initial commit of everything in `dir`.
    fn init_repository(&self, dir: &Path, message: &str) -> Result<()>;
}

/// Trait for package manager operations - allows mocking in tests
pub trait InstallOperations {
    /// Fail with `Error::ToolNotFound` when the manager cannot be run.
    fn ensure_available(&self, manager: PackageManager) -> Result<()>;

    /// Install the dependencies of the project in `dir`.
    fn install(&self, manager: PackageManager, dir: &Path) -> Result<()>;

    /// Remove lockfiles of other managers, returning their names.
    fn remove_foreign_lockfiles(&self, manager: PackageManager, dir: &Path) -> Result<Vec<String>>;
}

/// `GitOperations` backed by the system `git` command.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultGitOperations;

impl GitOperations for DefaultGitOperations {
    fn ensure_available(&self) -> Result<()> {
        crate::git::ensure_available()
    }

    fn clone_shallow(&self, url: &str, ref_name: &str, target_dir: &Path) -> Result<()> {
        crate::git::clone_shallow(url, ref_name, target_dir)
    }

    fn remove_history(&self, dir: &Path) -> Result<bool> {
        crate::git::remove_history(dir)
    }

    fn is_inside_work_tree(&self, dir: &Path) -> bool {
        crate::git::is_inside_work_tree(dir)
    }

    fn init_repository(&self, dir: &Path, message: &str) -> Result<()> {
        crate::git::init_repository(dir, message)
    }
}

/// `InstallOperations` backed by the real package manager executables.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultInstallOperations;

impl InstallOperations for DefaultInstallOperations {
    fn ensure_available(&self, manager: PackageManager) -> Result<()> {
        crate::install::ensure_available(manager)
    }

    fn install(&self, manager: PackageManager, dir: &Path) -> Result<()> {
        crate::install::install_dependencies(manager, dir)
    }

    fn remove_foreign_lockfiles(&self, manager: PackageManager, dir: &Path) -> Result<Vec<String>> {
        crate::install::remove_foreign_lockfiles(manager, dir)
    }
}
