//! # Scaffolding Workflow
//!
//! `Scaffolder::run` performs the whole job of creating a project, one step
//! after the other:
//!
//! 1.  **Target check**: the project directory must not exist yet.
//! 2.  **Preflight**: git (and, unless installation is skipped, the package
//!     manager) must be runnable.
//! 3.  **Template**: shallow-clone the template and drop its history.
//! 4.  **Add-ons**: clone each selected add-on into its subdirectory and drop
//!     its history.
//! 5.  **Registration**: name the package after the project and append every
//!     add-on registration to its JSON file, without duplicates.
//! 6.  **Install**: remove lockfiles of other package managers, then install
//!     dependencies unless skipped.
//! 7.  **Version control**: unless skipped, initialize a repository with an
//!     initial commit (not when the project already sits inside a work tree).
//!
//! Every external command completes before the next step starts. A failure
//! stops the run immediately and leaves everything created so far in place.

use std::fmt;
use std::path::{Path, PathBuf};

use log::info;

use crate::config::{AddOn, Registration, TemplateSource};
use crate::defaults;
use crate::error::{Error, Result};
use crate::merge::{self, RegistrationOutcome};
use crate::package_manager::PackageManager;
use crate::project_name::ProjectName;
use crate::repository::{
    DefaultGitOperations, DefaultInstallOperations, GitOperations, InstallOperations,
};

/// Everything the workflow needs to know about the project to create.
#[derive(Debug, Clone)]
pub struct ScaffoldOptions {
    pub name: ProjectName,
    /// Directory the project directory is created in.
    pub parent_dir: PathBuf,
    pub package_manager: PackageManager,
    pub template: TemplateSource,
    /// Add-ons in the order they were requested, already de-duplicated.
    pub addons: Vec<AddOn>,
    pub skip_install: bool,
    pub skip_git: bool,
}

impl ScaffoldOptions {
    /// `parent_dir/name`.
    pub fn target_dir(&self) -> PathBuf {
        self.parent_dir.join(self.name.as_str())
    }
}

/// A unit of work reported to a `ScaffoldObserver`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    Preflight,
    CloneTemplate { url: String, r#ref: String },
    CloneAddOn { name: String, directory: String },
    Register,
    Install(PackageManager),
    InitGit,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Preflight => write!(f, "Checking required tools"),
            Step::CloneTemplate { url, r#ref } => write!(f, "Cloning template {}@{}", url, r#ref),
            Step::CloneAddOn { name, directory } => {
                write!(f, "Adding add-on {} into {}", name, directory)
            }
            Step::Register => write!(f, "Registering add-ons"),
            Step::Install(manager) => {
                write!(f, "Installing dependencies ({})", manager.install_command())
            }
            Step::InitGit => write!(f, "Initializing git repository"),
        }
    }
}

/// Progress callbacks; every method defaults to doing nothing.
pub trait ScaffoldObserver {
    fn step_started(&mut self, _step: &Step) {}
    fn step_finished(&mut self, _step: &Step) {}
    fn step_failed(&mut self, _step: &Step, _error: &Error) {}
}

/// Observer that ignores every notification.
#[derive(Debug, Default)]
pub struct NoopObserver;

impl ScaffoldObserver for NoopObserver {}

/// One applied registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationRecord {
    pub addon: String,
    pub registration: Registration,
    pub outcome: RegistrationOutcome,
}

/// What happened to version control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitOutcome {
    Initialized,
    /// `--skip-git` was given.
    Skipped,
    /// The project lives inside an existing work tree, so no nested repository
    /// was created.
    InsideExistingRepository,
}

/// Summary of a successful run.
#[derive(Debug, Clone)]
pub struct ScaffoldReport {
    pub name: ProjectName,
    pub target: PathBuf,
    pub package_manager: PackageManager,
    pub addons: Vec<String>,
    pub registrations: Vec<RegistrationRecord>,
    pub renamed_package: bool,
    pub removed_lockfiles: Vec<String>,
    pub installed: bool,
    pub git: GitOutcome,
}

impl ScaffoldReport {
    /// Commands the user should run next, in order.
    pub fn next_steps(&self) -> Vec<String> {
        let mut steps = vec![format!("cd {}", self.name)];
        if !self.installed {
            steps.push(self.package_manager.install_command());
        }
        steps.push(self.package_manager.run_script(defaults::DEV_SCRIPT));
        steps
    }

    /// Registrations whose file was missing.
    pub fn skipped_registrations(&self) -> impl Iterator<Item = &RegistrationRecord> {
        self.registrations
            .iter()
            .filter(|record| record.outcome == RegistrationOutcome::Skipped)
    }
}

/// Runs the scaffolding workflow against pluggable git and package manager
/// backends.
pub struct Scaffolder {
    git_ops: Box<dyn GitOperations>,
    install_ops: Box<dyn InstallOperations>,
}

impl Default for Scaffolder {
    fn default() -> Self {
        Self::new()
    }
}

impl Scaffolder {
    /// Scaffolder using the real `git` and package manager executables.
    pub fn new() -> Self {
        Self::with_operations(
            Box::new(DefaultGitOperations),
            Box::new(DefaultInstallOperations),
        )
    }

    pub fn with_operations(
        git_ops: Box<dyn GitOperations>,
        install_ops: Box<dyn InstallOperations>,
    ) -> Self {
        Self {
            git_ops,
            install_ops,
        }
    }

    /// Create the project described by `options`.
    pub fn run(
        &self,
        options: &ScaffoldOptions,
        observer: &mut dyn ScaffoldObserver,
    ) -> Result<ScaffoldReport> {
        let target = options.target_dir();
        if target.symlink_metadata().is_ok() {
            return Err(Error::DirectoryExists {
                path: target.display().to_string(),
            });
        }

        run_step(observer, Step::Preflight, || {
            self.git_ops.ensure_available()?;
            if !options.skip_install {
                self.install_ops.ensure_available(options.package_manager)?;
            }
            Ok(())
        })?;

        let template = &options.template;
        run_step(
            observer,
            Step::CloneTemplate {
                url: template.url.clone(),
                r#ref: template.r#ref.clone(),
            },
            || self.clone_fresh(&template.url, &template.r#ref, &target),
        )?;
        info!("cloned template into {}", target.display());

        for addon in &options.addons {
            let step = Step::CloneAddOn {
                name: addon.name.clone(),
                directory: addon.directory.clone(),
            };
            run_step(observer, step, || {
                let addon_dir = target.join(&addon.directory);
                if addon_dir.symlink_metadata().is_ok() {
                    return Err(Error::DirectoryExists {
                        path: addon_dir.display().to_string(),
                    });
                }
                self.clone_fresh(&addon.url, &addon.r#ref, &addon_dir)
            })?;
            info!("added {} at {}", addon.name, addon.directory);
        }

        let (renamed_package, registrations) = run_step(observer, Step::Register, || {
            register_addons(&target, options)
        })?;

        let mut installed = false;
        let removed_lockfiles = self
            .install_ops
            .remove_foreign_lockfiles(options.package_manager, &target)?;
        if !options.skip_install {
            run_step(observer, Step::Install(options.package_manager), || {
                self.install_ops.install(options.package_manager, &target)
            })?;
            installed = true;
        }

        let git = if options.skip_git {
            GitOutcome::Skipped
        } else if self.git_ops.is_inside_work_tree(&target) {
            info!("{} is inside a git work tree, not initializing", target.display());
            GitOutcome::InsideExistingRepository
        } else {
            run_step(observer, Step::InitGit, || {
                self.git_ops
                    .init_repository(&target, defaults::INITIAL_COMMIT_MESSAGE)
            })?;
            GitOutcome::Initialized
        };

        Ok(ScaffoldReport {
            name: options.name.clone(),
            target,
            package_manager: options.package_manager,
            addons: options.addons.iter().map(|a| a.name.clone()).collect(),
            registrations,
            renamed_package,
            removed_lockfiles,
            installed,
            git,
        })
    }

    /// Clone and forget the source repository's history.
    fn clone_fresh(&self, url: &str, ref_name: &str, dir: &Path) -> Result<()> {
        self.git_ops.clone_shallow(url, ref_name, dir)?;
        self.git_ops.remove_history(dir)?;
        Ok(())
    }
}

fn run_step<T>(
    observer: &mut dyn ScaffoldObserver,
    step: Step,
    work: impl FnOnce() -> Result<T>,
) -> Result<T> {
    observer.step_started(&step);
    match work() {
        Ok(value) => {
            observer.step_finished(&step);
            Ok(value)
        }
        Err(error) => {
            observer.step_failed(&step, &error);
            Err(error)
        }
    }
}

fn register_addons(
    target: &Path,
    options: &ScaffoldOptions,
) -> Result<(bool, Vec<RegistrationRecord>)> {
    let renamed = merge::set_package_name(target, options.name.as_str())?;

    let mut records = Vec::new();
    for addon in &options.addons {
        for registration in addon.registrations() {
            let outcome = merge::register(target, &registration)?;
            records.push(RegistrationRecord {
                addon: addon.name.clone(),
                registration,
                outcome,
            });
        }
    }

    Ok((renamed, records))
}
