//! # Create Command Implementation
//!
//! The default action of `scaffolder`: create `<NAME>` from the configured
//! template, add the requested add-ons, and optionally install dependencies
//! and initialize git.
//!
//! ## Behavior
//!
//! 1.  **Settings**: load the settings file given by `--config` (or
//!     `SCAFFOLDER_CONFIG`); without one, use the built-in catalog.
//! 2.  **Validation**: check the project name and resolve add-on names before
//!     anything touches the filesystem.
//! 3.  **Execution**: run the library workflow, showing a spinner for each
//!     step.
//! 4.  **Report**: print what was created and the commands to run next.

use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use indicatif::ProgressBar;

use scaffolder::config::Settings;
use scaffolder::defaults::CONFIG_ENV;
use scaffolder::error::Error;
use scaffolder::output::{emoji, OutputConfig};
use scaffolder::package_manager::PackageManager;
use scaffolder::project_name::ProjectName;
use scaffolder::scaffold::{
    GitOutcome, ScaffoldObserver, ScaffoldOptions, ScaffoldReport, Scaffolder, Step,
};
use scaffolder::suggestions;

use super::load_settings;

/// Create a new project
#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Name of the project (also the directory that is created)
    #[arg(value_name = "NAME", required_unless_present = "list_addons")]
    pub name: Option<String>,

    /// Package manager used to install dependencies (npm, yarn, pnpm, bun)
    #[arg(short = 'p', long, value_name = "MANAGER")]
    pub package_manager: Option<PackageManager>,

    /// Add-on to include (repeatable, or comma-separated)
    #[arg(short = 'a', long = "addon", value_name = "NAME", value_delimiter = ',')]
    pub addons: Vec<String>,

    /// Do not install dependencies
    #[arg(long)]
    pub skip_install: bool,

    /// Do not initialize a git repository
    #[arg(long)]
    pub skip_git: bool,

    /// Template repository URL (overrides the settings file)
    #[arg(long, value_name = "URL")]
    pub template: Option<String>,

    /// Branch or tag of the template to clone
    #[arg(long = "ref", value_name = "REF")]
    pub git_ref: Option<String>,

    /// Create the project inside this directory instead of the current one
    #[arg(short = 'C', long, value_name = "DIR")]
    pub directory: Option<PathBuf>,

    /// Settings file describing the template and the add-on catalog
    #[arg(short = 'c', long, value_name = "PATH", env = CONFIG_ENV)]
    pub config: Option<PathBuf>,

    /// List the available add-ons and exit
    #[arg(long)]
    pub list_addons: bool,
}

/// Execute the create command
pub fn execute(args: CreateArgs, output: &OutputConfig) -> Result<()> {
    let settings = load_settings(args.config.as_deref())?;
    let parent_dir = match &args.directory {
        Some(dir) => dir.clone(),
        None => env::current_dir().context("Failed to determine the current directory")?,
    };
    let options = build_options(&args, &settings, parent_dir)?;
    let target = options.target_dir();

    log::debug!(
        "creating {} with {} (add-ons: {:?})",
        target.display(),
        options.package_manager,
        args.addons
    );

    println!(
        "{} Creating {} in {}",
        emoji(output, "🚀", ">>"),
        style(options.name.as_str()).bold(),
        options.parent_dir.display()
    );

    let existed = target.symlink_metadata().is_ok();
    let mut observer = SpinnerObserver::new(output.clone());
    let result = Scaffolder::new().run(&options, &mut observer);
    let report = result.map_err(|error| failure(error, &target, existed))?;

    print!("{}", render_report(&report, output));
    Ok(())
}

/// Attach the hint that fits the state the target directory is in.
///
/// `existed` is whether the target was there before the run started; only
/// then is the directory the user's and not a leftover of this run.
fn failure(error: Error, target: &Path, existed: bool) -> anyhow::Error {
    if existed {
        suggestions::directory_exists(target)
    } else if target.symlink_metadata().is_ok() {
        anyhow::anyhow!("{}\n\n{}", error, suggestions::partial_project(target))
    } else {
        error.into()
    }
}

/// Turn arguments and settings into workflow options.
///
/// Fails on an invalid project name or an unknown add-on.
fn build_options(
    args: &CreateArgs,
    settings: &Settings,
    parent_dir: PathBuf,
) -> Result<ScaffoldOptions> {
    let raw_name = args.name.as_deref().unwrap_or_default();
    let name = ProjectName::parse(raw_name)?;

    let addons = settings
        .resolve_addons(&args.addons)?
        .into_iter()
        .cloned()
        .collect();

    let mut template = settings.template.clone();
    if let Some(url) = &args.template {
        template.url = url.clone();
    }
    if let Some(git_ref) = &args.git_ref {
        template.r#ref = git_ref.clone();
    }

    Ok(ScaffoldOptions {
        name,
        parent_dir,
        package_manager: args.package_manager.unwrap_or_else(PackageManager::detect),
        template,
        addons,
        skip_install: args.skip_install,
        skip_git: args.skip_git,
    })
}

/// Shows a spinner while a step runs and a status line once it ends.
struct SpinnerObserver {
    output: OutputConfig,
    spinner: Option<ProgressBar>,
}

impl SpinnerObserver {
    fn new(output: OutputConfig) -> Self {
        Self {
            output,
            spinner: None,
        }
    }

    fn clear(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

impl ScaffoldObserver for SpinnerObserver {
    fn step_started(&mut self, step: &Step) {
        self.clear();
        self.spinner = Some(self.output.spinner(&step.to_string()));
    }

    fn step_finished(&mut self, step: &Step) {
        self.clear();
        println!("  {} {}", emoji(&self.output, "✔", "[ok]"), step);
    }

    fn step_failed(&mut self, step: &Step, _error: &Error) {
        self.clear();
        eprintln!("  {} {}", emoji(&self.output, "✖", "[failed]"), step);
    }
}

fn render_report(report: &ScaffoldReport, output: &OutputConfig) -> String {
    let mut out = String::new();

    for record in report.skipped_registrations() {
        out.push_str(&format!(
            "{} {} not found, {} was not registered in it\n",
            emoji(output, "⚠️ ", "warning:"),
            record.registration.file,
            record.addon
        ));
    }

    if !report.removed_lockfiles.is_empty() {
        out.push_str(&format!(
            "Removed lockfiles of other package managers: {}\n",
            report.removed_lockfiles.join(", ")
        ));
    }

    match report.git {
        GitOutcome::Initialized => {}
        GitOutcome::Skipped => out.push_str("Skipped git initialization\n"),
        GitOutcome::InsideExistingRepository => {
            out.push_str("Inside an existing git repository, no new repository created\n")
        }
    }

    out.push('\n');
    out.push_str(&format!(
        "{} Created {} at {}\n",
        emoji(output, "✅", "Success:"),
        report.name,
        report.target.display()
    ));
    if !report.addons.is_empty() {
        out.push_str(&format!("   Add-ons: {}\n", report.addons.join(", ")));
    }

    out.push_str("\nNext steps:\n");
    for command in report.next_steps() {
        out.push_str(&format!("  {}\n", command));
    }
    out
}
