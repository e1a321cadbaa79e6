//! # Scaffolder Library
//!
//! This library creates new JavaScript/TypeScript projects from a template
//! repository. It is designed to be used by the `scaffolder` command-line
//! tool but can also be embedded in other tools that need to stamp out
//! projects.
//!
//! ## Quick Example
//!
//! ```
//! use scaffolder::config::Settings;
//! use scaffolder::project_name::ProjectName;
//!
//! // Names follow npm's package naming rules
//! assert!(ProjectName::parse("my-app").is_ok());
//! assert!(ProjectName::parse("My App").is_err());
//!
//! // Parse a settings file describing the template and the add-on catalog
//! let settings = Settings::parse(r#"
//! template:
//!   url: https://example.com/starter.git
//! addons:
//!   - name: docs
//!     url: https://example.com/docs.git
//! "#).unwrap();
//! assert_eq!(settings.addons[0].directory, "packages/docs");
//! ```
//!
//! ## Core Concepts
//!
//! - **Project names (`project_name`)**: validation of the name the project
//!   directory and package are given.
//! - **Settings (`config`, `defaults`)**: the template source and the add-on
//!   catalog, built in or loaded from YAML.
//! - **Registration (`merge`)**: appending add-on entries to lists inside JSON
//!   configuration files without creating duplicates.
//! - **External tools (`git`, `install`, `repository`)**: cloning, history
//!   removal, repository initialization and dependency installation, behind
//!   traits so the workflow can be tested without the real executables.
//! - **Workflow (`scaffold`)**: the ordered steps that turn all of the above
//!   into a ready project.
//!
//! ## Execution Flow
//!
//! `scaffold::Scaffolder::run` executes these steps strictly in order, each
//! external command finishing before the next begins:
//!
//! 1.  **Target check**: refuse to overwrite an existing directory.
//! 2.  **Preflight**: make sure git and the package manager can be run.
//! 3.  **Template**: clone the template and drop its history.
//! 4.  **Add-ons**: clone each add-on into its subdirectory.
//! 5.  **Registration**: patch `package.json` and `tsconfig.json`.
//! 6.  **Install**: install dependencies, unless skipped.
//! 7.  **Git**: initialize a repository with an initial commit, unless skipped.

pub mod config;
pub mod defaults;
pub mod error;
pub mod git;
pub mod install;
pub mod merge;
pub mod output;
pub mod package_manager;
pub mod project_name;
pub mod repository;
pub mod scaffold;
pub mod suggestions;

#[cfg(test)]
mod merge_proptest;
