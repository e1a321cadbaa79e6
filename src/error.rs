//! # Error Handling
//!
//! This module defines the centralized error type for the `scaffolder`
//! library. It uses `thiserror` to describe every failure the scaffolding
//! workflow can run into, each with enough context to tell the user what went
//! wrong and, where possible, how to fix it.
//!
//! ## Key Components
//!
//! - **`Error`**: The enum of all failure modes: invalid input (project name,
//!   add-on selection, settings file), a pre-existing target directory,
//!   failed external commands (git, package managers) and file-level errors
//!   while patching JSON configuration.
//!
//! - **`Result<T>`**: A type alias for `std::result::Result<T, Error>`, used
//!   throughout the library.
//!
//! There is no recovery logic attached to any variant: the binary reports the
//! error and exits with a non-zero status.

use thiserror::Error;

fn hint_suffix(hint: &Option<String>) -> String {
    hint.as_ref()
        .map(|h| format!("\n  hint: {}", h))
        .unwrap_or_default()
}

/// Main error type for scaffolder operations
#[derive(Error, Debug)]
pub enum Error {
    /// The project name is not usable as a package and directory name.
    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    /// The directory the project (or an add-on) would be written to exists.
    #[error("Directory already exists: {path}")]
    DirectoryExists { path: String },

    /// Cloning the template or an add-on repository failed.
    #[error("Git clone error for {url}@{git_ref}: {message}{}", hint_suffix(hint))]
    GitClone {
        url: String,
        git_ref: String,
        message: String,
        /// Optional hint for how to resolve the clone issue
        hint: Option<String>,
    },

    /// A git command other than clone failed.
    #[error("Git command failed in {path}: {command} - {stderr}")]
    GitCommand {
        command: String,
        path: String,
        stderr: String,
    },

    /// A required external program could not be executed.
    #[error("Required tool not found: {tool}\n  hint: install {tool} and make sure it is on your PATH")]
    ToolNotFound { tool: String },

    /// The package manager exited with a failure while installing.
    #[error("Dependency installation with {manager} failed: {stderr}")]
    Install { manager: String, stderr: String },

    /// An add-on name that is not in the catalog was requested.
    #[error("Unknown add-on '{name}'{}\n  available add-ons: {available}", suggestion.as_ref().map(|s| format!(" (did you mean '{}'?)", s)).unwrap_or_default())]
    UnknownAddOn {
        name: String,
        available: String,
        /// A catalog entry close to the requested name
        suggestion: Option<String>,
    },

    /// The settings file is malformed or violates a constraint.
    #[error("Configuration error: {message}{}", hint_suffix(hint))]
    ConfigParse {
        message: String,
        /// Optional hint for how to fix the configuration issue
        hint: Option<String>,
    },

    /// A JSON configuration file could not be read, navigated or written.
    #[error("JSON error in {path}: {message}")]
    Json { path: String, message: String },

    /// An I/O error, wrapped from `std::io::Error`.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A YAML parsing error, wrapped from `serde_yaml::Error`.
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_project_name() {
        let error = Error::InvalidProjectName {
            name: "My App".to_string(),
            reason: "name can no longer contain capital letters".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Invalid project name 'My App'"));
        assert!(display.contains("capital letters"));
    }

    #[test]
    fn test_error_display_directory_exists() {
        let error = Error::DirectoryExists {
            path: "/tmp/my-app".to_string(),
        };
        assert_eq!(error.to_string(), "Directory already exists: /tmp/my-app");
    }

    #[test]
    fn test_error_display_git_clone() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            git_ref: "main".to_string(),
            message: "Authentication failed".to_string(),
            hint: None,
        };
        let display = error.to_string();
        assert!(display.contains("Git clone error"));
        assert!(display.contains("https://github.com/test/repo.git@main"));
        assert!(display.contains("Authentication failed"));
        assert!(!display.contains("hint:"));
    }

    #[test]
    fn test_error_display_git_clone_with_hint() {
        let error = Error::GitClone {
            url: "https://github.com/test/repo.git".to_string(),
            git_ref: "main".to_string(),
            message: "Authentication failed".to_string(),
            hint: Some("Check SSH keys".to_string()),
        };
        let display = error.to_string();
        assert!(display.contains("hint: Check SSH keys"));
    }

    #[test]
    fn test_error_display_git_command() {
        let error = Error::GitCommand {
            command: "git commit".to_string(),
            path: "/tmp/my-app".to_string(),
            stderr: "Please tell me who you are".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Git command failed in /tmp/my-app"));
        assert!(display.contains("git commit"));
        assert!(display.contains("Please tell me who you are"));
    }

    #[test]
    fn test_error_display_tool_not_found() {
        let error = Error::ToolNotFound {
            tool: "pnpm".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("Required tool not found: pnpm"));
        assert!(display.contains("hint: install pnpm"));
    }

    #[test]
    fn test_error_display_install() {
        let error = Error::Install {
            manager: "yarn".to_string(),
            stderr: "network timeout".to_string(),
        };
        let display = error.to_string();
        assert!(display.contains("installation with yarn failed"));
        assert!(display.contains("network timeout"));
    }

    #[test]
    fn test_error_display_unknown_addon_with_suggestion() {
        let error = Error::UnknownAddOn {
            name: "dosc".to_string(),
            available: "docs, api".to_string(),
            suggestion: Some("docs".to_string()),
        };
        let display = error.to_string();
        assert!(display.contains("Unknown add-on 'dosc'"));
        assert!(display.contains("did you mean 'docs'?"));
        assert!(display.contains("available add-ons: docs, api"));
    }

    #[test]
    fn test_error_display_unknown_addon_without_suggestion() {
        let error = Error::UnknownAddOn {
            name: "graphql".to_string(),
            available: "docs, api".to_string(),
            suggestion: None,
        };
        assert!(!error.to_string().contains("did you mean"));
    }

    #[test]
    fn test_error_display_config_parse_with_hint() {
        let error = Error::ConfigParse {
            message: "duplicate add-on 'docs'".to_string(),
            hint: Some("Give every add-on a unique name".to_string()),
        };
        let display = error.to_string();
        assert!(display.contains("Configuration error: duplicate add-on 'docs'"));
        assert!(display.contains("hint: Give every add-on a unique name"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        let display = error.to_string();
        assert!(display.contains("I/O error"));
        assert!(display.contains("File not found"));
    }

    #[test]
    fn test_error_from_yaml_error() {
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>("invalid: [unclosed").unwrap_err();
        let error: Error = yaml_error.into();
        assert!(error.to_string().contains("YAML parsing error"));
    }
}
