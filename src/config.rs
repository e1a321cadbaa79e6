//! # Settings and Add-on Catalog
//!
//! This module defines the data structures behind the optional settings file
//! (`--config` / `SCAFFOLDER_CONFIG`) and the built-in defaults it overrides.
//!
//! ## Key Components
//!
//! - **`Settings`**: The template repository plus the add-on catalog.
//! - **`AddOn`**: A repository cloned into a subdirectory of the project,
//!   together with the JSON registrations that announce it to the tooling.
//! - **`Registration`**: "append this literal string to the list at this path
//!   of this JSON file".
//!
//! ## File Format
//!
//! ```yaml
//! template:
//!   url: https://github.com/acme/starter.git
//!   ref: v2
//! addons:
//!   - name: docs
//!     description: Documentation site
//!     url: https://github.com/acme/docs.git
//!     # ref defaults to main, directory to packages/<name>
//!     register:
//!       - file: package.json
//!         path: workspaces
//!         value: packages/docs
//! ```
//!
//! Every top-level key is optional; an `addons` list replaces the built-in
//! catalog entirely. When an add-on has no `register` entries, registrations
//! for `package.json` workspaces and `tsconfig.json` include are derived from
//! its directory.

use std::collections::HashSet;
use std::path::{Component, Path};

use serde::{Deserialize, Serialize};

use crate::defaults;
use crate::error::{Error, Result};
use crate::suggestions;

/// File that lists the workspace packages.
pub const PACKAGE_JSON: &str = "package.json";

/// File that lists the TypeScript sources.
pub const TSCONFIG_JSON: &str = "tsconfig.json";

/// The repository a new project starts from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSource {
    /// Git URL (anything `git clone` accepts, including local paths).
    pub url: String,
    /// Branch or tag to clone.
    #[serde(rename = "ref", default = "default_ref")]
    pub r#ref: String,
}

/// Appends `value` to the JSON list at `path` inside `file`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Registration {
    /// JSON file relative to the project root.
    pub file: String,
    /// Dotted path to the list (see `merge::parse_path`).
    pub path: String,
    /// Literal string appended to the list.
    pub value: String,
}

/// An optional repository cloned into a subdirectory of the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AddOn {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
    #[serde(rename = "ref", default = "default_ref")]
    pub r#ref: String,
    /// Destination relative to the project root; empty means `packages/<name>`.
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub register: Vec<Registration>,
}

impl AddOn {
    /// The registrations to apply for this add-on.
    ///
    /// Explicit `register` entries win; otherwise the add-on is added to the
    /// `package.json` workspaces and to the `tsconfig.json` include list.
    pub fn registrations(&self) -> Vec<Registration> {
        if !self.register.is_empty() {
            return self.register.clone();
        }

        vec![
            Registration {
                file: PACKAGE_JSON.to_string(),
                path: "workspaces".to_string(),
                value: self.directory.clone(),
            },
            Registration {
                file: TSCONFIG_JSON.to_string(),
                path: "include".to_string(),
                value: format!("{}/**/*", self.directory),
            },
        ]
    }
}

/// Template and add-on configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    #[serde(default = "defaults::default_template")]
    pub template: TemplateSource,
    #[serde(default = "defaults::default_addons")]
    pub addons: Vec<AddOn>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            template: defaults::default_template(),
            addons: defaults::default_addons(),
        }
    }
}

fn default_ref() -> String {
    defaults::DEFAULT_REF.to_string()
}

impl Settings {
    /// Parse a settings document, fill in derived defaults and validate it.
    pub fn parse(yaml_content: &str) -> Result<Self> {
        // An empty document (or one holding only comments) means "all defaults".
        let mut settings = if yaml_content.trim().is_empty() {
            Settings::default()
        } else {
            serde_yaml::from_str::<Option<Settings>>(yaml_content)
                .map_err(|e| Error::ConfigParse {
                    message: e.to_string(),
                    hint: Some(
                        "Allowed top-level keys are 'template' and 'addons'".to_string(),
                    ),
                })?
                .unwrap_or_default()
        };

        for addon in &mut settings.addons {
            if addon.directory.is_empty() {
                addon.directory = format!("{}/{}", defaults::ADDON_PARENT_DIR, addon.name);
            } else {
                addon.directory = normalize_directory(&addon.directory);
            }
        }

        settings.validate()?;
        Ok(settings)
    }

    /// Read and parse a settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Check the constraints serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.template.url.trim().is_empty() {
            return Err(config_error("template url cannot be empty", None));
        }
        if self.template.r#ref.trim().is_empty() {
            return Err(config_error("template ref cannot be empty", None));
        }

        let mut names = HashSet::new();
        let mut directories = HashSet::new();
        for addon in &self.addons {
            if addon.name.trim().is_empty() {
                return Err(config_error("add-on name cannot be empty", None));
            }
            if !names.insert(addon.name.as_str()) {
                return Err(config_error(
                    &format!("duplicate add-on '{}'", addon.name),
                    Some("Give every add-on a unique name"),
                ));
            }
            if addon.url.trim().is_empty() {
                return Err(config_error(
                    &format!("add-on '{}' has an empty url", addon.name),
                    None,
                ));
            }
            check_relative(&addon.directory, &format!("add-on '{}' directory", addon.name))?;
            if !directories.insert(addon.directory.as_str()) {
                return Err(config_error(
                    &format!(
                        "add-on '{}' reuses directory '{}'",
                        addon.name, addon.directory
                    ),
                    Some("Each add-on needs its own directory"),
                ));
            }

            for registration in &addon.register {
                check_relative(
                    &registration.file,
                    &format!("add-on '{}' registration file", addon.name),
                )?;
                if registration.path.trim().is_empty() || registration.value.is_empty() {
                    return Err(config_error(
                        &format!(
                            "add-on '{}' has a registration with an empty path or value",
                            addon.name
                        ),
                        None,
                    ));
                }
            }
        }

        Ok(())
    }

    /// Look up an add-on by name.
    pub fn addon(&self, name: &str) -> Option<&AddOn> {
        self.addons.iter().find(|addon| addon.name == name)
    }

    /// Comma separated catalog names, for messages.
    pub fn addon_names(&self) -> String {
        self.addons
            .iter()
            .map(|addon| addon.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Map requested add-on names to catalog entries.
    ///
    /// Repeated names are collapsed, keeping the first occurrence's position.
    ///
    /// # Errors
    ///
    /// Returns `Error::UnknownAddOn` for the first name not in the catalog.
    pub fn resolve_addons<S: AsRef<str>>(&self, requested: &[S]) -> Result<Vec<&AddOn>> {
        let mut seen = HashSet::new();
        let mut resolved = Vec::new();

        for name in requested {
            let name = name.as_ref().trim();
            // `-a docs,` yields an empty element.
            if name.is_empty() || !seen.insert(name) {
                continue;
            }
            match self.addon(name) {
                Some(addon) => resolved.push(addon),
                None => {
                    let candidates: Vec<&str> =
                        self.addons.iter().map(|addon| addon.name.as_str()).collect();
                    return Err(Error::UnknownAddOn {
                        name: name.to_string(),
                        available: self.addon_names(),
                        suggestion: suggestions::find_similar(name, &candidates)
                            .map(str::to_string),
                    });
                }
            }
        }

        Ok(resolved)
    }
}

fn config_error(message: &str, hint: Option<&str>) -> Error {
    Error::ConfigParse {
        message: message.to_string(),
        hint: hint.map(str::to_string),
    }
}

/// Drop `.` components and redundant separators: `./packages//docs/`
/// becomes `packages/docs`. Paths that leave the root or name the root itself
/// are returned unchanged so validation can report them as written.
fn normalize_directory(path: &str) -> String {
    let candidate = Path::new(path);
    let mut parts = Vec::new();
    for component in candidate.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_string_lossy()),
            Component::CurDir => {}
            _ => return path.to_string(),
        }
    }
    if parts.is_empty() {
        return path.to_string();
    }
    parts.join("/")
}

/// A path must stay inside the project root and name something below it.
fn check_relative(path: &str, what: &str) -> Result<()> {
    let candidate = Path::new(path);
    let escapes = candidate.components().any(|component| {
        matches!(
            component,
            Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    });
    let below_root = candidate
        .components()
        .any(|component| matches!(component, Component::Normal(_)));

    if path.trim().is_empty() || escapes || !below_root || candidate.is_absolute() {
        return Err(config_error(
            &format!("{} '{}' must be a relative path inside the project", what, path),
            Some("Use a path such as 'packages/docs'"),
        ));
    }
    Ok(())
}
