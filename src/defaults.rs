//! Default values for scaffolder configuration.
//!
//! This module provides centralized default values used across the library
//! and the CLI, so the built-in catalog lives in exactly one place.

use crate::config::{AddOn, TemplateSource};

/// Environment variable naming a settings file.
pub const CONFIG_ENV: &str = "SCAFFOLDER_CONFIG";

/// Template repository used when neither a flag nor a settings file names one.
pub const DEFAULT_TEMPLATE_URL: &str = "https://github.com/scaffolder-templates/starter.git";

/// Branch of the default template.
pub const DEFAULT_REF: &str = "main";

/// Directory add-ons are cloned into, relative to the project root.
pub const ADDON_PARENT_DIR: &str = "packages";

/// Commit message of the first commit in a freshly initialized project.
pub const INITIAL_COMMIT_MESSAGE: &str = "Initial commit from scaffolder";

/// Script the report tells users to run once the project is ready.
pub const DEV_SCRIPT: &str = "dev";

/// Returns the default template source.
pub fn default_template() -> TemplateSource {
    TemplateSource {
        url: DEFAULT_TEMPLATE_URL.to_string(),
        r#ref: DEFAULT_REF.to_string(),
    }
}

/// Returns the built-in add-on catalog.
pub fn default_addons() -> Vec<AddOn> {
    [
        ("docs", "Documentation site"),
        ("api", "HTTP API service"),
        ("ui", "Shared UI component library"),
        ("e2e", "End-to-end test suite"),
    ]
    .into_iter()
    .map(|(name, description)| AddOn {
        name: name.to_string(),
        description: description.to_string(),
        url: format!("https://github.com/scaffolder-templates/addon-{}.git", name),
        r#ref: DEFAULT_REF.to_string(),
        directory: format!("{}/{}", ADDON_PARENT_DIR, name),
        register: Vec::new(),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_template() {
        let template = default_template();
        assert_eq!(template.url, DEFAULT_TEMPLATE_URL);
        assert_eq!(template.r#ref, "main");
    }

    #[test]
    fn test_default_addons_live_under_packages() {
        let addons = default_addons();
        assert_eq!(addons.len(), 4);
        for addon in &addons {
            assert_eq!(addon.directory, format!("packages/{}", addon.name));
            assert!(addon.url.ends_with(&format!("addon-{}.git", addon.name)));
            assert!(addon.register.is_empty());
        }
    }
}
