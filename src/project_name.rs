//! Project name validation.
//!
//! The project name doubles as the target directory name and as the `name`
//! field of the generated `package.json`, so it follows the npm rules for
//! unscoped package names.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Longest name npm accepts.
pub const MAX_LENGTH: usize = 214;

/// Names npm refuses regardless of their characters.
const RESERVED: &[&str] = &["node_modules", "favicon.ico"];

fn url_safe() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9._~-]+$").expect("static regex is valid"))
}

/// A validated project name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProjectName(String);

impl ProjectName {
    /// Validate `input` and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidProjectName` with the first rule the name breaks.
    pub fn parse(input: &str) -> Result<Self> {
        let fail = |reason: &str| {
            Err(Error::InvalidProjectName {
                name: input.to_string(),
                reason: reason.to_string(),
            })
        };

        if input.is_empty() {
            return fail("name length must be greater than zero");
        }
        if input.trim() != input {
            return fail("name cannot contain leading or trailing spaces");
        }
        if input.chars().count() > MAX_LENGTH {
            return fail("name can no longer contain more than 214 characters");
        }
        if input.starts_with('.') {
            return fail("name cannot start with a period");
        }
        if input.starts_with('_') {
            return fail("name cannot start with an underscore");
        }
        if RESERVED.contains(&input.to_lowercase().as_str()) {
            return fail("name is a reserved name");
        }
        if input.chars().any(|c| c.is_uppercase()) {
            return fail("name can no longer contain capital letters");
        }
        if !url_safe().is_match(input) {
            return fail("name can only contain URL-friendly characters (a-z, 0-9, '-', '.', '_', '~')");
        }

        Ok(Self(input.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ProjectName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
