//! # Error Suggestions
//!
//! This module provides helper functions for generating helpful error
//! messages with hints and suggestions. Errors should tell users what went
//! wrong AND how to fix it.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scaffolder::suggestions;
//!
//! // Instead of:
//! anyhow::bail!("Configuration file not found: {}", path.display());
//!
//! // Use:
//! return Err(suggestions::config_not_found(path));
//! ```

use std::path::Path;

use crate::defaults::CONFIG_ENV;

/// Generate an error for when the settings file is not found.
///
/// Includes hints about:
/// - Using the -c/--config flag
/// - Using the SCAFFOLDER_CONFIG environment variable
/// - Running without a settings file
pub fn config_not_found(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Configuration file not found: {path}\n\n\
         hint: Use -c/--config to specify a different path\n\
         hint: Unset {env} to use the built-in template and add-ons",
        path = path.display(),
        env = CONFIG_ENV,
    )
}

/// Generate an error for a project directory that is already there.
pub fn directory_exists(path: &Path) -> anyhow::Error {
    anyhow::anyhow!(
        "Directory already exists: {path}\n\n\
         hint: Choose a different project name\n\
         hint: Use -C/--directory to create the project somewhere else",
        path = path.display()
    )
}

/// Hint appended when a run fails after the project directory was created.
pub fn partial_project(path: &Path) -> String {
    format!(
        "hint: The partially created project was left at {}; remove it before retrying",
        path.display()
    )
}

/// Find a similar string from a list of candidates using edit distance.
///
/// Returns Some(candidate) if a close match is found (edit distance <= 2).
pub fn find_similar<'a>(input: &str, candidates: &[&'a str]) -> Option<&'a str> {
    candidates
        .iter()
        .filter_map(|&candidate| {
            let distance = edit_distance(input, candidate);
            if distance <= 2 && distance < input.len() {
                Some((candidate, distance))
            } else {
                None
            }
        })
        .min_by_key(|(_, distance)| *distance)
        .map(|(candidate, _)| candidate)
}

/// Calculate the Levenshtein edit distance between two strings.
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    // Single rolling row.
    let mut previous: Vec<usize> = (0..=b_chars.len()).collect();
    for (i, a_char) in a_chars.iter().enumerate() {
        let mut current = vec![i + 1; b_chars.len() + 1];
        for (j, b_char) in b_chars.iter().enumerate() {
            let cost = usize::from(a_char != b_char);
            current[j + 1] = (previous[j + 1] + 1)
                .min(current[j] + 1)
                .min(previous[j] + cost);
        }
        previous = current;
    }

    previous[b_chars.len()]
}
