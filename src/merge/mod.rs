//! Registering add-ons in project configuration files
//!
//! Add-ons announce themselves to the project tooling by appending literal
//! strings to lists inside JSON configuration files (`package.json`
//! workspaces, `tsconfig.json` include). The `json` submodule performs those
//! appends without ever creating duplicates.
//!
//! ## Common Types
//!
//! The `PathSegment` enum and `parse_path` turn a path expression such as
//! `workspaces.packages` or `compilerOptions["paths"]` into the sequence of
//! keys and indices to follow inside a document.

pub mod json;

pub use json::{append_unique, register, set_package_name, RegistrationOutcome};

/// A segment in a path expression
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathSegment {
    /// A named key for accessing object members
    Key(String),
    /// A numeric index for accessing array elements
    Index(usize),
}

/// Parse a path string into segments
///
/// Supports:
/// - Dot notation: `workspaces.packages`
/// - Bracket notation: `compilerOptions["paths"]` or `compilerOptions['paths']`
/// - Array indices: `references[0].path`
/// - Escaped dots: `exports\.map` (a single key containing a dot)
///
/// # Examples
///
/// ```
/// use scaffolder::merge::{parse_path, PathSegment};
///
/// let segments = parse_path("workspaces.packages");
/// assert_eq!(segments.len(), 2);
/// assert_eq!(segments[1], PathSegment::Key("packages".to_string()));
/// ```
pub fn parse_path(path: &str) -> Vec<PathSegment> {
    if path.trim().is_empty() || path == "/" {
        return Vec::new();
    }

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars().peekable();
    let mut escaped = false;

    let flush = |current: &mut String, segments: &mut Vec<PathSegment>| {
        if !current.is_empty() {
            segments.push(PathSegment::Key(std::mem::take(current)));
        }
    };

    while let Some(ch) = chars.next() {
        if escaped {
            current.push(ch);
            escaped = false;
            continue;
        }

        match ch {
            '\\' => escaped = true,
            '.' => flush(&mut current, &mut segments),
            '[' => {
                flush(&mut current, &mut segments);

                match chars.peek().copied() {
                    Some(quote @ ('"' | '\'')) => {
                        chars.next();
                        let mut key = String::new();
                        let mut key_escaped = false;

                        while let Some(ch) = chars.next() {
                            if key_escaped {
                                key.push(ch);
                                key_escaped = false;
                            } else if ch == '\\' {
                                key_escaped = true;
                            } else if ch == quote && chars.peek() == Some(&']') {
                                chars.next();
                                break;
                            } else {
                                key.push(ch);
                            }
                        }

                        segments.push(PathSegment::Key(key));
                    }
                    _ => {
                        let mut content = String::new();
                        for next in chars.by_ref() {
                            if next == ']' {
                                break;
                            }
                            content.push(next);
                        }

                        let content = content.trim();
                        if let Ok(idx) = content.parse::<usize>() {
                            segments.push(PathSegment::Index(idx));
                        } else if !content.is_empty() {
                            segments.push(PathSegment::Key(content.to_string()));
                        }
                    }
                }
            }
            _ => current.push(ch),
        }
    }

    flush(&mut current, &mut segments);
    segments
}

/// Render segments back into the dotted form, for messages.
pub fn display_path(segments: &[PathSegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        match segment {
            PathSegment::Key(key) => {
                if !out.is_empty() {
                    out.push('.');
                }
                out.push_str(key);
            }
            PathSegment::Index(idx) => out.push_str(&format!("[{}]", idx)),
        }
    }
    out
}
