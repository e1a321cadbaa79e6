//! JSON registration operations
//!
//! Registering an add-on appends a literal string to a list inside a JSON
//! configuration file. The list behaves like an ordered set: a value that is
//! already present is never appended again, and existing entries keep their
//! order.
//!
//! Files are rewritten only when something changed. Key order is preserved
//! (serde_json's `preserve_order` feature) and the document is written back
//! pretty-printed with two-space indentation, keeping the original trailing
//! newline if there was one.

use std::fmt;
use std::fs;
use std::io::Write;
use std::path::Path;

use log::{debug, warn};
use serde_json::Value as JsonValue;
use tempfile::NamedTempFile;

use super::{display_path, parse_path, PathSegment};
use crate::config::{Registration, PACKAGE_JSON};
use crate::error::{Error, Result};

/// What a registration did to its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// The value was appended and the file rewritten.
    Added,
    /// The value was already in the list; the file was left untouched.
    AlreadyPresent,
    /// The file does not exist in the project.
    Skipped,
}

impl fmt::Display for RegistrationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RegistrationOutcome::Added => "added",
            RegistrationOutcome::AlreadyPresent => "already present",
            RegistrationOutcome::Skipped => "skipped (file not found)",
        })
    }
}

/// A parsed JSON file plus the formatting detail we restore on write.
struct Document {
    value: JsonValue,
    trailing_newline: bool,
}

fn json_error(path: &Path, message: impl Into<String>) -> Error {
    Error::Json {
        path: path.display().to_string(),
        message: message.into(),
    }
}

/// Read `path`, returning `None` when the file does not exist.
fn read_document(path: &Path) -> Result<Option<Document>> {
    if !path.is_file() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)?;
    let value = serde_json::from_str(&content)
        .map_err(|e| json_error(path, format!("invalid JSON: {}", e)))?;

    Ok(Some(Document {
        value,
        trailing_newline: content.ends_with('\n'),
    }))
}

fn write_document(path: &Path, document: &Document) -> Result<()> {
    let mut content = serde_json::to_string_pretty(&document.value)
        .map_err(|e| json_error(path, format!("failed to serialize: {}", e)))?;
    if document.trailing_newline {
        content.push('\n');
    }

    // Write next to the original and rename over it, so a failed write never
    // leaves a truncated file behind.
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut staged = NamedTempFile::new_in(dir)?;
    staged.write_all(content.as_bytes())?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Append `value` to `list` unless an equal string is already present.
///
/// Returns `true` if the list changed.
pub fn append_unique(list: &mut Vec<JsonValue>, value: &str) -> bool {
    if list.iter().any(|item| item.as_str() == Some(value)) {
        return false;
    }
    list.push(JsonValue::String(value.to_string()));
    true
}

/// Walk `segments` from `root` down to a list, creating missing objects along
/// the way and an empty list at the end if nothing is there yet.
///
/// Indices must point at existing elements; they are never padded.
///
/// # Errors
///
/// Returns `Error::Json` when a segment meets a value of the wrong type, an
/// index is out of bounds, or the final value is not a list.
pub fn navigate_to_list<'a>(
    root: &'a mut JsonValue,
    segments: &[PathSegment],
    file: &Path,
) -> Result<&'a mut Vec<JsonValue>> {
    let mut current = root;

    for (depth, segment) in segments.iter().enumerate() {
        let location = display_path(&segments[..depth]);
        let location = if location.is_empty() {
            "the document root".to_string()
        } else {
            format!("'{}'", location)
        };

        current = match segment {
            PathSegment::Key(key) => {
                if current.is_null() {
                    *current = JsonValue::Object(serde_json::Map::new());
                }
                match current {
                    JsonValue::Object(map) => map.entry(key.clone()).or_insert(JsonValue::Null),
                    _ => {
                        return Err(json_error(
                            file,
                            format!("expected an object at {} to look up '{}'", location, key),
                        ))
                    }
                }
            }
            PathSegment::Index(idx) => match current {
                JsonValue::Array(items) => {
                    let len = items.len();
                    items.get_mut(*idx).ok_or_else(|| {
                        json_error(
                            file,
                            format!("index {} is out of bounds at {} (length {})", idx, location, len),
                        )
                    })?
                }
                _ => {
                    return Err(json_error(
                        file,
                        format!("expected a list at {} to index [{}]", location, idx),
                    ))
                }
            },
        };
    }

    if current.is_null() {
        *current = JsonValue::Array(Vec::new());
    }

    match current {
        JsonValue::Array(items) => Ok(items),
        other => Err(json_error(
            file,
            format!(
                "expected a list at '{}', found {}",
                display_path(segments),
                type_name(other)
            ),
        )),
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "a list",
        JsonValue::Object(_) => "an object",
    }
}

/// Apply one registration to the project at `root`.
///
/// A missing file is not an error: templates that do not use a given tool
/// (for example plain JavaScript without `tsconfig.json`) simply skip the
/// registration.
pub fn register(root: &Path, registration: &Registration) -> Result<RegistrationOutcome> {
    let path = root.join(&registration.file);

    let Some(mut document) = read_document(&path)? else {
        warn!(
            "{} not found, skipping registration of '{}'",
            registration.file, registration.value
        );
        return Ok(RegistrationOutcome::Skipped);
    };

    let segments = parse_path(&registration.path);
    let list = navigate_to_list(&mut document.value, &segments, &path)?;

    if !append_unique(list, &registration.value) {
        debug!(
            "'{}' already listed at {}:{}",
            registration.value, registration.file, registration.path
        );
        return Ok(RegistrationOutcome::AlreadyPresent);
    }

    write_document(&path, &document)?;
    debug!(
        "registered '{}' at {}:{}",
        registration.value, registration.file, registration.path
    );
    Ok(RegistrationOutcome::Added)
}

/// Set the top-level `name` of the project's `package.json`.
///
/// Returns `false` when there is no `package.json` or the name already
/// matches.
pub fn set_package_name(root: &Path, name: &str) -> Result<bool> {
    let path = root.join(PACKAGE_JSON);

    let Some(mut document) = read_document(&path)? else {
        return Ok(false);
    };

    let JsonValue::Object(map) = &mut document.value else {
        return Err(json_error(&path, "expected a JSON object at the document root"));
    };

    if map.get("name").and_then(JsonValue::as_str) == Some(name) {
        return Ok(false);
    }
    map.insert("name".to_string(), JsonValue::String(name.to_string()));

    write_document(&path, &document)?;
    Ok(true)
}
