//! Shared test utilities for E2E tests.
//!
//! ## Usage
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = TestFixture::new().with_settings(settings::EMPTY_CATALOG);
//!     fixture.command_with_settings().arg("--list-addons").assert().success();
//! }
//! ```

use assert_fs::prelude::*;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use assert_fs::prelude::*;
    #[allow(unused_imports)]
    pub use assert_fs::TempDir;
    pub use predicates::prelude::*;

    #[allow(unused_imports)]
    pub use super::settings;
    #[allow(unused_imports)]
    pub use super::{file_url, git_repo};
    pub use super::TestFixture;
}

/// Settings file snippets.
#[allow(dead_code)]
pub mod settings {
    /// No add-ons at all.
    pub const EMPTY_CATALOG: &str = "addons: []\n";

    /// A catalog with a single add-on that registers somewhere custom.
    pub const CUSTOM_ADDON: &str = r#"
template:
  url: https://example.com/starter.git
addons:
  - name: storybook
    description: Component explorer
    url: https://example.com/storybook.git
    directory: tools/storybook
"#;

    /// Unknown top-level key.
    pub const INVALID: &str = "templates:\n  url: nope\n";
}

/// Identity used for commits made by tests and by the binary under test.
pub const GIT_IDENTITY: [(&str, &str); 4] = [
    ("GIT_AUTHOR_NAME", "Scaffolder Tests"),
    ("GIT_AUTHOR_EMAIL", "tests@example.com"),
    ("GIT_COMMITTER_NAME", "Scaffolder Tests"),
    ("GIT_COMMITTER_EMAIL", "tests@example.com"),
];

/// Create a git repository at `dir` on branch `main` holding `files`.
///
/// Requires `git` on PATH; only used by tests behind `integration-tests`.
#[allow(dead_code)]
pub fn git_repo(dir: &Path, files: &[(&str, &str)]) -> PathBuf {
    std::fs::create_dir_all(dir).expect("Failed to create repository directory");
    for (path, content) in files {
        let file = dir.join(path);
        if let Some(parent) = file.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(file, content).expect("Failed to write repository file");
    }

    for args in [
        &["init", "-b", "main"][..],
        &["add", "-A"][..],
        &["commit", "-m", "fixture"][..],
    ] {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .envs(GIT_IDENTITY)
            .status()
            .expect("Failed to run git");
        assert!(status.success(), "git {:?} failed", args);
    }
    dir.to_path_buf()
}

/// `file://` URL for a local repository, so shallow clones work.
#[allow(dead_code)]
pub fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

/// A temporary working directory with an optional settings file.
pub struct TestFixture {
    temp_dir: assert_fs::TempDir,
}

impl TestFixture {
    /// Create a new test fixture with an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: assert_fs::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Write `scaffolder.yaml` with the given content.
    pub fn with_settings(self, content: &str) -> Self {
        self.temp_dir
            .child("scaffolder.yaml")
            .write_str(content)
            .expect("Failed to write settings file");
        self
    }

    /// Add a directory relative to the fixture root.
    #[allow(dead_code)]
    pub fn with_dir(self, path: &str) -> Self {
        self.temp_dir
            .child(path)
            .create_dir_all()
            .expect("Failed to create directory");
        self
    }

    /// Get the path to the temporary directory.
    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Get the path to the settings file.
    pub fn settings_path(&self) -> PathBuf {
        self.temp_dir.path().join("scaffolder.yaml")
    }

    /// Create a child path in the temp directory.
    #[allow(dead_code)]
    pub fn child(&self, path: &str) -> assert_fs::fixture::ChildPath {
        self.temp_dir.child(path)
    }

    /// The binary, run in this fixture with a predictable environment.
    pub fn command(&self) -> assert_cmd::Command {
        let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("scaffolder");
        cmd.current_dir(self.path())
            .env_remove("SCAFFOLDER_CONFIG")
            .env_remove("npm_config_user_agent")
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1")
            .envs(GIT_IDENTITY);
        cmd
    }

    /// Like `command`, with `--config` pointing at the fixture's settings.
    #[allow(dead_code)]
    pub fn command_with_settings(&self) -> assert_cmd::Command {
        let mut cmd = self.command();
        cmd.arg("--config").arg(self.settings_path());
        cmd
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_creates_temp_dir() {
        let fixture = TestFixture::new();
        assert!(fixture.path().exists());
    }

    #[test]
    fn test_fixture_with_settings() {
        let fixture = TestFixture::new().with_settings(settings::EMPTY_CATALOG);
        assert!(fixture.settings_path().exists());
    }

    #[test]
    fn test_file_url() {
        assert_eq!(file_url(Path::new("/tmp/repo")), "file:///tmp/repo");
    }
}
