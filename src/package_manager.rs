//! Supported JavaScript package managers.

use std::env;
use std::fmt;
use std::str::FromStr;

/// Environment variable package managers set for the scripts they launch.
pub const USER_AGENT_ENV: &str = "npm_config_user_agent";

/// A package manager the generated project can be installed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
    Bun,
}

impl PackageManager {
    pub const ALL: [PackageManager; 4] = [
        PackageManager::Npm,
        PackageManager::Yarn,
        PackageManager::Pnpm,
        PackageManager::Bun,
    ];

    /// Executable name.
    pub fn command(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
            PackageManager::Bun => "bun",
        }
    }

    /// Arguments that install the dependencies of the project in the current
    /// directory.
    pub fn install_args(&self) -> &'static [&'static str] {
        &["install"]
    }

    /// The full install command line as a user would type it.
    pub fn install_command(&self) -> String {
        format!("{} {}", self.command(), self.install_args().join(" "))
    }

    /// How a user runs a `package.json` script with this manager.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            PackageManager::Npm => format!("npm run {}", script),
            PackageManager::Bun => format!("bun run {}", script),
            PackageManager::Yarn | PackageManager::Pnpm => {
                format!("{} {}", self.command(), script)
            }
        }
    }

    /// The lockfile written by this manager.
    pub fn lockfile(&self) -> &'static str {
        match self {
            PackageManager::Npm => "package-lock.json",
            PackageManager::Yarn => "yarn.lock",
            PackageManager::Pnpm => "pnpm-lock.yaml",
            PackageManager::Bun => "bun.lockb",
        }
    }

    /// Parse an `npm_config_user_agent` value such as
    /// `pnpm/8.6.0 npm/? node/v20.3.0 linux x64`.
    ///
    /// Only the first token decides; `npm/?` inside another manager's agent
    /// string is a compatibility marker.
    pub fn detect_from_user_agent(agent: &str) -> Option<PackageManager> {
        let first = agent.split_whitespace().next()?;
        let name = first.split('/').next()?;
        name.parse().ok()
    }

    /// The package manager that launched this process, falling back to npm.
    pub fn detect() -> PackageManager {
        env::var(USER_AGENT_ENV)
            .ok()
            .and_then(|agent| Self::detect_from_user_agent(&agent))
            .unwrap_or_default()
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command())
    }
}

impl FromStr for PackageManager {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "npm" => Ok(PackageManager::Npm),
            "yarn" => Ok(PackageManager::Yarn),
            "pnpm" => Ok(PackageManager::Pnpm),
            "bun" => Ok(PackageManager::Bun),
            other => Err(format!(
                "unknown package manager '{}' (expected one of: npm, yarn, pnpm, bun)",
                other
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("npm".parse::<PackageManager>(), Ok(PackageManager::Npm));
        assert_eq!("Yarn".parse::<PackageManager>(), Ok(PackageManager::Yarn));
        assert_eq!("PNPM".parse::<PackageManager>(), Ok(PackageManager::Pnpm));
        assert_eq!(" bun ".parse::<PackageManager>(), Ok(PackageManager::Bun));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "cargo".parse::<PackageManager>().unwrap_err();
        assert!(err.contains("unknown package manager 'cargo'"));
        assert!(err.contains("npm, yarn, pnpm, bun"));
    }

    #[test]
    fn test_display_round_trips_through_from_str() {
        for pm in PackageManager::ALL {
            assert_eq!(pm.to_string().parse::<PackageManager>(), Ok(pm));
        }
    }

    #[test]
    fn test_install_command() {
        assert_eq!(PackageManager::Npm.install_command(), "npm install");
        assert_eq!(PackageManager::Bun.install_command(), "bun install");
    }

    #[test]
    fn test_run_script() {
        assert_eq!(PackageManager::Npm.run_script("dev"), "npm run dev");
        assert_eq!(PackageManager::Yarn.run_script("dev"), "yarn dev");
        assert_eq!(PackageManager::Pnpm.run_script("dev"), "pnpm dev");
        assert_eq!(PackageManager::Bun.run_script("dev"), "bun run dev");
    }

    #[test]
    fn test_lockfiles_are_distinct() {
        let mut lockfiles: Vec<_> = PackageManager::ALL.iter().map(|pm| pm.lockfile()).collect();
        lockfiles.sort();
        lockfiles.dedup();
        assert_eq!(lockfiles.len(), PackageManager::ALL.len());
    }

    #[test]
    fn test_detect_from_user_agent() {
        assert_eq!(
            PackageManager::detect_from_user_agent("pnpm/8.6.0 npm/? node/v20.3.0 linux x64"),
            Some(PackageManager::Pnpm)
        );
        assert_eq!(
            PackageManager::detect_from_user_agent("yarn/1.22.19 npm/? node/v18.16.0 darwin arm64"),
            Some(PackageManager::Yarn)
        );
        assert_eq!(
            PackageManager::detect_from_user_agent("npm/9.6.7 node/v20.3.0 linux x64 workspaces/false"),
            Some(PackageManager::Npm)
        );
        assert_eq!(
            PackageManager::detect_from_user_agent("bun/1.0.0 npm/? node/v20.8.0 linux x64"),
            Some(PackageManager::Bun)
        );
        assert_eq!(PackageManager::detect_from_user_agent("deno/1.40"), None);
        assert_eq!(PackageManager::detect_from_user_agent(""), None);
    }

    #[test]
    #[serial]
    fn test_detect_reads_environment() {
        let original = env::var(USER_AGENT_ENV).ok();

        env::set_var(USER_AGENT_ENV, "yarn/1.22.19 npm/? node/v18.16.0");
        assert_eq!(PackageManager::detect(), PackageManager::Yarn);

        env::remove_var(USER_AGENT_ENV);
        assert_eq!(PackageManager::detect(), PackageManager::Npm);

        if let Some(value) = original {
            env::set_var(USER_AGENT_ENV, value);
        }
    }
}
