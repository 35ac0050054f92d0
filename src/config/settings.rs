//! Runtime settings read from environment variables.
//!
//! Values are usually supplied through a `.env` file loaded at startup;
//! every setting has a default so the binary runs without one.

use std::path::PathBuf;

/// Default plan file, relative to the working directory.
pub const DEFAULT_PLAN_PATH: &str = "plan.toml";

/// Settings for the command-line runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Plan file to load
    pub plan_path: PathBuf,
}

impl Settings {
    /// Reads settings from the environment.
    ///
    /// `PLAN_PATH` selects the plan file; an explicit command-line path
    /// takes precedence over it.
    #[must_use]
    pub fn from_env(cli_path: Option<String>) -> Self {
        let non_blank = |p: &String| !p.trim().is_empty();
        let plan_path = cli_path
            .filter(non_blank)
            .or_else(|| std::env::var("PLAN_PATH").ok().filter(non_blank))
            .map_or_else(|| PathBuf::from(DEFAULT_PLAN_PATH), PathBuf::from);

        Self { plan_path }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_path_takes_precedence() {
        let settings = Settings::from_env(Some("contracts/acme.toml".to_string()));
        assert_eq!(settings.plan_path, PathBuf::from("contracts/acme.toml"));
    }

    #[test]
    fn test_blank_cli_path_falls_back() {
        // Falls back to PLAN_PATH when set in the test environment, else the default.
        let settings = Settings::from_env(Some("  ".to_string()));
        let expected = std::env::var("PLAN_PATH")
            .ok()
            .filter(|p| !p.trim().is_empty())
            .map_or_else(|| PathBuf::from(DEFAULT_PLAN_PATH), PathBuf::from);
        assert_eq!(settings.plan_path, expected);
    }
}
