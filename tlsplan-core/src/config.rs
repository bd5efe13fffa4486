//! Configuration management for tlsplan
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (TLSPLAN_*)
//! 3. Config file (~/.config/tlsplan/config.toml)
//! 4. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Location of the plan file relative to the installation root
const DEFAULT_TLL_RELATIVE: &str = "data/LuSTScenario/scenario/tll.static.xml";

/// Source document configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Path to the traffic-light plan file
    pub tll_path: PathBuf,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            tll_path: install_root().join(DEFAULT_TLL_RELATIVE),
        }
    }
}

/// Report configuration
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Print phase detail for every controller
    pub show_phases: bool,
}

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Source document configuration
    pub source: SourceConfig,

    /// Report configuration
    pub report: ReportConfig,
}

/// Root directory of the installation (the workspace root)
pub fn install_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| manifest_dir.to_path_buf())
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {}", path.display(), e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/tlsplan/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tlsplan").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - TLSPLAN_TLL: Path to the plan file
    /// - TLSPLAN_SHOW_PHASES: "1"/"true" to print phase detail
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("TLSPLAN_TLL") {
            self.source.tll_path = PathBuf::from(path);
        }

        if let Some(flag) = lookup("TLSPLAN_SHOW_PHASES") {
            match parse_flag(&flag) {
                Some(show) => self.report.show_phases = show,
                None => tracing::warn!(value = %flag, "Ignoring invalid TLSPLAN_SHOW_PHASES"),
            }
        }

        self
    }

    /// Apply CLI flag overrides
    ///
    /// `show_phases` can only turn phase detail on, matching a plain flag.
    pub fn with_cli_overrides(mut self, tll_path: Option<PathBuf>, show_phases: bool) -> Self {
        if let Some(path) = tll_path {
            self.source.tll_path = path;
        }

        if show_phases {
            self.report.show_phases = true;
        }

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(tll_path: Option<PathBuf>, show_phases: bool) -> Result<Self> {
        Ok(Self::load()?
            .with_env_overrides()
            .with_cli_overrides(tll_path, show_phases))
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config
            .source
            .tll_path
            .ends_with("data/LuSTScenario/scenario/tll.static.xml"));
        assert!(config.source.tll_path.starts_with(install_root()));
        assert!(!config.report.show_phases);
    }

    #[test]
    fn test_cli_overrides() {
        let config =
            Config::default().with_cli_overrides(Some(PathBuf::from("/tmp/tll.xml")), true);

        assert_eq!(config.source.tll_path, PathBuf::from("/tmp/tll.xml"));
        assert!(config.report.show_phases);
    }

    #[test]
    fn test_cli_flag_absent_keeps_config() {
        let mut config = Config::default();
        config.report.show_phases = true;
        let config = config.with_cli_overrides(None, false);
        assert!(config.report.show_phases);
    }

    #[test]
    fn test_env_overrides() {
        let env: HashMap<&str, &str> =
            [("TLSPLAN_TLL", "/data/tll.xml"), ("TLSPLAN_SHOW_PHASES", "true")].into();
        let config = Config::default().with_overrides_from(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(config.source.tll_path, PathBuf::from("/data/tll.xml"));
        assert!(config.report.show_phases);
    }

    #[test]
    fn test_invalid_env_flag_ignored() {
        let config = Config::default()
            .with_overrides_from(|k| (k == "TLSPLAN_SHOW_PHASES").then(|| "maybe".to_string()));
        assert!(!config.report.show_phases);
    }

    #[test]
    fn test_cli_beats_env() {
        let config = Config::default()
            .with_overrides_from(|k| (k == "TLSPLAN_TLL").then(|| "/env.xml".to_string()))
            .with_cli_overrides(Some(PathBuf::from("/cli.xml")), false);
        assert_eq!(config.source.tll_path, PathBuf::from("/cli.xml"));
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[source]
tll_path = "/srv/lust/tll.static.xml"

[report]
show_phases = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.source.tll_path, PathBuf::from("/srv/lust/tll.static.xml"));
        assert!(config.report.show_phases);
    }

    #[test]
    fn test_partial_toml() {
        let toml = r#"
[report]
show_phases = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        // tll_path should use default
        assert_eq!(config.source, SourceConfig::default());
        assert!(config.report.show_phases);
    }

    #[test]
    fn test_load_from_file_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[report]\nshow_phases = \"sometimes\"\n").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_parse_flag() {
        assert_eq!(parse_flag("1"), Some(true));
        assert_eq!(parse_flag(" TRUE "), Some(true));
        assert_eq!(parse_flag("off"), Some(false));
        assert_eq!(parse_flag("maybe"), None);
    }
}
