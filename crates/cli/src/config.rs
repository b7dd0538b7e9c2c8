//! Suite configuration file
//!
//! Values come from defaults, then `sitecheck.toml` (or `--config`), then
//! command-line flags.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use sitecheck_api::ApiConfig;
use tracing::debug;

/// Looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "sitecheck.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub api: ApiConfig,
    pub browser: BrowserConfig,
    /// Where result files are written
    pub output_dir: PathBuf,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig::default(),
            browser: BrowserConfig::default(),
            output_dir: PathBuf::from("test-results"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserConfig {
    /// chromium, firefox or webkit
    pub browser: String,
    pub headless: bool,
    pub specs_dir: PathBuf,
    /// Directory whose node_modules provides playwright
    pub node_dir: PathBuf,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            browser: "chromium".to_string(),
            headless: true,
            specs_dir: PathBuf::from("crates/e2e/specs"),
            node_dir: PathBuf::from("."),
        }
    }
}

impl SuiteConfig {
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.api.validate()?;
        Ok(config)
    }

    /// Load `path`, or the default file if present, or the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        debug!("Loading config from {}", path.display());
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("parsing config {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = SuiteConfig::from_toml(
            r#"
output_dir = "out"

[api]
base_url = "http://127.0.0.1:3000"
"#,
        )
        .unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:3000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.browser, BrowserConfig::default());
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        assert!(SuiteConfig::from_toml("[api]\nbase_url = \"ftp://x\"").is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("suite.toml");
        std::fs::write(&path, "[browser]\nbrowser = \"firefox\"\nheadless = false\n").unwrap();

        let config = SuiteConfig::load(Some(&path)).unwrap();
        assert_eq!(config.browser.browser, "firefox");
        assert!(!config.browser.headless);
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(SuiteConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }
}
