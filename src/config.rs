use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".locheckrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Directory holding one `<locale>.json` snapshot per locale.
    #[serde(default = "default_snapshots_root")]
    pub snapshots_root: String,

    /// Locale whose snapshot is the reference table.
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,

    /// Path to the exclusion document.
    #[serde(default = "default_exclusions_file")]
    pub exclusions_file: String,

    /// Message-id path prefixes belonging to product areas that are not
    /// translated and never checked (e.g. `"mail/"`).
    #[serde(default)]
    pub excluded_products: Vec<String>,

    /// Substrings that disqualify a message id entirely (legacy resource
    /// files that live in the snapshot but carry no translatable content).
    #[serde(default)]
    pub ignored_id_substrings: Vec<String>,
}

fn default_snapshots_root() -> String {
    "./snapshots".to_string()
}

fn default_reference_locale() -> String {
    "en-US".to_string()
}

fn default_exclusions_file() -> String {
    "./exclusions.json".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            snapshots_root: default_snapshots_root(),
            reference_locale: default_reference_locale(),
            exclusions_file: default_exclusions_file(),
            excluded_products: Vec::new(),
            ignored_id_substrings: Vec::new(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.reference_locale.trim().is_empty() {
            anyhow::bail!("'referenceLocale' must not be empty");
        }
        for prefix in &self.excluded_products {
            if prefix.trim().is_empty() {
                anyhow::bail!("'excludedProducts' must not contain empty prefixes");
            }
        }
        Ok(())
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

/// Result of loading the configuration, tracking whether a file was found.
pub struct ConfigResult {
    pub config: Config,
    pub from_file: bool,
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let config_path = start_dir.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Load configuration from `.locheckrc.json` in `dir`, falling back to the
/// built-in defaults when no file exists.
pub fn load_config(dir: &Path) -> Result<ConfigResult> {
    match find_config_file(dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
            config.validate()?;
            Ok(ConfigResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.snapshots_root, "./snapshots");
        assert_eq!(config.reference_locale, "en-US");
        assert_eq!(config.exclusions_file, "./exclusions.json");
        assert!(config.excluded_products.is_empty());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"referenceLocale": "en-GB"}"#).expect("valid json");
        assert_eq!(config.reference_locale, "en-GB");
        assert_eq!(config.snapshots_root, "./snapshots");
    }

    #[test]
    fn test_validate_rejects_empty_reference_locale() {
        let config: Config =
            serde_json::from_str(r#"{"referenceLocale": " "}"#).expect("valid json");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_config_json_round_trips() {
        let json = default_config_json().expect("serializable");
        let config: Config = serde_json::from_str(&json).expect("valid json");
        assert_eq!(config.reference_locale, "en-US");
    }
}
