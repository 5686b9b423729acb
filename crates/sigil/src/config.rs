//! Configuration file loading for sigil.
//!
//! Reads `sigil.config.json` from the current working directory.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the working directory.
pub const CONFIG_FILE: &str = "sigil.config.json";

/// Top-level sigil configuration.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SigilConfig {
    /// JSON Schema reference (for editor autocompletion).
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// User checked against `access` lists when `--user` is not given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,

    /// Write results back to the files instead of printing them.
    #[serde(default)]
    pub write: bool,

    /// Pretty-print JSON output.
    #[serde(default)]
    pub pretty: bool,
}

impl SigilConfig {
    /// The effective user: the flag when given, else the configured one.
    pub fn user<'a>(&'a self, flag: Option<&'a str>) -> Option<&'a str> {
        flag.or(self.user.as_deref())
    }
}

/// Load `sigil.config.json` from the given directory (or CWD if None).
///
/// A missing file yields the defaults; an unreadable or invalid one is
/// reported and also yields the defaults.
pub fn load_config(dir: Option<&Path>) -> SigilConfig {
    let base = dir
        .map(|d| d.to_path_buf())
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
    let config_path = base.join(CONFIG_FILE);

    if !config_path.exists() {
        return SigilConfig::default();
    }

    match std::fs::read_to_string(&config_path) {
        Ok(content) => match serde_json::from_str(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("failed to parse {}: {}", config_path.display(), e);
                SigilConfig::default()
            }
        },
        Err(e) => {
            tracing::warn!("failed to read {}: {}", config_path.display(), e);
            SigilConfig::default()
        }
    }
}
