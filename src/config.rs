//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/nodetree/nodetree.toml`
//! 3. Environment variables: `NODETREE_*` prefix
//! 4. Command line (`--store`), applied by the binary

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

const STORE_FILE: &str = "nodes.toml";

/// Unified configuration for nodetree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Node store file (default: `<data dir>/nodetree/nodes.toml`)
    pub store_path: PathBuf,
    /// Encoding for text files created without `--encoding`
    pub default_encoding: String,
}

/// Raw settings for intermediate parsing (None means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub store_path: Option<PathBuf>,
    pub default_encoding: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            default_encoding: "UTF-8".into(),
        }
    }
}

fn default_store_path() -> PathBuf {
    ProjectDirs::from("", "", "nodetree")
        .map(|dirs| dirs.data_dir().join(STORE_FILE))
        .unwrap_or_else(|| PathBuf::from("~/.nodetree").join(STORE_FILE))
}

/// Get the XDG config directory for nodetree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "nodetree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("nodetree.toml"))
}

/// Expand `~`, `$VAR` and `${VAR}`; unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

/// Load a TOML file into RawSettings.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.store_path.to_string_lossy().as_ref());
        self.store_path = PathBuf::from(expanded);
    }

    /// Overlay values the file specifies; keep the rest.
    fn apply_file(&self, raw: &RawSettings) -> Self {
        Self {
            store_path: raw
                .store_path
                .clone()
                .unwrap_or_else(|| self.store_path.clone()),
            default_encoding: raw
                .default_encoding
                .clone()
                .unwrap_or_else(|| self.default_encoding.clone()),
        }
    }

    /// Load settings with layered precedence from the global config location.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings using `config_file` as the file layer.
    ///
    /// A missing file is skipped; an unreadable or malformed one is an error.
    pub fn load_from(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        if let Some(path) = config_file {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.apply_file(&raw);
            }
        }

        current = Self::apply_env_overrides(current)?;
        current.expand_paths();

        Ok(current)
    }

    /// Apply NODETREE_* environment variables as explicit overrides.
    fn apply_env_overrides(mut settings: Self) -> Result<Self, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NODETREE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("store_path") {
            settings.store_path = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("default_encoding") {
            settings.default_encoding = val;
        }

        Ok(settings)
    }

    /// Replace the store location (command line override), expanding `~`/`$VAR`.
    pub fn with_store_path(mut self, path: impl AsRef<Path>) -> Self {
        self.store_path = path.as_ref().to_path_buf();
        self.expand_paths();
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# nodetree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/nodetree/nodetree.toml
#   Env:    NODETREE_* environment variables (e.g. NODETREE_STORE_PATH)
#   CLI:    --store PATH

# TOML file holding the flat node records (~ and $VAR are expanded)
# store_path = "~/.local/share/nodetree/nodes.toml"

# Encoding for text files created without --encoding
# default_encoding = "UTF-8"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_config_file_when_loading_then_uses_defaults() {
        let settings = Settings::load_from(None).expect("load defaults");
        assert!(settings.store_path.ends_with(STORE_FILE));
        assert!(!settings.default_encoding.is_empty());
    }

    #[test]
    fn given_tilde_in_store_path_when_expand_paths_then_expands_to_home() {
        let mut settings = Settings {
            store_path: PathBuf::from("~/trees/nodes.toml"),
            default_encoding: "UTF-8".into(),
        };

        settings.expand_paths();

        let home = std::env::var("HOME").expect("HOME should be set");
        let path = settings.store_path.to_string_lossy();
        assert!(path.starts_with(&home), "store_path should start with home: {}", path);
        assert!(!path.contains('~'));
    }

    #[test]
    fn given_partial_file_when_applying_then_unspecified_fields_keep_base() {
        let base = Settings::default();
        let raw = RawSettings {
            store_path: None,
            default_encoding: Some("ASCII".into()),
        };

        let merged = base.apply_file(&raw);

        assert_eq!(merged.store_path, base.store_path);
        assert_eq!(merged.default_encoding, "ASCII");
    }

    #[test]
    fn given_template_when_parsing_then_is_valid_toml() {
        let raw: RawSettings = toml::from_str(&Settings::template()).expect("template parses");
        assert!(raw.store_path.is_none());
    }
}
