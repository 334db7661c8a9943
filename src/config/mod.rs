//! Generator configuration.
//!
//! Configuration lives in a TOML file, `techtree.toml` by default. It is
//! looked up next to the executable first, then in the working directory,
//! unless a path is given explicitly with `--config`.
//!
//! ```toml
//! [paths]
//! base_game_path = "/games/Stellaris"
//! mod_folder_path = "/games/steamapps/workshop/content/281990"
//! own_mod_id = "tech_tree_mod"
//!
//! [mod_filter]
//! enable_mod_filter = true
//! included_mods = ["1121692237"]
//! ignored_mods = "819148835, 1995601384"   # comma strings are accepted too
//!
//! [localization]
//! centralized_mods = ["2513362455"]
//!
//! [output]
//! dir = "output"
//! long_tree_threshold = 100
//! ```
//!
//! `[rules]` and `[style]` optionally override the classification rules
//! ([`ParseRules`]) and the rendering tables ([`TreeStyle`]).

pub mod filter;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer, Serialize};
use tokio::fs;

pub use filter::ModFilter;

use crate::constants::{CONFIG_FILE_NAME, DEFAULT_OUTPUT_DIR, LONG_TREE_THRESHOLD};
use crate::core::TechTreeError;
use crate::parser::ParseRules;
use crate::render::TreeStyle;

/// Complete generator configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub paths: PathsConfig,
    pub mod_filter: ModFilterConfig,
    pub localization: LocalizationConfig,
    pub output: OutputConfig,
    pub rules: ParseRules,
    pub style: TreeStyle,
}

/// `[paths]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Game installation directory. Required.
    pub base_game_path: PathBuf,
    /// Directory holding one subdirectory per mod. Required.
    pub mod_folder_path: PathBuf,
    /// Directory name of the mod the output is generated for; never scanned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub own_mod_id: Option<String>,
}

/// `[mod_filter]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModFilterConfig {
    pub enable_mod_filter: bool,
    #[serde(deserialize_with = "string_list")]
    pub included_mods: Vec<String>,
    #[serde(deserialize_with = "string_list")]
    pub ignored_mods: Vec<String>,
}

/// `[localization]`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Mods preferred for Chinese descriptions, highest priority first.
    #[serde(deserialize_with = "string_list")]
    pub centralized_mods: Vec<String>,
}

/// `[output]`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: PathBuf,
    /// Roots with more reachable technologies than this are not rendered.
    pub long_tree_threshold: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            long_tree_threshold: LONG_TREE_THRESHOLD,
        }
    }
}

/// Accept either a TOML array or a comma-separated string.
fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringList {
        List(Vec<String>),
        Csv(String),
    }

    let items = match StringList::deserialize(deserializer)? {
        StringList::List(items) => items,
        StringList::Csv(text) => text.split(',').map(str::to_string).collect(),
    };

    Ok(items
        .into_iter()
        .map(|item| item.trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}

impl GeneratorConfig {
    /// Load configuration from an explicit path or the default locations.
    ///
    /// # Errors
    ///
    /// Returns [`TechTreeError::ConfigNotFound`] when no file exists, plus
    /// every error of [`GeneratorConfig::load_from`].
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(TechTreeError::ConfigNotFound {
                    path: path.display().to_string(),
                }
                .into());
            }
            return Self::load_from(&path).await;
        }

        let candidates = Self::default_locations();
        match candidates.iter().find(|candidate| candidate.exists()) {
            Some(path) => Self::load_from(path).await,
            None => Err(TechTreeError::ConfigNotFound {
                path: candidates
                    .last()
                    .map_or_else(|| CONFIG_FILE_NAME.to_string(), |p| p.display().to_string()),
            }
            .into()),
        }
    }

    /// Load and validate configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// lacks a required path.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| TechTreeError::ConfigParseError {
            file: path.display().to_string(),
            reason: e.to_string(),
        })?;

        config.validate()?;
        tracing::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Candidate config files: next to the executable, then the working directory.
    pub fn default_locations() -> Vec<PathBuf> {
        let mut locations = Vec::new();
        if let Ok(exe) = std::env::current_exe()
            && let Some(dir) = exe.parent()
        {
            locations.push(dir.join(CONFIG_FILE_NAME));
        }
        if let Ok(cwd) = std::env::current_dir() {
            locations.push(cwd.join(CONFIG_FILE_NAME));
        }
        locations
    }

    /// Check that required settings are present.
    ///
    /// # Errors
    ///
    /// Returns [`TechTreeError::ConfigError`] naming the first missing key.
    pub fn validate(&self) -> Result<(), TechTreeError> {
        if self.paths.base_game_path.as_os_str().is_empty() {
            return Err(TechTreeError::ConfigError {
                message: "missing required key paths.base_game_path".to_string(),
            });
        }
        if self.paths.mod_folder_path.as_os_str().is_empty() {
            return Err(TechTreeError::ConfigError {
                message: "missing required key paths.mod_folder_path".to_string(),
            });
        }
        Ok(())
    }

    /// Mod filter built from `[paths]`, `[mod_filter]` and `[localization]`.
    pub fn mod_filter(&self) -> ModFilter {
        ModFilter::new(
            self.paths.own_mod_id.clone(),
            self.mod_filter.enable_mod_filter,
            self.mod_filter.included_mods.iter().cloned(),
            self.mod_filter.ignored_mods.iter().cloned(),
            self.localization.centralized_mods.clone(),
        )
    }
}
