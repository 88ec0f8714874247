//! Configuration management for panedeck.
//!
//! Handles persistence and loading of user preferences: layout, default sort,
//! linked mode and hidden files. Keybindings live in their own TOML file next
//! to the config.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutMode;
use crate::sort::SortSpec;
use crate::workspace::{WorkspaceSettings, MAX_PANES};

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Layout configuration
    #[serde(default)]
    pub layout: LayoutConfig,

    /// Sort applied to newly opened panes
    #[serde(default)]
    pub sort: SortSpec,

    /// Start with linked navigation on
    #[serde(default)]
    pub linked: bool,

    /// Show dotfiles
    #[serde(default)]
    pub show_hidden: bool,
}

impl Config {
    /// Load configuration from disk, or return default if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific file
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.layout.validate();

        Ok(config)
    }

    /// Save configuration to disk
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific file
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;

        fs::write(path, contents)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Settings for a new workspace
    pub fn workspace_settings(&self) -> WorkspaceSettings {
        WorkspaceSettings {
            layout_mode: self.layout.mode,
            linked: self.linked,
            show_hidden: self.show_hidden,
            sort: self.sort,
        }
    }

    /// Directory holding config.json and keybindings.toml
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?;

        Ok(config_dir.join("panedeck"))
    }

    /// Get the path to the config file
    fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Get the path to the keybindings file
    pub fn keybindings_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("keybindings.toml"))
    }
}

/// Layout configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutConfig {
    /// Pane arrangement
    #[serde(default)]
    pub mode: LayoutMode,

    /// Panes opened at startup (1-4)
    #[serde(default = "default_pane_count")]
    pub pane_count: usize,
}

fn default_pane_count() -> usize {
    2
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            mode: LayoutMode::Tile,
            pane_count: default_pane_count(),
        }
    }
}

impl LayoutConfig {
    /// Validate and clamp pane count to valid range (1-4)
    pub fn validate(&mut self) {
        self.pane_count = self.pane_count.clamp(1, MAX_PANES);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sort::{SortCriterion, SortDirection};

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.layout.mode, LayoutMode::Tile);
        assert_eq!(config.layout.pane_count, 2);
        assert_eq!(config.sort, SortSpec::default());
        assert!(!config.linked);
        assert!(!config.show_hidden);
    }

    #[test]
    fn test_layout_validate() {
        let mut layout = LayoutConfig {
            pane_count: 0, // Below minimum
            ..Default::default()
        };
        layout.validate();
        assert_eq!(layout.pane_count, 1);

        let mut layout = LayoutConfig {
            pane_count: 12, // Above maximum
            ..Default::default()
        };
        layout.validate();
        assert_eq!(layout.pane_count, MAX_PANES);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"sort": {"criterion": "size", "direction": "desc"}}"#).unwrap();
        assert_eq!(config.sort.criterion, SortCriterion::Size);
        assert_eq!(config.sort.direction, SortDirection::Desc);
        assert!(config.sort.directories_first);
        assert_eq!(config.layout, LayoutConfig::default());
    }

    #[test]
    fn test_unknown_sort_criterion_is_rejected() {
        let parsed = serde_json::from_str::<Config>(
            r#"{"sort": {"criterion": "colour", "direction": "asc"}}"#,
        );
        assert!(parsed.is_err());
    }

    #[test]
    fn test_load_clamps_and_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, r#"{"layout": {"mode": "one-row", "pane_count": 9}, "linked": true}"#)
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.layout.mode, LayoutMode::OneRow);
        assert_eq!(config.layout.pane_count, MAX_PANES);
        assert!(config.linked);

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, Config::default());
    }
}
