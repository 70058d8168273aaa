// Engine settings, stored as JSON in the platform config dir:
// e.g. ~/Library/Application Support/dock/settings.json on macOS,
// ~/.config/dock/settings.json on Linux.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use dock_core::TabKind;

use dock_core::EDGE_THRESHOLD;
use crate::MIN_RATIO;

/// What happens when the last tab of the last pane is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyWorkspace {
    /// Keep an empty root leaf around until a tab is created again.
    #[default]
    KeepPlaceholder,
    /// Discard the connection's layout entirely.
    Teardown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutSettings {
    #[serde(default = "default_min_ratio")]
    pub min_ratio: f32,
    #[serde(default = "default_edge_threshold")]
    pub edge_threshold: f32,
    #[serde(default = "default_tab_kind")]
    pub default_tab_kind: TabKind,
    #[serde(default = "default_tab_title")]
    pub default_tab_title: String,
    #[serde(default)]
    pub empty_workspace: EmptyWorkspace,
    /// Pointer travel before a pressed tab turns into a drag.
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold: f32,
    /// Hit distance for split dividers.
    #[serde(default = "default_border_threshold")]
    pub border_threshold: f32,
}

fn default_min_ratio() -> f32 {
    MIN_RATIO
}

fn default_edge_threshold() -> f32 {
    EDGE_THRESHOLD
}

fn default_tab_kind() -> TabKind {
    TabKind::Query
}

fn default_tab_title() -> String {
    "Query".to_string()
}

fn default_drag_threshold() -> f32 {
    4.0
}

fn default_border_threshold() -> f32 {
    6.0
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            min_ratio: default_min_ratio(),
            edge_threshold: default_edge_threshold(),
            default_tab_kind: default_tab_kind(),
            default_tab_title: default_tab_title(),
            empty_workspace: EmptyWorkspace::default(),
            drag_threshold: default_drag_threshold(),
            border_threshold: default_border_threshold(),
        }
    }
}

impl LayoutSettings {
    /// ε actually applied to split ratios.
    pub fn effective_min_ratio(&self) -> f32 {
        clamp_min_ratio(self.min_ratio)
    }
}

pub(crate) fn clamp_min_ratio(min_ratio: f32) -> f32 {
    if min_ratio.is_finite() {
        min_ratio.clamp(0.01, 0.45)
    } else {
        MIN_RATIO
    }
}

pub fn settings_path() -> Option<PathBuf> {
    let config_dir = dirs::config_dir()?;
    Some(config_dir.join("dock").join("settings.json"))
}

/// Load settings from the platform config dir, falling back to defaults.
pub fn load_settings() -> LayoutSettings {
    match settings_path() {
        Some(path) => load_settings_from(&path),
        None => LayoutSettings::default(),
    }
}

pub fn load_settings_from(path: &Path) -> LayoutSettings {
    match std::fs::read_to_string(path) {
        Ok(data) => match serde_json::from_str(&data) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Failed to parse {}: {}", path.display(), e);
                LayoutSettings::default()
            }
        },
        Err(_) => LayoutSettings::default(),
    }
}

pub fn save_settings(settings: &LayoutSettings) {
    match settings_path() {
        Some(path) => save_settings_to(settings, &path),
        None => log::warn!("Cannot determine settings path"),
    }
}

pub fn save_settings_to(settings: &LayoutSettings, path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = std::fs::create_dir_all(parent) {
            log::error!("Failed to create config dir {}: {}", parent.display(), e);
            return;
        }
    }

    match serde_json::to_string_pretty(settings) {
        Ok(json) => {
            if let Err(e) = std::fs::write(path, json) {
                log::error!("Failed to write {}: {}", path.display(), e);
            }
        }
        Err(e) => {
            log::error!("Failed to serialize settings: {}", e);
        }
    }
}
