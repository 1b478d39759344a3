use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::input::{DEFAULT_AXIS_THRESHOLD, DasTuning};

/// Selectable DAS speed profiles.
///
/// The faster presets pair a short repeat interval with a handicapped
/// starting charge, so raw repeat speed still costs something on each new
/// piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DasPreset {
    /// 16-frame initial delay, 6-frame repeat, charge carried across pieces.
    #[default]
    Classic,
    /// 4-frame repeat; every piece starts 6 frames short of a shift.
    Medium,
    /// 2-frame repeat; every piece starts 8 frames short of a shift.
    Turbo,
}

impl DasPreset {
    pub fn all() -> &'static [DasPreset] {
        &[DasPreset::Classic, DasPreset::Medium, DasPreset::Turbo]
    }

    pub fn tuning(self) -> DasTuning {
        match self {
            DasPreset::Classic => DasTuning::default(),
            DasPreset::Medium => DasTuning {
                trigger_threshold: 16,
                charged_floor: 12,
                charge_after_tap: 0,
                wall_charge_amount: 10,
                charge_on_piece_start: true,
            },
            DasPreset::Turbo => DasTuning {
                trigger_threshold: 16,
                charged_floor: 14,
                charge_after_tap: 0,
                wall_charge_amount: 8,
                charge_on_piece_start: true,
            },
        }
    }
}

/// User input settings, persisted to the platform config directory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSettings {
    /// Selected DAS speed.
    #[serde(default)]
    pub das_preset: DasPreset,
    /// Explicit tuning override; takes precedence over the preset.
    #[serde(default)]
    pub custom_tuning: Option<DasTuning>,
    /// Gamepad axis activation threshold.
    #[serde(default = "default_axis_threshold")]
    pub axis_threshold: f32,
}

fn default_axis_threshold() -> f32 {
    DEFAULT_AXIS_THRESHOLD
}

impl Default for InputSettings {
    fn default() -> Self {
        Self {
            das_preset: DasPreset::default(),
            custom_tuning: None,
            axis_threshold: default_axis_threshold(),
        }
    }
}

impl InputSettings {
    /// The effective DAS tuning.
    pub fn tuning(&self) -> DasTuning {
        self.custom_tuning
            .unwrap_or_else(|| self.das_preset.tuning())
    }

    /// Load settings from disk, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_file().unwrap_or_default()
    }

    fn load_from_file() -> Result<Self> {
        let path = Self::settings_path()?;
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(Self::default())
        }
    }

    /// Save settings to disk.
    pub fn save(&self) -> Result<()> {
        let path = Self::settings_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn settings_path() -> Result<PathBuf> {
        if let Some(proj_dirs) = ProjectDirs::from("com", "stacker", "stacker-input") {
            Ok(proj_dirs.config_dir().join("input_settings.json"))
        } else {
            Ok(PathBuf::from(".stacker-input-settings.json"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classic_is_the_default() {
        let settings = InputSettings::default();
        assert_eq!(settings.das_preset, DasPreset::Classic);
        assert_eq!(settings.tuning(), DasTuning::default());
    }

    #[test]
    fn test_presets_keep_floor_below_threshold() {
        for preset in DasPreset::all() {
            let tuning = preset.tuning();
            assert!(tuning.charged_floor < tuning.trigger_threshold);
            assert!(tuning.wall_charge_amount <= tuning.trigger_threshold);
        }
    }

    #[test]
    fn test_custom_tuning_overrides_preset() {
        let custom = DasTuning {
            trigger_threshold: 10,
            charged_floor: 6,
            charge_after_tap: 0,
            wall_charge_amount: 10,
            charge_on_piece_start: false,
        };
        let settings = InputSettings {
            das_preset: DasPreset::Turbo,
            custom_tuning: Some(custom),
            ..InputSettings::default()
        };
        assert_eq!(settings.tuning(), custom);
    }

    #[test]
    fn test_deserialization_with_defaults() {
        let json = r#"{"das_preset": "medium"}"#;
        let settings: InputSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.das_preset, DasPreset::Medium);
        assert!(settings.custom_tuning.is_none());
        assert_eq!(settings.axis_threshold, DEFAULT_AXIS_THRESHOLD);
    }

    #[test]
    fn test_serialization_round_trip() {
        let settings = InputSettings {
            das_preset: DasPreset::Turbo,
            custom_tuning: None,
            axis_threshold: 0.3,
        };
        let json = serde_json::to_string(&settings).unwrap();
        let restored: InputSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.das_preset, DasPreset::Turbo);
        assert_eq!(restored.axis_threshold, 0.3);
    }
}
