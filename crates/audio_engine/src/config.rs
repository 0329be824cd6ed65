//! Configuration system

pub use serde::{Deserialize, Serialize};

use crate::error::AudioError;

/// Configuration trait for file-backed settings
///
/// Formats are dispatched on file extension; TOML and RON are supported.
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, AudioError> {
        let contents = std::fs::read_to_string(path).map_err(|source| AudioError::Io {
            path: path.into(),
            source,
        })?;

        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| AudioError::Parse {
                path: path.into(),
                reason: e.to_string(),
            })
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| AudioError::Parse {
                path: path.into(),
                reason: e.to_string(),
            })
        } else {
            Err(AudioError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), AudioError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| AudioError::Parse {
                path: path.into(),
                reason: e.to_string(),
            })?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default()).map_err(|e| {
                AudioError::Parse {
                    path: path.into(),
                    reason: e.to_string(),
                }
            })?
        } else {
            return Err(AudioError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(|source| AudioError::Io {
            path: path.into(),
            source,
        })
    }
}

fn default_max_channels() -> usize {
    1024
}

fn default_units_per_meter() -> f32 {
    1.0
}

fn default_master_volume() -> f32 {
    1.0
}

/// Engine-wide audio settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Maximum number of simultaneously playing channels
    #[serde(default = "default_max_channels")]
    pub max_channels: usize,

    /// World units per meter (1.0 = one game unit is one meter,
    /// 3.28 would mean world coordinates are in feet)
    #[serde(default = "default_units_per_meter")]
    pub units_per_meter: f32,

    /// Initial master volume (0.0 to 1.0)
    #[serde(default = "default_master_volume")]
    pub master_volume: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            max_channels: default_max_channels(),
            units_per_meter: default_units_per_meter(),
            master_volume: default_master_volume(),
        }
    }
}

impl Config for AudioConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AudioConfig::default();
        assert_eq!(config.max_channels, 1024);
        assert_eq!(config.units_per_meter, 1.0);
        assert_eq!(config.master_volume, 1.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = AudioConfig {
            max_channels: 64,
            units_per_meter: 3.28,
            master_volume: 0.8,
        };

        let text = toml::to_string_pretty(&config).expect("config should serialize");
        let parsed: AudioConfig = toml::from_str(&text).expect("config should parse");
        assert_eq!(parsed.max_channels, 64);
        assert_eq!(parsed.units_per_meter, 3.28);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AudioConfig =
            toml::from_str("max_channels = 32\n").expect("config should parse");
        assert_eq!(parsed.max_channels, 32);
        assert_eq!(parsed.units_per_meter, 1.0);
    }

    #[test]
    fn test_unsupported_extension() {
        let path = std::env::temp_dir().join("audio_engine_config_test.yaml");
        std::fs::write(&path, "max_channels: 32").expect("temp file should write");

        let result = AudioConfig::load_from_file(path.to_str().expect("utf-8 temp path"));
        assert!(matches!(result, Err(AudioError::UnsupportedFormat(_))));

        let _ = std::fs::remove_file(&path);
    }
}
