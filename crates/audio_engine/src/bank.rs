//! Sound banks
//!
//! A sound bank is a manifest file (RON or TOML) declaring a named group of
//! sound descriptors that load and unload as a unit. Banks let a game ship
//! one file per level or scene instead of registering every sound in code.

use crate::config::Config;
use crate::descriptor::SoundDescriptor;
use serde::{Deserialize, Serialize};

/// On-disk description of a sound bank
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BankManifest {
    /// Bank name; the engine's bank table is keyed by this
    pub name: String,

    /// Sounds belonging to this bank
    #[serde(default)]
    pub sounds: Vec<SoundDescriptor>,
}

impl Config for BankManifest {}

/// Record of a loaded sound bank
///
/// Holds the keys of the member sounds that loaded successfully. Lives for
/// the rest of the process once loaded.
#[derive(Debug, Clone)]
pub struct SoundBank {
    name: String,
    keys: Vec<String>,
}

impl SoundBank {
    pub(crate) fn new(name: String, keys: Vec<String>) -> Self {
        Self { name, keys }
    }

    /// Bank name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Keys of the sounds this bank loaded
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    /// Whether the bank loaded a sound with the given key
    pub fn contains(&self, key: &str) -> bool {
        self.keys.iter().any(|k| k == key)
    }

    /// Number of sounds loaded from this bank
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// True when no member sound loaded
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ron_manifest_parses() {
        let source = r#"(
            name: "combat",
            sounds: [
                (key: "laser", path: "sfx/laser.wav"),
                (key: "engine_hum", path: "sfx/hum.ogg", looping: true, spatial: true, volume: 0.5),
            ],
        )"#;

        let manifest: BankManifest = ron::from_str(source).expect("manifest should parse");
        assert_eq!(manifest.name, "combat");
        assert_eq!(manifest.sounds.len(), 2);
        assert!(manifest.sounds[1].looping);
        assert!(manifest.sounds[1].spatial);
    }

    #[test]
    fn test_toml_manifest_parses() {
        let source = r#"
            name = "ui"

            [[sounds]]
            key = "click"
            path = "ui/click.wav"

            [[sounds]]
            key = "hover"
            path = "ui/hover.wav"
            volume = 0.3
        "#;

        let manifest: BankManifest = toml::from_str(source).expect("manifest should parse");
        assert_eq!(manifest.name, "ui");
        assert_eq!(manifest.sounds.len(), 2);
        assert_eq!(manifest.sounds[1].volume, 0.3);
        assert!(!manifest.sounds[0].looping);
    }

    #[test]
    fn test_bank_membership() {
        let bank = SoundBank::new(
            "combat".to_string(),
            vec!["laser".to_string(), "boom".to_string()],
        );
        assert_eq!(bank.name(), "combat");
        assert_eq!(bank.len(), 2);
        assert!(bank.contains("laser"));
        assert!(!bank.contains("click"));
    }
}
