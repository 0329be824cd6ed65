//! Audio mixer
//!
//! Manages volume groups so categories of sounds (effects, music, ambience)
//! can be adjusted or muted independently of each other.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Volume group categories for independent volume control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum VolumeGroup {
    /// Master volume (affects all sounds)
    Master,
    /// Sound effects
    #[default]
    Sfx,
    /// Background music
    Music,
    /// Ambient environmental sounds
    Ambient,
}

/// Mixer managing per-group volume and mute state
pub struct Mixer {
    /// Volume levels for each group (0.0 to 1.0)
    group_volumes: HashMap<VolumeGroup, f32>,
    /// Mute state for each group
    group_muted: HashMap<VolumeGroup, bool>,
}

impl Mixer {
    /// Create a new mixer with default volumes
    pub fn new() -> Self {
        let mut group_volumes = HashMap::new();
        group_volumes.insert(VolumeGroup::Master, 1.0);
        group_volumes.insert(VolumeGroup::Sfx, 1.0);
        group_volumes.insert(VolumeGroup::Music, 1.0);
        group_volumes.insert(VolumeGroup::Ambient, 0.7);

        Self {
            group_volumes,
            group_muted: HashMap::new(),
        }
    }

    /// Set volume for a specific group (clamped to 0.0..=1.0)
    pub fn set_group_volume(&mut self, group: VolumeGroup, volume: f32) {
        self.group_volumes.insert(group, volume.clamp(0.0, 1.0));
    }

    /// Get volume for a specific group
    pub fn group_volume(&self, group: VolumeGroup) -> f32 {
        *self.group_volumes.get(&group).unwrap_or(&1.0)
    }

    /// Get effective volume for a group (considering master volume and mute)
    pub fn effective_volume(&self, group: VolumeGroup) -> f32 {
        if self.is_muted(group) || self.is_muted(VolumeGroup::Master) {
            return 0.0;
        }

        self.group_volume(group) * self.group_volume(VolumeGroup::Master)
    }

    /// Mute a volume group
    pub fn mute_group(&mut self, group: VolumeGroup) {
        self.group_muted.insert(group, true);
    }

    /// Unmute a volume group
    pub fn unmute_group(&mut self, group: VolumeGroup) {
        self.group_muted.insert(group, false);
    }

    /// Check if a group is muted
    pub fn is_muted(&self, group: VolumeGroup) -> bool {
        *self.group_muted.get(&group).unwrap_or(&false)
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_volumes() {
        let mixer = Mixer::new();
        assert_eq!(mixer.group_volume(VolumeGroup::Master), 1.0);
        assert_eq!(mixer.group_volume(VolumeGroup::Sfx), 1.0);
        assert_eq!(mixer.group_volume(VolumeGroup::Ambient), 0.7);
    }

    #[test]
    fn test_volume_clamping() {
        let mut mixer = Mixer::new();
        mixer.set_group_volume(VolumeGroup::Sfx, 2.0);
        assert_eq!(mixer.group_volume(VolumeGroup::Sfx), 1.0);

        mixer.set_group_volume(VolumeGroup::Sfx, -0.5);
        assert_eq!(mixer.group_volume(VolumeGroup::Sfx), 0.0);
    }

    #[test]
    fn test_effective_volume_with_master() {
        let mut mixer = Mixer::new();
        mixer.set_group_volume(VolumeGroup::Master, 0.5);
        mixer.set_group_volume(VolumeGroup::Sfx, 0.8);

        assert_eq!(mixer.effective_volume(VolumeGroup::Sfx), 0.4);
    }

    #[test]
    fn test_mute() {
        let mut mixer = Mixer::new();
        mixer.mute_group(VolumeGroup::Sfx);
        assert_eq!(mixer.effective_volume(VolumeGroup::Sfx), 0.0);

        mixer.unmute_group(VolumeGroup::Sfx);
        assert_eq!(mixer.effective_volume(VolumeGroup::Sfx), 1.0);
    }

    #[test]
    fn test_master_mute_silences_everything() {
        let mut mixer = Mixer::new();
        mixer.mute_group(VolumeGroup::Master);
        assert_eq!(mixer.effective_volume(VolumeGroup::Sfx), 0.0);
        assert_eq!(mixer.effective_volume(VolumeGroup::Music), 0.0);
    }
}
