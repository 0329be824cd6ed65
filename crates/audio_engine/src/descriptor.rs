//! Sound descriptors
//!
//! A [`SoundDescriptor`] is the caller-supplied value identifying a sound:
//! a unique key, the file it comes from, how it plays back (looping or
//! one-shot, flat stereo or 3D positional), its volume, and, for spatial
//! sounds, its world position. Descriptors are plain data; the engine keys
//! every cache off `key`.

use crate::foundation::math::Vec3;
use crate::mixer::VolumeGroup;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

fn default_volume() -> f32 {
    1.0
}

/// Descriptor for a single sound asset and how it should play back
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SoundDescriptor {
    /// Unique identifier; all engine caches are keyed by this
    pub key: String,

    /// Path to the audio file (WAV, OGG Vorbis, or FLAC)
    pub path: PathBuf,

    /// Whether playback loops until stopped
    #[serde(default)]
    pub looping: bool,

    /// Whether the sound is positioned in 3D space
    #[serde(default)]
    pub spatial: bool,

    /// Volume multiplier for this sound (0.0 to 1.0)
    #[serde(default = "default_volume")]
    pub volume: f32,

    /// World position; meaningful only when `spatial` is set
    #[serde(default = "Vec3::zeros")]
    pub position: Vec3,

    /// Mixer group this sound is routed through
    #[serde(default)]
    pub group: VolumeGroup,
}

impl SoundDescriptor {
    /// Create a descriptor for a one-shot stereo sound
    pub fn new<S: Into<String>, P: Into<PathBuf>>(key: S, path: P) -> Self {
        Self {
            key: key.into(),
            path: path.into(),
            looping: false,
            spatial: false,
            volume: 1.0,
            position: Vec3::zeros(),
            group: VolumeGroup::default(),
        }
    }

    /// Make the sound loop until explicitly stopped
    pub fn with_looping(mut self) -> Self {
        self.looping = true;
        self
    }

    /// Set the volume multiplier (clamped to 0.0..=1.0)
    pub fn with_volume(mut self, volume: f32) -> Self {
        self.volume = volume.clamp(0.0, 1.0);
        self
    }

    /// Make the sound 3D positional, starting at `position`
    pub fn at_position(mut self, position: Vec3) -> Self {
        self.spatial = true;
        self.position = position;
        self
    }

    /// Route the sound through a specific mixer group
    pub fn in_group(mut self, group: VolumeGroup) -> Self {
        self.group = group;
        self
    }

    /// Update the world position ahead of a positional update call
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }
}
