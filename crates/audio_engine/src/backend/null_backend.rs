//! Null audio backend
//!
//! A silent stand-in used when no audio device is wanted: headless servers,
//! CI, and tests. Bookkeeping matches the real backend's observable
//! behavior; loops report as playing until stopped, one-shots finish on the
//! next update.

use super::{AudioBackend, BackendConfig, ChannelId, SourceId};
use crate::error::AudioError;
use crate::foundation::math::Vec3;
use crate::spatial::ListenerPose;
use slotmap::SlotMap;
use std::path::Path;

struct NullSource {
    looping: bool,
    spatial: bool,
}

struct NullChannel {
    looping: bool,
    spatial: bool,
    position: Vec3,
}

/// Backend that performs no audio output
pub struct NullBackend {
    sources: SlotMap<SourceId, NullSource>,
    channels: SlotMap<ChannelId, NullChannel>,
    listener: ListenerPose,
    max_channels: usize,
    initialized: bool,
}

impl NullBackend {
    /// Create a new, uninitialized null backend
    pub fn new() -> Self {
        Self {
            sources: SlotMap::with_key(),
            channels: SlotMap::with_key(),
            listener: ListenerPose::default(),
            max_channels: BackendConfig::default().max_channels,
            initialized: false,
        }
    }

    /// The most recently recorded listener pose
    pub fn listener(&self) -> &ListenerPose {
        &self.listener
    }
}

impl AudioBackend for NullBackend {
    fn initialize(&mut self, config: &BackendConfig) -> Result<(), AudioError> {
        self.max_channels = config.max_channels;
        self.initialized = true;
        log::debug!("null audio backend initialized (no output device)");
        Ok(())
    }

    fn shutdown(&mut self) {
        self.stop_all();
        self.sources.clear();
        self.initialized = false;
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        // One-shots are considered finished after a frame
        self.channels.retain(|_, channel| channel.looping);
    }

    fn create_source(
        &mut self,
        _path: &Path,
        looping: bool,
        spatial: bool,
    ) -> Result<SourceId, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        Ok(self.sources.insert(NullSource { looping, spatial }))
    }

    fn play(
        &mut self,
        source: SourceId,
        _volume: f32,
        position: Option<Vec3>,
    ) -> Result<ChannelId, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        let loaded = self.sources.get(source).ok_or(AudioError::InvalidSource)?;
        if self.channels.len() >= self.max_channels {
            return Err(AudioError::NoFreeChannels {
                capacity: self.max_channels,
            });
        }

        Ok(self.channels.insert(NullChannel {
            looping: loaded.looping,
            spatial: loaded.spatial,
            position: position.unwrap_or_else(Vec3::zeros),
        }))
    }

    fn stop(&mut self, channel: ChannelId) {
        self.channels.remove(channel);
    }

    fn set_channel_volume(&mut self, channel: ChannelId, _volume: f32) -> Result<(), AudioError> {
        self.channels
            .get(channel)
            .map(|_| ())
            .ok_or(AudioError::InvalidChannel)
    }

    fn set_channel_position(
        &mut self,
        channel: ChannelId,
        position: Vec3,
    ) -> Result<(), AudioError> {
        match self.channels.get_mut(channel) {
            Some(ch) if ch.spatial => {
                ch.position = position;
                Ok(())
            }
            Some(_) => Err(AudioError::NotSpatial),
            None => Err(AudioError::InvalidChannel),
        }
    }

    fn channel_position(&self, channel: ChannelId) -> Option<Vec3> {
        self.channels
            .get(channel)
            .filter(|ch| ch.spatial)
            .map(|ch| ch.position)
    }

    fn channel_is_playing(&self, channel: ChannelId) -> bool {
        self.channels.contains_key(channel)
    }

    fn set_listener(&mut self, pose: &ListenerPose) {
        self.listener = pose.clone();
    }

    fn stop_all(&mut self) {
        self.channels.clear();
    }

    fn active_channels(&self) -> usize {
        self.channels.len()
    }
}

impl Default for NullBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ready_backend() -> NullBackend {
        let mut backend = NullBackend::new();
        backend
            .initialize(&BackendConfig::default())
            .expect("null backend init cannot fail");
        backend
    }

    #[test]
    fn test_one_shot_finishes_on_update() {
        let mut backend = ready_backend();
        let source = backend
            .create_source(Path::new("shot.wav"), false, false)
            .expect("create");
        let channel = backend.play(source, 1.0, None).expect("play");

        assert!(backend.channel_is_playing(channel));
        backend.update();
        assert!(!backend.channel_is_playing(channel));
        assert_eq!(backend.active_channels(), 0);
    }

    #[test]
    fn test_loop_survives_updates_until_stopped() {
        let mut backend = ready_backend();
        let source = backend
            .create_source(Path::new("loop.ogg"), true, false)
            .expect("create");
        let channel = backend.play(source, 1.0, None).expect("play");

        backend.update();
        backend.update();
        assert!(backend.channel_is_playing(channel));

        backend.stop(channel);
        assert!(!backend.channel_is_playing(channel));
    }

    #[test]
    fn test_channel_capacity() {
        let mut backend = NullBackend::new();
        backend
            .initialize(&BackendConfig {
                max_channels: 2,
                units_per_meter: 1.0,
            })
            .expect("init");

        let source = backend
            .create_source(Path::new("s.wav"), true, false)
            .expect("create");
        backend.play(source, 1.0, None).expect("first play");
        backend.play(source, 1.0, None).expect("second play");

        let third = backend.play(source, 1.0, None);
        assert!(matches!(
            third,
            Err(AudioError::NoFreeChannels { capacity: 2 })
        ));
    }

    #[test]
    fn test_position_tracking_is_spatial_only() {
        let mut backend = ready_backend();
        let flat = backend
            .create_source(Path::new("flat.wav"), true, false)
            .expect("create");
        let spatial = backend
            .create_source(Path::new("spatial.wav"), true, true)
            .expect("create");

        let flat_channel = backend.play(flat, 1.0, None).expect("play");
        let spatial_channel = backend
            .play(spatial, 1.0, Some(Vec3::new(1.0, 0.0, 0.0)))
            .expect("play");

        assert!(matches!(
            backend.set_channel_position(flat_channel, Vec3::zeros()),
            Err(AudioError::NotSpatial)
        ));

        backend
            .set_channel_position(spatial_channel, Vec3::new(0.0, 5.0, 0.0))
            .expect("spatial move");
        assert_eq!(
            backend.channel_position(spatial_channel),
            Some(Vec3::new(0.0, 5.0, 0.0))
        );
    }
}
