//! Rodio audio backend implementation
//!
//! Uses the Rodio library for cross-platform audio playback. Rodio is pure
//! Rust and supports WAV, OGG Vorbis, and FLAC formats.
//!
//! Sources are decoded once and kept as cloneable buffered sample chains, so
//! repeated plays of the same sound never touch the disk again. Flat stereo
//! sounds play on a [`Sink`]; spatial sounds play on a [`SpatialSink`] whose
//! ear positions are derived from the engine's listener pose.

use super::{AudioBackend, BackendConfig, ChannelId, SourceId};
use crate::error::AudioError;
use crate::foundation::math::Vec3;
use crate::spatial::{scale_to_meters, ListenerPose};
use rodio::source::{Buffered, Source};
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, SpatialSink};
use slotmap::SlotMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

type BufferedDecoder = Buffered<Decoder<BufReader<File>>>;

/// A decoded, replayable sound source
struct LoadedSource {
    samples: BufferedDecoder,
    looping: bool,
    spatial: bool,
}

/// An active playback channel
enum Channel {
    /// Flat stereo playback
    Flat(Sink),
    /// 3D positional playback; `position` is kept in world units
    Spatial { sink: SpatialSink, position: Vec3 },
}

impl Channel {
    fn is_active(&self) -> bool {
        match self {
            Channel::Flat(sink) => !sink.empty(),
            Channel::Spatial { sink, .. } => !sink.empty(),
        }
    }

    fn stop(&self) {
        match self {
            Channel::Flat(sink) => sink.stop(),
            Channel::Spatial { sink, .. } => sink.stop(),
        }
    }

    fn set_volume(&self, volume: f32) {
        match self {
            Channel::Flat(sink) => sink.set_volume(volume),
            Channel::Spatial { sink, .. } => sink.set_volume(volume),
        }
    }
}

/// Rodio-based audio backend
pub struct RodioBackend {
    /// Audio output stream (must be kept alive)
    _output_stream: Option<OutputStream>,
    /// Output stream handle for creating sinks
    stream_handle: Option<OutputStreamHandle>,
    /// Decoded sources, owned for the lifetime of the backend
    sources: SlotMap<SourceId, LoadedSource>,
    /// Active playback channels
    channels: SlotMap<ChannelId, Channel>,
    /// Most recently supplied listener pose
    listener: ListenerPose,
    /// Applied to spatial channels on the next update
    listener_dirty: bool,
    max_channels: usize,
    units_per_meter: f32,
    initialized: bool,
}

impl RodioBackend {
    /// Create a new, uninitialized Rodio backend
    pub fn new() -> Self {
        Self {
            _output_stream: None,
            stream_handle: None,
            sources: SlotMap::with_key(),
            channels: SlotMap::with_key(),
            listener: ListenerPose::default(),
            listener_dirty: false,
            max_channels: BackendConfig::default().max_channels,
            units_per_meter: BackendConfig::default().units_per_meter,
            initialized: false,
        }
    }

    fn prune_finished(&mut self) {
        self.channels.retain(|_, channel| channel.is_active());
    }

    fn apply_listener(&mut self) {
        let (left, right) = self.listener.ear_positions(self.units_per_meter);
        for channel in self.channels.values() {
            if let Channel::Spatial { sink, .. } = channel {
                sink.set_left_ear_position(left);
                sink.set_right_ear_position(right);
            }
        }
        self.listener_dirty = false;
    }
}

impl AudioBackend for RodioBackend {
    fn initialize(&mut self, config: &BackendConfig) -> Result<(), AudioError> {
        if self.initialized {
            return Ok(());
        }

        let (stream, stream_handle) = OutputStream::try_default()
            .map_err(|e| AudioError::BackendInit(format!("failed to open audio output: {e}")))?;

        self._output_stream = Some(stream);
        self.stream_handle = Some(stream_handle);
        self.max_channels = config.max_channels;
        self.units_per_meter = config.units_per_meter;
        self.initialized = true;

        log::info!(
            "rodio audio backend initialized ({} channels, {} units/m)",
            self.max_channels,
            self.units_per_meter
        );
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }

        self.stop_all();
        self.sources.clear();
        self.stream_handle = None;
        self._output_stream = None;
        self.initialized = false;

        log::info!("rodio audio backend shut down");
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn update(&mut self) {
        self.prune_finished();
        if self.listener_dirty {
            self.apply_listener();
        }
    }

    fn create_source(
        &mut self,
        path: &Path,
        looping: bool,
        spatial: bool,
    ) -> Result<SourceId, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }

        let file = File::open(path).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let decoder = Decoder::new(BufReader::new(file)).map_err(|e| AudioError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let source = LoadedSource {
            samples: decoder.buffered(),
            looping,
            spatial,
        };
        Ok(self.sources.insert(source))
    }

    fn play(
        &mut self,
        source: SourceId,
        volume: f32,
        position: Option<Vec3>,
    ) -> Result<ChannelId, AudioError> {
        if !self.initialized {
            return Err(AudioError::BackendNotInitialized);
        }
        if !self.sources.contains_key(source) {
            return Err(AudioError::InvalidSource);
        }

        if self.channels.len() >= self.max_channels {
            // A finished one-shot may still occupy a slot until the next
            // update; reclaim before refusing.
            self.prune_finished();
            if self.channels.len() >= self.max_channels {
                return Err(AudioError::NoFreeChannels {
                    capacity: self.max_channels,
                });
            }
        }

        let (left, right) = self.listener.ear_positions(self.units_per_meter);
        let stream_handle = self
            .stream_handle
            .as_ref()
            .ok_or(AudioError::BackendNotInitialized)?;
        let loaded = &self.sources[source];

        let channel = if loaded.spatial {
            let world_position = position.unwrap_or_else(Vec3::zeros);
            let emitter = scale_to_meters(world_position, self.units_per_meter);
            let sink = SpatialSink::try_new(
                stream_handle,
                [emitter.x, emitter.y, emitter.z],
                left,
                right,
            )
            .map_err(|e| AudioError::Playback(format!("failed to create spatial sink: {e}")))?;

            sink.set_volume(volume);
            if loaded.looping {
                sink.append(loaded.samples.clone().repeat_infinite());
            } else {
                sink.append(loaded.samples.clone());
            }
            Channel::Spatial {
                sink,
                position: world_position,
            }
        } else {
            let sink = Sink::try_new(stream_handle)
                .map_err(|e| AudioError::Playback(format!("failed to create sink: {e}")))?;

            sink.set_volume(volume);
            if loaded.looping {
                sink.append(loaded.samples.clone().repeat_infinite());
            } else {
                sink.append(loaded.samples.clone());
            }
            Channel::Flat(sink)
        };

        Ok(self.channels.insert(channel))
    }

    fn stop(&mut self, channel: ChannelId) {
        if let Some(channel) = self.channels.remove(channel) {
            channel.stop();
        }
    }

    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> Result<(), AudioError> {
        let channel = self.channels.get(channel).ok_or(AudioError::InvalidChannel)?;
        channel.set_volume(volume);
        Ok(())
    }

    fn set_channel_position(
        &mut self,
        channel: ChannelId,
        position: Vec3,
    ) -> Result<(), AudioError> {
        let units_per_meter = self.units_per_meter;
        match self.channels.get_mut(channel) {
            Some(Channel::Spatial {
                sink,
                position: stored,
            }) => {
                let emitter = scale_to_meters(position, units_per_meter);
                sink.set_emitter_position([emitter.x, emitter.y, emitter.z]);
                *stored = position;
                Ok(())
            }
            Some(Channel::Flat(_)) => Err(AudioError::NotSpatial),
            None => Err(AudioError::InvalidChannel),
        }
    }

    fn channel_position(&self, channel: ChannelId) -> Option<Vec3> {
        match self.channels.get(channel) {
            Some(Channel::Spatial { position, .. }) => Some(*position),
            _ => None,
        }
    }

    fn channel_is_playing(&self, channel: ChannelId) -> bool {
        self.channels
            .get(channel)
            .map(Channel::is_active)
            .unwrap_or(false)
    }

    fn set_listener(&mut self, pose: &ListenerPose) {
        self.listener = pose.clone();
        self.listener_dirty = true;
    }

    fn stop_all(&mut self) {
        for (_, channel) in self.channels.drain() {
            channel.stop();
        }
    }

    fn active_channels(&self) -> usize {
        self.channels.len()
    }
}

impl Default for RodioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for RodioBackend {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_initialization() {
        let mut backend = RodioBackend::new();
        assert!(!backend.is_initialized());

        let config = BackendConfig::default();
        let result = backend.initialize(&config);

        // May fail in CI/test environments without an audio device
        if result.is_ok() {
            assert!(backend.is_initialized());
            backend.shutdown();
            assert!(!backend.is_initialized());
        }
    }

    #[test]
    fn test_double_initialization() {
        let mut backend = RodioBackend::new();
        let config = BackendConfig::default();

        if backend.initialize(&config).is_ok() {
            assert!(backend.initialize(&config).is_ok());
            backend.shutdown();
        }
    }

    #[test]
    fn test_create_source_without_initialization() {
        let mut backend = RodioBackend::new();
        let result = backend.create_source(Path::new("missing.wav"), false, false);
        assert!(matches!(result, Err(AudioError::BackendNotInitialized)));
    }

    #[test]
    fn test_create_source_missing_file() {
        let mut backend = RodioBackend::new();
        if backend.initialize(&BackendConfig::default()).is_ok() {
            let result = backend.create_source(Path::new("no/such/file.wav"), false, false);
            assert!(matches!(result, Err(AudioError::Decode { .. })));
            backend.shutdown();
        }
    }

    #[test]
    fn test_play_with_stale_source_handle() {
        let mut backend = RodioBackend::new();
        if backend.initialize(&BackendConfig::default()).is_ok() {
            let stale = SourceId::default();
            let result = backend.play(stale, 1.0, None);
            assert!(matches!(result, Err(AudioError::InvalidSource)));
            backend.shutdown();
        }
    }

    #[test]
    fn test_dead_channel_operations() {
        let mut backend = RodioBackend::new();
        if backend.initialize(&BackendConfig::default()).is_ok() {
            let dead = ChannelId::default();

            assert!(!backend.channel_is_playing(dead));
            assert!(backend.channel_position(dead).is_none());
            assert!(matches!(
                backend.set_channel_volume(dead, 0.5),
                Err(AudioError::InvalidChannel)
            ));
            assert!(matches!(
                backend.set_channel_position(dead, Vec3::zeros()),
                Err(AudioError::InvalidChannel)
            ));

            // Stopping a dead channel is a no-op, not an error
            backend.stop(dead);
            backend.shutdown();
        }
    }

    #[test]
    fn test_stop_all_clears_channels() {
        let mut backend = RodioBackend::new();
        if backend.initialize(&BackendConfig::default()).is_ok() {
            backend.stop_all();
            assert_eq!(backend.active_channels(), 0);
            backend.shutdown();
        }
    }
}
