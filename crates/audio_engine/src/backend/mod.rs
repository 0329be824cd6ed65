//! Audio backend implementations
//!
//! Platform-independent abstraction over audio playback libraries. The
//! engine talks to the platform through [`AudioBackend`] only; everything
//! rodio-specific stays inside [`rodio_backend`].

pub mod null_backend;
#[cfg(feature = "rodio")]
pub mod rodio_backend;

use crate::error::AudioError;
use crate::foundation::math::Vec3;
use crate::spatial::ListenerPose;
use slotmap::new_key_type;
use std::path::Path;

new_key_type! {
    /// Handle to a sound source loaded and owned by the backend
    pub struct SourceId;

    /// Handle to an active playback channel
    pub struct ChannelId;
}

/// Audio backend trait for platform abstraction
///
/// Single-threaded: the engine drives the backend from the game loop
/// thread, so implementations are not required to be `Send + Sync`.
pub trait AudioBackend {
    /// Initialize the audio backend
    fn initialize(&mut self, config: &BackendConfig) -> Result<(), AudioError>;

    /// Shutdown the audio backend, stopping all playback
    fn shutdown(&mut self);

    /// Check if backend is initialized
    fn is_initialized(&self) -> bool;

    /// Per-frame maintenance: prune finished channels and apply the
    /// most recent listener pose to live spatial channels
    fn update(&mut self);

    /// Decode an audio file into a reusable source
    ///
    /// `looping` and `spatial` are fixed at creation time and apply to every
    /// channel later started from this source.
    fn create_source(
        &mut self,
        path: &Path,
        looping: bool,
        spatial: bool,
    ) -> Result<SourceId, AudioError>;

    /// Start playback of a source on a fresh channel
    ///
    /// `position` supplies the initial world position for spatial sources
    /// and is ignored for flat stereo ones. Fails with
    /// [`AudioError::NoFreeChannels`] once the configured capacity is
    /// reached.
    fn play(
        &mut self,
        source: SourceId,
        volume: f32,
        position: Option<Vec3>,
    ) -> Result<ChannelId, AudioError>;

    /// Stop a channel; stopping a dead or unknown channel is a no-op
    fn stop(&mut self, channel: ChannelId);

    /// Set the volume of a live channel
    fn set_channel_volume(&mut self, channel: ChannelId, volume: f32) -> Result<(), AudioError>;

    /// Move a live spatial channel to a new world position
    fn set_channel_position(&mut self, channel: ChannelId, position: Vec3)
        -> Result<(), AudioError>;

    /// Current world position of a live spatial channel
    fn channel_position(&self, channel: ChannelId) -> Option<Vec3>;

    /// Whether a channel is still audibly playing
    fn channel_is_playing(&self, channel: ChannelId) -> bool;

    /// Record the listener pose; applied on the next [`update`](Self::update)
    fn set_listener(&mut self, pose: &ListenerPose);

    /// Stop every active channel
    fn stop_all(&mut self);

    /// Number of currently active channels
    fn active_channels(&self) -> usize;
}

/// Configuration for audio backend
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Maximum number of simultaneously playing channels
    pub max_channels: usize,
    /// World units per meter for 3D attenuation math
    pub units_per_meter: f32,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            max_channels: 1024,
            units_per_meter: 1.0,
        }
    }
}

/// Create the default audio backend for the platform, not yet initialized
///
/// The engine initializes the backend during [`AudioEngine::init`],
/// matching the explicit init step of the public surface.
///
/// [`AudioEngine::init`]: crate::engine::AudioEngine::init
pub fn default_backend() -> Box<dyn AudioBackend> {
    #[cfg(feature = "rodio")]
    {
        Box::new(rodio_backend::RodioBackend::new())
    }
    #[cfg(not(feature = "rodio"))]
    {
        Box::new(null_backend::NullBackend::new())
    }
}
