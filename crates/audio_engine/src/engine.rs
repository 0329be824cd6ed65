//! Audio engine facade
//!
//! [`AudioEngine`] is the single entry point gameplay code talks to. It owns
//! the platform backend plus three key-addressed tables: loaded sources,
//! looping sounds currently playing, and sound banks. The engine is an
//! explicit value meant to be owned by the application's composition root
//! and passed to the systems that need it; there is no global instance.
//!
//! Failures from the platform layer are logged and swallowed here. A missing
//! sound or a dead output device should cost a log line, not a crashed game
//! loop, so every public operation returns plain values.

use crate::backend::{default_backend, AudioBackend, BackendConfig, ChannelId, SourceId};
use crate::bank::{BankManifest, SoundBank};
use crate::config::{AudioConfig, Config};
use crate::descriptor::SoundDescriptor;
use crate::foundation::math::Vec3;
use crate::mixer::{Mixer, VolumeGroup};
use crate::spatial::ListenerPose;
use log::{debug, error, info, warn};
use std::collections::HashMap;

/// Bookkeeping for a looping sound that is currently playing
struct ActiveLoop {
    channel: ChannelId,
    group: VolumeGroup,
    /// Descriptor volume at play time, before mixer scaling
    volume: f32,
}

/// Game audio engine
///
/// Construct once, call [`init`](Self::init), then drive with
/// [`update`](Self::update) every frame from the game loop thread; the
/// engine has no internal locking. All operations other than `init` log an
/// error and do nothing until initialization has succeeded.
pub struct AudioEngine {
    backend: Box<dyn AudioBackend>,
    config: AudioConfig,
    /// Loaded sounds by descriptor key; entries live for the whole process
    sources: HashMap<String, SourceId>,
    /// Channels of currently playing looping sounds, by descriptor key
    playing_loops: HashMap<String, ActiveLoop>,
    /// Loaded sound banks by bank name
    banks: HashMap<String, SoundBank>,
    listener: ListenerPose,
    listener_dirty: bool,
    mixer: Mixer,
    ready: bool,
}

impl AudioEngine {
    /// Create an engine using the default platform backend
    pub fn new(config: AudioConfig) -> Self {
        Self::with_backend(config, default_backend())
    }

    /// Create an engine with an explicitly supplied backend
    ///
    /// This is the seam used by headless hosts (pass a
    /// [`NullBackend`](crate::backend::null_backend::NullBackend)) and by
    /// tests.
    pub fn with_backend(config: AudioConfig, backend: Box<dyn AudioBackend>) -> Self {
        Self {
            backend,
            config,
            sources: HashMap::new(),
            playing_loops: HashMap::new(),
            banks: HashMap::new(),
            listener: ListenerPose::default(),
            listener_dirty: false,
            mixer: Mixer::new(),
            ready: false,
        }
    }

    /// Initialize the platform backend
    ///
    /// Must be called once before any other operation. Failure is logged and
    /// leaves the engine inert: later calls keep reporting the missing
    /// initialization instead of panicking.
    pub fn init(&mut self) {
        if self.ready {
            warn!("audio engine: init() called twice, ignoring");
            return;
        }

        let backend_config = BackendConfig {
            max_channels: self.config.max_channels,
            units_per_meter: self.config.units_per_meter,
        };

        match self.backend.initialize(&backend_config) {
            Ok(()) => {
                self.mixer
                    .set_group_volume(VolumeGroup::Master, self.config.master_volume);
                self.ready = true;
                info!(
                    "audio engine ready ({} channels, {} units/m)",
                    self.config.max_channels, self.config.units_per_meter
                );
            }
            Err(e) => error!("audio engine initialization failed: {e}"),
        }
    }

    /// Whether initialization has succeeded
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    fn check_ready(&self, operation: &str) -> bool {
        if !self.ready {
            error!("audio engine: {operation} called before init()");
        }
        self.ready
    }

    /// Per-frame update; call once per game loop iteration
    ///
    /// Applies pending listener changes, lets the backend stream and fade,
    /// and prunes loop-table entries whose channels have gone quiet.
    pub fn update(&mut self) {
        if !self.check_ready("update") {
            return;
        }

        if self.listener_dirty {
            self.backend.set_listener(&self.listener);
            self.listener_dirty = false;
        }
        self.backend.update();

        let backend = self.backend.as_ref();
        self.playing_loops.retain(|key, active| {
            let alive = backend.channel_is_playing(active.channel);
            if !alive {
                debug!("loop '{key}' went quiet, dropping from loop table");
            }
            alive
        });
    }

    /// Load a sound into the cache
    ///
    /// Loading an already-present key is a no-op, so callers can blindly
    /// load before every play. On failure the key stays absent and the load
    /// can be retried.
    pub fn load_sound(&mut self, descriptor: &SoundDescriptor) {
        if !self.check_ready("load_sound") {
            return;
        }
        if self.sources.contains_key(&descriptor.key) {
            debug!("sound '{}' already loaded", descriptor.key);
            return;
        }

        match self.backend.create_source(
            &descriptor.path,
            descriptor.looping,
            descriptor.spatial,
        ) {
            Ok(source) => {
                debug!(
                    "loaded sound '{}' from {}",
                    descriptor.key,
                    descriptor.path.display()
                );
                self.sources.insert(descriptor.key.clone(), source);
            }
            Err(e) => error!("failed to load sound '{}': {e}", descriptor.key),
        }
    }

    /// Whether a sound key has been loaded
    pub fn is_loaded(&self, key: &str) -> bool {
        self.sources.contains_key(key)
    }

    /// Start playback of a previously loaded sound
    ///
    /// The descriptor's volume is scaled by its mixer group before reaching
    /// the backend, and its position seeds spatial playback. Looping sounds
    /// are tracked in the loop table so they can be moved, queried, and
    /// stopped by key; one-shots are fire-and-forget.
    pub fn play_sound(&mut self, descriptor: &SoundDescriptor) {
        if !self.check_ready("play_sound") {
            return;
        }
        let Some(&source) = self.sources.get(&descriptor.key) else {
            warn!(
                "cannot play '{}': sound not loaded, call load_sound first",
                descriptor.key
            );
            return;
        };

        let volume = descriptor.volume * self.mixer.effective_volume(descriptor.group);
        let position = descriptor.spatial.then_some(descriptor.position);

        match self.backend.play(source, volume, position) {
            Ok(channel) => {
                if descriptor.looping {
                    let previous = self.playing_loops.insert(
                        descriptor.key.clone(),
                        ActiveLoop {
                            channel,
                            group: descriptor.group,
                            volume: descriptor.volume,
                        },
                    );
                    // Restarting a loop replaces its channel; the old one
                    // would otherwise keep sounding with no way to reach it.
                    if let Some(previous) = previous {
                        self.backend.stop(previous.channel);
                    }
                }
            }
            Err(e) => error!("failed to play sound '{}': {e}", descriptor.key),
        }
    }

    /// Stop a playing looping sound
    ///
    /// Stopping a key that is not playing (or was never played) is a no-op.
    /// One-shot sounds cannot be stopped; they are not tracked after start.
    pub fn stop_sound(&mut self, key: &str) {
        if !self.check_ready("stop_sound") {
            return;
        }
        if let Some(active) = self.playing_loops.remove(key) {
            self.backend.stop(active.channel);
            debug!("stopped loop '{key}'");
        }
    }

    /// Push a playing loop's position to the descriptor's current coordinates
    ///
    /// Callers update `descriptor.position` first, then call this. Keys that
    /// are not currently tracked as playing are a no-op; one-shot sounds are
    /// never tracked, so they cannot be moved after starting.
    pub fn update_sound_position(&mut self, descriptor: &SoundDescriptor) {
        if !self.check_ready("update_sound_position") {
            return;
        }
        let Some(active) = self.playing_loops.get(&descriptor.key) else {
            return;
        };

        if let Err(e) = self
            .backend
            .set_channel_position(active.channel, descriptor.position)
        {
            warn!("failed to move sound '{}': {e}", descriptor.key);
        }
    }

    /// Whether a looping sound is currently audible
    ///
    /// True only while the loop table has the key and the backend still
    /// reports the channel as playing. A stale entry (channel finished since
    /// the last update) is pruned here and reported as not playing.
    pub fn sound_is_playing(&mut self, key: &str) -> bool {
        if !self.ready {
            return false;
        }
        let Some(active) = self.playing_loops.get(key) else {
            return false;
        };

        if self.backend.channel_is_playing(active.channel) {
            true
        } else {
            self.playing_loops.remove(key);
            false
        }
    }

    /// Current world position of a playing spatial loop
    pub fn sound_position(&self, key: &str) -> Option<Vec3> {
        let active = self.playing_loops.get(key)?;
        self.backend.channel_position(active.channel)
    }

    /// Set the listener position and orientation
    ///
    /// `forward` and `up` must be mutually perpendicular (caller's
    /// contract). Takes effect on the next [`update`](Self::update).
    pub fn set_listener(&mut self, position: Vec3, forward: Vec3, up: Vec3) {
        if !self.check_ready("set_listener") {
            return;
        }
        self.listener = ListenerPose::new(position, forward, up);
        self.listener_dirty = true;
    }

    /// Current listener pose
    pub fn listener(&self) -> &ListenerPose {
        &self.listener
    }

    /// Load a sound bank manifest and every sound it declares
    ///
    /// The bank is registered under the name from the manifest and lives for
    /// the rest of the process; reloading a registered name is a no-op.
    /// Individual sounds that fail to load are logged and skipped, leaving
    /// the rest of the bank usable.
    pub fn load_bank(&mut self, path: &str) {
        if !self.check_ready("load_bank") {
            return;
        }

        let manifest = match BankManifest::load_from_file(path) {
            Ok(manifest) => manifest,
            Err(e) => {
                error!("failed to load sound bank from {path}: {e}");
                return;
            }
        };

        if self.banks.contains_key(&manifest.name) {
            debug!("sound bank '{}' already loaded", manifest.name);
            return;
        }

        let mut keys = Vec::with_capacity(manifest.sounds.len());
        for descriptor in &manifest.sounds {
            self.load_sound(descriptor);
            if self.sources.contains_key(&descriptor.key) {
                keys.push(descriptor.key.clone());
            }
        }

        info!(
            "loaded sound bank '{}' ({}/{} sounds)",
            manifest.name,
            keys.len(),
            manifest.sounds.len()
        );
        self.banks
            .insert(manifest.name.clone(), SoundBank::new(manifest.name, keys));
    }

    /// Look up a loaded sound bank by name
    pub fn bank(&self, name: &str) -> Option<&SoundBank> {
        self.banks.get(name)
    }

    /// Set the volume of a mixer group
    ///
    /// Applies immediately to playing loops routed through the group
    /// (or to all loops when adjusting [`VolumeGroup::Master`]).
    pub fn set_group_volume(&mut self, group: VolumeGroup, volume: f32) {
        self.mixer.set_group_volume(group, volume);

        let mixer = &self.mixer;
        let backend = self.backend.as_mut();
        for (key, active) in &self.playing_loops {
            if active.group == group || group == VolumeGroup::Master {
                let scaled = active.volume * mixer.effective_volume(active.group);
                if let Err(e) = backend.set_channel_volume(active.channel, scaled) {
                    warn!("failed to adjust volume of loop '{key}': {e}");
                }
            }
        }
    }

    /// Effective volume of a mixer group
    pub fn group_volume(&self, group: VolumeGroup) -> f32 {
        self.mixer.effective_volume(group)
    }

    /// Number of channels currently playing, one-shots included
    pub fn active_channel_count(&self) -> usize {
        self.backend.active_channels()
    }

    /// Stop every playing sound, loops and one-shots alike
    pub fn stop_all(&mut self) {
        if !self.check_ready("stop_all") {
            return;
        }
        self.backend.stop_all();
        self.playing_loops.clear();
    }

    /// Shut the engine down, releasing the output device
    ///
    /// Caches are cleared; a fresh engine must be constructed to play again.
    pub fn shutdown(&mut self) {
        if !self.ready {
            return;
        }
        self.backend.shutdown();
        self.sources.clear();
        self.playing_loops.clear();
        self.banks.clear();
        self.ready = false;
        info!("audio engine shut down");
    }
}
