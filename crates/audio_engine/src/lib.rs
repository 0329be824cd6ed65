//! # Audio Engine
//!
//! A game audio engine with cached sound loading, channel-based playback,
//! and 3D positional audio.
//!
//! ## Features
//!
//! - **Keyed sound cache**: sounds load once and replay from memory
//! - **Looping and one-shot playback**: loops stay addressable by key,
//!   one-shots are fire-and-forget
//! - **3D positional audio**: listener pose plus per-sound world positions
//! - **Sound banks**: RON/TOML manifests that load a group of sounds as a unit
//! - **Volume groups**: independent mixer control for effects, music, ambience
//! - **Pluggable backends**: rodio output by default, a null backend for
//!   headless hosts and tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use audio_engine::prelude::*;
//!
//! let mut audio = AudioEngine::new(AudioConfig::default());
//! audio.init();
//!
//! let boom = SoundDescriptor::new("boom", "sfx/boom.wav");
//! audio.load_sound(&boom);
//! audio.play_sound(&boom);
//!
//! let hum = SoundDescriptor::new("hum", "sfx/hum.ogg")
//!     .with_looping()
//!     .at_position(Vec3::new(4.0, 0.0, 2.0));
//! audio.load_sound(&hum);
//! audio.play_sound(&hum);
//!
//! loop {
//!     // once per frame
//!     audio.set_listener(Vec3::zeros(), Vec3::z(), Vec3::y());
//!     audio.update();
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod backend;
pub mod bank;
pub mod config;
pub mod descriptor;
pub mod engine;
pub mod error;
pub mod foundation;
pub mod mixer;
pub mod spatial;

pub use bank::{BankManifest, SoundBank};
pub use config::{AudioConfig, Config};
pub use descriptor::SoundDescriptor;
pub use engine::AudioEngine;
pub use error::AudioError;
pub use mixer::{Mixer, VolumeGroup};
pub use spatial::ListenerPose;

/// Common imports for engine users
pub mod prelude {
    pub use crate::backend::AudioBackend;
    pub use crate::bank::{BankManifest, SoundBank};
    pub use crate::config::{AudioConfig, Config};
    pub use crate::descriptor::SoundDescriptor;
    pub use crate::engine::AudioEngine;
    pub use crate::error::AudioError;
    pub use crate::foundation::math::{Vec2, Vec3};
    pub use crate::mixer::VolumeGroup;
    pub use crate::spatial::ListenerPose;
}
