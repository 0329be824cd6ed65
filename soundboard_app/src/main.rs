//! Soundboard demo application
//!
//! Loads a sound bank manifest, fires a one-shot, and orbits a looping
//! sound around the listener to demonstrate 3D positional playback.
//!
//! Usage: `soundboard [bank-manifest]` (defaults to `assets/demo_bank.ron`).
//! Sounds named `boom` and `engine_hum` in the manifest get special demo
//! treatment; any other sounds are simply loaded.

use audio_engine::prelude::*;
use log::info;
use std::time::{Duration, Instant};

const FRAME_TIME: Duration = Duration::from_millis(16);
const DEMO_SECONDS: f32 = 10.0;
const ORBIT_RADIUS: f32 = 5.0;
const ORBIT_SPEED: f32 = 0.8;

fn main() {
    audio_engine::foundation::logging::init();

    let bank_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/demo_bank.ron".to_string());

    let config = match AudioConfig::load_from_file("assets/audio.toml") {
        Ok(config) => config,
        Err(_) => AudioConfig::default(),
    };

    let mut audio = AudioEngine::new(config);
    audio.init();
    if !audio.is_ready() {
        log::error!("no audio device available, exiting");
        return;
    }

    audio.load_bank(&bank_path);

    // Fire-and-forget one-shot; load_sound is a no-op if the bank
    // already provided the key
    let boom = SoundDescriptor::new("boom", "assets/boom.wav");
    audio.load_sound(&boom);
    audio.play_sound(&boom);

    // Looping hum orbiting the listener
    let mut hum = SoundDescriptor::new("engine_hum", "assets/hum.ogg")
        .with_looping()
        .with_volume(0.6)
        .at_position(Vec3::new(ORBIT_RADIUS, 0.0, 0.0));
    audio.load_sound(&hum);
    audio.play_sound(&hum);

    // Listener fixed at the origin, facing +z
    audio.set_listener(Vec3::zeros(), Vec3::z(), Vec3::y());

    info!(
        "orbiting '{}' around the listener for {DEMO_SECONDS} seconds",
        hum.key
    );

    let started = Instant::now();
    loop {
        let elapsed = started.elapsed().as_secs_f32();
        if elapsed >= DEMO_SECONDS {
            break;
        }

        let angle = elapsed * ORBIT_SPEED * std::f32::consts::TAU;
        hum.set_position(Vec3::new(
            ORBIT_RADIUS * angle.cos(),
            0.0,
            ORBIT_RADIUS * angle.sin(),
        ));
        audio.update_sound_position(&hum);
        audio.update();

        std::thread::sleep(FRAME_TIME);
    }

    audio.stop_sound(&hum.key);
    info!(
        "demo done, {} channels still draining",
        audio.active_channel_count()
    );
    audio.shutdown();
}
