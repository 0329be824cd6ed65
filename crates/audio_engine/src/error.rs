//! Audio engine error types
//!
//! Every call into the platform audio backend is checked immediately and the
//! failure is reported through [`AudioError`]. The public engine surface logs
//! these errors instead of propagating them, so gameplay code never has to
//! unwind because a speaker went missing.

use std::path::PathBuf;

/// Errors produced by the audio engine and its backends
#[derive(thiserror::Error, Debug)]
pub enum AudioError {
    /// Audio output device or stream creation failed
    #[error("backend initialization failed: {0}")]
    BackendInit(String),

    /// An operation was attempted before the backend was initialized
    #[error("audio backend is not initialized")]
    BackendNotInitialized,

    /// An audio file could not be opened or decoded
    #[error("failed to decode audio file {}: {reason}", .path.display())]
    Decode {
        /// Path of the offending file
        path: PathBuf,
        /// Decoder or IO failure description
        reason: String,
    },

    /// Starting playback on a channel failed
    #[error("playback failed: {0}")]
    Playback(String),

    /// All playback channels are in use
    #[error("no free playback channels (capacity {capacity})")]
    NoFreeChannels {
        /// Configured channel capacity
        capacity: usize,
    },

    /// A channel handle does not refer to a live channel
    #[error("invalid or expired channel handle")]
    InvalidChannel,

    /// A source handle does not refer to a loaded sound
    #[error("invalid or expired source handle")]
    InvalidSource,

    /// A positional operation was applied to a non-spatial channel
    #[error("channel is not spatial")]
    NotSpatial,

    /// A sound key was used before being loaded
    #[error("sound not loaded: {key}")]
    UnknownSound {
        /// The descriptor key that missed the cache
        key: String,
    },

    /// A manifest or config file could not be read
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// A manifest or config file could not be parsed
    #[error("failed to parse {}: {reason}", .path.display())]
    Parse {
        /// File path
        path: PathBuf,
        /// Parser or serializer failure description
        reason: String,
    },

    /// A manifest or config file extension is not recognized
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
