//! Logging utilities
//!
//! Thin wrapper over `env_logger`. The engine logs through the `log` facade
//! only; hosts that already install their own logger should skip [`init`].

pub use log::{debug, error, info, trace, warn};

/// Initialize the logging system
///
/// Respects `RUST_LOG` when set and defaults to `info` otherwise, so audio
/// device and bank loading messages show up out of the box.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}
