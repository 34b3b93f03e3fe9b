//! Runtime-configurable tuning parameters for muster.
//!
//! All values have sensible defaults. Override via environment variables
//! (prefixed `MUSTER_`) or by constructing a custom `MusterConfig`.

use std::time::Duration;

/// Tuning parameters for collective operations and transport.
#[derive(Debug, Clone)]
pub struct MusterConfig {
    /// Timeout for individual send/recv operations within collectives.
    pub collective_timeout: Duration,

    /// Depth of the per-tag frame queue on the receive side.
    pub channel_capacity: usize,

    /// Maximum accepted frame size on the TCP transport. Oversized frames
    /// close the connection.
    pub max_frame_bytes: usize,
}

impl Default for MusterConfig {
    fn default() -> Self {
        Self {
            collective_timeout: Duration::from_secs(30),
            channel_capacity: 64,
            max_frame_bytes: 4 * 1024 * 1024 * 1024, // 4 GiB
        }
    }
}

impl MusterConfig {
    /// Load config from environment variables, falling back to defaults.
    ///
    /// Recognized variables:
    /// - `MUSTER_COLLECTIVE_TIMEOUT_SECS`
    /// - `MUSTER_CHANNEL_CAPACITY`
    /// - `MUSTER_MAX_FRAME_BYTES`
    pub fn from_env() -> Self {
        let mut cfg = Self::default();

        if let Ok(v) = std::env::var("MUSTER_COLLECTIVE_TIMEOUT_SECS") {
            if let Ok(s) = v.parse::<u64>() {
                cfg.collective_timeout = Duration::from_secs(s);
            }
        }
        if let Ok(v) = std::env::var("MUSTER_CHANNEL_CAPACITY") {
            if let Ok(n) = v.parse::<usize>() {
                cfg.channel_capacity = n.max(1);
            }
        }
        if let Ok(v) = std::env::var("MUSTER_MAX_FRAME_BYTES") {
            if let Ok(n) = v.parse::<usize>() {
                cfg.max_frame_bytes = n;
            }
        }

        cfg
    }
}
