//! Scanner limits, configurable through the environment.
//!
//! # Environment Variable
//!
//! `SCAN_STATE_CAPACITY` sets the snapshot buffer size in bytes. Hosts built
//! against a parser runtime with a different buffer size set it to match.
//! Unset, unparsable or zero values fall back to
//! [`SERIALIZATION_BUFFER_SIZE`].
//!
//! Example: `SCAN_STATE_CAPACITY=4096 cargo test`

use std::sync::OnceLock;

use crate::SERIALIZATION_BUFFER_SIZE;

/// Environment variable read by [`ScanConfig::from_env()`].
pub const STATE_CAPACITY_ENV: &str = "SCAN_STATE_CAPACITY";

/// Limits shared by every scanner instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScanConfig {
    /// Size of the snapshot buffer; saves that do not fit report zero bytes.
    pub state_capacity: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        ScanConfig {
            state_capacity: SERIALIZATION_BUFFER_SIZE,
        }
    }
}

impl ScanConfig {
    /// Read the configuration from the environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = ScanConfig::default();
        if let Some(raw) = lookup(STATE_CAPACITY_ENV) {
            match raw.trim().parse::<usize>() {
                Ok(capacity) if capacity > 0 => config.state_capacity = capacity,
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {STATE_CAPACITY_ENV}, using {SERIALIZATION_BUFFER_SIZE}"
                ),
            }
        }
        config
    }

    /// Process-wide configuration, read from the environment on first use.
    pub fn global() -> ScanConfig {
        static GLOBAL: OnceLock<ScanConfig> = OnceLock::new();
        *GLOBAL.get_or_init(ScanConfig::from_env)
    }
}
