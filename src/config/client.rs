use super::{fill_zero, ApplyDefaults, Role};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Client process configuration
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ClientConfig {
    #[serde(default)]
    pub client: ClientSettings,
    #[serde(default)]
    pub server: ServerLink,
    #[serde(default)]
    pub audio: AudioSettings,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ClientSettings {
    pub api_bind_address: String,
    pub debug_enabled: bool,
    pub debug_log_path: String,
    pub debug_log_max_size_bytes: u64,
}

/// Connection to the transcription server
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct ServerLink {
    pub url: String,
    pub reconnect_delay_ms: u64,
    pub max_reconnect_delay_ms: u64,
    pub reconnect_backoff_multiplier: f64,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AudioSettings {
    pub sample_rate: u32,
    pub channels: u16,
    pub bits_per_sample: u16,
    pub chunk_duration_ms: u32,
    /// Capture device name, empty for the system default
    pub device_name: String,
}

// Default value functions
fn default_api_bind_address() -> String {
    "localhost:8081".to_string()
}
fn default_debug_log_path() -> String {
    "./debug.log".to_string()
}
const fn default_debug_log_max_size_bytes() -> u64 {
    8 * 1024 * 1024
}
fn default_server_url() -> String {
    "ws://localhost:8080".to_string()
}
const fn default_reconnect_delay_ms() -> u64 {
    1000
}
const fn default_max_reconnect_delay_ms() -> u64 {
    30_000
}
const fn default_reconnect_backoff_multiplier() -> f64 {
    2.0
}
const fn default_sample_rate() -> u32 {
    16000
}
const fn default_channels() -> u16 {
    1
}
const fn default_bits_per_sample() -> u16 {
    16
}
const fn default_chunk_duration_ms() -> u32 {
    150
}

impl ApplyDefaults for ClientSettings {
    fn apply_defaults(&mut self) {
        fill_zero(&mut self.api_bind_address, default_api_bind_address);
        fill_zero(&mut self.debug_log_path, default_debug_log_path);
        fill_zero(
            &mut self.debug_log_max_size_bytes,
            default_debug_log_max_size_bytes,
        );
    }
}

impl ApplyDefaults for ServerLink {
    fn apply_defaults(&mut self) {
        fill_zero(&mut self.url, default_server_url);
        fill_zero(&mut self.reconnect_delay_ms, default_reconnect_delay_ms);
        fill_zero(&mut self.max_reconnect_delay_ms, default_max_reconnect_delay_ms);
        fill_zero(
            &mut self.reconnect_backoff_multiplier,
            default_reconnect_backoff_multiplier,
        );
    }
}

impl ApplyDefaults for AudioSettings {
    fn apply_defaults(&mut self) {
        fill_zero(&mut self.sample_rate, default_sample_rate);
        fill_zero(&mut self.channels, default_channels);
        fill_zero(&mut self.bits_per_sample, default_bits_per_sample);
        fill_zero(&mut self.chunk_duration_ms, default_chunk_duration_ms);
    }
}

impl ApplyDefaults for ClientConfig {
    fn apply_defaults(&mut self) {
        self.client.apply_defaults();
        self.server.apply_defaults();
        self.audio.apply_defaults();
    }
}

impl ClientConfig {
    /// Load client config from a TOML file and fill unset fields with defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        super::load_document(path.as_ref())
    }

    /// Parse client config from an in-memory TOML document
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        super::parse_document(content, Path::new("<memory>"))
    }

    /// Load from `path`, else from the default location, else bootstrap defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::load_or_default(path, Role::Client)
    }
}

/// Bootstrap configuration used before any file has been read.
///
/// Same constants as the defaulting pass, with debug logging forced on.
impl Default for ClientConfig {
    fn default() -> Self {
        let mut config = Self {
            client: ClientSettings::default(),
            server: ServerLink::default(),
            audio: AudioSettings::default(),
        };
        config.apply_defaults();
        config.client.debug_enabled = true;
        config
    }
}

impl ServerLink {
    #[must_use]
    pub const fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    #[must_use]
    pub const fn max_reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.max_reconnect_delay_ms)
    }

    /// Delay before reconnect attempt `attempt` (0-based), capped at the max delay
    #[must_use]
    #[allow(
        clippy::cast_precision_loss,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss
    )]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let scaled =
            self.reconnect_delay_ms as f64 * self.reconnect_backoff_multiplier.powi(exponent);
        let capped = scaled.min(self.max_reconnect_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}

impl AudioSettings {
    #[must_use]
    pub fn chunk_duration(&self) -> Duration {
        Duration::from_millis(u64::from(self.chunk_duration_ms))
    }

    /// Interleaved samples in one chunk across all channels
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn samples_per_chunk(&self) -> usize {
        (u64::from(self.sample_rate) * u64::from(self.channels) * u64::from(self.chunk_duration_ms)
            / 1000) as usize
    }

    #[must_use]
    pub fn device(&self) -> Option<&str> {
        if self.device_name.is_empty() {
            None
        } else {
            Some(&self.device_name)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_gets_defaults() {
        let config = ClientConfig::load_str("").unwrap();
        assert_eq!(config.client.api_bind_address, "localhost:8081");
        assert_eq!(config.client.debug_log_path, "./debug.log");
        assert_eq!(config.client.debug_log_max_size_bytes, 8_388_608);
        assert!(!config.client.debug_enabled);
        assert_eq!(config.server.url, "ws://localhost:8080");
        assert_eq!(config.server.reconnect_delay_ms, 1000);
        assert_eq!(config.server.max_reconnect_delay_ms, 30_000);
        assert!((config.server.reconnect_backoff_multiplier - 2.0).abs() < f64::EPSILON);
        assert_eq!(config.audio.sample_rate, 16000);
        assert_eq!(config.audio.channels, 1);
        assert_eq!(config.audio.bits_per_sample, 16);
        assert_eq!(config.audio.chunk_duration_ms, 150);
        assert_eq!(config.audio.device_name, "");
    }

    #[test]
    fn test_bootstrap_matches_empty_document_except_debug() {
        let mut loaded = ClientConfig::load_str("").unwrap();
        let bootstrap = ClientConfig::default();
        assert!(bootstrap.client.debug_enabled);

        loaded.client.debug_enabled = true;
        assert_eq!(loaded, bootstrap);
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let link = ClientConfig::default().server;
        assert_eq!(link.backoff(0), Duration::from_millis(1000));
        assert_eq!(link.backoff(1), Duration::from_millis(2000));
        assert_eq!(link.backoff(3), Duration::from_millis(8000));
        assert_eq!(link.backoff(10), Duration::from_millis(30_000));
        assert_eq!(link.backoff(u32::MAX), link.max_reconnect_delay());
    }

    #[test]
    fn test_samples_per_chunk() {
        let audio = ClientConfig::default().audio;
        assert_eq!(audio.samples_per_chunk(), 2400);
        assert_eq!(audio.chunk_duration(), Duration::from_millis(150));
        assert_eq!(audio.device(), None);
    }
}
