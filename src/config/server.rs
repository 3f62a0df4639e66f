use super::{fill_zero, ApplyDefaults, Role};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Transcription server configuration
///
/// Only `server.bind_address` has a populated default. Every other field
/// stays at its zero value when the document leaves it out.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub webrtc: WebRtcSettings,
    #[serde(default)]
    pub transcription: TranscriptionSettings,
    #[serde(default)]
    pub noise_suppression: NoiseSuppressionSettings,
    #[serde(default)]
    pub vad: VadSettings,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub debug_enabled: bool,
    pub log_level: String,
    pub log_format: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct WebRtcSettings {
    pub ice_servers: Vec<IceServer>,
}

/// STUN/TURN server entry, kept exactly as written in the document
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct IceServer {
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<String>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct TranscriptionSettings {
    pub model_path: String,
    pub language: String,
    pub translate: bool,
    pub threads: u32,
    pub use_gpu: bool,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(default)]
pub struct NoiseSuppressionSettings {
    pub enabled: bool,
    pub model_path: String,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
#[serde(default)]
pub struct VadSettings {
    pub enabled: bool,
    pub energy_threshold: f64,
    pub silence_threshold_ms: u32,
    pub min_chunk_duration_ms: u32,
    pub max_chunk_duration_ms: u32,
}

fn default_bind_address() -> String {
    "localhost:8080".to_string()
}

impl ApplyDefaults for ServerSettings {
    fn apply_defaults(&mut self) {
        fill_zero(&mut self.bind_address, default_bind_address);
    }
}

impl ApplyDefaults for ServerConfig {
    fn apply_defaults(&mut self) {
        self.server.apply_defaults();
    }
}

impl ServerConfig {
    /// Load server config from a TOML file and fill unset fields with defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        super::load_document(path.as_ref())
    }

    /// Parse server config from an in-memory TOML document
    pub fn load_str(content: &str) -> Result<Self, ConfigError> {
        super::parse_document(content, Path::new("<memory>"))
    }

    /// Load from `path`, else from the default location, else bootstrap defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        super::load_or_default(path, Role::Server)
    }
}

/// Bootstrap configuration: defaulting constants plus debug logging
impl Default for ServerConfig {
    fn default() -> Self {
        let mut config = Self {
            server: ServerSettings::default(),
            webrtc: WebRtcSettings::default(),
            transcription: TranscriptionSettings::default(),
            noise_suppression: NoiseSuppressionSettings::default(),
            vad: VadSettings::default(),
        };
        config.apply_defaults();
        config.server.debug_enabled = true;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_bind_address_defaulted() {
        let config = ServerConfig::load_str("").unwrap();
        assert_eq!(config.server.bind_address, "localhost:8080");
        assert_eq!(config.server.log_level, "");
        assert_eq!(config.server.log_format, "");
        assert!(config.webrtc.ice_servers.is_empty());
        assert_eq!(config.transcription, TranscriptionSettings::default());
        assert_eq!(config.noise_suppression, NoiseSuppressionSettings::default());
        assert_eq!(config.vad, VadSettings::default());
    }

    #[test]
    fn test_bootstrap_forces_debug() {
        let bootstrap = ServerConfig::default();
        assert!(bootstrap.server.debug_enabled);

        let mut loaded = ServerConfig::load_str("").unwrap();
        loaded.server.debug_enabled = true;
        assert_eq!(loaded, bootstrap);
    }

    #[test]
    fn test_ice_servers_verbatim() {
        let config = ServerConfig::load_str(
            r#"
[[webrtc.ice_servers]]
urls = ["stun:b.example.org:3478", "stun:a.example.org:3478"]

[[webrtc.ice_servers]]
urls = ["turn:turn.example.org:3478?transport=udp"]
username = "alice"
credential = "s3cret"
"#,
        )
        .unwrap();

        let servers = &config.webrtc.ice_servers;
        assert_eq!(servers.len(), 2);
        assert_eq!(
            servers[0].urls,
            vec!["stun:b.example.org:3478", "stun:a.example.org:3478"]
        );
        assert_eq!(servers[0].username, None);
        assert_eq!(servers[0].credential, None);
        assert_eq!(servers[1].username.as_deref(), Some("alice"));
        assert_eq!(servers[1].credential.as_deref(), Some("s3cret"));
    }
}
