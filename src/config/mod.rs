//! Configuration module for voxbridge
//!
//! Each process role (client, server) has its own TOML document shape. Loading
//! reads the whole file, deserializes it with unknown keys ignored, then runs a
//! defaulting pass that replaces every zero-valued scalar with its documented
//! default. List fields are taken verbatim.
//!
//! When no file is given, [`ClientConfig::load_or_default`] and
//! [`ServerConfig::load_or_default`] look in
//! `$XDG_CONFIG_HOME/voxbridge/<role>.toml` and fall back to the bootstrap
//! defaults (debug enabled) if nothing is there.
//!
//! # Example
//!
//! ```no_run
//! use voxbridge::config::ClientConfig;
//!
//! let config = ClientConfig::load("client.toml").expect("Failed to load config");
//! println!("Server: {}", config.server.url);
//! println!("Sample rate: {}", config.audio.sample_rate);
//! ```

pub mod client;
pub mod server;

pub use client::{AudioSettings, ClientConfig, ClientSettings, ServerLink};
pub use server::{
    IceServer, NoiseSuppressionSettings, ServerConfig, ServerSettings, TranscriptionSettings,
    VadSettings, WebRtcSettings,
};

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// Post-deserialization pass filling zero-valued fields with their defaults
pub trait ApplyDefaults {
    fn apply_defaults(&mut self);
}

/// Process role a configuration document belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Client,
    Server,
}

impl Role {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Server => "server",
        }
    }
}

/// Default config location for a role: `<config dir>/voxbridge/<role>.toml`
#[must_use]
pub fn default_path(role: Role) -> Option<PathBuf> {
    dirs::config_dir().map(|dir| {
        dir.join("voxbridge")
            .join(format!("{}.toml", role.as_str()))
    })
}

/// Replace `value` with `default()` when it still holds its type's zero value
pub(crate) fn fill_zero<T: PartialEq + Default>(value: &mut T, default: impl FnOnce() -> T) {
    if *value == T::default() {
        *value = default();
    }
}

pub(crate) fn load_document<T>(path: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + ApplyDefaults,
{
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let config = parse_document(&content, path)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

pub(crate) fn parse_document<T>(content: &str, origin: &Path) -> Result<T, ConfigError>
where
    T: DeserializeOwned + ApplyDefaults,
{
    // Unknown keys are skipped by serde, missing ones come back zeroed
    let mut config: T = toml::from_str(content).map_err(|source| ConfigError::Parse {
        path: origin.to_path_buf(),
        source,
    })?;
    config.apply_defaults();
    Ok(config)
}

pub(crate) fn load_or_default<T>(path: Option<&Path>, role: Role) -> Result<T, ConfigError>
where
    T: DeserializeOwned + ApplyDefaults + Default,
{
    // Explicit path: a missing file is an error
    if let Some(path) = path {
        return load_document(path);
    }

    // Otherwise the per-user file is optional
    match default_path(role) {
        Some(path) if path.exists() => load_document(&path),
        _ => {
            tracing::debug!("No {} config found, using bootstrap defaults", role.as_str());
            Ok(T::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_zero_replaces_only_zero() {
        let mut empty = String::new();
        fill_zero(&mut empty, || "fallback".to_string());
        assert_eq!(empty, "fallback");

        let mut set = "kept".to_string();
        fill_zero(&mut set, || "fallback".to_string());
        assert_eq!(set, "kept");

        let mut zero = 0.0_f64;
        fill_zero(&mut zero, || 2.0);
        assert!((zero - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_default_path_layout() {
        if let Some(path) = default_path(Role::Server) {
            assert!(path.ends_with("voxbridge/server.toml"));
        }
    }

    #[test]
    fn test_parse_error_keeps_origin() {
        let result: Result<ClientConfig, _> =
            parse_document("[client\n", Path::new("inline.toml"));
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), Path::new("inline.toml"));
    }
}
