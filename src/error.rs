use std::path::PathBuf;
use thiserror::Error;

/// Main error type for voxbridge
#[derive(Error, Debug)]
pub enum VoxError {
    #[error("Config error: {0}\n\nTroubleshooting:\n- Check the config file path and its permissions\n- Validate the TOML syntax (sections: client/server/audio or server/webrtc/transcription/noise_suppression/vad)\n- Run with RUST_LOG=debug for more details")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Telemetry error: {0}")]
    Telemetry(String),
}

/// Configuration loading errors
///
/// Both variants carry the offending path and keep the underlying cause as
/// their `source()`.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    /// Path of the document that failed to load
    #[must_use]
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Io { path, .. } | Self::Parse { path, .. } => path,
        }
    }
}

pub type Result<T> = std::result::Result<T, VoxError>;
