#![allow(clippy::multiple_crate_versions)]

pub mod config;
pub mod error;
pub mod log;
pub mod telemetry;

pub use config::{ClientConfig, ServerConfig};
pub use error::{ConfigError, Result, VoxError};
pub use log::{ContextLogger, Emit, Logger};
