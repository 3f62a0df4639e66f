//! `tracing` subscriber setup for crate diagnostics
//!
//! The filter comes from `RUST_LOG` when set, then the server's `log_level`,
//! then `info`. `log_format = "json"` switches to JSON lines. Output goes to
//! stderr.

use crate::config::ServerSettings;
use crate::error::{Result, VoxError};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "info";

/// Filter directive to use for a configured level and `RUST_LOG` value
#[must_use]
pub fn filter_directive(log_level: &str, rust_log: Option<&str>) -> String {
    match rust_log.map(str::trim) {
        Some(env) if !env.is_empty() => env.to_string(),
        _ if !log_level.trim().is_empty() => log_level.trim().to_lowercase(),
        _ => DEFAULT_DIRECTIVE.to_string(),
    }
}

/// Whether a `log_format` value asks for JSON lines
#[must_use]
pub fn wants_json(log_format: &str) -> bool {
    log_format.trim().eq_ignore_ascii_case("json")
}

/// Install the global `tracing` subscriber from server settings
pub fn init_for_server(settings: &ServerSettings) -> Result<()> {
    init(&settings.log_level, &settings.log_format)
}

/// Install the global `tracing` subscriber
///
/// Fails if a subscriber is already installed or the directive is invalid.
pub fn init(log_level: &str, log_format: &str) -> Result<()> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let directive = filter_directive(log_level, rust_log.as_deref());
    let filter = EnvFilter::try_new(&directive)
        .map_err(|e| VoxError::Telemetry(format!("Invalid log filter '{directive}': {e}")))?;

    // Diagnostics go to stderr so stdout stays free for command output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    let installed = if wants_json(log_format) {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    installed.map_err(|e| VoxError::Telemetry(e.to_string()))
}
