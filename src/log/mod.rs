//! Leveled logger shared by the client and server processes
//!
//! A [`Logger`] owns the output sink and the debug flag. [`Logger::with`]
//! returns a [`ContextLogger`] that prefixes `[label] ` onto every message and
//! hands it to its parent, so chained wrappers nest outermost label first:
//!
//! ```
//! use voxbridge::log::{Emit, Logger};
//!
//! let logger = Logger::stdout(false);
//! let session = logger.with("session").with("42");
//! session.info(format_args!("connected"));      // ... [INFO] [session] [42] connected
//! voxbridge::log_debug!(session, "dropped {}", 3); // gated off by the base flag
//! ```
//!
//! Lines look like `2024/05/01 12:00:00.123456 [INFO] message`. Every line is
//! written and flushed while holding the sink lock.

pub mod context;
pub mod rotate;

pub use context::ContextLogger;
pub use rotate::RotatingFile;

use crate::config::ClientSettings;
use crate::error::Result;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S%.6f";

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Something log lines can be handed to
///
/// Implementors provide `emit` and `debug_enabled`; the severity operations
/// are shared.
pub trait Emit: Send + Sync {
    /// Write one message at `level`
    fn emit(&self, level: Level, args: fmt::Arguments<'_>);

    /// Whether debug messages reach the sink
    fn debug_enabled(&self) -> bool;

    fn info(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Info, args);
    }

    fn warn(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Warn, args);
    }

    fn error(&self, args: fmt::Arguments<'_>) {
        self.emit(Level::Error, args);
    }

    fn debug(&self, args: fmt::Arguments<'_>) {
        if self.debug_enabled() {
            self.emit(Level::Debug, args);
        }
    }

    /// Log at `[FATAL]` and terminate the process with status 1
    fn fatal(&self, args: fmt::Arguments<'_>) -> ! {
        self.emit(Level::Fatal, args);
        std::process::exit(1)
    }
}

struct Sink {
    debug: bool,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl Emit for Sink {
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        if level == Level::Debug && !self.debug {
            return;
        }

        let mut writer = self.writer.lock().unwrap_or_else(PoisonError::into_inner);
        let timestamp = chrono::Local::now().format(TIMESTAMP_FORMAT);
        let line = format!("{timestamp} [{level}] {args}\n");
        writer.write_all(line.as_bytes()).ok();
        writer.flush().ok();
    }

    fn debug_enabled(&self) -> bool {
        self.debug
    }
}

/// Base logger handle
///
/// Cloning shares the same sink and flag.
#[derive(Clone)]
pub struct Logger {
    sink: Arc<Sink>,
}

impl Logger {
    /// Log to any writer
    pub fn with_writer<W: Write + Send + 'static>(debug: bool, writer: W) -> Self {
        Self {
            sink: Arc::new(Sink {
                debug,
                writer: Mutex::new(Box::new(writer)),
            }),
        }
    }

    /// Log to standard output
    #[must_use]
    pub fn stdout(debug: bool) -> Self {
        Self::with_writer(debug, io::stdout())
    }

    /// Log to a size-capped file at `path`
    pub fn to_file(debug: bool, path: impl AsRef<Path>, max_size_bytes: u64) -> Result<Self> {
        let file = RotatingFile::open(path, max_size_bytes)?;
        Ok(Self::with_writer(debug, file))
    }

    /// Logger for the client process
    ///
    /// With debug enabled everything goes to the debug log file, otherwise to
    /// stdout.
    pub fn for_client(settings: &ClientSettings) -> Result<Self> {
        if settings.debug_enabled {
            Self::to_file(
                true,
                &settings.debug_log_path,
                settings.debug_log_max_size_bytes,
            )
        } else {
            Ok(Self::stdout(false))
        }
    }

    /// Wrap this logger with a `[label] ` prefix
    #[must_use]
    pub fn with(&self, label: impl Into<String>) -> ContextLogger {
        ContextLogger::new(self.sink.clone(), label)
    }
}

impl Emit for Logger {
    fn emit(&self, level: Level, args: fmt::Arguments<'_>) {
        self.sink.emit(level, args);
    }

    fn debug_enabled(&self) -> bool {
        self.sink.debug
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("debug", &self.sink.debug)
            .finish_non_exhaustive()
    }
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::log::Emit as _;
        $logger.info(format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::log::Emit as _;
        $logger.warn(format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::log::Emit as _;
        $logger.error(format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::log::Emit as _;
        $logger.debug(format_args!($($arg)+))
    }};
}

#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)+) => {{
        use $crate::log::Emit as _;
        $logger.fatal(format_args!($($arg)+))
    }};
}
