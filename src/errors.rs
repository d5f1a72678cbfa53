//! Error handling for the logging façade
//!
//! Severity methods on [`crate::Logger`] never return errors; these types
//! surface from the sink, the `Write` path, configuration and the `log`
//! facade installation.

use crate::level::Level;
use std::io;
use thiserror::Error;

/// Main error type for the logging crate
#[derive(Error, Debug)]
pub enum LoggingError {
    #[error("I/O operation failed: {operation} - {source}")]
    Io {
        operation: String,
        #[source]
        source: io::Error,
    },

    #[error("Serialization failed: {context}")]
    Serialization {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid log level: {value}")]
    InvalidLevel { value: String },

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("Mutex lock failed: {resource}")]
    MutexPoisoned { resource: String },

    #[error("Logger installation failed: {0}")]
    LoggerInstall(#[from] log::SetLoggerError),
}

/// Result alias used throughout the crate
pub type LoggingResult<T> = Result<T, LoggingError>;

impl LoggingError {
    /// Create an I/O error
    pub fn io(operation: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            operation: operation.into(),
            source,
        }
    }

    /// Create a serialization error
    pub fn serialization(context: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Serialization {
            context: context.into(),
            source,
        }
    }

    /// Create an invalid level error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        Self::InvalidLevel {
            value: value.into(),
        }
    }
}

impl From<figment::Error> for LoggingError {
    fn from(err: figment::Error) -> Self {
        LoggingError::Config(Box::new(err))
    }
}

/// Lets the `Write` implementation hand sink failures back to its caller.
impl From<LoggingError> for io::Error {
    fn from(err: LoggingError) -> Self {
        match err {
            LoggingError::Io { source, .. } => source,
            other => io::Error::new(io::ErrorKind::Other, other),
        }
    }
}

/// Panic payload raised by `fatal` and `err_fatal` after the event is written.
///
/// Callers cannot recover from a fatal event through a normal return; a test
/// harness can observe it with `std::panic::catch_unwind` and downcast the
/// payload to this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{level}: {message}")]
pub struct FatalError {
    pub level: Level,
    pub message: String,
}

/// Poison-safe mutex locking that reports a `LoggingError` instead of panicking
pub trait SafeLock<T: ?Sized> {
    fn safe_lock(&self) -> LoggingResult<std::sync::MutexGuard<'_, T>>;
}

impl<T: ?Sized> SafeLock<T> for std::sync::Mutex<T> {
    fn safe_lock(&self) -> LoggingResult<std::sync::MutexGuard<'_, T>> {
        self.lock().map_err(|_| LoggingError::MutexPoisoned {
            resource: "log_sink".to_string(),
        })
    }
}
