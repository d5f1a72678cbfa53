//! The leveled logger.
//!
//! A [`Logger`] pairs an immutable threshold with a [`JsonSink`]. Every
//! severity method compares its own level against the threshold and, when it
//! passes, writes exactly one JSON line. Fatal events are never filtered and
//! end the current call path with a [`FatalError`] panic.

use crate::errors::FatalError;
use crate::level::Level;
use crate::log_sink::{JsonSink, LogEvent};
use crate::orm::OrmLogger;
use chrono::Utc;
use std::fmt;
use std::io::{self, Write};
use std::sync::Arc;

/// Leveled JSON logger. Clones share the same sink.
#[derive(Clone)]
pub struct Logger {
    level: Level,
    sink: Arc<JsonSink>,
    timestamps: bool,
}

impl Logger {
    /// Create a logger that emits events at `level` and above.
    ///
    /// Writes to stdout when `sink` is `None`.
    pub fn new(level: Level, sink: Option<Box<dyn Write + Send>>) -> Self {
        let sink = match sink {
            Some(writer) => JsonSink::new(writer),
            None => JsonSink::stdout(),
        };

        Self {
            level,
            sink: Arc::new(sink),
            timestamps: false,
        }
    }

    /// Add an RFC 3339 `time` field to every event from this logger.
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.timestamps = enabled;
        self
    }

    /// The configured threshold.
    pub fn level(&self) -> Level {
        self.level
    }

    pub fn timestamps(&self) -> bool {
        self.timestamps
    }

    /// True when an event at `level` would be written.
    pub fn enabled(&self, level: Level) -> bool {
        level == Level::Fatal || level.meets_threshold(self.level)
    }

    pub fn debug(&self, message: impl fmt::Display) {
        self.log(Level::Debug, message);
    }

    pub fn err_debug<E: fmt::Display + ?Sized>(&self, err: &E) {
        self.log_error(Level::Debug, err);
    }

    pub fn info(&self, message: impl fmt::Display) {
        self.log(Level::Info, message);
    }

    pub fn err_info<E: fmt::Display + ?Sized>(&self, err: &E) {
        self.log_error(Level::Info, err);
    }

    pub fn warn(&self, message: impl fmt::Display) {
        self.log(Level::Warn, message);
    }

    pub fn err_warn<E: fmt::Display + ?Sized>(&self, err: &E) {
        self.log_error(Level::Warn, err);
    }

    pub fn error(&self, message: impl fmt::Display) {
        self.log(Level::Error, message);
    }

    pub fn err_error<E: fmt::Display + ?Sized>(&self, err: &E) {
        self.log_error(Level::Error, err);
    }

    /// Log at fatal level, then panic with a [`FatalError`] payload.
    ///
    /// The event is written whatever the threshold is.
    pub fn fatal(&self, message: impl fmt::Display) -> ! {
        let message = message.to_string();
        self.emit(LogEvent::new(Level::Fatal, message.clone()));
        std::panic::panic_any(FatalError {
            level: Level::Fatal,
            message,
        })
    }

    /// Log an error at fatal level, then panic with a [`FatalError`] payload.
    pub fn err_fatal<E: fmt::Display + ?Sized>(&self, err: &E) -> ! {
        let message = err.to_string();
        self.emit(LogEvent::from_error(Level::Fatal, message.clone()));
        std::panic::panic_any(FatalError {
            level: Level::Fatal,
            message,
        })
    }

    /// Log `message` at `level`, honoring the threshold.
    ///
    /// `Level::Fatal` behaves like [`Logger::fatal`]: the event is written and
    /// the call panics with a [`FatalError`].
    pub fn log(&self, level: Level, message: impl fmt::Display) {
        if level == Level::Fatal {
            self.fatal(message);
        }
        if self.enabled(level) {
            self.emit(LogEvent::new(level, message.to_string()));
        }
    }

    fn log_error<E: fmt::Display + ?Sized>(&self, level: Level, err: &E) {
        if self.enabled(level) {
            self.emit(LogEvent::from_error(level, err.to_string()));
        }
    }

    /// Severity methods have no way to report a failed write, so the
    /// result is dropped here.
    fn emit(&self, event: LogEvent) {
        let _ = self.write_event(event);
    }

    pub(crate) fn write_event(&self, event: LogEvent) -> crate::errors::LoggingResult<()> {
        let event = if self.timestamps {
            event.with_time(Utc::now())
        } else {
            event
        };
        self.sink.write_event(&event)
    }

    pub(crate) fn flush_sink(&self) -> crate::errors::LoggingResult<()> {
        self.sink.flush()
    }

    /// Adapter that lets an ORM route its diagnostics through this logger.
    pub fn create_orm_adapter(&self) -> OrmLogger<'_> {
        OrmLogger::new(self)
    }

    /// Write a preformatted buffer as one info event, ignoring the threshold.
    fn write_raw(&self, buf: &[u8]) -> io::Result<usize> {
        let text = String::from_utf8_lossy(buf);
        let message = text
            .strip_suffix('\n')
            .map(|rest| rest.strip_suffix('\r').unwrap_or(rest))
            .unwrap_or(&*text);
        self.write_event(LogEvent::new(Level::Info, message))?;
        Ok(buf.len())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level)
            .field("timestamps", &self.timestamps)
            .finish_non_exhaustive()
    }
}

/// Each `write` call is one info-level event, written whatever the threshold.
///
/// The buffer is decoded as lossy UTF-8 and one trailing `\n` or `\r\n` is
/// stripped, so line-oriented writers do not leave a newline in `message`.
/// Everything else in the buffer is kept verbatim. Sink failures are returned.
impl Write for Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_raw(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_sink().map_err(io::Error::from)
    }
}

impl Write for &Logger {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_raw(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_sink().map_err(io::Error::from)
    }
}
