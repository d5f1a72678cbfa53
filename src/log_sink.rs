// log_sink.rs
// Purpose: Serialize log events as single JSON lines onto a shared output stream

use crate::errors::{LoggingError, LoggingResult, SafeLock};
use crate::level::Level;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// LogEvent is the structured record written for every emitted call.
///
/// Field declaration order is the wire order: `level`, `error`, `message`, `time`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEvent {
    pub level: Level,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

impl LogEvent {
    pub fn new(level: Level, message: impl Into<String>) -> Self {
        Self {
            level,
            error: None,
            message: message.into(),
            time: None,
        }
    }

    /// Event for an error value; its text fills both `error` and `message`.
    pub fn from_error(level: Level, err: impl Into<String>) -> Self {
        let text = err.into();
        Self {
            level,
            error: Some(text.clone()),
            message: text,
            time: None,
        }
    }

    /// Stamps the event with the current UTC time.
    pub fn with_time(mut self, time: DateTime<Utc>) -> Self {
        self.time = Some(time);
        self
    }

    /// Compact JSON followed by a newline.
    pub fn to_line(&self) -> LoggingResult<Vec<u8>> {
        let mut line = serde_json::to_vec(self)
            .map_err(|e| LoggingError::serialization("log_event", e))?;
        line.push(b'\n');
        Ok(line)
    }
}

/// JsonSink owns the output stream and writes one line per event.
pub struct JsonSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonSink {
    pub fn new(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Write the event as one line. The line is handed to the stream in a
    /// single `write_all` and flushed before the lock is released.
    pub fn write_event(&self, event: &LogEvent) -> LoggingResult<()> {
        let line = event.to_line()?;
        let mut writer = self.lock();
        writer
            .write_all(&line)
            .map_err(|e| LoggingError::io("write_event", e))?;
        writer.flush().map_err(|e| LoggingError::io("flush", e))
    }

    pub fn flush(&self) -> LoggingResult<()> {
        self.lock()
            .flush()
            .map_err(|e| LoggingError::io("flush", e))
    }

    /// A writer that panicked mid-line leaves the mutex poisoned; later
    /// events still go out, including fatal ones.
    fn lock(&self) -> MutexGuard<'_, Box<dyn Write + Send>> {
        self.writer.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for JsonSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonSink").finish_non_exhaustive()
    }
}

/// In-memory writer for capturing output, mostly in tests.
///
/// Clones share the same buffer, so one clone can be handed to a logger while
/// another reads back what was written.
#[derive(Clone, Default)]
pub struct MemoryWriter {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Boxed clone ready to pass as a logger sink.
    pub fn sink(&self) -> Option<Box<dyn Write + Send>> {
        Some(Box::new(self.clone()))
    }

    pub fn contents(&self) -> String {
        match self.buffer.lock() {
            Ok(buffer) => String::from_utf8_lossy(&buffer).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }

    pub fn lines(&self) -> Vec<String> {
        self.contents().lines().map(str::to_string).collect()
    }

    /// Every captured line parsed back into a `LogEvent`.
    pub fn events(&self) -> LoggingResult<Vec<LogEvent>> {
        self.lines()
            .iter()
            .map(|line| {
                serde_json::from_str(line).map_err(|e| LoggingError::serialization("parse_line", e))
            })
            .collect()
    }

    pub fn clear(&self) {
        if let Ok(mut buffer) = self.buffer.lock() {
            buffer.clear();
        }
    }
}

impl Write for MemoryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .safe_lock()
            .map_err(io::Error::from)?
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
