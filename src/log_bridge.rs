// log_bridge.rs
// Purpose: Route records from the `log` facade and tracing's fmt layer into a Logger

use crate::errors::LoggingResult;
use crate::level::Level;
use crate::log_sink::LogEvent;
use crate::logger::Logger;
use log::{Metadata, Record};
use tracing_subscriber::fmt::MakeWriter;

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        Logger::enabled(self, Level::from(metadata.level()))
    }

    fn log(&self, record: &Record) {
        if log::Log::enabled(self, record.metadata()) {
            let event = LogEvent::new(Level::from(record.level()), record.args().to_string());
            let _ = self.write_event(event);
        }
    }

    fn flush(&self) {
        let _ = self.flush_sink();
    }
}

impl Logger {
    /// Register this logger as the process-wide `log` backend.
    ///
    /// Fails if another backend was installed first.
    pub fn install(self) -> LoggingResult<()> {
        let filter = self.level().to_level_filter();
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(filter);
        Ok(())
    }
}

/// tracing-subscriber writer: every formatted event becomes one info line.
impl<'a> MakeWriter<'a> for Logger {
    type Writer = &'a Logger;

    fn make_writer(&'a self) -> Self::Writer {
        self
    }
}
