//! Library root for the `leveled_logging` crate
//!
//! A leveled logger writing one JSON object per line, plus adapters that let
//! an ORM, the `log` facade and tracing's fmt layer write through it.
//!
//! ```no_run
//! use leveled_logging::{log_info, Level, Logger};
//!
//! let logger = Logger::new(Level::Info, None);
//! log_info!(logger, "listening on {}", 8080);
//! // {"level":"info","message":"listening on 8080"}
//! ```

#[macro_use]
mod macros;

// Core error handling
pub mod errors;

// Severity and output
pub mod level;
pub mod log_sink;

// Logger and adapters
pub mod log_bridge;
pub mod logger;
pub mod orm;

// Configuration
pub mod config;

pub use config::{LogConfig, LogOutput};
pub use errors::{FatalError, LoggingError, LoggingResult};
pub use level::Level;
pub use log_sink::{JsonSink, LogEvent, MemoryWriter};
pub use logger::Logger;
pub use orm::{OrmLog, OrmLogLevel, OrmLogger, UNKNOWN_ROWS};
