//! ORM logging adapter
//!
//! Query layers tend to define their own logger contract: a mode switch, three
//! message levels and a timed `trace` hook fed with the query text and the
//! affected row count. [`OrmLog`] is that contract; [`OrmLogger`] implements it
//! over a borrowed [`Logger`] so the query layer never sees the concrete type.

use crate::level::Level;
use crate::logger::Logger;
use std::error::Error;
use std::fmt;
use std::panic::Location;
use std::time::Instant;

/// Row count reported when the statement has no meaningful count.
pub const UNKNOWN_ROWS: i64 = -1;

/// Verbosity levels understood by the ORM side of the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum OrmLogLevel {
    Silent,
    Error,
    Warn,
    Info,
}

/// Logger contract consumed by the ORM.
pub trait OrmLog {
    /// Requested verbosity change. Implementations may ignore it.
    fn log_mode(&self, level: OrmLogLevel) -> &dyn OrmLog;

    fn info(&self, message: fmt::Arguments<'_>);

    fn warn(&self, message: fmt::Arguments<'_>);

    fn error(&self, message: fmt::Arguments<'_>);

    /// Called after each statement. `fc` yields the SQL text and the affected
    /// row count, or [`UNKNOWN_ROWS`].
    #[track_caller]
    fn trace(
        &self,
        begin: Instant,
        fc: &dyn Fn() -> (String, i64),
        err: Option<&dyn Error>,
    );
}

/// Adapter from [`OrmLog`] to a [`Logger`].
#[derive(Debug, Clone, Copy)]
pub struct OrmLogger<'a> {
    log: &'a Logger,
}

impl<'a> OrmLogger<'a> {
    pub fn new(log: &'a Logger) -> Self {
        Self { log }
    }

    pub fn logger(&self) -> &'a Logger {
        self.log
    }
}

impl OrmLog for OrmLogger<'_> {
    fn log_mode(&self, _level: OrmLogLevel) -> &dyn OrmLog {
        // the threshold is fixed on the logger
        self
    }

    fn info(&self, message: fmt::Arguments<'_>) {
        if self.log.level() <= Level::Info {
            self.log.info(message);
        }
    }

    fn warn(&self, message: fmt::Arguments<'_>) {
        if self.log.level() <= Level::Warn {
            self.log.warn(message);
        }
    }

    fn error(&self, message: fmt::Arguments<'_>) {
        if self.log.level() <= Level::Error {
            self.log.error(message);
        }
    }

    #[track_caller]
    fn trace(
        &self,
        begin: Instant,
        fc: &dyn Fn() -> (String, i64),
        err: Option<&dyn Error>,
    ) {
        if let Some(err) = err {
            self.log.err_error(err);
            return;
        }

        if self.log.level() <= Level::Debug {
            let elapsed_ms = begin.elapsed().as_nanos() as f64 / 1e6;
            let (sql, rows) = fc();
            self.log.debug(format_args!(
                "{}\n[{:.3}ms] [rows:{}] {}",
                Location::caller(),
                elapsed_ms,
                RowCount(rows),
                sql
            ));
        }
    }
}

/// Renders [`UNKNOWN_ROWS`] as `-`.
struct RowCount(i64);

impl fmt::Display for RowCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == UNKNOWN_ROWS {
            f.write_str("-")
        } else {
            write!(f, "{}", self.0)
        }
    }
}
