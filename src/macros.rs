// Formatting shims over the Logger severity methods.
// Arguments are only rendered when the level passes the logger's threshold.

#[macro_export]
macro_rules! log_debug {
    ($logger:expr, $($arg:tt)*) => {{
        ($logger).debug(format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! log_info {
    ($logger:expr, $($arg:tt)*) => {{
        ($logger).info(format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! log_warn {
    ($logger:expr, $($arg:tt)*) => {{
        ($logger).warn(format_args!($($arg)*));
    }}
}

#[macro_export]
macro_rules! log_error {
    ($logger:expr, $($arg:tt)*) => {{
        ($logger).error(format_args!($($arg)*));
    }}
}

/// Diverges: the logger writes the event and panics with a `FatalError`.
#[macro_export]
macro_rules! log_fatal {
    ($logger:expr, $($arg:tt)*) => {
        ($logger).fatal(format_args!($($arg)*))
    }
}
