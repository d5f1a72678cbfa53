use leveled_logging::{FatalError, Level, Logger, MemoryWriter};
use serde_json::Value;
use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};

fn fresh(level: Level) -> (Logger, MemoryWriter) {
    let capture = MemoryWriter::new();
    (Logger::new(level, capture.sink()), capture)
}

fn keys(line: &str) -> Vec<String> {
    let value: Value = serde_json::from_str(line).expect("line is valid JSON");
    value
        .as_object()
        .expect("line is a JSON object")
        .keys()
        .cloned()
        .collect()
}

/// Runs every severity method once; fatal calls are caught.
fn run_logs(logger: &Logger) {
    let payload = catch_unwind(AssertUnwindSafe(|| logger.fatal("fatal"))).unwrap_err();
    assert!(payload.downcast_ref::<FatalError>().is_some());
    let err = io::Error::new(io::ErrorKind::Other, "fatal");
    assert!(catch_unwind(AssertUnwindSafe(|| logger.err_fatal(&err))).is_err());

    logger.error("error");
    logger.err_error(&io::Error::new(io::ErrorKind::Other, "error"));
    logger.warn("warn");
    logger.err_warn(&io::Error::new(io::ErrorKind::Other, "warn"));
    logger.info("info");
    logger.err_info(&io::Error::new(io::ErrorKind::Other, "info"));
    logger.debug("debug");
    logger.err_debug(&io::Error::new(io::ErrorKind::Other, "debug"));
}

#[test]
fn threshold_gates_every_severity() {
    let expected = [
        (Level::Debug, 10),
        (Level::Info, 8),
        (Level::Warn, 6),
        (Level::Error, 4),
        (Level::Fatal, 2),
    ];

    for (level, count) in expected {
        let (logger, capture) = fresh(level);
        run_logs(&logger);
        assert_eq!(capture.lines().len(), count, "threshold {level}");

        for event in capture.events().unwrap() {
            assert!(event.level == Level::Fatal || event.level.meets_threshold(level));
        }
    }
}

#[test]
fn message_lines_have_level_and_message() {
    let (logger, capture) = fresh(Level::Debug);
    logger.debug("debug");
    logger.info("info");
    logger.warn("warn");
    logger.error("error");

    let lines = capture.lines();
    assert_eq!(lines[0], r#"{"level":"debug","message":"debug"}"#);
    assert_eq!(lines[1], r#"{"level":"info","message":"info"}"#);
    assert_eq!(lines[2], r#"{"level":"warn","message":"warn"}"#);
    assert_eq!(lines[3], r#"{"level":"error","message":"error"}"#);
    for line in &lines {
        assert_eq!(keys(line), vec!["level", "message"]);
    }
}

#[test]
fn error_lines_duplicate_error_text() {
    let (logger, capture) = fresh(Level::Debug);
    logger.err_debug(&anyhow::anyhow!("debug"));
    logger.info("info");

    let lines = capture.lines();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0], r#"{"level":"debug","error":"debug","message":"debug"}"#);
    assert_eq!(lines[1], r#"{"level":"info","message":"info"}"#);

    for value in ["info", "warn", "error"] {
        let (logger, capture) = fresh(Level::Debug);
        let err = io::Error::new(io::ErrorKind::Other, value);
        match value {
            "info" => logger.err_info(&err),
            "warn" => logger.err_warn(&err),
            _ => logger.err_error(&err),
        }
        let event = &capture.events().unwrap()[0];
        assert_eq!(event.level.as_str(), value);
        assert_eq!(event.error.as_deref(), Some(value));
        assert_eq!(event.message, value);

        assert_eq!(keys(&capture.lines()[0]), vec!["level", "error", "message"]);
    }
}

#[test]
fn warn_threshold_drops_lower_levels() {
    let (logger, capture) = fresh(Level::Warn);
    logger.debug("x");
    logger.info("x");
    assert!(capture.lines().is_empty());

    logger.warn("x");
    assert_eq!(capture.lines().len(), 1);
}

#[test]
fn fatal_writes_before_panicking() {
    let (logger, capture) = fresh(Level::Fatal);

    let payload = catch_unwind(AssertUnwindSafe(|| logger.fatal(format_args!("code {}", 7))))
        .unwrap_err();
    let fatal = payload.downcast_ref::<FatalError>().unwrap();
    assert_eq!(fatal.message, "code 7");
    assert_eq!(capture.lines(), vec![r#"{"level":"fatal","message":"code 7"}"#]);

    let err = io::Error::new(io::ErrorKind::Other, "disk gone");
    assert!(catch_unwind(AssertUnwindSafe(|| logger.err_fatal(&err))).is_err());
    assert_eq!(
        capture.lines()[1],
        r#"{"level":"fatal","error":"disk gone","message":"disk gone"}"#
    );
}

#[test]
fn write_emits_info_regardless_of_threshold() {
    let (mut logger, capture) = fresh(Level::Error);

    let written = logger.write(b"write-test").unwrap();
    assert_eq!(written, 10);

    let lines = capture.lines();
    assert_eq!(lines, vec![r#"{"level":"info","message":"write-test"}"#]);
}

#[test]
fn formatted_messages_are_substituted() {
    let (logger, capture) = fresh(Level::Info);
    logger.info(format_args!("{} rows in {:.1}s", 12, 0.26));
    assert_eq!(capture.events().unwrap()[0].message, "12 rows in 0.3s");
}

#[test]
fn clones_share_the_sink() {
    let (logger, capture) = fresh(Level::Info);
    let clone = logger.clone();
    logger.info("one");
    clone.info("two");
    assert_eq!(capture.lines().len(), 2);
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn sink_failures_surface_only_through_write() {
    let mut logger = Logger::new(Level::Debug, Some(Box::new(FailingWriter)));

    // severity methods swallow the failure
    logger.info("lost");
    logger.err_error(&io::Error::new(io::ErrorKind::Other, "lost"));

    let err = logger.write(b"lost").unwrap_err();
    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn logger_is_shareable_across_threads() {
    let (logger, capture) = fresh(Level::Info);

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let logger = &logger;
            scope.spawn(move || {
                for i in 0..25 {
                    logger.info(format_args!("worker {worker} line {i}"));
                }
            });
        }
    });

    let events = capture.events().unwrap();
    assert_eq!(events.len(), 100);
}

#[test]
fn timestamped_lines_keep_field_order() {
    let capture = MemoryWriter::new();
    let logger = Logger::new(Level::Debug, capture.sink()).with_timestamps(true);

    logger.info("plain");
    logger.err_warn(&io::Error::new(io::ErrorKind::Other, "broken"));

    let lines = capture.lines();
    assert_eq!(keys(&lines[0]), vec!["level", "message", "time"]);
    assert_eq!(keys(&lines[1]), vec!["level", "error", "message", "time"]);
}
