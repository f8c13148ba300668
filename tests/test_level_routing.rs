use chrono::Local;
use rotolog::{error, fatal, info, trace, warn, FatalAction, Logger, Severity, Stream};
use std::path::PathBuf;
use std::sync::Arc;

fn define_log_path(discriminant: &str) -> PathBuf {
    let mut path = PathBuf::from("log_files/routing");
    path.push(format!(
        "{}-{}.log",
        discriminant,
        Local::now().format("%Y-%m-%d_%H-%M-%S%.6f")
    ));
    path
}

#[test]
fn routing_matrix() {
    let all = [
        Severity::Trace,
        Severity::Info,
        Severity::Warn,
        Severity::Error,
        Severity::Fatal,
    ];
    for &min in &all {
        let logger = Logger::with(min).try_build().unwrap();
        for &severity in &all[..4] {
            let destination = logger.destination(severity);
            if severity >= min {
                assert_eq!(
                    destination.console_stream(),
                    Some(expected_stream(severity)),
                    "severity {} under minimum {}",
                    severity,
                    min
                );
            } else {
                assert!(
                    destination.is_discard(),
                    "severity {} must be discarded under minimum {}",
                    severity,
                    min
                );
            }
            // console-only configuration: nothing reaches a file
            assert!(!destination.writes_to_file());
        }
        // Fatal is exempt from the minimum
        assert_eq!(
            logger.destination(Severity::Fatal).console_stream(),
            Some(Stream::StdErr),
            "Fatal must stay observable under minimum {}",
            min
        );
    }
}

fn expected_stream(severity: Severity) -> Stream {
    match severity {
        Severity::Trace | Severity::Info | Severity::Warn => Stream::StdOut,
        Severity::Error | Severity::Fatal => Stream::StdErr,
    }
}

#[test]
fn console_only_configuration_creates_no_file() {
    let logger = Logger::with(Severity::Info).try_build().unwrap();
    assert!(logger.log_file_path().is_none());
    info!(logger, "this goes to stdout only");
    trace!(logger, "this goes nowhere");
    logger.stop().unwrap();
    logger.stop().unwrap();
}

#[test]
fn empty_path_disables_file_output() {
    let logger = Logger::with(Severity::Info)
        .log_to_file("")
        .try_build()
        .unwrap();
    assert!(logger.log_file_path().is_none());
}

#[test]
fn file_receives_exactly_the_enabled_severities() {
    let path = define_log_path("enabled-set");
    let logger = Logger::with(Severity::Warn)
        .log_to_file(&path)
        .fatal_action(FatalAction::Handler(Arc::new(|| {})))
        .try_build()
        .unwrap();

    trace!(logger, "trace must not reach the file");
    info!(logger, "info must not reach the file");
    warn!(logger, "a warning line");
    error!(logger, "an error line");
    fatal!(logger, "a fatal line");
    logger.stop().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("must not reach the file"), "got {:?}", text);
    assert!(!text.contains("T: "), "got {:?}", text);
    assert!(!text.contains("I: "), "got {:?}", text);
    assert!(text.contains("W: "), "got {:?}", text);
    assert!(text.contains("a warning line"), "got {:?}", text);
    assert!(text.contains("E: "), "got {:?}", text);
    assert!(text.contains("an error line"), "got {:?}", text);
    assert!(text.contains("F: "), "got {:?}", text);
    assert!(text.contains("a fatal line"), "got {:?}", text);
    assert_eq!(text.lines().count(), 3);
}

#[test]
fn logging_after_stop_skips_the_file_leg() {
    let path = define_log_path("stopped");
    let logger = Logger::with(Severity::Info)
        .log_to_file(&path)
        .try_build()
        .unwrap();

    info!(logger, "before the stop");
    logger.stop().unwrap();
    info!(logger, "after the stop");

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("before the stop"), "got {:?}", text);
    assert!(!text.contains("after the stop"), "got {:?}", text);
    assert_eq!(text.lines().count(), 1);
}

#[test]
fn fatal_reaches_the_file_under_the_strictest_minimum() {
    let path = define_log_path("strict-minimum");
    let logger = Logger::with(Severity::Fatal)
        .log_to_file(&path)
        .fatal_action(FatalAction::Handler(Arc::new(|| {})))
        .try_build()
        .unwrap();

    error!(logger, "filtered out");
    fatal!(logger, "still observable");
    logger.stop().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(!text.contains("filtered out"), "got {:?}", text);
    assert!(text.contains("F: "), "got {:?}", text);
    assert!(text.contains("still observable"), "got {:?}", text);
}
