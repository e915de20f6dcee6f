use super::*;
use log::{Level, Metadata, Record};
use serial_test::serial;
use std::fs;

#[test]
#[serial]
fn get_level_from_env_parses_cases() {
    let cases: &[(Option<&str>, Level)] = &[
        (None, Level::Warn),
        (Some("debug"), Level::Debug),
        (Some("DEBUG"), Level::Debug),
        (Some("info"), Level::Info),
        (Some("warn"), Level::Warn),
        (Some("error"), Level::Error),
        (Some("trace"), Level::Trace),
        (Some("garbage"), Level::Warn),
        (Some("off"), Level::Warn),
    ];

    for (value, expected) in cases {
        match value {
            Some(v) => unsafe { std::env::set_var(PROGRAM_LOG_LEVEL, v) },
            None => unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) },
        }

        let lvl = get_level_from_env();
        assert_eq!(
            lvl, *expected,
            "env {:?} should yield level {:?}, got {:?}",
            value, expected, lvl
        );
    }

    unsafe { std::env::remove_var(PROGRAM_LOG_LEVEL) };
}

#[test]
fn enabled_respects_level_threshold() {
    let levels = [
        Level::Error,
        Level::Warn,
        Level::Info,
        Level::Debug,
        Level::Trace,
    ];

    for logger_level in levels {
        let logger = Logger {
            level: logger_level,
            target: LogTarget::Stderr,
        };

        for record_level in levels {
            let meta = Metadata::builder()
                .level(record_level)
                .target("test_target")
                .build();

            let expected = record_level <= logger_level;
            assert_eq!(
                logger.enabled(&meta),
                expected,
                "logger level {:?}, record level {:?}",
                logger_level,
                record_level
            );
        }
    }
}

#[test]
#[serial]
fn target_defaults_to_stderr() {
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };
    assert!(matches!(get_target_from_env(), LogTarget::Stderr));

    unsafe { std::env::set_var(PROGRAM_LOG_FILE, "") };
    assert!(matches!(get_target_from_env(), LogTarget::Stderr));

    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };
}

#[test]
#[serial]
fn target_opens_file_from_env() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("jsonbatch.log");

    unsafe { std::env::set_var(PROGRAM_LOG_FILE, &path) };
    let target = get_target_from_env();
    unsafe { std::env::remove_var(PROGRAM_LOG_FILE) };

    assert!(matches!(target, LogTarget::File(_)));
    assert!(path.exists());
}

#[test]
fn file_logger_writes_filtered_lines() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("out.log");
    let file = File::create(&path).expect("create log file");

    let logger = Logger {
        level: Level::Info,
        target: LogTarget::File(Mutex::new(file)),
    };

    let cases = [
        (Level::Debug, "hidden"),
        (Level::Info, "sent batch 0"),
        (Level::Error, "sink failed"),
    ];

    for (lvl, msg) in &cases {
        let args = format_args!("{msg}");
        let record = Record::builder()
            .level(*lvl)
            .target("jsonbatch_sinks")
            .args(args)
            .build();
        logger.log(&record);
    }
    logger.flush();

    let written = fs::read_to_string(&path).expect("read log file");
    let lines: Vec<&str> = written.lines().collect();
    assert_eq!(lines.len(), 2, "log file: {written}");
    assert!(lines[0].ends_with("INFO [jsonbatch_sinks] sent batch 0"));
    assert!(lines[1].ends_with("ERROR [jsonbatch_sinks] sink failed"));
}

#[test]
fn stderr_logger_does_not_panic() {
    let logger = Logger {
        level: Level::Info,
        target: LogTarget::Stderr,
    };

    let args = format_args!("info");
    let record = Record::builder().level(Level::Info).target("t").args(args).build();
    logger.log(&record);
    logger.flush();
}
