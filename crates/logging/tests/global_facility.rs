//! Integration tests for the process-wide logger and its free functions.
//!
//! All tests share one global instance, so each is `#[serial]` and starts by
//! restoring the default configuration with a fresh capture buffer.

use std::sync::{Arc, Mutex};

use logging::{
    InvalidArgument, LogLevel, LogOptions, SharedBuffer, callback_fn, log_at, log_debug,
    log_error, log_info, log_spew, log_warn,
};
use serial_test::serial;

fn reset_global() -> SharedBuffer {
    let out = SharedBuffer::new();
    logging::reset_callback();
    logging::replace_writer(out.clone());
    logging::set_level(LogLevel::Warn).unwrap();
    logging::set_options(LogOptions::NONE).unwrap();
    logging::set_domain("hw: ").unwrap();
    out.take();
    out
}

// ============================================================================
// Accessors
// ============================================================================

/// Verifies the global setters and getters agree.
#[test]
#[serial]
fn setters_are_visible_through_getters() {
    let _out = reset_global();

    logging::set_level(LogLevel::Info).unwrap();
    logging::set_options(LogOptions::DATE | LogOptions::TIME_MS).unwrap();
    logging::set_domain("la8: ").unwrap();

    assert_eq!(logging::level(), LogLevel::Info);
    assert_eq!(logging::options(), LogOptions::DATE | LogOptions::TIME_MS);
    assert_eq!(logging::domain(), "la8: ");
}

/// Verifies the returned domain is an independent copy.
#[test]
#[serial]
fn domain_copy_is_detached() {
    let _out = reset_global();
    logging::set_domain("dev: ").unwrap();

    let mut copy = logging::domain();
    copy.push_str("changed");

    assert_eq!(logging::domain(), "dev: ");
}

/// Verifies a forty character domain is cut to thirty.
#[test]
#[serial]
fn long_domain_is_truncated() {
    let _out = reset_global();
    let text = "abcdefghijklmnopqrstuvwxyz0123456789ABCD";
    assert_eq!(text.chars().count(), 40);

    logging::set_domain(text).unwrap();

    assert_eq!(logging::domain(), &text[..30]);
}

/// Verifies rejected values are reported through the error path.
#[test]
#[serial]
fn invalid_options_are_reported_and_ignored() {
    let out = reset_global();
    logging::set_options(LogOptions::UTC).unwrap();

    let err = logging::set_options(0x20).unwrap_err();

    assert_eq!(err.argument(), &InvalidArgument::Options(0x20));
    assert_eq!(logging::options(), LogOptions::UTC);
    assert_eq!(out.contents_lossy(), "hw: invalid log options 32.\n");
}

// ============================================================================
// Emission
// ============================================================================

/// Verifies the free functions and macros reach the global writer.
#[test]
#[serial]
fn free_functions_and_macros_share_the_global_logger() {
    let out = reset_global();
    logging::set_level(LogLevel::Spew).unwrap();
    out.take();

    logging::error(format_args!("a"));
    logging::warn(format_args!("b"));
    logging::info(format_args!("c"));
    logging::debug(format_args!("d"));
    logging::spew(format_args!("e"));
    log_error!("f{}", 1);
    log_warn!("g{}", 2);
    log_info!("h{}", 3);
    log_debug!("i{}", 4);
    log_spew!("j{}", 5);
    log_at!(LogLevel::Error, "k");

    let lines: Vec<_> = out
        .contents_lossy()
        .lines()
        .map(|line| line.trim_start_matches("hw: ").to_owned())
        .collect();
    assert_eq!(
        lines,
        ["a", "b", "c", "d", "e", "f1", "g2", "h3", "i4", "j5", "k"]
    );
}

/// Verifies debug confirmations are emitted after each setter.
#[test]
#[serial]
fn confirmations_follow_successful_setters() {
    let out = reset_global();

    logging::set_level(LogLevel::Debug).unwrap();
    logging::set_options(LogOptions::NONE).unwrap();
    logging::set_domain("x: ").unwrap();

    assert_eq!(
        out.contents_lossy(),
        "hw: log level set to 4.\nhw: log options set to 0.\nx: log domain set to 'x: '.\n"
    );
}

// ============================================================================
// Callback Registry
// ============================================================================

/// Verifies a custom callback sees its context and every severity.
#[test]
#[serial]
fn custom_callback_replaces_global_emitter() {
    let out = reset_global();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);

    logging::set_callback(
        Some(callback_fn(move |context, level, args| {
            let tag = context
                .and_then(|c| c.downcast_ref::<&str>())
                .copied()
                .unwrap_or("?");
            sink.lock().unwrap().push(format!("{tag}/{level}/{args}"));
            1
        })),
        Some(Arc::new("ctx")),
    )
    .unwrap();

    assert_eq!(logging::spew(format_args!("deep")), 1);
    assert_eq!(logging::error(format_args!("bad")), 1);
    logging::reset_callback();

    assert!(out.is_empty());
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["ctx/spew/deep", "ctx/error/bad"]
    );
}

/// Verifies a missing callback is rejected and the old one keeps working.
#[test]
#[serial]
fn null_callback_keeps_previous_sink() {
    let _out = reset_global();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    logging::set_callback(
        Some(callback_fn(move |_, _, args| {
            sink.lock().unwrap().push(args.to_string());
            0
        })),
        None,
    )
    .unwrap();

    let err = logging::set_callback(None, Some(Arc::new(5u8))).unwrap_err();
    logging::warn(format_args!("still routed"));
    logging::reset_callback();

    assert_eq!(err.argument(), &InvalidArgument::MissingCallback);
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        ["log callback was not provided.", "still routed"]
    );
}

/// Verifies reset recovers from a callback that drops everything.
#[test]
#[serial]
fn reset_recovers_from_broken_callback() {
    let out = reset_global();
    logging::set_callback(Some(callback_fn(|_, _, _| -1)), None).unwrap();
    assert_eq!(logging::error(format_args!("swallowed")), -1);

    logging::reset_callback();
    logging::error(format_args!("visible"));

    assert_eq!(out.contents_lossy(), "hw: visible\n");
}
