//! Integration tests for concurrent configuration and emission.

use std::sync::Arc;
use std::thread;

use logging::{LogLevel, Logger, SharedBuffer, callback_fn};

/// Lines stay whole while another thread keeps swapping the domain.
#[test]
fn domain_swaps_never_tear_lines() {
    let out = SharedBuffer::new();
    let logger = Arc::new(Logger::builder().writer(out.clone()).build());

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..500 {
                logger.error(format_args!("msg {n}"));
            }
        })
    };
    let switcher = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..500 {
                let domain = if n % 2 == 0 { "a: " } else { "bb: " };
                logger.set_domain(domain).unwrap();
            }
        })
    };
    writer.join().unwrap();
    switcher.join().unwrap();

    let text = out.contents_lossy();
    assert_eq!(text.lines().count(), 500);
    for line in text.lines() {
        let rest = line
            .strip_prefix("hw: ")
            .or_else(|| line.strip_prefix("a: "))
            .or_else(|| line.strip_prefix("bb: "))
            .unwrap_or_else(|| panic!("unexpected prefix in {line:?}"));
        assert!(rest.starts_with("msg "), "{line:?}");
    }
}

/// Callback swaps racing with emission always hit one complete registration.
#[test]
fn callback_swaps_are_atomic() {
    let logger = Arc::new(Logger::builder().writer(SharedBuffer::new()).build());
    logger.set_level(LogLevel::None).unwrap();

    let swapper = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..200 {
                let tag = if n % 2 == 0 { 10 } else { 20 };
                let context: logging::EmitContext = Arc::new(tag);
                logger
                    .set_callback(
                        Some(callback_fn(move |context, _, _| {
                            let seen = context
                                .and_then(|c| c.downcast_ref::<i32>())
                                .copied()
                                .unwrap_or(-1);
                            // Pair mismatch shows up as a different return.
                            if seen == tag { tag } else { -1 }
                        })),
                        Some(context),
                    )
                    .unwrap();
            }
        })
    };

    for _ in 0..2_000 {
        let result = logger.warn(format_args!("ping"));
        assert!(matches!(result, 0 | 10 | 20), "mismatched pair: {result}");
    }
    swapper.join().unwrap();
}
