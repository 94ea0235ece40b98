//! crates/logging/src/emitter.rs
//! Line rendering for the built-in emitter.
//!
//! A rendered line has the shape
//! `[YYYYMMDD ][HHMMSS[,fraction] ][domain]<message>\n`, where the date and time
//! segments follow the active [`LogOptions`] and the domain is omitted when
//! empty.

use std::fmt::{self, Write as _};

use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::macros::format_description;

use crate::clock::Clock;
use crate::options::LogOptions;

const DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year][month][day] ");
const TIME_FORMAT: &[FormatItem<'static>] = format_description!("[hour][minute][second]");

/// Appends one complete line to `out`.
pub(crate) fn render_line(
    out: &mut String,
    options: LogOptions,
    clock: &dyn Clock,
    domain: &str,
    args: fmt::Arguments<'_>,
) {
    if options.wants_timestamp() {
        render_timestamp(out, options, clock);
    }
    out.push_str(domain);
    let _ = out.write_fmt(args);
    out.push('\n');
}

fn render_timestamp(out: &mut String, options: LogOptions, clock: &dyn Clock) {
    let utc = OffsetDateTime::from(clock.now());
    let stamp = if options.contains(LogOptions::UTC) {
        utc
    } else {
        match clock.local_offset(utc) {
            Ok(offset) => utc.to_offset(offset),
            Err(error) => {
                // Timestamp falls back to UTC; the message is still written.
                let _ = write!(out, "local time conversion failed: {error} ");
                utc
            }
        }
    };

    if options.contains(LogOptions::DATE) {
        push_formatted(out, stamp, DATE_FORMAT);
    }

    if options.wants_time() {
        push_formatted(out, stamp, TIME_FORMAT);
        if options.contains(LogOptions::TIME_US) {
            let _ = write!(out, ",{:06} ", stamp.microsecond());
        } else if options.contains(LogOptions::TIME_MS) {
            let _ = write!(out, ",{:03} ", stamp.millisecond());
        } else {
            out.push(' ');
        }
    }
}

fn push_formatted(out: &mut String, stamp: OffsetDateTime, format: &[FormatItem<'_>]) {
    if let Ok(text) = stamp.format(format) {
        out.push_str(&text);
    }
}
