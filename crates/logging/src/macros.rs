//! crates/logging/src/macros.rs
//! Formatting macros for the severity entry points.
//!
//! Each macro accepts `format!`-style arguments and returns the emit result.
//! Without a prefix they target the process-wide logger; a leading
//! `logger: <expr>,` routes the message to a specific [`Logger`](crate::Logger)
//! (anything that derefs to one, e.g. `&Logger` or `Arc<Logger>`).

/// Emit at an explicit [`LogLevel`](crate::LogLevel).
///
/// # Example
/// ```
/// use logging::{LogLevel, Logger, SharedBuffer, log_at};
///
/// let out = SharedBuffer::new();
/// let logger = Logger::builder().writer(out.clone()).build();
/// log_at!(logger: logger, LogLevel::Error, "code {}", 5);
/// assert_eq!(out.contents_lossy(), "hw: code 5\n");
/// ```
#[macro_export]
macro_rules! log_at {
    (logger: $logger:expr, $level:expr, $($arg:tt)+) => {
        $crate::Logger::log(&$logger, $level, ::core::format_args!($($arg)+))
    };
    ($level:expr, $($arg:tt)+) => {
        $crate::log($level, ::core::format_args!($($arg)+))
    };
}

/// Emit an error.
///
/// # Example
/// ```ignore
/// log_error!("probe failed: {}", err);
/// ```
#[macro_export]
macro_rules! log_error {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::LogLevel::Error, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Error, $($arg)+)
    };
}

/// Emit a warning.
///
/// # Example
/// ```ignore
/// log_warn!("retrying transfer ({} left)", attempts);
/// ```
#[macro_export]
macro_rules! log_warn {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::LogLevel::Warn, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Warn, $($arg)+)
    };
}

/// Emit an informational message.
///
/// # Example
/// ```ignore
/// log_info!("found device {}", name);
/// ```
#[macro_export]
macro_rules! log_info {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::LogLevel::Info, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Info, $($arg)+)
    };
}

/// Emit a debug message.
///
/// # Example
/// ```ignore
/// log_debug!("samplerate set to {} Hz", rate);
/// ```
#[macro_export]
macro_rules! log_debug {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::LogLevel::Debug, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Debug, $($arg)+)
    };
}

/// Emit a spew message, the most verbose severity.
///
/// # Example
/// ```ignore
/// log_spew!("rx {:02x?}", packet);
/// ```
#[macro_export]
macro_rules! log_spew {
    (logger: $logger:expr, $($arg:tt)+) => {
        $crate::log_at!(logger: $logger, $crate::LogLevel::Spew, $($arg)+)
    };
    ($($arg:tt)+) => {
        $crate::log_at!($crate::LogLevel::Spew, $($arg)+)
    };
}
