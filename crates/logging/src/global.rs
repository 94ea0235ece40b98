//! crates/logging/src/global.rs
//! Process-wide logger and the free-function entry points that drive it.
//!
//! The global instance is created lazily on first use with default state:
//! threshold [`LogLevel::Warn`], no decoration, domain `"hw: "`, the built-in
//! emitter, and standard error as the destination. Every function here
//! forwards to the matching [`Logger`] method.

use std::fmt;
use std::io;
use std::sync::{Arc, OnceLock};

use crate::callback::{EmitContext, LogCallback};
use crate::domain::IntoDomain;
use crate::error::LogError;
use crate::level::LogLevel;
use crate::logger::Logger;
use crate::options::LogOptions;
use crate::sink::BoxedWriter;

static LOGGER: OnceLock<Logger> = OnceLock::new();

/// Returns the process-wide logger.
pub fn logger() -> &'static Logger {
    LOGGER.get_or_init(Logger::new)
}

/// Sets the global verbosity threshold. See [`Logger::set_level`].
pub fn set_level<L>(level: L) -> Result<(), LogError>
where
    L: TryInto<LogLevel>,
    LogError: From<L::Error>,
{
    logger().set_level(level)
}

/// Returns the global verbosity threshold.
#[must_use]
pub fn level() -> LogLevel {
    logger().level()
}

/// Sets the global decoration flags. See [`Logger::set_options`].
pub fn set_options<O>(options: O) -> Result<(), LogError>
where
    O: TryInto<LogOptions>,
    LogError: From<O::Error>,
{
    logger().set_options(options)
}

/// Returns the global decoration flags.
#[must_use]
pub fn options() -> LogOptions {
    logger().options()
}

/// Sets the global domain prefix. See [`Logger::set_domain`].
pub fn set_domain(domain: impl IntoDomain) -> Result<(), LogError> {
    logger().set_domain(domain)
}

/// Returns a copy of the global domain prefix.
#[must_use]
pub fn domain() -> String {
    logger().domain()
}

/// Installs a custom callback on the global logger.
pub fn set_callback(
    callback: Option<Arc<dyn LogCallback>>,
    context: Option<EmitContext>,
) -> Result<(), LogError> {
    logger().set_callback(callback, context)
}

/// Restores the global built-in emitter.
pub fn reset_callback() {
    logger().reset_callback();
}

/// Redirects the global built-in emitter, returning the previous writer.
pub fn replace_writer<W>(writer: W) -> BoxedWriter
where
    W: io::Write + Send + 'static,
{
    logger().replace_writer(writer)
}

/// Emits through the global logger at an explicit severity.
pub fn log(level: LogLevel, args: fmt::Arguments<'_>) -> i32 {
    logger().log(level, args)
}

/// Emits a global spew message.
pub fn spew(args: fmt::Arguments<'_>) -> i32 {
    logger().spew(args)
}

/// Emits a global debug message.
pub fn debug(args: fmt::Arguments<'_>) -> i32 {
    logger().debug(args)
}

/// Emits a global info message.
pub fn info(args: fmt::Arguments<'_>) -> i32 {
    logger().info(args)
}

/// Emits a global warning.
pub fn warn(args: fmt::Arguments<'_>) -> i32 {
    logger().warn(args)
}

/// Emits a global error.
pub fn error(args: fmt::Arguments<'_>) -> i32 {
    logger().error(args)
}
