//! crates/logging/src/logger.rs
//! Owned logger instance: threshold, decoration, domain, and callback registry.

use std::fmt;
use std::io;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::callback::{EmitContext, LogCallback, Registration};
use crate::clock::{Clock, SystemClock};
use crate::config::LogConfig;
use crate::domain::{IntoDomain, LogDomain};
use crate::emitter::render_line;
use crate::error::{InvalidArgument, LogError};
use crate::level::LogLevel;
use crate::options::LogOptions;
use crate::sink::{BoxedWriter, LineSink};

/// Self-contained logging facility.
///
/// A `Logger` owns one threshold, one option mask, one domain prefix, and one
/// (callback, context) pair. Messages enter through the severity methods
/// ([`error`](Self::error) through [`spew`](Self::spew)) and are forwarded to
/// the registered callback. Without a custom callback the built-in emitter
/// filters by threshold, decorates, and writes one line to the configured
/// writer (standard error unless the builder says otherwise).
///
/// All methods take `&self`; state is synchronized internally so one logger
/// can be shared across threads. The process-wide instance used by the free
/// functions of this crate is an ordinary `Logger`.
///
/// ```
/// use logging::{LogLevel, LogOptions, Logger, SharedBuffer};
///
/// let out = SharedBuffer::new();
/// let logger = Logger::builder().writer(out.clone()).build();
///
/// logger.set_level(LogLevel::Error)?;
/// logger.warn(format_args!("should be hidden"));
/// logger.error(format_args!("failed: {}", 42));
///
/// assert_eq!(out.contents_lossy(), "hw: failed: 42\n");
/// # Ok::<(), logging::LogError>(())
/// ```
pub struct Logger {
    level: AtomicU8,
    options: AtomicU8,
    domain: RwLock<Arc<LogDomain>>,
    registration: RwLock<Registration>,
    sink: LineSink,
    clock: Box<dyn Clock>,
}

impl Logger {
    /// Creates a logger with default state writing to standard error.
    #[must_use]
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Starts configuring a logger.
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::default()
    }

    /// Sets the verbosity threshold.
    ///
    /// Accepts a [`LogLevel`] or a raw `i32`. Raw values outside `0..=5` are
    /// rejected, reported at error severity, and leave the threshold as it
    /// was. On success a debug confirmation is emitted, which the new
    /// threshold may itself suppress.
    pub fn set_level<L>(&self, level: L) -> Result<(), LogError>
    where
        L: TryInto<LogLevel>,
        LogError: From<L::Error>,
    {
        let level = level
            .try_into()
            .map_err(|error| self.reject(LogError::from(error)))?;
        self.level.store(level.as_u8(), Ordering::Relaxed);
        self.debug(format_args!("log level set to {}.", level.as_u8()));
        Ok(())
    }

    /// Returns the verbosity threshold.
    #[must_use]
    pub fn level(&self) -> LogLevel {
        LogLevel::from_u8(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Sets the decoration flags.
    ///
    /// Accepts [`LogOptions`] or a raw `i32`; raw masks with bits outside
    /// [`LogOptions::ALL`] are rejected the same way as invalid levels.
    pub fn set_options<O>(&self, options: O) -> Result<(), LogError>
    where
        O: TryInto<LogOptions>,
        LogError: From<O::Error>,
    {
        let options = options
            .try_into()
            .map_err(|error| self.reject(LogError::from(error)))?;
        self.options.store(options.bits(), Ordering::Relaxed);
        self.debug(format_args!("log options set to {}.", options.bits()));
        Ok(())
    }

    /// Returns the decoration flags.
    #[must_use]
    pub fn options(&self) -> LogOptions {
        LogOptions::from_bits(self.options.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Replaces the domain prefix.
    ///
    /// Accepts `&str`, `&String`, `String`, [`LogDomain`], or an `Option` of
    /// those. `None` is rejected. Text longer than [`LogDomain::MAX_CHARS`]
    /// characters is truncated silently; an empty string disables the prefix.
    pub fn set_domain(&self, domain: impl IntoDomain) -> Result<(), LogError> {
        let Some(domain) = domain.into_domain() else {
            return Err(self.reject(InvalidArgument::MissingDomain.into()));
        };
        let domain = Arc::new(domain);
        *self.write_domain() = Arc::clone(&domain);
        self.debug(format_args!("log domain set to '{domain}'."));
        Ok(())
    }

    /// Returns a copy of the domain prefix.
    #[must_use]
    pub fn domain(&self) -> String {
        self.read_domain().as_str().to_owned()
    }

    /// Installs a custom callback and its opaque context.
    ///
    /// `None` is rejected and the previous callback stays active. Both values
    /// are replaced together. No confirmation is logged.
    pub fn set_callback(
        &self,
        callback: Option<Arc<dyn LogCallback>>,
        context: Option<EmitContext>,
    ) -> Result<(), LogError> {
        let Some(callback) = callback else {
            return Err(self.reject(InvalidArgument::MissingCallback.into()));
        };
        *self.write_registration() = Registration::Custom { callback, context };
        Ok(())
    }

    /// Restores the built-in emitter and drops any registered context.
    ///
    /// Never fails and never logs, so it stays usable when the current
    /// callback misbehaves.
    pub fn reset_callback(&self) {
        *self.write_registration() = Registration::Default;
    }

    /// Reports whether a custom callback is installed.
    #[must_use]
    pub fn has_custom_callback(&self) -> bool {
        matches!(*self.read_registration(), Registration::Custom { .. })
    }

    /// Swaps the built-in emitter's writer, returning the previous one.
    pub fn replace_writer<W>(&self, writer: W) -> BoxedWriter
    where
        W: io::Write + Send + 'static,
    {
        self.sink.replace_writer(Box::new(writer))
    }

    /// Captures the current threshold, flags, and domain.
    #[must_use]
    pub fn config(&self) -> LogConfig {
        LogConfig {
            level: self.level(),
            options: self.options(),
            domain: self.domain(),
        }
    }

    /// Applies a configuration snapshot through the regular setters.
    pub fn apply_config(&self, config: &LogConfig) {
        // Typed values and present domains are never rejected.
        let _ = self.set_level(config.level);
        let _ = self.set_options(config.options);
        let _ = self.set_domain(&config.domain);
    }

    /// Emits a message at `level` through the registered callback.
    ///
    /// Returns the callback's result unchanged. For the built-in emitter this
    /// is the number of bytes written, or `0` when the message was filtered.
    pub fn log(&self, level: LogLevel, args: fmt::Arguments<'_>) -> i32 {
        let custom = match &*self.read_registration() {
            Registration::Default => None,
            Registration::Custom { callback, context } => {
                Some((Arc::clone(callback), context.clone()))
            }
        };

        match custom {
            None => self.emit_default(level, args),
            Some((callback, context)) => callback.emit(context.as_deref(), level, args),
        }
    }

    /// Emits at [`LogLevel::Spew`].
    pub fn spew(&self, args: fmt::Arguments<'_>) -> i32 {
        self.log(LogLevel::Spew, args)
    }

    /// Emits at [`LogLevel::Debug`].
    pub fn debug(&self, args: fmt::Arguments<'_>) -> i32 {
        self.log(LogLevel::Debug, args)
    }

    /// Emits at [`LogLevel::Info`].
    pub fn info(&self, args: fmt::Arguments<'_>) -> i32 {
        self.log(LogLevel::Info, args)
    }

    /// Emits at [`LogLevel::Warn`].
    pub fn warn(&self, args: fmt::Arguments<'_>) -> i32 {
        self.log(LogLevel::Warn, args)
    }

    /// Emits at [`LogLevel::Error`].
    pub fn error(&self, args: fmt::Arguments<'_>) -> i32 {
        self.log(LogLevel::Error, args)
    }

    /// Reports whether the built-in emitter would write a message at `level`.
    #[inline]
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        self.level().permits(level)
    }

    fn emit_default(&self, level: LogLevel, args: fmt::Arguments<'_>) -> i32 {
        if !self.enabled(level) {
            return 0;
        }

        // Snapshot before rendering: formatting `args` may log or reconfigure.
        let options = self.options();
        let domain = Arc::clone(&*self.read_domain());
        let written = self.sink.write_line(|line| {
            render_line(line, options, self.clock.as_ref(), domain.as_str(), args);
        });
        i32::try_from(written).unwrap_or(i32::MAX)
    }

    fn reject(&self, error: LogError) -> LogError {
        self.error(format_args!("{}.", error.argument()));
        error
    }

    fn read_domain(&self) -> RwLockReadGuard<'_, Arc<LogDomain>> {
        self.domain.read().unwrap_or_else(|poison| poison.into_inner())
    }

    fn write_domain(&self) -> RwLockWriteGuard<'_, Arc<LogDomain>> {
        self.domain.write().unwrap_or_else(|poison| poison.into_inner())
    }

    fn read_registration(&self) -> RwLockReadGuard<'_, Registration> {
        self.registration
            .read()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    fn write_registration(&self) -> RwLockWriteGuard<'_, Registration> {
        self.registration
            .write()
            .unwrap_or_else(|poison| poison.into_inner())
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("level", &self.level())
            .field("options", &self.options())
            .field("domain", &**self.read_domain())
            .field("registration", &*self.read_registration())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logger`] instances with a non-default writer, clock, or
/// initial configuration. Initial values are applied without confirmation
/// messages.
pub struct LoggerBuilder {
    writer: Option<BoxedWriter>,
    clock: Option<Box<dyn Clock>>,
    config: LogConfig,
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self {
            writer: None,
            clock: None,
            config: LogConfig::default(),
        }
    }
}

impl LoggerBuilder {
    /// Sends built-in emitter output to `writer` instead of standard error.
    #[must_use]
    pub fn writer<W>(mut self, writer: W) -> Self
    where
        W: io::Write + Send + 'static,
    {
        self.writer = Some(Box::new(writer));
        self
    }

    /// Reads timestamps from `clock` instead of the system clock.
    #[must_use]
    pub fn clock<C>(mut self, clock: C) -> Self
    where
        C: Clock + 'static,
    {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Initial threshold.
    #[must_use]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.config.level = level;
        self
    }

    /// Initial decoration flags.
    #[must_use]
    pub fn options(mut self, options: LogOptions) -> Self {
        self.config.options = options;
        self
    }

    /// Initial domain prefix, truncated like [`Logger::set_domain`].
    #[must_use]
    pub fn domain(mut self, domain: &str) -> Self {
        domain.clone_into(&mut self.config.domain);
        self
    }

    /// Initial threshold, flags, and domain taken from a snapshot.
    #[must_use]
    pub fn config(mut self, config: LogConfig) -> Self {
        self.config = config;
        self
    }

    /// Finishes the logger.
    #[must_use]
    pub fn build(self) -> Logger {
        let writer = self
            .writer
            .unwrap_or_else(|| Box::new(io::stderr()) as BoxedWriter);
        let clock = self
            .clock
            .unwrap_or_else(|| Box::new(SystemClock) as Box<dyn Clock>);

        Logger {
            level: AtomicU8::new(self.config.level.as_u8()),
            options: AtomicU8::new(self.config.options.bits()),
            domain: RwLock::new(Arc::new(LogDomain::new(&self.config.domain))),
            registration: RwLock::new(Registration::Default),
            sink: LineSink::new(writer),
            clock,
        }
    }
}

impl fmt::Debug for LoggerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggerBuilder")
            .field("has_writer", &self.writer.is_some())
            .field("has_clock", &self.clock.is_some())
            .field("config", &self.config)
            .finish()
    }
}
