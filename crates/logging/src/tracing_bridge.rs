//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and the logger.
//!
//! Two directions are supported:
//!
//! - [`LoggerLayer`]: a tracing-subscriber layer that feeds tracing events into
//!   a [`Logger`], so crates instrumented with `tracing` share the logger's
//!   threshold, decoration, and callback.
//! - [`TracingCallback`]: a [`LogCallback`] that re-emits every logger message
//!   as a tracing event with target [`TracingCallback::TARGET`], so hosts that
//!   already run a tracing subscriber can absorb the library's output.
//!
//! Severities map one to one, with [`LogLevel::Spew`] corresponding to
//! [`Level::TRACE`]. The layer ignores events carrying the callback's target so
//! both directions can be installed at once without looping.
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::init_tracing;
//!
//! init_tracing()?;
//! tracing::warn!("probe timed out after {} ms", 250);
//! ```

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use tracing::{Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::TryInitError;

use crate::callback::LogCallback;
use crate::global;
use crate::level::LogLevel;
use crate::logger::Logger;

/// A tracing layer that forwards events to a [`Logger`].
#[derive(Clone, Debug)]
pub struct LoggerLayer {
    target: LayerTarget,
}

#[derive(Clone, Debug)]
enum LayerTarget {
    Global,
    Owned(Arc<Logger>),
}

impl LoggerLayer {
    /// Forward events to the process-wide logger.
    #[must_use]
    pub const fn global() -> Self {
        Self {
            target: LayerTarget::Global,
        }
    }

    /// Forward events to `logger`.
    #[must_use]
    pub const fn new(logger: Arc<Logger>) -> Self {
        Self {
            target: LayerTarget::Owned(logger),
        }
    }

    fn logger(&self) -> &Logger {
        match &self.target {
            LayerTarget::Global => global::logger(),
            LayerTarget::Owned(logger) => logger,
        }
    }

    /// Map a tracing level to a logger severity.
    const fn severity(level: &Level) -> LogLevel {
        match *level {
            Level::ERROR => LogLevel::Error,
            Level::WARN => LogLevel::Warn,
            Level::INFO => LogLevel::Info,
            Level::DEBUG => LogLevel::Debug,
            Level::TRACE => LogLevel::Spew,
        }
    }
}

impl<S> Layer<S> for LoggerLayer
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if metadata.target() == TracingCallback::TARGET {
            return;
        }

        let logger = self.logger();
        let severity = Self::severity(metadata.level());
        if !logger.has_custom_callback() && !logger.enabled(severity) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            logger.log(severity, format_args!("{message}"));
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// A [`LogCallback`] that re-emits messages as tracing events.
///
/// Install it with [`Logger::set_callback`]; the tracing subscriber then
/// decides what is recorded, since custom callbacks bypass the logger's own
/// threshold. Messages at [`LogLevel::None`] are dropped. The return value is
/// the length of the formatted message.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingCallback;

impl TracingCallback {
    /// Target attached to every re-emitted event.
    pub const TARGET: &'static str = "hwlog";
}

impl LogCallback for TracingCallback {
    fn emit(
        &self,
        _context: Option<&(dyn Any + Send + Sync)>,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) -> i32 {
        let message = args.to_string();
        match level {
            LogLevel::None => return 0,
            LogLevel::Error => tracing::error!(target: "hwlog", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "hwlog", "{message}"),
            LogLevel::Info => tracing::info!(target: "hwlog", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "hwlog", "{message}"),
            LogLevel::Spew => tracing::trace!(target: "hwlog", "{message}"),
        }
        i32::try_from(message.len()).unwrap_or(i32::MAX)
    }
}

/// Install a global tracing subscriber that forwards every event to the
/// process-wide logger.
///
/// Fails when another global subscriber is already set.
pub fn init_tracing() -> Result<(), TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(LoggerLayer::global())
        .try_init()
}

/// Install a global tracing subscriber that applies `filter` before
/// forwarding events to the process-wide logger.
///
/// # Example
///
/// ```rust,ignore
/// use logging::init_tracing_with_filter;
/// use tracing_subscriber::EnvFilter;
///
/// init_tracing_with_filter(EnvFilter::from_default_env())?;
/// ```
pub fn init_tracing_with_filter<F>(filter: F) -> Result<(), TryInitError>
where
    F: Layer<tracing_subscriber::Registry> + Send + Sync + 'static,
{
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    tracing_subscriber::registry()
        .with(filter)
        .with(LoggerLayer::global())
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::callback::callback_fn;
    use crate::sink::SharedBuffer;
    use std::sync::Mutex;
    use tracing_subscriber::layer::SubscriberExt;

    fn capture(level: LogLevel) -> (Arc<Logger>, SharedBuffer) {
        let out = SharedBuffer::new();
        let logger = Logger::builder().writer(out.clone()).level(level).build();
        (Arc::new(logger), out)
    }

    #[test]
    fn test_severity_mapping() {
        assert_eq!(LoggerLayer::severity(&Level::ERROR), LogLevel::Error);
        assert_eq!(LoggerLayer::severity(&Level::WARN), LogLevel::Warn);
        assert_eq!(LoggerLayer::severity(&Level::INFO), LogLevel::Info);
        assert_eq!(LoggerLayer::severity(&Level::DEBUG), LogLevel::Debug);
        assert_eq!(LoggerLayer::severity(&Level::TRACE), LogLevel::Spew);
    }

    #[test]
    fn layer_respects_logger_threshold() {
        let (logger, out) = capture(LogLevel::Warn);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!("disk {} failed", 2);
            tracing::info!("hidden");
            tracing::trace!("hidden too");
        });

        assert_eq!(out.contents_lossy(), "hw: disk 2 failed\n");
    }

    #[test]
    fn layer_forwards_to_custom_callback_unfiltered() {
        let (logger, out) = capture(LogLevel::None);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        logger
            .set_callback(
                Some(callback_fn(move |_, level, args| {
                    sink.lock().unwrap().push((level, args.to_string()));
                    0
                })),
                None,
            )
            .unwrap();

        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));
        tracing::subscriber::with_default(subscriber, || {
            tracing::trace!(sample = 3, "tick");
        });

        assert!(out.is_empty());
        assert_eq!(
            seen.lock().unwrap().as_slice(),
            [(LogLevel::Spew, "tick".to_owned())]
        );
    }

    #[test]
    fn layer_skips_reemitted_events() {
        let (logger, out) = capture(LogLevel::Spew);
        let subscriber = tracing_subscriber::registry().with(LoggerLayer::new(logger));

        tracing::subscriber::with_default(subscriber, || {
            tracing::error!(target: "hwlog", "looped");
        });

        assert!(out.is_empty());
    }

    /// Records (level, target, message) of every event.
    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<(Level, String, String)>>>);

    impl<S: Subscriber> Layer<S> for Recorder {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            let mut visitor = MessageVisitor::default();
            event.record(&mut visitor);
            let metadata = event.metadata();
            self.0.lock().unwrap().push((
                *metadata.level(),
                metadata.target().to_owned(),
                visitor.message.unwrap_or_default(),
            ));
        }
    }

    #[test]
    fn callback_reemits_as_tracing_events() {
        let recorder = Recorder::default();
        let subscriber = tracing_subscriber::registry().with(recorder.clone());
        let logger = Logger::builder().writer(SharedBuffer::new()).build();
        logger
            .set_callback(Some(Arc::new(TracingCallback)), None)
            .unwrap();

        let written = tracing::subscriber::with_default(subscriber, || {
            logger.spew(format_args!("bytes {}", 16));
            logger.log(LogLevel::None, format_args!("dropped"));
            logger.error(format_args!("oops"))
        });

        assert_eq!(written, 4);
        assert_eq!(
            recorder.0.lock().unwrap().as_slice(),
            [
                (Level::TRACE, "hwlog".to_owned(), "bytes 16".to_owned()),
                (Level::ERROR, "hwlog".to_owned(), "oops".to_owned()),
            ]
        );
    }
}
