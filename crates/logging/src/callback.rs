//! crates/logging/src/callback.rs
//! Pluggable emit indirection used by the severity entry points.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::level::LogLevel;

/// Opaque value registered alongside a callback.
///
/// The logger stores and forwards it unchanged; only the callback that
/// registered it gives it meaning, typically via [`Any::downcast_ref`].
pub type EmitContext = Arc<dyn Any + Send + Sync>;

/// Receiver for every message emitted through a [`Logger`](crate::Logger).
///
/// Custom callbacks see every message regardless of the configured threshold;
/// filtering is a property of the default emitter only. The return value is an
/// informational byte count and is handed back to the caller unchanged.
/// Implementations must not panic.
pub trait LogCallback: Send + Sync {
    /// Handles one message.
    fn emit(
        &self,
        context: Option<&(dyn Any + Send + Sync)>,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) -> i32;
}

impl<C> LogCallback for Arc<C>
where
    C: LogCallback + ?Sized,
{
    fn emit(
        &self,
        context: Option<&(dyn Any + Send + Sync)>,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) -> i32 {
        (**self).emit(context, level, args)
    }
}

/// Wraps a closure into a shareable [`LogCallback`].
///
/// ```
/// use std::sync::{Arc, Mutex};
/// use logging::{Logger, callback_fn};
///
/// let lines = Arc::new(Mutex::new(Vec::new()));
/// let sink = Arc::clone(&lines);
/// let logger = Logger::new();
/// logger
///     .set_callback(
///         Some(callback_fn(move |_, level, args| {
///             sink.lock().unwrap().push(format!("{level}: {args}"));
///             0
///         })),
///         None,
///     )
///     .unwrap();
///
/// logger.info(format_args!("probe {}", 3));
/// assert_eq!(lines.lock().unwrap().as_slice(), ["info: probe 3"]);
/// ```
pub fn callback_fn<F>(f: F) -> Arc<dyn LogCallback>
where
    F: Fn(Option<&(dyn Any + Send + Sync)>, LogLevel, fmt::Arguments<'_>) -> i32
        + Send
        + Sync
        + 'static,
{
    Arc::new(FnCallback(f))
}

struct FnCallback<F>(F);

impl<F> LogCallback for FnCallback<F>
where
    F: Fn(Option<&(dyn Any + Send + Sync)>, LogLevel, fmt::Arguments<'_>) -> i32 + Send + Sync,
{
    fn emit(
        &self,
        context: Option<&(dyn Any + Send + Sync)>,
        level: LogLevel,
        args: fmt::Arguments<'_>,
    ) -> i32 {
        (self.0)(context, level, args)
    }
}

/// Currently registered emitter.
#[derive(Clone, Default)]
pub(crate) enum Registration {
    /// Built-in filtering emitter writing to the logger's writer.
    #[default]
    Default,
    /// Host-supplied callback and its context.
    Custom {
        callback: Arc<dyn LogCallback>,
        context: Option<EmitContext>,
    },
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => f.write_str("Default"),
            Self::Custom { context, .. } => f
                .debug_struct("Custom")
                .field("has_context", &context.is_some())
                .finish_non_exhaustive(),
        }
    }
}
